//! Tests for coordinate and cell bounds on realistic SST grids.

use sst_common::{CellBounds, CoordinateBounds};

/// ERSST v5 longitudes after wrapping to -180..180 and sorting.
fn ersst_lons() -> Vec<f64> {
    (0..180).map(|i| -178.0 + 2.0 * i as f64).collect()
}

/// ERSST v5 latitudes, north to south.
fn ersst_lats() -> Vec<f64> {
    (0..89).map(|i| 88.0 - 2.0 * i as f64).collect()
}

// ============================================================================
// Coordinate bounds
// ============================================================================

#[test]
fn test_ersst_coordinate_bounds() {
    let bounds = CoordinateBounds::from_coords(&ersst_lons(), &ersst_lats()).unwrap();
    assert_eq!(bounds.min_lon, -178.0);
    assert_eq!(bounds.max_lon, 180.0);
    assert_eq!(bounds.min_lat, -88.0);
    assert_eq!(bounds.max_lat, 88.0);
}

#[test]
fn test_coordinate_bounds_ignores_order() {
    let lats_south_first: Vec<f64> = ersst_lats().into_iter().rev().collect();
    let a = CoordinateBounds::from_coords(&ersst_lons(), &ersst_lats()).unwrap();
    let b = CoordinateBounds::from_coords(&ersst_lons(), &lats_south_first).unwrap();
    assert_eq!(a, b);
}

// ============================================================================
// Cell bounds
// ============================================================================

#[test]
fn test_ersst_cell_bounds() {
    let bounds = CellBounds::from_sorted(&ersst_lons(), &ersst_lats()).unwrap();
    assert_eq!(bounds.north, 89.0);
    assert_eq!(bounds.south, -89.0);
    assert_eq!(bounds.west, -179.0);
    assert_eq!(bounds.east, 181.0);
}

#[test]
fn test_cell_bounds_single_cell() {
    let bounds = CellBounds::from_sorted(&[10.0], &[20.0]).unwrap();
    assert_eq!(bounds.west, 10.0);
    assert_eq!(bounds.east, 10.0);
    assert_eq!(bounds.north, 20.0);
    assert_eq!(bounds.south, 20.0);
}

#[test]
fn test_cell_bounds_empty_axis() {
    assert!(CellBounds::from_sorted(&[], &[1.0, 2.0]).is_none());
}

#[test]
fn test_cell_bounds_json_keys() {
    let bounds = CellBounds::from_sorted(&[0.0, 2.0], &[2.0, 0.0]).unwrap();
    let json = serde_json::to_value(bounds).unwrap();
    assert_eq!(json["north"], 3.0);
    assert_eq!(json["south"], -1.0);
    assert_eq!(json["west"], -1.0);
    assert_eq!(json["east"], 3.0);
}
