//! Bounding box types for regular lat/lon grids.

use serde::{Deserialize, Serialize};

/// Extent of the coordinate values themselves (grid point centers).
///
/// Serialized with the camelCase keys the web client reads
/// (`minLon`, `maxLon`, `minLat`, `maxLat`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateBounds {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl CoordinateBounds {
    /// Compute the min/max of both coordinate vectors.
    ///
    /// Returns `None` if either axis is empty.
    pub fn from_coords(lons: &[f64], lats: &[f64]) -> Option<Self> {
        let (min_lon, max_lon) = min_max(lons)?;
        let (min_lat, max_lat) = min_max(lats)?;
        Some(Self {
            min_lon,
            max_lon,
            min_lat,
            max_lat,
        })
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }
}

/// Outer edges of a grid whose coordinates are cell centers.
///
/// Each edge is the outermost coordinate padded by half a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellBounds {
    pub north: f64,
    pub south: f64,
    pub west: f64,
    pub east: f64,
}

impl CellBounds {
    /// Build from coordinates already in display order: longitudes
    /// west to east, latitudes north to south.
    pub fn from_sorted(lons: &[f64], lats: &[f64]) -> Option<Self> {
        let half_lon = half_cell(lons);
        let half_lat = half_cell(lats);

        Some(Self {
            north: lats.first()? + half_lat,
            south: lats.last()? - half_lat,
            west: lons.first()? - half_lon,
            east: lons.last()? + half_lon,
        })
    }

    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        lon >= self.west && lon <= self.east && lat >= self.south && lat <= self.north
    }
}

/// Half the spacing between the first two points of an axis.
///
/// Single-point axes have no spacing, so the half cell is 0.
pub fn half_cell(axis: &[f64]) -> f64 {
    match axis {
        [a, b, ..] => (b - a).abs() / 2.0,
        _ => 0.0,
    }
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_bounds() {
        let lons = [-178.0, -176.0, 0.0, 178.0];
        let lats = [88.0, 0.0, -88.0];
        let bounds = CoordinateBounds::from_coords(&lons, &lats).unwrap();

        assert_eq!(bounds.min_lon, -178.0);
        assert_eq!(bounds.max_lon, 178.0);
        assert_eq!(bounds.min_lat, -88.0);
        assert_eq!(bounds.max_lat, 88.0);
        assert_eq!(bounds.width(), 356.0);
    }

    #[test]
    fn test_coordinate_bounds_empty() {
        assert!(CoordinateBounds::from_coords(&[], &[1.0]).is_none());
        assert!(CoordinateBounds::from_coords(&[1.0], &[]).is_none());
    }

    #[test]
    fn test_coordinate_bounds_serializes_camel_case() {
        let bounds = CoordinateBounds::from_coords(&[-10.0, 10.0], &[-5.0, 5.0]).unwrap();
        let json = serde_json::to_value(bounds).unwrap();

        assert_eq!(json["minLon"], -10.0);
        assert_eq!(json["maxLon"], 10.0);
        assert_eq!(json["minLat"], -5.0);
        assert_eq!(json["maxLat"], 5.0);
    }

    #[test]
    fn test_cell_bounds_half_cell_padding() {
        // ERSST-like 2 degree grid
        let lons = [-178.0, -176.0, 176.0, 178.0];
        let lats = [88.0, 86.0, -86.0, -88.0];
        let bounds = CellBounds::from_sorted(&lons, &lats).unwrap();

        assert_eq!(bounds.north, 89.0);
        assert_eq!(bounds.south, -89.0);
        assert_eq!(bounds.west, -179.0);
        assert_eq!(bounds.east, 179.0);
        assert!(bounds.contains_point(0.0, 0.0));
        assert!(!bounds.contains_point(0.0, 89.5));
    }

    #[test]
    fn test_half_cell_single_point() {
        assert_eq!(half_cell(&[5.0]), 0.0);
        assert_eq!(half_cell(&[]), 0.0);
        assert_eq!(half_cell(&[10.0, 7.0]), 1.5);
    }
}
