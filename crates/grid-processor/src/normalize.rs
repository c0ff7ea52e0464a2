//! Spatial normalization of regular lat/lon grids.
//!
//! Source longitudes run `[0, 360)`; web maps expect `(-180, 180]` in
//! ascending order. Latitudes are either kept in source order or flipped so
//! row 0 is the northernmost row (image convention).

use serde::{Deserialize, Serialize};
use sst_common::{CellBounds, CoordinateBounds};
use tracing::debug;

use crate::error::{GridProcessorError, Result};

/// Map a longitude in `[0, 360)` to `(-180, 180]`.
///
/// Values at or below 180 are returned unchanged, so inputs already in
/// `[-180, 180]` pass through.
pub fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else {
        lon
    }
}

/// Row order of the normalized grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatitudeOrder {
    /// Keep the rows in source order.
    #[default]
    AsIs,
    /// Northernmost row first.
    NorthToSouth,
}

/// Precomputed row and column permutations for a grid.
///
/// Built once from the coordinate vectors and applied to every frame.
#[derive(Debug, Clone)]
pub struct SpatialNormalizer {
    lon_perm: Vec<usize>,
    lat_perm: Vec<usize>,
    lons: Vec<f64>,
    lats: Vec<f64>,
    coordinate_bounds: CoordinateBounds,
    cell_bounds: CellBounds,
}

impl SpatialNormalizer {
    pub fn new(lons: &[f64], lats: &[f64], order: LatitudeOrder) -> Result<Self> {
        if lons.is_empty() || lats.is_empty() {
            return Err(GridProcessorError::invalid_coordinates(format!(
                "empty axis ({} lons, {} lats)",
                lons.len(),
                lats.len()
            )));
        }
        if let Some(i) = lons.iter().position(|v| v.is_nan()) {
            return Err(GridProcessorError::invalid_coordinates(format!(
                "longitude {} is NaN",
                i
            )));
        }
        if let Some(i) = lats.iter().position(|v| v.is_nan()) {
            return Err(GridProcessorError::invalid_coordinates(format!(
                "latitude {} is NaN",
                i
            )));
        }

        let wrapped: Vec<f64> = lons.iter().map(|&lon| wrap_longitude(lon)).collect();

        // sort_by is stable, so equal keys keep source order
        let mut lon_perm: Vec<usize> = (0..wrapped.len()).collect();
        lon_perm.sort_by(|&a, &b| wrapped[a].total_cmp(&wrapped[b]));

        let sorted_lons: Vec<f64> = lon_perm.iter().map(|&i| wrapped[i]).collect();
        if let Some(pair) = sorted_lons.windows(2).find(|w| w[0] >= w[1]) {
            return Err(GridProcessorError::invalid_coordinates(format!(
                "duplicate longitude {} after wrapping to -180..180",
                pair[1]
            )));
        }

        let mut lat_perm: Vec<usize> = (0..lats.len()).collect();
        if order == LatitudeOrder::NorthToSouth {
            lat_perm.sort_by(|&a, &b| lats[b].total_cmp(&lats[a]));
        }
        let sorted_lats: Vec<f64> = lat_perm.iter().map(|&i| lats[i]).collect();

        let coordinate_bounds = CoordinateBounds::from_coords(&sorted_lons, &sorted_lats)
            .ok_or_else(|| GridProcessorError::invalid_coordinates("empty axis"))?;
        let cell_bounds = CellBounds::from_sorted(&sorted_lons, &sorted_lats)
            .ok_or_else(|| GridProcessorError::invalid_coordinates("empty axis"))?;

        debug!(
            nlat = sorted_lats.len(),
            nlon = sorted_lons.len(),
            ?order,
            first_lon = sorted_lons[0],
            first_lat = sorted_lats[0],
            "Built spatial normalizer"
        );

        Ok(Self {
            lon_perm,
            lat_perm,
            lons: sorted_lons,
            lats: sorted_lats,
            coordinate_bounds,
            cell_bounds,
        })
    }

    /// Reorder one row-major frame: `out[i][j] = in[lat_perm[i]][lon_perm[j]]`.
    pub fn apply(&self, frame: &[f32]) -> Result<Vec<f32>> {
        let nlon = self.lons.len();
        let expected = self.lats.len() * nlon;
        if frame.len() != expected {
            return Err(GridProcessorError::shape_mismatch(format!(
                "frame has {} cells, grid is {} x {} = {}",
                frame.len(),
                self.lats.len(),
                nlon,
                expected
            )));
        }

        let mut out = Vec::with_capacity(expected);
        for &row in &self.lat_perm {
            let src = &frame[row * nlon..(row + 1) * nlon];
            out.extend(self.lon_perm.iter().map(|&col| src[col]));
        }
        Ok(out)
    }

    /// Longitudes in output order (strictly ascending, within `(-180, 180]`).
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitudes in output order.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lon_permutation(&self) -> &[usize] {
        &self.lon_perm
    }

    pub fn lat_permutation(&self) -> &[usize] {
        &self.lat_perm
    }

    pub fn nlat(&self) -> usize {
        self.lats.len()
    }

    pub fn nlon(&self) -> usize {
        self.lons.len()
    }

    /// Min/max of the output coordinates.
    pub fn coordinate_bounds(&self) -> CoordinateBounds {
        self.coordinate_bounds
    }

    /// Outer cell edges of the output grid.
    pub fn cell_bounds(&self) -> CellBounds {
        self.cell_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(180.0), 180.0);
        assert_eq!(wrap_longitude(182.0), -178.0);
        assert_eq!(wrap_longitude(358.0), -2.0);
        assert_eq!(wrap_longitude(-90.0), -90.0);
    }

    #[test]
    fn test_longitude_permutation() {
        let lons = [0.0, 90.0, 180.0, 270.0];
        let lats = [10.0];
        let norm = SpatialNormalizer::new(&lons, &lats, LatitudeOrder::AsIs).unwrap();

        assert_eq!(norm.lons(), &[-90.0, 0.0, 90.0, 180.0]);
        assert_eq!(norm.lon_permutation(), &[3, 0, 1, 2]);

        let out = norm.apply(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(out, vec![4.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_north_to_south_flip() {
        let lons = [0.0, 1.0];
        let lats = [-10.0, 0.0, 10.0];
        let norm = SpatialNormalizer::new(&lons, &lats, LatitudeOrder::NorthToSouth).unwrap();

        assert_eq!(norm.lats(), &[10.0, 0.0, -10.0]);
        let frame = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(norm.apply(&frame).unwrap(), vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn test_as_is_keeps_latitude_order() {
        let lats = [-10.0, 0.0, 10.0];
        let norm = SpatialNormalizer::new(&[0.0], &lats, LatitudeOrder::AsIs).unwrap();
        assert_eq!(norm.lats(), &lats);
        assert_eq!(norm.lat_permutation(), &[0, 1, 2]);
    }

    #[test]
    fn test_duplicate_longitude_rejected() {
        // 0 and 360 collide, as do 270 and -90
        let result = SpatialNormalizer::new(&[0.0, 270.0, -90.0], &[0.0], LatitudeOrder::AsIs);
        assert!(matches!(result, Err(GridProcessorError::InvalidCoordinates(_))));
    }

    #[test]
    fn test_nan_and_empty_rejected() {
        assert!(SpatialNormalizer::new(&[f64::NAN], &[0.0], LatitudeOrder::AsIs).is_err());
        assert!(SpatialNormalizer::new(&[0.0], &[f64::NAN], LatitudeOrder::AsIs).is_err());
        assert!(SpatialNormalizer::new(&[], &[0.0], LatitudeOrder::AsIs).is_err());
    }

    #[test]
    fn test_apply_wrong_length() {
        let norm = SpatialNormalizer::new(&[0.0, 1.0], &[0.0], LatitudeOrder::AsIs).unwrap();
        assert!(matches!(
            norm.apply(&[1.0, 2.0, 3.0]),
            Err(GridProcessorError::ShapeMismatch(_))
        ));
    }

    #[test]
    fn test_single_point_grid() {
        let norm = SpatialNormalizer::new(&[200.0], &[5.0], LatitudeOrder::NorthToSouth).unwrap();
        assert_eq!(norm.lons(), &[-160.0]);
        let cells = norm.cell_bounds();
        assert_eq!(cells.west, -160.0);
        assert_eq!(cells.north, 5.0);
    }
}
