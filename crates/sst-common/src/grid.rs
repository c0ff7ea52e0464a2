//! Grid shape of a gridded time series.

use serde::{Deserialize, Serialize};

/// Dimensions of a `(time, lat, lon)` time series.
///
/// Frames are stored row-major: latitude rows, longitude columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub ntimes: usize,
    pub nlat: usize,
    pub nlon: usize,
}

impl GridShape {
    pub fn new(ntimes: usize, nlat: usize, nlon: usize) -> Self {
        Self { ntimes, nlat, nlon }
    }

    /// Number of cells in a single time step.
    pub fn cells_per_frame(&self) -> usize {
        self.nlat * self.nlon
    }

    /// Number of cells across all time steps.
    pub fn total_cells(&self) -> usize {
        self.ntimes * self.cells_per_frame()
    }

    /// Get the 1D index of a cell within a frame.
    pub fn flat_index(&self, lat: usize, lon: usize) -> usize {
        lat * self.nlon + lon
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.total_cells() == 0
    }
}
