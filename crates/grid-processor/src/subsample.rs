//! Strided views over a frame source.

use chrono::NaiveDateTime;
use sst_common::FrameSource;

use crate::error::{GridProcessorError, Result};

/// Every `time_step`-th frame, and every `spatial_step`-th row and column.
///
/// Strides start at index 0, so the first frame, row and column are always
/// kept. A stride of 1 leaves that axis untouched.
#[derive(Debug)]
pub struct Subsampled<S> {
    inner: S,
    time_step: usize,
    spatial_step: usize,
    lons: Vec<f64>,
    lats: Vec<f64>,
    times: Vec<NaiveDateTime>,
}

impl<S: FrameSource> Subsampled<S> {
    pub fn new(inner: S, time_step: usize, spatial_step: usize) -> Result<Self> {
        if time_step == 0 {
            return Err(GridProcessorError::invalid_config("time step must be > 0"));
        }
        if spatial_step == 0 {
            return Err(GridProcessorError::invalid_config(
                "spatial subsample must be > 0",
            ));
        }

        let lons = inner.lons().iter().copied().step_by(spatial_step).collect();
        let lats = inner.lats().iter().copied().step_by(spatial_step).collect();
        let times = inner.times().iter().copied().step_by(time_step).collect();

        Ok(Self {
            inner,
            time_step,
            spatial_step,
            lons,
            lats,
            times,
        })
    }

    pub fn time_step(&self) -> usize {
        self.time_step
    }

    pub fn spatial_step(&self) -> usize {
        self.spatial_step
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: FrameSource> FrameSource for Subsampled<S> {
    type Error = GridProcessorError;

    fn lons(&self) -> &[f64] {
        &self.lons
    }

    fn lats(&self) -> &[f64] {
        &self.lats
    }

    fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    fn read_frame(&self, index: usize) -> Result<Vec<f32>> {
        if index >= self.times.len() {
            return Err(GridProcessorError::shape_mismatch(format!(
                "frame index {} out of range (ntimes = {})",
                index,
                self.times.len()
            )));
        }

        let frame = self
            .inner
            .read_frame(index * self.time_step)
            .map_err(GridProcessorError::from_source)?;

        if self.spatial_step == 1 {
            return Ok(frame);
        }

        let nlon = self.inner.lons().len();
        let nlat = self.inner.lats().len();
        if frame.len() != nlat * nlon {
            return Err(GridProcessorError::shape_mismatch(format!(
                "source frame has {} cells, expected {} x {}",
                frame.len(),
                nlat,
                nlon
            )));
        }

        let mut out = Vec::with_capacity(self.lats.len() * self.lons.len());
        for row in (0..nlat).step_by(self.spatial_step) {
            let src = &frame[row * nlon..(row + 1) * nlon];
            out.extend(src.iter().step_by(self.spatial_step));
        }
        Ok(out)
    }
}
