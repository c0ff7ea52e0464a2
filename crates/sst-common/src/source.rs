//! The frame source abstraction shared by loaders and pipelines.

use chrono::NaiveDateTime;

use crate::GridShape;

/// A gridded `(time, lat, lon)` dataset that can be read one time step at a time.
///
/// Coordinates are returned exactly as stored in the source; normalization
/// (longitude wrapping, latitude flipping) happens downstream.
pub trait FrameSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Longitude coordinate vector.
    fn lons(&self) -> &[f64];

    /// Latitude coordinate vector.
    fn lats(&self) -> &[f64];

    /// Decoded time stamps, one per frame.
    fn times(&self) -> &[NaiveDateTime];

    /// Read frame `index` as a row-major `nlat * nlon` vector. Missing cells are NaN.
    fn read_frame(&self, index: usize) -> Result<Vec<f32>, Self::Error>;

    fn shape(&self) -> GridShape {
        GridShape::new(self.times().len(), self.lats().len(), self.lons().len())
    }
}

impl<S: FrameSource + ?Sized> FrameSource for &S {
    type Error = S::Error;

    fn lons(&self) -> &[f64] {
        (**self).lons()
    }

    fn lats(&self) -> &[f64] {
        (**self).lats()
    }

    fn times(&self) -> &[NaiveDateTime] {
        (**self).times()
    }

    fn read_frame(&self, index: usize) -> Result<Vec<f32>, Self::Error> {
        (**self).read_frame(index)
    }
}

/// A frame source backed by vectors in memory.
#[derive(Debug, Clone)]
pub struct MemorySource {
    lons: Vec<f64>,
    lats: Vec<f64>,
    times: Vec<NaiveDateTime>,
    frames: Vec<Vec<f32>>,
}

impl MemorySource {
    /// Create a source, checking that every frame matches the coordinate shape.
    pub fn new(
        lons: Vec<f64>,
        lats: Vec<f64>,
        times: Vec<NaiveDateTime>,
        frames: Vec<Vec<f32>>,
    ) -> Result<Self, MemorySourceError> {
        if frames.len() != times.len() {
            return Err(MemorySourceError::FrameCount {
                frames: frames.len(),
                times: times.len(),
            });
        }

        let expected = lons.len() * lats.len();
        if let Some((index, frame)) = frames.iter().enumerate().find(|(_, f)| f.len() != expected) {
            return Err(MemorySourceError::FrameSize {
                index,
                expected,
                actual: frame.len(),
            });
        }

        Ok(Self {
            lons,
            lats,
            times,
            frames,
        })
    }
}

impl FrameSource for MemorySource {
    type Error = MemorySourceError;

    fn lons(&self) -> &[f64] {
        &self.lons
    }

    fn lats(&self) -> &[f64] {
        &self.lats
    }

    fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    fn read_frame(&self, index: usize) -> Result<Vec<f32>, Self::Error> {
        self.frames
            .get(index)
            .cloned()
            .ok_or(MemorySourceError::OutOfRange {
                index,
                ntimes: self.frames.len(),
            })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MemorySourceError {
    #[error("{frames} frames supplied for {times} time stamps")]
    FrameCount { frames: usize, times: usize },

    #[error("frame {index} has {actual} cells, expected {expected}")]
    FrameSize {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("frame index {index} out of range (ntimes = {ntimes})")]
    OutOfRange { index: usize, ntimes: usize },
}
