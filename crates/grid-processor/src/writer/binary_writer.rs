//! Flat `u8` data file: `ntimes * nlat * nlon` bytes, no header.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use sst_common::GridShape;

use super::{WrittenFile, BINARY_DATA_FILE};
use crate::error::{GridProcessorError, Result};

pub struct BinaryDataWriter {
    out: BufWriter<File>,
    path: PathBuf,
    shape: GridShape,
    frames_written: usize,
}

impl BinaryDataWriter {
    /// Create `sst_data.bin` in `dir` for a grid of `shape`.
    pub fn create(dir: &Path, shape: GridShape) -> Result<Self> {
        let path = dir.join(BINARY_DATA_FILE);
        let out = BufWriter::new(File::create(&path)?);
        Ok(Self {
            out,
            path,
            shape,
            frames_written: 0,
        })
    }

    /// Append one encoded frame.
    pub fn write_frame(&mut self, codes: &[u8]) -> Result<()> {
        let expected = self.shape.cells_per_frame();
        if codes.len() != expected {
            return Err(GridProcessorError::shape_mismatch(format!(
                "encoded frame has {} bytes, expected {}",
                codes.len(),
                expected
            )));
        }
        if self.frames_written >= self.shape.ntimes {
            return Err(GridProcessorError::shape_mismatch(format!(
                "all {} frames already written",
                self.shape.ntimes
            )));
        }

        self.out.write_all(codes)?;
        self.frames_written += 1;
        Ok(())
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Flush and check the file holds exactly `ntimes * nlat * nlon` bytes.
    pub fn finish(mut self) -> Result<WrittenFile> {
        self.out.flush()?;
        drop(self.out);

        let written = WrittenFile::from_path(&self.path)?;
        let expected = self.shape.total_cells() as u64;
        if written.bytes != expected {
            return Err(GridProcessorError::shape_mismatch(format!(
                "{} holds {} bytes, expected {} ({} frames of {} x {})",
                self.path.display(),
                written.bytes,
                expected,
                self.shape.ntimes,
                self.shape.nlat,
                self.shape.nlon
            )));
        }
        Ok(written)
    }
}
