//! Output writers for the web formats.
//!
//! - [`metadata`]: grid description files (`metadata.json`)
//! - [`json_writer`]: `{"data": [time][lat][lon]}` as plain and gzipped JSON
//! - [`binary_writer`]: flat `u8` stream, one frame after another

pub mod binary_writer;
pub mod json_writer;
pub mod metadata;

use std::path::{Path, PathBuf};

pub use binary_writer::BinaryDataWriter;
pub use json_writer::JsonDataWriter;
pub use metadata::{
    write_metadata, BinaryMetadata, ByteEncodingInfo, CentiDegreeEncodingInfo, JsonMetadata,
    ValueRange,
};

/// Name of the metadata file in both output directories.
pub const METADATA_FILE: &str = "metadata.json";

/// Plain JSON data file.
pub const JSON_DATA_FILE: &str = "sst_data.json";

/// Gzipped JSON data file.
pub const GZIP_DATA_FILE: &str = "sst_data.json.gz";

/// Binary data file.
pub const BINARY_DATA_FILE: &str = "sst_data.bin";

/// A file produced by a writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    pub path: PathBuf,
    pub bytes: u64,
}

impl WrittenFile {
    /// Record `path` with its current size on disk.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::metadata(path)?.len();
        Ok(Self {
            path: path.to_path_buf(),
            bytes,
        })
    }

    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / (1024.0 * 1024.0)
    }

    pub fn kilobytes(&self) -> f64 {
        self.bytes as f64 / 1024.0
    }

    /// Size formatted the way the conversion summaries print it.
    pub fn human_size(&self) -> String {
        if self.bytes >= 1024 * 1024 {
            format!("{:.1} MB", self.megabytes())
        } else {
            format!("{:.1} KB", self.kilobytes())
        }
    }
}
