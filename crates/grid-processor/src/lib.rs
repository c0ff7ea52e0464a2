//! Grid processing for the SST web outputs.
//!
//! This crate turns `(time, lat, lon)` frames from any [`FrameSource`] into
//! the files the web map loads:
//!
//! - **normalize**: wrap longitudes to `(-180, 180]`, sort them ascending and
//!   optionally flip latitudes north-to-south
//! - **encoding**: quantize temperatures to `u8` or centidegree `i32` codes
//!   with a missing-data sentinel
//! - **subsample**: time and spatial strides over a source
//! - **writer**: `metadata.json`, plain/gzipped JSON and raw binary data files
//! - **pipeline**: the two end-to-end conversions
//!
//! # Architecture
//!
//! ```text
//! FrameSource::read_frame(t)
//!      │
//!      ▼
//! SpatialNormalizer::apply      (lon sort, optional lat flip)
//!      │
//!      ▼
//! ValueEncoder::encode_frame    (u8 or i32 codes)
//!      │
//!      ├─► JsonDataWriter       public/data/sst_data.json[.gz]
//!      │
//!      └─► BinaryDataWriter     docs/data/sst_data.bin
//! ```
//!
//! # Example
//!
//! ```ignore
//! use grid_processor::{convert_to_binary, BinaryOutputConfig};
//! use netcdf_parser::SstDataset;
//!
//! let dataset = SstDataset::open("sst.mnmean.nc", "sst")?;
//! let report = convert_to_binary(&dataset, &BinaryOutputConfig::default())?;
//! println!("{} cells written", report.total_cells());
//! ```
//!
//! [`FrameSource`]: sst_common::FrameSource

pub mod config;
pub mod encoding;
pub mod error;
pub mod normalize;
pub mod pipeline;
pub mod subsample;
pub mod writer;

// Re-export commonly used types at crate root
pub use config::{validate_byte_encoding, BinaryOutputConfig, JsonOutputConfig};
pub use encoding::{
    ByteEncoding, CentiDegreeEncoding, ValueEncoder, BYTE_MAX_CODE, BYTE_NODATA, CENTI_MAX_CODE,
    CENTI_MIN_CODE, CENTI_NODATA,
};
pub use error::{GridProcessorError, Result};
pub use normalize::{wrap_longitude, LatitudeOrder, SpatialNormalizer};
pub use pipeline::{convert_to_binary, convert_to_json, time_labels, ConversionReport};
pub use subsample::Subsampled;
pub use writer::WrittenFile;
