//! ERSST NetCDF to web output converter.
//!
//! Library half of the `sst-webmap` binary: configuration loading, the
//! dataset download and the console summaries. The conversions themselves
//! live in `grid-processor` (JSON, binary) and `renderer` (animated map).

pub mod config;
pub mod download;
pub mod report;

pub use config::{AnimationConfig, ConverterConfig, DataConfig, DEFAULT_DATA_URL};
pub use download::{ensure_dataset, partial_path, DownloadOutcome};
pub use report::SummaryReport;
