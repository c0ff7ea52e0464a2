//! Error types for NetCDF parsing operations.

use sst_common::TimeParseError;
use thiserror::Error;

/// Result type for NetCDF parser operations.
pub type NetCdfResult<T> = Result<T, NetCdfError>;

/// Error types for NetCDF parsing.
#[derive(Error, Debug)]
pub enum NetCdfError {
    /// File I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The netcdf library failed to open or read the file
    #[error("NetCDF library error: {0}")]
    Library(String),

    /// Missing required variable, dimension or attribute
    #[error("Missing required data: {0}")]
    MissingData(String),

    /// Invalid data format
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// Time coordinate could not be decoded
    #[error("Invalid time coordinate: {0}")]
    Time(#[from] TimeParseError),

    /// Requested frame does not exist
    #[error("Frame index {index} out of range (ntimes = {ntimes})")]
    OutOfRange { index: usize, ntimes: usize },
}

impl From<netcdf::Error> for NetCdfError {
    fn from(err: netcdf::Error) -> Self {
        NetCdfError::Library(err.to_string())
    }
}
