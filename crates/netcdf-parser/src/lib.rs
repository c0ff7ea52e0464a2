//! NetCDF reader for gridded sea surface temperature data.
//!
//! This crate reads NetCDF-3/NetCDF-4 files through the native `netcdf`
//! library (which wraps libnetcdf/HDF5). It targets CF-style monthly
//! climatology files such as NOAA ERSST v5 (`sst.mnmean.nc`):
//!
//! - one data variable with dimensions `(time, lat, lon)`
//! - 1-D coordinate variables named after those dimensions
//! - a `time` coordinate with CF units (`days since 1800-1-1 00:00:00`)
//! - optional `scale_factor`/`add_offset` packing and
//!   `_FillValue`/`missing_value` markers
//!
//! Values are returned in physical units with missing cells set to NaN.

mod dataset;
mod error;
mod native;

pub use dataset::{DatasetSummary, SstDataset, DEFAULT_VARIABLE};
pub use error::{NetCdfError, NetCdfResult};
pub use native::{silence_hdf5_errors, Packing};
