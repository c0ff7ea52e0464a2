//! Synthetic NetCDF fixtures shaped like NOAA ERSST v5.
//!
//! [`create_sst_netcdf`] writes a small file with the same layout as
//! `sst.mnmean.nc`: `sst(time, lat, lon)` as f32 with a `missing_value`
//! sentinel, f32 coordinate variables and a `days since 1800-1-1` time axis.

use std::path::Path;

use chrono::NaiveDateTime;

use crate::generators::{create_sst_frames, days_since_1800, monthly_times};

/// Sentinel ERSST uses for land cells.
pub const ERSST_MISSING_VALUE: f32 = -9.96921e36;

/// Time units attribute of ERSST's `time` variable.
pub const ERSST_TIME_UNITS: &str = "days since 1800-1-1 00:00:00";

/// Layout of a synthetic SST file.
#[derive(Debug, Clone)]
pub struct SyntheticSst {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub times: Vec<NaiveDateTime>,
    /// Name of the data variable
    pub variable: String,
    /// Optional `scale_factor`/`add_offset` to store packed values
    pub packing: Option<(f32, f32)>,
}

impl SyntheticSst {
    /// A coarse 30-degree global grid with `ntimes` months from 1854-01.
    ///
    /// Longitudes run 0..330 like ERSST, latitudes 75..-75.
    pub fn coarse(ntimes: usize) -> Self {
        Self {
            lons: (0..12).map(|i| 30.0 * i as f64).collect(),
            lats: (0..6).map(|i| 75.0 - 30.0 * i as f64).collect(),
            times: monthly_times(1854, 1, ntimes),
            variable: "sst".to_string(),
            packing: None,
        }
    }

    /// Frames in physical units, land as NaN.
    pub fn frames(&self) -> Vec<Vec<f32>> {
        create_sst_frames(&self.lons, &self.lats, &self.times)
    }
}

/// Write the synthetic dataset to a new NetCDF file at `path`.
///
/// Returns the physical-unit frames that were written so tests can compare
/// against what the reader produces.
pub fn create_sst_netcdf(
    path: &Path,
    spec: &SyntheticSst,
) -> Result<Vec<Vec<f32>>, netcdf::Error> {
    let frames = spec.frames();
    let mut file = netcdf::create(path)?;

    file.add_attribute("title", "Synthetic SST test data")?;

    file.add_dimension("time", spec.times.len())?;
    file.add_dimension("lat", spec.lats.len())?;
    file.add_dimension("lon", spec.lons.len())?;

    {
        let mut time_var = file.add_variable::<f64>("time", &["time"])?;
        time_var.put_attribute("units", ERSST_TIME_UNITS)?;
        time_var.put_attribute("long_name", "Time")?;
        time_var.put_values(&days_since_1800(&spec.times), ..)?;
    }

    {
        let mut lat_var = file.add_variable::<f32>("lat", &["lat"])?;
        lat_var.put_attribute("units", "degrees_north")?;
        let lats: Vec<f32> = spec.lats.iter().map(|&v| v as f32).collect();
        lat_var.put_values(&lats, ..)?;
    }

    {
        let mut lon_var = file.add_variable::<f32>("lon", &["lon"])?;
        lon_var.put_attribute("units", "degrees_east")?;
        let lons: Vec<f32> = spec.lons.iter().map(|&v| v as f32).collect();
        lon_var.put_values(&lons, ..)?;
    }

    {
        let mut sst_var = file.add_variable::<f32>(&spec.variable, &["time", "lat", "lon"])?;
        sst_var.put_attribute("units", "degC")?;
        sst_var.put_attribute("long_name", "Monthly Means of Sea Surface Temperature")?;
        sst_var.put_attribute("missing_value", ERSST_MISSING_VALUE)?;
        if let Some((scale, offset)) = spec.packing {
            sst_var.put_attribute("scale_factor", scale)?;
            sst_var.put_attribute("add_offset", offset)?;
        }

        for (t_idx, frame) in frames.iter().enumerate() {
            let stored: Vec<f32> = frame
                .iter()
                .map(|&v| match spec.packing {
                    _ if v.is_nan() => ERSST_MISSING_VALUE,
                    Some((scale, offset)) => (v - offset) / scale,
                    None => v,
                })
                .collect();
            sst_var.put_values(&stored, (t_idx, .., ..))?;
        }
    }

    Ok(frames)
}
