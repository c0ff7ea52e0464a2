//! Gridded `(time, lat, lon)` datasets read with the native netcdf library.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use sst_common::{month_label, CfTimeUnits, FrameSource};
use tracing::{debug, info, instrument};

use crate::error::{NetCdfError, NetCdfResult};
use crate::native::{get_string_attr, silence_hdf5_errors, Packing};

/// Default name of the sea surface temperature variable in ERSST files.
pub const DEFAULT_VARIABLE: &str = "sst";

/// An open NetCDF file exposing one `(time, lat, lon)` variable.
///
/// Coordinates and time stamps are read eagerly on open; value frames are
/// read on demand, one time step at a time.
pub struct SstDataset {
    file: netcdf::File,
    path: PathBuf,
    variable: String,
    dimension_names: [String; 3],
    lons: Vec<f64>,
    lats: Vec<f64>,
    time_values: Vec<f64>,
    times: Vec<NaiveDateTime>,
    time_units: CfTimeUnits,
    packing: Packing,
}

impl std::fmt::Debug for SstDataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SstDataset")
            .field("path", &self.path)
            .field("variable", &self.variable)
            .field("dimensions", &self.dimension_names)
            .field("shape", &self.shape())
            .finish()
    }
}

/// Summary of a dataset for logging.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    /// Names of all variables in the file
    pub variables: Vec<String>,
    /// Dimension names and lengths
    pub dimensions: Vec<(String, usize)>,
    /// First and last time stamps
    pub time_range: Option<(NaiveDateTime, NaiveDateTime)>,
}

impl SstDataset {
    /// Open `path` and prepare `variable` for reading.
    ///
    /// The variable must have exactly three dimensions ordered
    /// `(time, lat, lon)`; the coordinate variables are the ones named after
    /// those dimensions.
    #[instrument(skip_all, fields(path = %path.as_ref().display(), variable = variable))]
    pub fn open<P: AsRef<Path>>(path: P, variable: &str) -> NetCdfResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref();
        if !path.exists() {
            return Err(NetCdfError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }

        let file = netcdf::open(path)?;

        let (dimension_names, dimension_lens, packing) = {
            let var = file
                .variable(variable)
                .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", variable)))?;

            let dims = var.dimensions();
            if dims.len() != 3 {
                return Err(NetCdfError::InvalidFormat(format!(
                    "{} has {} dimensions, expected (time, lat, lon)",
                    variable,
                    dims.len()
                )));
            }

            let names = [dims[0].name(), dims[1].name(), dims[2].name()];
            let lens = [dims[0].len(), dims[1].len(), dims[2].len()];
            (names, lens, Packing::from_variable(&var))
        };

        let [time_dim, lat_dim, lon_dim] = &dimension_names;
        let time_values = read_coordinate(&file, time_dim, dimension_lens[0])?;
        let lats = read_coordinate(&file, lat_dim, dimension_lens[1])?;
        let lons = read_coordinate(&file, lon_dim, dimension_lens[2])?;

        let units = {
            let time_var = file
                .variable(time_dim)
                .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", time_dim)))?;
            get_string_attr(&time_var, "units")
                .ok_or_else(|| NetCdfError::MissingData(format!("{} units attribute", time_dim)))?
        };
        let time_units = CfTimeUnits::parse(&units)?;
        let times = time_units.decode_all(&time_values)?;

        debug!(
            scale_factor = packing.scale_factor,
            add_offset = packing.add_offset,
            missing_values = ?packing.missing_values,
            "Read packing attributes"
        );
        info!(
            ntimes = times.len(),
            nlat = lats.len(),
            nlon = lons.len(),
            "Opened NetCDF dataset"
        );

        Ok(Self {
            file,
            path: path.to_path_buf(),
            variable: variable.to_string(),
            dimension_names,
            lons,
            lats,
            time_values,
            times,
            time_units,
            packing,
        })
    }

    /// Path the dataset was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the data variable.
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Raw time coordinate values.
    pub fn time_values(&self) -> &[f64] {
        &self.time_values
    }

    pub fn time_units(&self) -> &CfTimeUnits {
        &self.time_units
    }

    pub fn packing(&self) -> &Packing {
        &self.packing
    }

    /// `YYYY-MM` labels for every time step.
    pub fn time_labels(&self) -> Vec<String> {
        self.times.iter().map(month_label).collect()
    }

    /// Summarize the file's variables, dimensions and time range.
    pub fn describe(&self) -> DatasetSummary {
        let variables = self.file.variables().map(|v| v.name()).collect();
        let dimensions = self
            .file
            .dimensions()
            .map(|d| (d.name(), d.len()))
            .collect();
        let time_range = match (self.times.first(), self.times.last()) {
            (Some(first), Some(last)) => Some((*first, *last)),
            _ => None,
        };

        DatasetSummary {
            variables,
            dimensions,
            time_range,
        }
    }

    /// Read one time step as a row-major `nlat * nlon` vector in physical units.
    pub fn read_frame(&self, index: usize) -> NetCdfResult<Vec<f32>> {
        let ntimes = self.times.len();
        if index >= ntimes {
            return Err(NetCdfError::OutOfRange { index, ntimes });
        }

        let var = self
            .file
            .variable(&self.variable)
            .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", self.variable)))?;

        let raw: Vec<f32> = var.get_values((index..index + 1, .., ..))?;

        let expected = self.lats.len() * self.lons.len();
        if raw.len() != expected {
            return Err(NetCdfError::InvalidFormat(format!(
                "frame {} has {} values, expected {}",
                index,
                raw.len(),
                expected
            )));
        }

        Ok(raw.into_iter().map(|v| self.packing.unpack(v)).collect())
    }
}

impl FrameSource for SstDataset {
    type Error = NetCdfError;

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
        SstDataset::read_frame(self, index)
    }
}

/// Read a 1-D coordinate variable and check its length against the dimension.
fn read_coordinate(file: &netcdf::File, name: &str, expected_len: usize) -> NetCdfResult<Vec<f64>> {
    let var = file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} coordinate variable", name)))?;

    let values: Vec<f64> = var.get_values(..)?;
    if values.len() != expected_len {
        return Err(NetCdfError::InvalidFormat(format!(
            "coordinate {} has {} values, dimension length is {}",
            name,
            values.len(),
            expected_len
        )));
    }

    Ok(values)
}
