//! Converter configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! YAML file, `SST_*` environment variables, and command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use grid_processor::{validate_byte_encoding, BinaryOutputConfig, ByteEncoding, JsonOutputConfig};
use netcdf_parser::DEFAULT_VARIABLE;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// ERSST v5 monthly means.
pub const DEFAULT_DATA_URL: &str =
    "https://downloads.psl.noaa.gov/Datasets/noaa.ersst.v5/sst.mnmean.nc";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    pub data: DataConfig,
    pub json: JsonOutputConfig,
    pub binary: BinaryOutputConfig,
    pub animation: AnimationConfig,
}

/// Where the dataset lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Download source for `file`.
    pub url: String,
    /// Local NetCDF file.
    pub file: PathBuf,
    /// Data variable inside the file.
    pub variable: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATA_URL.to_string(),
            file: PathBuf::from("sst.mnmean.nc"),
            variable: DEFAULT_VARIABLE.to_string(),
        }
    }
}

/// Animated map settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub output_file: PathBuf,
    pub time_step: usize,
    pub spatial_subsample: usize,
    pub frame_duration_ms: u64,
    pub title: String,
    pub encoding: ByteEncoding,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from("sst_animated_map.html"),
            time_step: 1,
            spatial_subsample: 1,
            frame_duration_ms: 100,
            title: "NOAA ERSST v5 - Sea Surface Temperature".to_string(),
            encoding: ByteEncoding::default(),
        }
    }
}

impl ConverterConfig {
    /// Load a YAML file; missing sections keep their defaults.
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: ConverterConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from `SST_*` environment variables.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("SST_DATA_URL") {
            self.data.url = val;
        }
        if let Ok(val) = std::env::var("SST_DATA_FILE") {
            self.data.file = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SST_VARIABLE") {
            self.data.variable = val;
        }

        self.json.apply_env();
        self.binary.apply_env();

        // SST_TIME_STEP applies to the animation as well as the JSON output
        if let Ok(val) = std::env::var("SST_TIME_STEP") {
            if let Ok(step) = val.parse() {
                self.animation.time_step = step;
            }
        }
        if let Ok(val) = std::env::var("SST_ANIMATION_OUTPUT") {
            self.animation.output_file = PathBuf::from(val);
        }
        if let Ok(val) = std::env::var("SST_SPATIAL_SUBSAMPLE") {
            if let Ok(step) = val.parse() {
                self.animation.spatial_subsample = step;
            }
        }
        if let Ok(val) = std::env::var("SST_FRAME_DURATION_MS") {
            if let Ok(ms) = val.parse() {
                self.animation.frame_duration_ms = ms;
            }
        }
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        if self.data.file.as_os_str().is_empty() {
            bail!("data.file must not be empty");
        }
        if self.data.variable.is_empty() {
            bail!("data.variable must not be empty");
        }

        self.json.validate().map_err(anyhow::Error::msg)?;
        self.binary.validate().map_err(anyhow::Error::msg)?;

        let anim = &self.animation;
        if anim.output_file.as_os_str().is_empty() {
            bail!("animation.output_file must not be empty");
        }
        if anim.time_step == 0 {
            bail!("animation.time_step must be > 0");
        }
        if anim.spatial_subsample == 0 {
            bail!("animation.spatial_subsample must be > 0");
        }
        if anim.frame_duration_ms == 0 {
            bail!("animation.frame_duration_ms must be > 0");
        }
        validate_byte_encoding(&anim.encoding).map_err(anyhow::Error::msg)?;

        Ok(())
    }
}
