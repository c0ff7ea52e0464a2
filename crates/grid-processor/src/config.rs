//! Configuration for the JSON and binary conversions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encoding::{ByteEncoding, CentiDegreeEncoding};

/// Configuration for the JSON conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonOutputConfig {
    /// Directory receiving `metadata.json` and the data files.
    pub output_dir: PathBuf,

    /// Keep every n-th time step (1 = monthly, 12 = yearly).
    pub time_step: usize,

    /// Write `sst_data.json`.
    pub write_plain: bool,

    /// Write `sst_data.json.gz`.
    pub write_gzip: bool,

    /// Value range advertised to the client as `valueRange`.
    pub value_range: (f32, f32),

    pub encoding: CentiDegreeEncoding,
}

impl Default for JsonOutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("public/data"),
            time_step: 1,
            write_plain: true,
            write_gzip: true,
            value_range: (-2.0, 32.0),
            encoding: CentiDegreeEncoding::default(),
        }
    }
}

impl JsonOutputConfig {
    /// Override fields from `SST_JSON_*` / `SST_TIME_STEP` variables.
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("SST_JSON_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("SST_TIME_STEP") {
            if let Ok(step) = val.parse() {
                self.time_step = step;
            }
        }

        if let Ok(val) = std::env::var("SST_JSON_PLAIN") {
            self.write_plain = parse_bool(&val);
        }

        if let Ok(val) = std::env::var("SST_JSON_GZIP") {
            self.write_gzip = parse_bool(&val);
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("json output_dir must not be empty".to_string());
        }

        if self.time_step == 0 {
            return Err("time_step must be > 0".to_string());
        }

        if !self.write_plain && !self.write_gzip {
            return Err("at least one of write_plain or write_gzip must be set".to_string());
        }

        if self.value_range.0 >= self.value_range.1 {
            return Err("value_range min must be < max".to_string());
        }

        if self.encoding.scale <= 0.0 || !self.encoding.scale.is_finite() {
            return Err("encoding scale must be a positive number".to_string());
        }

        Ok(())
    }
}

/// Configuration for the binary conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinaryOutputConfig {
    /// Directory receiving `metadata.json` and `sst_data.bin`.
    pub output_dir: PathBuf,

    pub encoding: ByteEncoding,
}

impl Default for BinaryOutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("docs/data"),
            encoding: ByteEncoding::default(),
        }
    }
}

impl BinaryOutputConfig {
    pub fn apply_env(&mut self) {
        if let Ok(val) = std::env::var("SST_BINARY_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(val);
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.output_dir.as_os_str().is_empty() {
            return Err("binary output_dir must not be empty".to_string());
        }

        validate_byte_encoding(&self.encoding)
    }
}

/// Check that a byte encoding has a usable, finite range.
pub fn validate_byte_encoding(encoding: &ByteEncoding) -> Result<(), String> {
    if !encoding.min.is_finite() || !encoding.max.is_finite() {
        return Err("encoding min/max must be finite".to_string());
    }

    if encoding.min >= encoding.max {
        return Err(format!(
            "encoding min ({}) must be < max ({})",
            encoding.min, encoding.max
        ));
    }

    Ok(())
}

fn parse_bool(val: &str) -> bool {
    val.to_lowercase() == "true" || val == "1"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(JsonOutputConfig::default().validate().is_ok());
        assert!(BinaryOutputConfig::default().validate().is_ok());
        assert_eq!(
            JsonOutputConfig::default().output_dir,
            PathBuf::from("public/data")
        );
        assert_eq!(
            BinaryOutputConfig::default().output_dir,
            PathBuf::from("docs/data")
        );
    }

    #[test]
    fn test_json_validation() {
        let config = JsonOutputConfig {
            time_step: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = JsonOutputConfig {
            write_plain: false,
            write_gzip: false,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_binary_validation() {
        let config = BinaryOutputConfig {
            encoding: ByteEncoding::new(5.0, 5.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BinaryOutputConfig {
            output_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_yaml_shape() {
        let config: JsonOutputConfig =
            serde_json::from_str(r#"{"output_dir": "out", "time_step": 12}"#).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.time_step, 12);
        assert!(config.write_gzip);
    }
}
