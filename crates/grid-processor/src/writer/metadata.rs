//! Metadata files describing the encoded grids.
//!
//! Both converters write a `metadata.json` next to their data. The web
//! clients read the field names as-is, so the serialized keys are fixed.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sst_common::{CellBounds, CoordinateBounds};

use super::WrittenFile;
use crate::encoding::{ByteEncoding, CentiDegreeEncoding, ValueEncoder};
use crate::error::Result;

/// Display range of the JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f32,
    pub max: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentiDegreeEncodingInfo {
    pub scale: f32,
    pub nodata: i32,
    pub description: String,
}

impl From<&CentiDegreeEncoding> for CentiDegreeEncodingInfo {
    fn from(encoding: &CentiDegreeEncoding) -> Self {
        Self {
            scale: encoding.scale,
            nodata: encoding.nodata(),
            description: encoding.description(),
        }
    }
}

/// Metadata of the JSON output (`public/data/metadata.json`).
///
/// Latitudes stay in source order; `bounds` holds the coordinate extremes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonMetadata {
    pub nlat: usize,
    pub nlon: usize,
    pub ntimes: usize,
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub times: Vec<String>,
    pub bounds: CoordinateBounds,
    pub value_range: ValueRange,
    pub encoding: CentiDegreeEncodingInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ByteEncodingInfo {
    pub min: f32,
    pub max: f32,
    pub nodata: u8,
    pub description: String,
}

impl From<&ByteEncoding> for ByteEncodingInfo {
    fn from(encoding: &ByteEncoding) -> Self {
        Self {
            min: encoding.min,
            max: encoding.max,
            nodata: encoding.nodata(),
            description: encoding.description(),
        }
    }
}

/// Metadata of the binary output (`docs/data/metadata.json`).
///
/// Latitudes run north to south; `bounds` holds the outer cell edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryMetadata {
    pub nlat: usize,
    pub nlon: usize,
    pub ntimes: usize,
    pub times: Vec<String>,
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
    pub bounds: CellBounds,
    pub encoding: ByteEncodingInfo,
}

/// Serialize `metadata` to `path`, compact or with a 2-space indent.
pub fn write_metadata<T: Serialize>(path: &Path, metadata: &T, pretty: bool) -> Result<WrittenFile> {
    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, metadata)?;
    } else {
        serde_json::to_writer(&mut writer, metadata)?;
    }
    writer.flush()?;
    drop(writer);

    Ok(WrittenFile::from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary_metadata() -> BinaryMetadata {
        BinaryMetadata {
            nlat: 2,
            nlon: 2,
            ntimes: 1,
            times: vec!["1854-01".to_string()],
            lats: vec![1.0, -1.0],
            lons: vec![-1.0, 1.0],
            bounds: CellBounds::from_sorted(&[-1.0, 1.0], &[1.0, -1.0]).unwrap(),
            encoding: ByteEncodingInfo::from(&ByteEncoding::default()),
        }
    }

    #[test]
    fn test_json_metadata_keys() {
        let metadata = JsonMetadata {
            nlat: 1,
            nlon: 2,
            ntimes: 1,
            lons: vec![-1.0, 1.0],
            lats: vec![0.0],
            times: vec!["1854-01".to_string()],
            bounds: CoordinateBounds::from_coords(&[-1.0, 1.0], &[0.0]).unwrap(),
            value_range: ValueRange {
                min: -2.0,
                max: 32.0,
            },
            encoding: CentiDegreeEncodingInfo::from(&CentiDegreeEncoding::default()),
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["valueRange"]["min"], -2.0);
        assert_eq!(json["bounds"]["minLon"], -1.0);
        assert_eq!(json["encoding"]["nodata"], -999);
        assert_eq!(json["encoding"]["scale"], 100.0);
    }

    #[test]
    fn test_binary_metadata_keys() {
        let json = serde_json::to_value(binary_metadata()).unwrap();
        assert_eq!(json["bounds"]["north"], 2.0);
        assert_eq!(json["bounds"]["west"], -2.0);
        assert_eq!(json["encoding"]["nodata"], 255);
        assert_eq!(
            json["encoding"]["description"],
            "uint8: 0-254 maps to -2°C to 32°C, 255 = no data"
        );
    }

    #[test]
    fn test_write_pretty_and_compact() {
        let dir = tempfile::tempdir().unwrap();

        let pretty = dir.path().join("pretty.json");
        write_metadata(&pretty, &binary_metadata(), true).unwrap();
        let text = std::fs::read_to_string(&pretty).unwrap();
        assert!(text.starts_with("{\n  \"nlat\": 2,"));

        let compact = dir.path().join("compact.json");
        let written = write_metadata(&compact, &binary_metadata(), false).unwrap();
        let text = std::fs::read_to_string(&compact).unwrap();
        assert!(text.starts_with("{\"nlat\":2,"));
        assert_eq!(written.bytes, text.len() as u64);

        let parsed: BinaryMetadata = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, binary_metadata());
    }
}
