//! Quantization of temperature values into compact integer codes.
//!
//! Two encodings are used by the web outputs:
//!
//! | Encoding                | Code  | Mapping                              | Missing |
//! |-------------------------|-------|--------------------------------------|---------|
//! | [`ByteEncoding`]        | `u8`  | `[min, max]` linearly onto `[0, 254]` | `255`   |
//! | [`CentiDegreeEncoding`] | `i32` | `round(v * 100)`                     | `-999`  |
//!
//! Only NaN maps to the missing code. Every other input, including
//! infinities, produces a code from the valid range.

use serde::{Deserialize, Serialize};

/// A mapping from physical values to integer codes with a missing-data sentinel.
pub trait ValueEncoder {
    type Code: Copy + PartialEq + Serialize;

    /// Encode one value. NaN encodes to [`nodata`](Self::nodata).
    fn encode(&self, value: f32) -> Self::Code;

    /// The reserved missing-data code.
    fn nodata(&self) -> Self::Code;

    /// Encode a whole frame, preserving order.
    fn encode_frame(&self, frame: &[f32]) -> Vec<Self::Code> {
        frame.iter().map(|&v| self.encode(v)).collect()
    }

    /// Encode a row-major frame into nested rows of `nlon` codes.
    fn encode_rows(&self, frame: &[f32], nlon: usize) -> Vec<Vec<Self::Code>> {
        if nlon == 0 {
            return Vec::new();
        }
        frame
            .chunks(nlon)
            .map(|row| self.encode_frame(row))
            .collect()
    }
}

/// Highest valid byte code.
pub const BYTE_MAX_CODE: u8 = 254;

/// Missing-data byte code.
pub const BYTE_NODATA: u8 = 255;

/// Linear `u8` quantization of `[min, max]` onto `[0, 254]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ByteEncoding {
    pub min: f32,
    pub max: f32,
}

impl Default for ByteEncoding {
    /// The SST display range, -2 to 32 degrees Celsius.
    fn default() -> Self {
        Self {
            min: -2.0,
            max: 32.0,
        }
    }
}

impl ByteEncoding {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Width of one quantization step in physical units.
    pub fn step(&self) -> f32 {
        (self.max - self.min) / BYTE_MAX_CODE as f32
    }

    /// Map a code back to the lower edge of its quantization step.
    ///
    /// Returns `None` for the missing-data code.
    pub fn decode(&self, code: u8) -> Option<f32> {
        if code == BYTE_NODATA {
            None
        } else {
            Some(code as f32 / BYTE_MAX_CODE as f32 * (self.max - self.min) + self.min)
        }
    }

    /// Human-readable description written into metadata files.
    pub fn description(&self) -> String {
        format!(
            "uint8: 0-{} maps to {}°C to {}°C, {} = no data",
            BYTE_MAX_CODE, self.min, self.max, BYTE_NODATA
        )
    }
}

impl ValueEncoder for ByteEncoding {
    type Code = u8;

    fn encode(&self, value: f32) -> u8 {
        if value.is_nan() {
            return BYTE_NODATA;
        }
        let normalized = (value - self.min) / (self.max - self.min);
        // Truncation, not rounding: code k covers [min + k*step, min + (k+1)*step)
        (normalized * BYTE_MAX_CODE as f32).clamp(0.0, BYTE_MAX_CODE as f32) as u8
    }

    fn nodata(&self) -> u8 {
        BYTE_NODATA
    }
}

/// Missing-data centidegree code.
pub const CENTI_NODATA: i32 = -999;

/// Smallest valid centidegree code (fits int16 with room below).
pub const CENTI_MIN_CODE: i32 = i16::MIN as i32 + 1;

/// Largest valid centidegree code.
pub const CENTI_MAX_CODE: i32 = i16::MAX as i32;

/// Integer hundredths of a degree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CentiDegreeEncoding {
    pub scale: f32,
}

impl Default for CentiDegreeEncoding {
    fn default() -> Self {
        Self { scale: 100.0 }
    }
}

impl CentiDegreeEncoding {
    pub fn decode(&self, code: i32) -> Option<f32> {
        if code == CENTI_NODATA {
            None
        } else {
            Some(code as f32 / self.scale)
        }
    }

    pub fn description(&self) -> String {
        format!(
            "int: value * {} in degrees Celsius, {} = no data",
            self.scale, CENTI_NODATA
        )
    }
}

impl ValueEncoder for CentiDegreeEncoding {
    type Code = i32;

    fn encode(&self, value: f32) -> i32 {
        if value.is_nan() {
            return CENTI_NODATA;
        }
        // Half-to-even, saturating at the int16 range
        let scaled = (value * self.scale).round_ties_even();
        let code = scaled.clamp(CENTI_MIN_CODE as f32, CENTI_MAX_CODE as f32) as i32;
        // -9.99 would otherwise read back as missing
        if code == CENTI_NODATA {
            CENTI_NODATA + 1
        } else {
            code
        }
    }

    fn nodata(&self) -> i32 {
        CENTI_NODATA
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_encoding_endpoints() {
        let enc = ByteEncoding::default();
        assert_eq!(enc.encode(-2.0), 0);
        assert_eq!(enc.encode(32.0), 254);
        assert_eq!(enc.encode(-5.0), 0);
        assert_eq!(enc.encode(40.0), 254);
        assert_eq!(enc.encode(f32::NAN), 255);
    }

    #[test]
    fn test_byte_encoding_truncates() {
        let enc = ByteEncoding::default();
        // (15 + 2) / 34 * 254 = 127.0
        assert_eq!(enc.encode(15.0), 127);
        // just below the next step boundary
        assert_eq!(enc.encode(15.0 + enc.step() * 0.9), 127);
    }

    #[test]
    fn test_byte_encoding_infinities_clamp() {
        let enc = ByteEncoding::default();
        assert_eq!(enc.encode(f32::INFINITY), 254);
        assert_eq!(enc.encode(f32::NEG_INFINITY), 0);
    }

    #[test]
    fn test_byte_decode() {
        let enc = ByteEncoding::default();
        assert_eq!(enc.decode(0), Some(-2.0));
        assert_eq!(enc.decode(255), None);
        let top = enc.decode(254).unwrap();
        assert!((top - 32.0).abs() < 1e-5);
    }

    #[test]
    fn test_byte_description() {
        assert_eq!(
            ByteEncoding::default().description(),
            "uint8: 0-254 maps to -2°C to 32°C, 255 = no data"
        );
    }

    #[test]
    fn test_centidegree_rounding() {
        let enc = CentiDegreeEncoding::default();
        assert_eq!(enc.encode(12.34), 1234);
        assert_eq!(enc.encode(-1.8), -180);
        assert_eq!(enc.encode(0.125), 12);
        assert_eq!(enc.encode(0.375), 38);
        assert_eq!(enc.encode(f32::NAN), -999);
        assert_eq!(enc.encode(f32::INFINITY), CENTI_MAX_CODE);
        assert_eq!(enc.encode(f32::NEG_INFINITY), CENTI_MIN_CODE);
    }

    #[test]
    fn test_centidegree_never_emits_sentinel_for_data() {
        let enc = CentiDegreeEncoding::default();
        assert_eq!(enc.encode(-9.99), -998);
        assert_eq!(enc.encode(-9.994), -998);
        assert_eq!(enc.encode(-9.98), -998);
        assert_eq!(enc.encode(-10.0), -1000);
        assert_eq!(enc.encode(400.0), CENTI_MAX_CODE);
        assert_eq!(enc.encode(-400.0), CENTI_MIN_CODE);
    }

    #[test]
    fn test_encode_rows() {
        let enc = CentiDegreeEncoding::default();
        let rows = enc.encode_rows(&[1.0, 2.0, f32::NAN, 4.0, 5.0, 6.0], 3);
        assert_eq!(rows, vec![vec![100, 200, -999], vec![400, 500, 600]]);
        assert!(enc.encode_rows(&[1.0], 0).is_empty());
    }
}
