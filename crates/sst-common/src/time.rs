//! CF-convention time decoding.
//!
//! NetCDF time coordinates are stored as offsets from a reference date,
//! described by a `units` attribute such as `days since 1800-1-1 00:00:00`.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Parse a CF unit name (case-insensitive, singular or plural).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "days" | "day" | "d" => Some(Self::Days),
            "hours" | "hour" | "hr" | "hrs" | "h" => Some(Self::Hours),
            "minutes" | "minute" | "min" | "mins" => Some(Self::Minutes),
            "seconds" | "second" | "sec" | "secs" | "s" => Some(Self::Seconds),
            _ => None,
        }
    }

    /// Length of one unit in seconds.
    pub fn seconds(&self) -> f64 {
        match self {
            Self::Days => 86_400.0,
            Self::Hours => 3_600.0,
            Self::Minutes => 60.0,
            Self::Seconds => 1.0,
        }
    }
}

/// Parsed `<unit> since <reference>` time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CfTimeUnits {
    pub unit: TimeUnit,
    pub reference: NaiveDateTime,
}

impl CfTimeUnits {
    /// Parse a CF `units` attribute.
    ///
    /// Accepts reference dates with or without zero padding
    /// (`1800-1-1`, `1800-01-01 00:00:00`, `1970-01-01T00:00:00Z`).
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let trimmed = s.trim();
        let (unit_str, reference_str) = trimmed
            .split_once(" since ")
            .ok_or_else(|| TimeParseError::InvalidUnits(trimmed.to_string()))?;

        let unit = TimeUnit::from_str(unit_str.trim())
            .ok_or_else(|| TimeParseError::UnsupportedUnit(unit_str.trim().to_string()))?;
        let reference = parse_reference(reference_str.trim())?;

        Ok(Self { unit, reference })
    }

    /// Convert an offset value to a calendar date-time.
    pub fn decode(&self, value: f64) -> Result<NaiveDateTime, TimeParseError> {
        if !value.is_finite() {
            return Err(TimeParseError::OutOfRange(value));
        }

        let millis = (value * self.unit.seconds() * 1000.0).round();
        if millis.abs() > i64::MAX as f64 {
            return Err(TimeParseError::OutOfRange(value));
        }

        self.reference
            .checked_add_signed(Duration::milliseconds(millis as i64))
            .ok_or(TimeParseError::OutOfRange(value))
    }

    /// Decode every value of a time coordinate.
    pub fn decode_all(&self, values: &[f64]) -> Result<Vec<NaiveDateTime>, TimeParseError> {
        values.iter().map(|&v| self.decode(v)).collect()
    }
}

/// Format a time stamp as a `YYYY-MM` label.
pub fn month_label(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m").to_string()
}

fn parse_reference(s: &str) -> Result<NaiveDateTime, TimeParseError> {
    let invalid = || TimeParseError::InvalidReference(s.to_string());

    let cleaned = s
        .trim_end_matches("UTC")
        .trim_end_matches('Z')
        .trim();
    let (date_part, time_part) = match cleaned.split_once(['T', ' ']) {
        Some((d, t)) => (d, Some(t.trim())),
        None => (cleaned, None),
    };

    let mut fields = date_part.split('-');
    let year: i32 = fields.next().and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
    let month: u32 = fields.next().unwrap_or("1").parse().map_err(|_| invalid())?;
    let day: u32 = fields.next().unwrap_or("1").parse().map_err(|_| invalid())?;
    if fields.next().is_some() {
        return Err(invalid());
    }
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;

    let mut offset = Duration::zero();
    let time = match time_part.filter(|t| !t.is_empty()) {
        Some(t) => {
            // Trailing numeric zone offset: "+00:00", "-05:00", " -0500"
            let t = match t.find(['+', '-']) {
                Some(i) => {
                    offset = parse_zone_offset(&t[i..]).ok_or_else(invalid)?;
                    t[..i].trim()
                }
                None => t,
            };
            let mut fields = t.split(':');
            let hour: u32 = fields.next().and_then(|v| v.parse().ok()).ok_or_else(invalid)?;
            let minute: u32 = fields.next().unwrap_or("0").parse().map_err(|_| invalid())?;
            let seconds: f64 = fields.next().unwrap_or("0").parse().map_err(|_| invalid())?;
            let whole = seconds.trunc() as u32;
            let milli = ((seconds - seconds.trunc()) * 1000.0).round() as u32;
            NaiveTime::from_hms_milli_opt(hour, minute, whole, milli).ok_or_else(invalid)?
        }
        None => NaiveTime::MIN,
    };

    // Local reference time minus its offset gives UTC
    NaiveDateTime::new(date, time)
        .checked_sub_signed(offset)
        .ok_or_else(invalid)
}

/// Parse a signed `hh:mm`, `hhmm` or `hh` zone offset.
fn parse_zone_offset(s: &str) -> Option<Duration> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let rest = rest.trim();

    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i64 = hours.parse().ok()?;
    let minutes: i64 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    Some(Duration::minutes(sign * (hours * 60 + minutes)))
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid CF time units: '{0}'. Expected '<unit> since <date>'")]
    InvalidUnits(String),

    #[error("Unsupported time unit: {0}")]
    UnsupportedUnit(String),

    #[error("Invalid reference date: {0}")]
    InvalidReference(String),

    #[error("Time offset out of range: {0}")]
    OutOfRange(f64),
}
