//! Test data generators for creating synthetic sea surface temperature data.
//!
//! These generators create predictable, verifiable SST patterns on the
//! ERSST v5 2-degree grid (or any custom grid) that can be used across the
//! test suite.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// ERSST v5 longitudes as stored in the file: 0 to 358 in 2 degree steps.
pub fn ersst_lons() -> Vec<f64> {
    (0..180).map(|i| 2.0 * i as f64).collect()
}

/// ERSST v5 latitudes as stored in the file: 88 down to -88.
pub fn ersst_lats() -> Vec<f64> {
    (0..89).map(|i| 88.0 - 2.0 * i as f64).collect()
}

/// Evenly spaced axis starting at `start`.
pub fn axis(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + step * i as f64).collect()
}

/// First-of-month time stamps starting at `year`-`month`.
///
/// # Example
///
/// ```
/// use test_utils::monthly_times;
///
/// let times = monthly_times(1854, 11, 3);
/// assert_eq!(times[2].format("%Y-%m").to_string(), "1855-01");
/// ```
pub fn monthly_times(year: i32, month: u32, count: usize) -> Vec<NaiveDateTime> {
    let mut times = Vec::with_capacity(count);
    let (mut y, mut m) = (year, month);
    for _ in 0..count {
        let date = NaiveDate::from_ymd_opt(y, m, 1).expect("valid month");
        times.push(date.and_hms_opt(0, 0, 0).expect("valid midnight"));
        m += 1;
        if m > 12 {
            m = 1;
            y += 1;
        }
    }
    times
}

/// Days since 1800-01-01 for each time stamp, as stored in ERSST files.
pub fn days_since_1800(times: &[NaiveDateTime]) -> Vec<f64> {
    let epoch = NaiveDate::from_ymd_opt(1800, 1, 1)
        .expect("valid epoch")
        .and_hms_opt(0, 0, 0)
        .expect("valid midnight");
    times
        .iter()
        .map(|t| (*t - epoch).num_seconds() as f64 / 86_400.0)
        .collect()
}

/// Plausible SST in degrees Celsius at a grid point.
///
/// Warm at the equator (about 28C), near freezing at the poles, with a
/// small seasonal swing that flips sign between hemispheres.
pub fn sst_value(lat: f64, lon: f64, month: u32) -> f32 {
    let base = 28.0 * lat.to_radians().cos().powi(2) - 1.5;
    let season = (2.0 * std::f64::consts::PI * (month as f64 - 2.0) / 12.0).cos();
    let swing = -2.0 * season * lat.to_radians().sin();
    let zonal = 0.5 * lon.to_radians().sin();
    (base + swing + zonal).clamp(-1.8, 31.5) as f32
}

/// Whether a synthetic grid point is land (no data).
///
/// Land is a fixed block between 20E and 40E from 10S to 30N, which keeps
/// some NaN cells in every generated frame.
pub fn is_land(lat: f64, lon: f64) -> bool {
    let lon = if lon > 180.0 { lon - 360.0 } else { lon };
    (20.0..=40.0).contains(&lon) && (-10.0..=30.0).contains(&lat)
}

/// Creates one row-major `lats.len() * lons.len()` SST frame.
///
/// Land cells hold NaN.
pub fn create_sst_frame(lons: &[f64], lats: &[f64], time: &NaiveDateTime) -> Vec<f32> {
    let month = time.month();
    let mut frame = Vec::with_capacity(lats.len() * lons.len());
    for &lat in lats {
        for &lon in lons {
            if is_land(lat, lon) {
                frame.push(f32::NAN);
            } else {
                frame.push(sst_value(lat, lon, month));
            }
        }
    }
    frame
}

/// Creates one frame per time stamp.
pub fn create_sst_frames(lons: &[f64], lats: &[f64], times: &[NaiveDateTime]) -> Vec<Vec<f32>> {
    times
        .iter()
        .map(|t| create_sst_frame(lons, lats, t))
        .collect()
}

/// Creates a frame where each cell is `row * 100 + col`.
///
/// Useful for checking that reordering moves the right cells.
pub fn create_index_frame(nlat: usize, nlon: usize) -> Vec<f32> {
    let mut frame = Vec::with_capacity(nlat * nlon);
    for row in 0..nlat {
        for col in 0..nlon {
            frame.push((row * 100 + col) as f32);
        }
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ersst_axes() {
        let lons = ersst_lons();
        let lats = ersst_lats();
        assert_eq!(lons.len(), 180);
        assert_eq!(lats.len(), 89);
        assert_eq!(lons[179], 358.0);
        assert_eq!(lats[0], 88.0);
        assert_eq!(lats[88], -88.0);
    }

    #[test]
    fn test_monthly_times_rollover() {
        let times = monthly_times(1854, 12, 2);
        assert_eq!(times[0].year(), 1854);
        assert_eq!(times[1].year(), 1855);
        assert_eq!(times[1].month(), 1);
    }

    #[test]
    fn test_days_since_1800() {
        let times = monthly_times(1854, 1, 1);
        assert_eq!(days_since_1800(&times), vec![19723.0]);
    }

    #[test]
    fn test_sst_value_in_range() {
        for lat in [-88.0, -30.0, 0.0, 45.0, 88.0] {
            for month in 1..=12 {
                let v = sst_value(lat, 100.0, month);
                assert!((-2.0..=32.0).contains(&v), "{} out of range", v);
            }
        }
        assert!(sst_value(0.0, 0.0, 1) > sst_value(60.0, 0.0, 1));
    }

    #[test]
    fn test_frame_has_land() {
        let times = monthly_times(2000, 1, 1);
        let frame = create_sst_frame(&ersst_lons(), &ersst_lats(), &times[0]);
        assert_eq!(frame.len(), 180 * 89);
        assert!(frame.iter().any(|v| v.is_nan()));
        assert!(frame.iter().any(|v| !v.is_nan()));
    }

    #[test]
    fn test_index_frame() {
        let frame = create_index_frame(3, 4);
        assert_eq!(frame[0], 0.0);
        assert_eq!(frame[5], 101.0);
        assert_eq!(frame[11], 203.0);
    }
}
