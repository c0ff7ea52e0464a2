//! Helpers around the native netcdf library.
//!
//! Attribute lookups go through [`has_attr`] first: asking HDF5 for an
//! attribute that does not exist makes the C library print a diagnostic even
//! though the Rust side handles the `None` gracefully.

use std::sync::Once;

/// Turn off HDF5's automatic error printing.
///
/// Missing optional attributes are reported by the C library on stderr even
/// when the lookup is handled. Call before opening files; repeated calls are
/// no-ops.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: a null handler with the default stack disables printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// CF packing and missing-value attributes of a data variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    /// Multiplier applied to raw values (`scale_factor`, default 1)
    pub scale_factor: f64,
    /// Offset added after scaling (`add_offset`, default 0)
    pub add_offset: f64,
    /// Raw values that mark missing data (`_FillValue`, `missing_value`)
    pub missing_values: Vec<f64>,
}

impl Default for Packing {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            add_offset: 0.0,
            missing_values: Vec::new(),
        }
    }
}

impl Packing {
    /// Read the packing attributes of a variable.
    pub fn from_variable(var: &netcdf::Variable) -> Self {
        let mut missing_values = Vec::new();
        for name in ["_FillValue", "missing_value"] {
            if let Some(value) = get_f64_attr(var, name) {
                if !missing_values.contains(&value) {
                    missing_values.push(value);
                }
            }
        }

        Self {
            scale_factor: get_f64_attr(var, "scale_factor").unwrap_or(1.0),
            add_offset: get_f64_attr(var, "add_offset").unwrap_or(0.0),
            missing_values,
        }
    }

    /// Whether a raw value matches one of the missing-value markers.
    ///
    /// Float sentinels such as `-9.96921e36` lose precision when read as
    /// f32, so the comparison uses a relative tolerance.
    pub fn is_missing(&self, raw: f32) -> bool {
        if raw.is_nan() {
            return true;
        }
        let raw = raw as f64;
        self.missing_values.iter().any(|&m| {
            if m.is_nan() {
                false
            } else {
                raw == m || (raw - m).abs() <= m.abs() * 1e-6
            }
        })
    }

    /// Convert a raw stored value to a physical value (NaN when missing).
    pub fn unpack(&self, raw: f32) -> f32 {
        if self.is_missing(raw) {
            f32::NAN
        } else if self.scale_factor == 1.0 && self.add_offset == 0.0 {
            raw
        } else {
            (raw as f64 * self.scale_factor + self.add_offset) as f32
        }
    }
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
pub(crate) fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get a numeric attribute as f64.
pub(crate) fn get_f64_attr(var: &netcdf::Variable, name: &str) -> Option<f64> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f64::try_from(attr_value).ok()
}

/// Helper to get a string attribute.
pub(crate) fn get_string_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        netcdf::AttributeValue::Str(s) => Some(s),
        netcdf::AttributeValue::Strs(mut v) if !v.is_empty() => Some(v.swap_remove(0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_packing_passes_values_through() {
        let packing = Packing::default();
        assert_eq!(packing.unpack(12.5), 12.5);
        assert!(packing.unpack(f32::NAN).is_nan());
    }

    #[test]
    fn test_ersst_missing_value_tolerance() {
        let packing = Packing {
            missing_values: vec![-9.96921e36],
            ..Default::default()
        };
        // The f32 representation of the sentinel is not bit-equal to the f64 one
        assert!(packing.unpack(-9.96921e36_f32).is_nan());
        assert_eq!(packing.unpack(-1.8), -1.8);
    }

    #[test]
    fn test_scale_and_offset() {
        let packing = Packing {
            scale_factor: 0.01,
            add_offset: 10.0,
            missing_values: vec![-32768.0],
        };
        assert!((packing.unpack(150.0) - 11.5).abs() < 1e-6);
        assert!(packing.unpack(-32768.0).is_nan());
    }

    #[test]
    fn test_silence_hdf5_errors_idempotent() {
        silence_hdf5_errors();
        silence_hdf5_errors();
    }
}
