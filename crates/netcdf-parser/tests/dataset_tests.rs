//! Integration tests for reading SST datasets.
//!
//! Most tests write a small synthetic file first; the tests at the bottom
//! read the real ERSST v5 file when it has been downloaded.

use netcdf_parser::{NetCdfError, SstDataset, DEFAULT_VARIABLE};
use sst_common::{month_label, FrameSource};
use test_utils::{
    assert_approx_eq, create_sst_netcdf, require_test_file, temp_test_dir_with_prefix,
    SyntheticSst, ERSST_FILE,
};

fn write_fixture(spec: &SyntheticSst) -> (tempfile::TempDir, std::path::PathBuf, Vec<Vec<f32>>) {
    let dir = temp_test_dir_with_prefix("sst_dataset_");
    let path = dir.path().join("sst.nc");
    let frames = create_sst_netcdf(&path, spec).unwrap();
    (dir, path, frames)
}

// ============================================================================
// Synthetic files
// ============================================================================

#[test]
fn test_open_reads_coordinates() {
    let spec = SyntheticSst::coarse(3);
    let (_dir, path, _) = write_fixture(&spec);

    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();
    assert_eq!(ds.lons(), spec.lons.as_slice());
    assert_eq!(ds.lats(), spec.lats.as_slice());
    assert_eq!(ds.times().len(), 3);

    let shape = ds.shape();
    assert_eq!(shape.ntimes, 3);
    assert_eq!(shape.nlat, 6);
    assert_eq!(shape.nlon, 12);
}

#[test]
fn test_time_labels_decode_days_since_1800() {
    let spec = SyntheticSst::coarse(14);
    let (_dir, path, _) = write_fixture(&spec);

    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();
    let labels = ds.time_labels();
    assert_eq!(labels[0], "1854-01");
    assert_eq!(labels[12], "1855-01");
    assert_eq!(labels[13], "1855-02");
    assert_eq!(ds.time_values()[0], 19723.0);
    assert_eq!(month_label(&ds.times()[1]), "1854-02");
}

#[test]
fn test_read_frame_maps_missing_to_nan() {
    let spec = SyntheticSst::coarse(2);
    let (_dir, path, frames) = write_fixture(&spec);

    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();
    for (index, expected) in frames.iter().enumerate() {
        let frame = ds.read_frame(index).unwrap();
        assert_eq!(frame.len(), expected.len());
        for (got, want) in frame.iter().zip(expected) {
            if want.is_nan() {
                assert!(got.is_nan());
            } else {
                assert_eq!(got, want);
            }
        }
    }
    assert!(ds.read_frame(0).unwrap().iter().any(|v| v.is_nan()));
}

#[test]
fn test_read_frame_unpacks_scale_and_offset() {
    let spec = SyntheticSst {
        packing: Some((0.01, 15.0)),
        ..SyntheticSst::coarse(1)
    };
    let (_dir, path, frames) = write_fixture(&spec);

    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();
    assert_approx_eq!(ds.packing().scale_factor, 0.01, 1e-9);
    assert_approx_eq!(ds.packing().add_offset, 15.0, 1e-9);

    let frame = ds.read_frame(0).unwrap();
    for (got, want) in frame.iter().zip(&frames[0]) {
        if want.is_nan() {
            assert!(got.is_nan());
        } else {
            assert_approx_eq!(*got, *want, 1e-3);
        }
    }
}

#[test]
fn test_read_frame_out_of_range() {
    let spec = SyntheticSst::coarse(2);
    let (_dir, path, _) = write_fixture(&spec);

    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();
    match ds.read_frame(2) {
        Err(NetCdfError::OutOfRange { index, ntimes }) => {
            assert_eq!(index, 2);
            assert_eq!(ntimes, 2);
        }
        other => panic!("expected OutOfRange, got {:?}", other),
    }
}

#[test]
fn test_custom_variable_name() {
    let spec = SyntheticSst {
        variable: "analysed_sst".to_string(),
        ..SyntheticSst::coarse(1)
    };
    let (_dir, path, _) = write_fixture(&spec);

    assert!(matches!(
        SstDataset::open(&path, DEFAULT_VARIABLE),
        Err(NetCdfError::MissingData(_))
    ));
    let ds = SstDataset::open(&path, "analysed_sst").unwrap();
    assert_eq!(ds.variable(), "analysed_sst");
}

#[test]
fn test_describe_lists_variables_and_dimensions() {
    let spec = SyntheticSst::coarse(4);
    let (_dir, path, _) = write_fixture(&spec);

    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();
    let summary = ds.describe();
    for name in ["time", "lat", "lon", "sst"] {
        assert!(summary.variables.iter().any(|v| v == name), "missing {}", name);
    }
    assert!(summary.dimensions.contains(&("lat".to_string(), 6)));
    let (first, last) = summary.time_range.unwrap();
    assert_eq!(month_label(&first), "1854-01");
    assert_eq!(month_label(&last), "1854-04");
}

#[test]
fn test_open_missing_file() {
    let result = SstDataset::open("/nonexistent/sst.mnmean.nc", DEFAULT_VARIABLE);
    assert!(matches!(result, Err(NetCdfError::IoError(_))));
}

// ============================================================================
// Real ERSST v5 file
// ============================================================================

#[test]
fn test_real_ersst_layout() {
    let path = require_test_file!(ERSST_FILE);
    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();

    assert_eq!(ds.lons().len(), 180);
    assert_eq!(ds.lats().len(), 89);
    assert_eq!(ds.lats()[0], 88.0);
    assert_eq!(ds.time_labels()[0], "1854-01");
}

#[test]
fn test_real_ersst_first_frame_range() {
    let path = require_test_file!(ERSST_FILE);
    let ds = SstDataset::open(&path, DEFAULT_VARIABLE).unwrap();

    let frame = ds.read_frame(0).unwrap();
    let valid: Vec<f32> = frame.iter().copied().filter(|v| !v.is_nan()).collect();
    assert!(!valid.is_empty());
    assert!(valid.len() < frame.len(), "land cells should be NaN");
    assert!(valid.iter().all(|v| (-3.0..=35.0).contains(v)));
}
