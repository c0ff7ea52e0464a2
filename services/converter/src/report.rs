//! Console summaries printed after each run.

use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use grid_processor::{ConversionReport, WrittenFile};
use netcdf_parser::DatasetSummary;
use sst_common::GridShape;

/// Formats run summaries as console tables.
pub struct SummaryReport;

impl SummaryReport {
    /// Summary of a JSON or binary conversion.
    pub fn format_conversion(title: &str, report: &ConversionReport) -> String {
        let mut table = new_table(title);

        add_files(&mut table, &report.files);
        if report.files.len() > 1 {
            table.add_row(vec![
                "Total size:".to_string(),
                format!("{:.2} MB", report.total_bytes() as f64 / (1024.0 * 1024.0)),
            ]);
        }

        table.add_row(vec!["", ""]);
        add_shape(&mut table, report.shape);
        if let Some((first, last)) = &report.time_range {
            table.add_row(vec!["Time range:".to_string(), format!("{} to {}", first, last)]);
        }

        table.to_string()
    }

    /// Summary of an animation export.
    pub fn format_animation(file: &WrittenFile, shape: GridShape) -> String {
        let mut table = new_table("Animated map");
        add_files(&mut table, std::slice::from_ref(file));
        table.add_row(vec!["", ""]);
        add_shape(&mut table, shape);
        table.to_string()
    }

    /// Variables, dimensions and time range of the input file.
    pub fn format_dataset(summary: &DatasetSummary) -> String {
        let mut table = new_table("Dataset");

        table.add_row(vec!["Variables:".to_string(), summary.variables.join(", ")]);
        let dims = summary
            .dimensions
            .iter()
            .map(|(name, len)| format!("{}={}", name, len))
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec!["Dimensions:".to_string(), dims]);
        if let Some((first, last)) = &summary.time_range {
            table.add_row(vec![
                "Time range:".to_string(),
                format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d")),
            ]);
        }

        table.to_string()
    }
}

fn new_table(title: &str) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![title.to_string()]);
    table
}

fn add_files(table: &mut Table, files: &[WrittenFile]) {
    for file in files {
        let name = file
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.display().to_string());
        table.add_row(vec![format!("{}:", name), file.human_size()]);
    }
}

fn add_shape(table: &mut Table, shape: GridShape) {
    table.add_row(vec![
        "Grid:".to_string(),
        format!("{} lat x {} lon", shape.nlat, shape.nlon),
    ]);
    table.add_row(vec![
        "Cells per frame:".to_string(),
        shape.cells_per_frame().to_string(),
    ]);
    table.add_row(vec!["Frames:".to_string(), shape.ntimes.to_string()]);
    table.add_row(vec!["Total cells:".to_string(), shape.total_cells().to_string()]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn report() -> ConversionReport {
        ConversionReport {
            files: vec![
                WrittenFile {
                    path: PathBuf::from("docs/data/metadata.json"),
                    bytes: 4_096,
                },
                WrittenFile {
                    path: PathBuf::from("docs/data/sst_data.bin"),
                    bytes: 3 * 1024 * 1024,
                },
            ],
            shape: GridShape::new(2, 89, 180),
            time_range: Some(("1854-01".to_string(), "1854-02".to_string())),
        }
    }

    #[test]
    fn test_conversion_table() {
        let table = SummaryReport::format_conversion("Binary output", &report());
        assert!(table.contains("Binary output"));
        assert!(table.contains("metadata.json:"));
        assert!(table.contains("4.0 KB"));
        assert!(table.contains("sst_data.bin:"));
        assert!(table.contains("3.0 MB"));
        assert!(table.contains("89 lat x 180 lon"));
        assert!(table.contains("16020"));
        assert!(table.contains("32040"));
        assert!(table.contains("1854-01 to 1854-02"));
    }

    #[test]
    fn test_animation_table() {
        let file = WrittenFile {
            path: PathBuf::from("sst_animated_map.html"),
            bytes: 2 * 1024 * 1024,
        };
        let table = SummaryReport::format_animation(&file, GridShape::new(12, 89, 180));
        assert!(table.contains("sst_animated_map.html:"));
        assert!(table.contains("2.0 MB"));
        assert!(table.contains("192240"));
    }

    #[test]
    fn test_dataset_table() {
        let summary = DatasetSummary {
            variables: vec!["lat".to_string(), "lon".to_string(), "sst".to_string()],
            dimensions: vec![("lat".to_string(), 89), ("lon".to_string(), 180)],
            time_range: None,
        };
        let table = SummaryReport::format_dataset(&summary);
        assert!(table.contains("lat, lon, sst"));
        assert!(table.contains("lat=89, lon=180"));
        assert!(!table.contains("Time range"));
    }
}
