//! End-to-end conversions from a frame source to the web output files.
//!
//! Both conversions read one frame at a time, normalize it, encode it and
//! append it to the data file, so memory use is bounded by a single frame.

use std::path::Path;

use sst_common::{month_label, FrameSource, GridShape};
use tracing::{info, instrument};

use crate::config::{BinaryOutputConfig, JsonOutputConfig};
use crate::encoding::ValueEncoder;
use crate::error::{GridProcessorError, Result};
use crate::normalize::{LatitudeOrder, SpatialNormalizer};
use crate::subsample::Subsampled;
use crate::writer::{
    write_metadata, BinaryDataWriter, BinaryMetadata, ByteEncodingInfo, CentiDegreeEncodingInfo,
    JsonDataWriter, JsonMetadata, ValueRange, WrittenFile, METADATA_FILE,
};

/// Log progress every this many frames in the JSON conversion.
pub const JSON_PROGRESS_INTERVAL: usize = 100;

/// Log progress every this many frames in the binary conversion.
pub const BINARY_PROGRESS_INTERVAL: usize = 200;

/// What a conversion produced.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Files written, metadata first.
    pub files: Vec<WrittenFile>,
    /// Shape of the written grid.
    pub shape: GridShape,
    /// First and last `YYYY-MM` labels.
    pub time_range: Option<(String, String)>,
}

impl ConversionReport {
    pub fn cells_per_frame(&self) -> usize {
        self.shape.cells_per_frame()
    }

    pub fn total_cells(&self) -> usize {
        self.shape.total_cells()
    }

    /// Combined size of all written files.
    pub fn total_bytes(&self) -> u64 {
        self.files.iter().map(|f| f.bytes).sum()
    }
}

/// Convert `source` to `metadata.json` plus `sst_data.json[.gz]`.
///
/// Longitudes are wrapped and sorted, latitudes stay in source order and
/// values are written as integer hundredths of a degree.
#[instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub fn convert_to_json<S: FrameSource>(
    source: &S,
    config: &JsonOutputConfig,
) -> Result<ConversionReport> {
    config.validate().map_err(GridProcessorError::invalid_config)?;

    let source = Subsampled::new(source, config.time_step, 1)?;
    let shape = source.shape();
    let normalizer = SpatialNormalizer::new(source.lons(), source.lats(), LatitudeOrder::AsIs)?;
    let times = time_labels(&source);

    info!(
        nlat = shape.nlat,
        nlon = shape.nlon,
        ntimes = shape.ntimes,
        time_step = config.time_step,
        "Converting to JSON"
    );

    create_output_dir(&config.output_dir)?;

    let metadata = JsonMetadata {
        nlat: shape.nlat,
        nlon: shape.nlon,
        ntimes: shape.ntimes,
        lons: normalizer.lons().to_vec(),
        lats: normalizer.lats().to_vec(),
        times: times.clone(),
        bounds: normalizer.coordinate_bounds(),
        value_range: ValueRange {
            min: config.value_range.0,
            max: config.value_range.1,
        },
        encoding: CentiDegreeEncodingInfo::from(&config.encoding),
    };
    let metadata_file = write_metadata(&config.output_dir.join(METADATA_FILE), &metadata, false)?;
    info!(path = %metadata_file.path.display(), "Saved metadata");

    let mut writer =
        JsonDataWriter::create(&config.output_dir, config.write_plain, config.write_gzip)?;
    for index in 0..shape.ntimes {
        let frame = source.read_frame(index)?;
        let normalized = normalizer.apply(&frame)?;
        let rows = config.encoding.encode_rows(&normalized, shape.nlon);
        writer.write_frame(&rows)?;

        if (index + 1) % JSON_PROGRESS_INTERVAL == 0 {
            info!(processed = index + 1, total = shape.ntimes, "Processed time steps");
        }
    }

    let mut files = vec![metadata_file];
    files.extend(writer.finish()?);

    for file in &files {
        info!(path = %file.path.display(), size = %file.human_size(), "Wrote file");
    }

    Ok(ConversionReport {
        files,
        shape,
        time_range: label_range(&times),
    })
}

/// Convert `source` to pretty `metadata.json` plus `sst_data.bin`.
///
/// Longitudes are wrapped and sorted, latitudes run north to south and
/// values are quantized to one byte per cell.
#[instrument(skip_all, fields(output_dir = %config.output_dir.display()))]
pub fn convert_to_binary<S: FrameSource>(
    source: &S,
    config: &BinaryOutputConfig,
) -> Result<ConversionReport> {
    config.validate().map_err(GridProcessorError::invalid_config)?;

    let shape = source.shape();
    let normalizer =
        SpatialNormalizer::new(source.lons(), source.lats(), LatitudeOrder::NorthToSouth)?;
    let times = time_labels(source);

    info!(
        nlat = shape.nlat,
        nlon = shape.nlon,
        ntimes = shape.ntimes,
        min = config.encoding.min,
        max = config.encoding.max,
        "Converting to uint8 binary"
    );

    create_output_dir(&config.output_dir)?;

    let metadata = BinaryMetadata {
        nlat: shape.nlat,
        nlon: shape.nlon,
        ntimes: shape.ntimes,
        times: times.clone(),
        lats: normalizer.lats().to_vec(),
        lons: normalizer.lons().to_vec(),
        bounds: normalizer.cell_bounds(),
        encoding: ByteEncodingInfo::from(&config.encoding),
    };
    let metadata_file = write_metadata(&config.output_dir.join(METADATA_FILE), &metadata, true)?;
    info!(path = %metadata_file.path.display(), "Saved metadata");

    let mut writer = BinaryDataWriter::create(&config.output_dir, shape)?;
    for index in 0..shape.ntimes {
        let frame = source
            .read_frame(index)
            .map_err(GridProcessorError::from_source)?;
        let normalized = normalizer.apply(&frame)?;
        writer.write_frame(&config.encoding.encode_frame(&normalized))?;

        if index == 0 || (index + 1) % BINARY_PROGRESS_INTERVAL == 0 {
            info!(processed = index + 1, total = shape.ntimes, "Processed frames");
        }
    }
    let data_file = writer.finish()?;

    info!(
        binary = %data_file.human_size(),
        metadata = %metadata_file.human_size(),
        cells_per_frame = shape.cells_per_frame(),
        frames = shape.ntimes,
        total_cells = shape.total_cells(),
        "Binary conversion complete"
    );

    Ok(ConversionReport {
        files: vec![metadata_file, data_file],
        shape,
        time_range: label_range(&times),
    })
}

/// `YYYY-MM` label for every time stamp of a source.
pub fn time_labels<S: FrameSource>(source: &S) -> Vec<String> {
    source.times().iter().map(month_label).collect()
}

fn label_range(labels: &[String]) -> Option<(String, String)> {
    Some((labels.first()?.clone(), labels.last()?.clone()))
}

fn create_output_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    Ok(())
}
