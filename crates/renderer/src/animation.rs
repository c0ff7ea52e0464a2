//! Self-contained animated SST map.
//!
//! Every frame is normalized north-to-south, quantized to one byte per cell
//! and embedded in a single HTML page. The page draws frames on a canvas
//! through a 256-entry palette, so no plotting library is needed.

use std::path::Path;

use grid_processor::{
    time_labels, ByteEncoding, LatitudeOrder, SpatialNormalizer, Subsampled,
    ValueEncoder, WrittenFile, BYTE_MAX_CODE, BYTE_NODATA,
};
use serde::Serialize;
use sst_common::{CellBounds, FrameSource, GridShape};
use tracing::{debug, info, instrument};

use crate::error::{RenderError, Result};
use crate::gradient::{Color, ColorScale};
use crate::template::ANIMATION_HTML;

/// Log progress every this many frames.
pub const ANIMATION_PROGRESS_INTERVAL: usize = 50;

/// Rendering options for [`Animation`].
#[derive(Debug, Clone)]
pub struct AnimationOptions {
    /// Title text; the current `YYYY-MM` label is appended in parentheses.
    pub title_prefix: String,
    /// Delay between frames while playing.
    pub frame_duration_ms: u64,
    /// Keep every n-th time step.
    pub time_step: usize,
    /// Keep every n-th row and column.
    pub spatial_subsample: usize,
    /// Value range mapped onto the color scale.
    pub encoding: ByteEncoding,
    pub color_scale: ColorScale,
    /// Color of missing cells (land).
    pub nodata_color: Color,
    pub lon_range: (f64, f64),
    pub lon_tick: f64,
    pub lat_range: (f64, f64),
    pub lat_tick: f64,
    /// Canvas size in pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            title_prefix: "NOAA ERSST v5 - Sea Surface Temperature".to_string(),
            frame_duration_ms: 100,
            time_step: 1,
            spatial_subsample: 1,
            encoding: ByteEncoding::default(),
            color_scale: ColorScale::rdbu_r(),
            nodata_color: Color::light_gray(),
            lon_range: (-180.0, 180.0),
            lon_tick: 60.0,
            lat_range: (-90.0, 90.0),
            lat_tick: 30.0,
            width: 1000,
            height: 570,
        }
    }
}

/// One encoded time step.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationFrame {
    /// `YYYY-MM`
    pub label: String,
    /// Row-major byte codes, north row first.
    pub codes: Vec<u8>,
}

/// All frames of an animation, ready to render.
#[derive(Debug, Clone)]
pub struct Animation {
    options: AnimationOptions,
    lons: Vec<f64>,
    lats: Vec<f64>,
    bounds: CellBounds,
    frames: Vec<AnimationFrame>,
}

/// Data embedded in the page as JSON.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Payload<'a> {
    title_prefix: &'a str,
    labels: Vec<&'a str>,
    lons: &'a [f64],
    lats: &'a [f64],
    bounds: CellBounds,
    frames: Vec<String>,
    palette: Vec<[u8; 4]>,
    readouts: Vec<Option<String>>,
    background: String,
    min: f32,
    max: f32,
    nodata: u8,
    frame_ms: u64,
    lon_range: [f64; 2],
    lon_tick: f64,
    lat_range: [f64; 2],
    lat_tick: f64,
}

impl Animation {
    /// Read, normalize and encode every (subsampled) frame of `source`.
    #[instrument(
        skip_all,
        fields(time_step = options.time_step, spatial_subsample = options.spatial_subsample)
    )]
    pub fn from_source<S: FrameSource>(source: &S, options: AnimationOptions) -> Result<Self> {
        let source = Subsampled::new(source, options.time_step, options.spatial_subsample)?;
        let shape = source.shape();
        info!(
            nlat = shape.nlat,
            nlon = shape.nlon,
            ntimes = shape.ntimes,
            "Creating animation frames"
        );

        if shape.ntimes == 0 {
            return Err(RenderError::EmptyAnimation);
        }

        let normalizer =
            SpatialNormalizer::new(source.lons(), source.lats(), LatitudeOrder::NorthToSouth)?;
        let labels = time_labels(&source);

        let mut frames = Vec::with_capacity(shape.ntimes);
        for (index, label) in labels.into_iter().enumerate() {
            let frame = source.read_frame(index)?;
            let normalized = normalizer.apply(&frame)?;
            frames.push(AnimationFrame {
                label,
                codes: options.encoding.encode_frame(&normalized),
            });

            if (index + 1) % ANIMATION_PROGRESS_INTERVAL == 0 {
                info!(processed = index + 1, total = shape.ntimes, "Processed frames");
            }
        }
        info!(frames = frames.len(), "Total frames created");

        Ok(Self {
            lons: normalizer.lons().to_vec(),
            lats: normalizer.lats().to_vec(),
            bounds: normalizer.cell_bounds(),
            options,
            frames,
        })
    }

    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }

    /// Longitudes west to east.
    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    /// Latitudes north to south.
    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn bounds(&self) -> CellBounds {
        self.bounds
    }

    pub fn options(&self) -> &AnimationOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn shape(&self) -> GridShape {
        GridShape::new(self.frames.len(), self.lats.len(), self.lons.len())
    }

    /// Title shown for frame `index`.
    pub fn title(&self, index: usize) -> Option<String> {
        self.frames
            .get(index)
            .map(|f| format!("{} ({})", self.options.title_prefix, f.label))
    }

    /// Render the complete page.
    pub fn to_html(&self) -> Result<String> {
        let title = self.title(0).ok_or(RenderError::EmptyAnimation)?;
        let opts = &self.options;

        let palette = opts
            .color_scale
            .palette(opts.nodata_color)
            .into_iter()
            .map(|c| [c.r, c.g, c.b, c.a])
            .collect();

        let payload = Payload {
            title_prefix: &opts.title_prefix,
            labels: self.frames.iter().map(|f| f.label.as_str()).collect(),
            lons: &self.lons,
            lats: &self.lats,
            bounds: self.bounds,
            frames: self.frames.iter().map(|f| to_hex(&f.codes)).collect(),
            palette,
            readouts: (0..=u8::MAX)
                .map(|code| sst_readout(&opts.encoding, code))
                .collect(),
            background: opts.nodata_color.to_css(),
            min: opts.encoding.min,
            max: opts.encoding.max,
            nodata: opts.encoding.nodata(),
            frame_ms: opts.frame_duration_ms,
            lon_range: [opts.lon_range.0, opts.lon_range.1],
            lon_tick: opts.lon_tick,
            lat_range: [opts.lat_range.0, opts.lat_range.1],
            lat_tick: opts.lat_tick,
        };

        // "</" would end the script element early
        let data = serde_json::to_string(&payload)?.replace("</", "<\\/");
        debug!(bytes = data.len(), "Serialized animation payload");

        Ok(ANIMATION_HTML
            .replace("{{TITLE}}", &escape_html(&title))
            .replace("{{WIDTH}}", &opts.width.to_string())
            .replace("{{HEIGHT}}", &opts.height.to_string())
            .replace("{{GRADIENT}}", &opts.color_scale.css_gradient("to top"))
            .replace("{{DATA}}", &data))
    }

    /// Write the page to `path`.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn write_html(&self, path: &Path) -> Result<WrittenFile> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.to_html()?)?;

        let file = WrittenFile::from_path(path)?;
        info!(size = %file.human_size(), "Saved animation");
        Ok(file)
    }
}

/// Hover text for a byte code, `None` for missing cells.
///
/// Interior codes show the middle of their quantization step. The lowest code
/// also holds everything below the range and the highest everything at or
/// above it, so those two read as open-ended.
pub fn sst_readout(encoding: &ByteEncoding, code: u8) -> Option<String> {
    if code == BYTE_NODATA {
        return None;
    }
    let min = encoding.min as f64;
    let max = encoding.max as f64;
    let step = (max - min) / BYTE_MAX_CODE as f64;

    let text = match code {
        0 => format!("below {:.1}°C", ((min + step) * 10.0).ceil() / 10.0),
        BYTE_MAX_CODE => format!("{:.1}°C or above", max),
        _ => format!("{:.1}°C", min + (code as f64 + 0.5) * step),
    };
    Some(text)
}

fn to_hex(codes: &[u8]) -> String {
    const DIGITS: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(codes.len() * 2);
    for &b in codes {
        out.push(DIGITS[(b >> 4) as usize] as char);
        out.push(DIGITS[(b & 0x0f) as usize] as char);
    }
    out
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
