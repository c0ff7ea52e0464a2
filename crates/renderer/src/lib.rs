//! Rendering of SST grids for the web.
//!
//! - **gradient**: colors, color scales (RdBu reversed) and byte-code palettes
//! - **animation**: a self-contained HTML page animating every frame of a
//!   dataset with play/pause controls, a time slider, a color bar and a
//!   hover read-out

pub mod animation;
pub mod error;
pub mod gradient;
mod template;

pub use animation::{
    sst_readout, Animation, AnimationFrame, AnimationOptions, ANIMATION_PROGRESS_INTERVAL,
};
pub use error::{RenderError, Result};
pub use gradient::{interpolate_color, Color, ColorScale, ColorStop};
