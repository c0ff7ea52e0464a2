//! Error types for rendering.

use grid_processor::GridProcessorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    /// The source yielded no frames to animate.
    #[error("animation has no frames")]
    EmptyAnimation,

    #[error("invalid color scale: {0}")]
    InvalidColorScale(String),

    /// Reading, normalizing or encoding the frames failed.
    #[error("frame processing failed: {0}")]
    Processing(#[from] GridProcessorError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
