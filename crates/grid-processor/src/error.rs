//! Error types for grid processing.

use thiserror::Error;

/// Errors that can occur during grid processing.
#[derive(Error, Debug)]
pub enum GridProcessorError {
    /// Coordinate vectors cannot be normalized (duplicates, NaN, empty axis).
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    /// A frame or output does not match the grid shape.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// The frame source failed.
    #[error("failed to read source data: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Filesystem error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Metadata or data serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GridProcessorError {
    /// Create an InvalidCoordinates error.
    pub fn invalid_coordinates(msg: impl Into<String>) -> Self {
        Self::InvalidCoordinates(msg.into())
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch(msg: impl Into<String>) -> Self {
        Self::ShapeMismatch(msg.into())
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Wrap an error raised by a frame source.
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }
}

/// Result type for grid processor operations.
pub type Result<T> = std::result::Result<T, GridProcessorError>;
