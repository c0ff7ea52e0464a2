//! Common types shared across the SST web map crates.

pub mod bbox;
pub mod grid;
pub mod source;
pub mod time;

pub use bbox::{CellBounds, CoordinateBounds};
pub use grid::GridShape;
pub use source::{FrameSource, MemorySource, MemorySourceError};
pub use time::{month_label, CfTimeUnits, TimeParseError, TimeUnit};
