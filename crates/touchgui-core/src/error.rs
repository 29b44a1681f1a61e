//! Construction-time errors for widgets, pages and the router.
//!
//! Everything here describes a layout or asset authoring mistake. The
//! application is expected to treat any of these as fatal at boot; nothing
//! in the event path returns an error.

use thiserror_no_std::Error;

/// Error types for building the widget tree
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GuiError {
    /// Two images that must share dimensions (enabled/disabled/pressed) do not
    #[error("Image size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    ImageSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    /// More widgets were given to a page than it can hold
    #[error("Page capacity exceeded (max: {capacity})")]
    PageFull {
        /// Maximum number of widgets per page
        capacity: usize,
    },

    /// More top-level controls were given to a router than it can hold
    #[error("Router control capacity exceeded (max: {capacity})")]
    TooManyControls {
        /// Maximum number of router controls
        capacity: usize,
    },

    /// Slider range that is empty or a single value
    #[error("Invalid slider range ({min}..={max}), min must be below max")]
    InvalidRange { min: i32, max: i32 },

    /// Slider too small to hold its track outline and handle
    #[error("Slider {width}x{height} cannot hold a handle {handle_width} pixels wide")]
    SliderTooSmall {
        width: u32,
        height: u32,
        handle_width: u32,
    },
}

/// Result type for widget construction
pub type GuiResult<T> = Result<T, GuiError>;
