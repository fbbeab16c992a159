//! # Error Types
//!
//! This module defines error types used throughout the adcanvas library.
//!
//! Layout overflow is deliberately *not* an error in the default (lenient)
//! configuration: text that exceeds the canvas at the minimum font size is
//! rendered as-is and may clip. [`AdCanvasError::LayoutOverflow`] is only
//! produced when strict mode is enabled on [`crate::layout::LayoutParams`].

use thiserror::Error;

/// Main error type for adcanvas operations
#[derive(Debug, Error)]
pub enum AdCanvasError {
    /// Background image bytes/file could not be decoded
    #[error("failed to decode background image: {0}")]
    ImageDecode(#[source] image::ImageError),

    /// Output image could not be encoded
    #[error("failed to encode output image: {0}")]
    ImageEncode(#[source] image::ImageError),

    /// Font file missing or not parseable
    #[error("font error: {0}")]
    FontLoad(String),

    /// Color string not parseable as `#rgb` / `#rrggbb` hex
    #[error("invalid color {0:?}")]
    InvalidColor(String),

    /// Strict mode only: text exceeds the available height at the minimum font size
    #[error("text does not fit the canvas at the minimum font size")]
    LayoutOverflow,

    /// Malformed ad record or style config input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
