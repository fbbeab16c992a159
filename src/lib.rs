//! # Adcanvas - Ad Image Composition Library
//!
//! Adcanvas turns a structured ad record (headline, body, call to action,
//! hashtags, contact details) plus a background into a finished square ad
//! image. It provides:
//!
//! - **Text metrics**: pixel-accurate measurement and greedy word wrap
//! - **Backgrounds**: solid fills, two-color gradients, center-crop-to-fill
//! - **Fitting**: largest-font-size search so the copy fits the canvas
//! - **Compositing**: three-band layout (brand / message / contact) drawn
//!   with anti-aliased glyph rendering
//!
//! ## Quick Start
//!
//! ```no_run
//! use adcanvas::{AdRecord, StyleConfig, LayoutParams, background, font, layout, style};
//!
//! let ad = AdRecord {
//!     headline: "Big Sale".into(),
//!     text: "50% off everything this weekend only".into(),
//!     call_to_action: "Shop Now".into(),
//!     ..Default::default()
//! };
//!
//! let config = StyleConfig::default();
//! let mut canvas = background::build_background(&config)?;
//! let color = style::parse_hex_color(&config.font_color)?;
//! layout::render(&ad, &mut canvas, color, font::bundled_font(), &LayoutParams::default())?;
//! canvas.save("out.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`ad`] | The structured ad record |
//! | [`style`] | Style config, background spec, color parsing |
//! | [`font`] | Font loading and the bundled default font |
//! | [`metrics`] | Text measurement and word wrap |
//! | [`background`] | Canvas/background construction |
//! | [`fitting`] | Font-size search |
//! | [`layout`] | Band layout and drawing |
//! | [`error`] | Error types |
//!
//! One render call is single-threaded and synchronous: it measures, then
//! draws, then returns. Each call owns its canvas exclusively; nothing is
//! shared or cached across renders, so concurrent callers just use separate
//! canvases.

pub mod ad;
pub mod background;
pub mod error;
pub mod fitting;
pub mod font;
pub mod layout;
pub mod metrics;
pub mod style;

/// The render target: a fixed-size RGB raster, mutated in place by one
/// render pass and never shared across renders.
pub type Canvas = image::RgbImage;

// Re-exports for convenience
pub use ad::AdRecord;
pub use background::build_background;
pub use error::AdCanvasError;
pub use layout::{LayoutParams, render};
pub use style::{Background, GradientDirection, StyleConfig};
