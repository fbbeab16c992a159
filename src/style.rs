//! Style configuration supplied by the embedding application.
//!
//! [`StyleConfig`] is the UI-facing contract: font, font color, canvas size,
//! and the background spec. All types deserialize from JSON so the same
//! structs work for Rust API construction and config files.

use std::path::PathBuf;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::error::AdCanvasError;

/// Default canvas edge length in pixels (square canvas).
pub const DEFAULT_CANVAS_SIZE: u32 = 1080;

/// Rendering style for one ad image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// TTF/OTF font file. `None` uses the bundled font.
    #[serde(default)]
    pub font_path: Option<PathBuf>,
    /// Text color as `#rgb` / `#rrggbb` hex.
    #[serde(default = "default_font_color")]
    pub font_color: String,
    #[serde(default)]
    pub background: Background,
    /// Canvas edge length in pixels. Backgrounds are normalized to size × size.
    #[serde(default = "default_canvas_size")]
    pub size: u32,
}

fn default_font_color() -> String {
    "#000000".into()
}

fn default_canvas_size() -> u32 {
    DEFAULT_CANVAS_SIZE
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_color: default_font_color(),
            background: Background::default(),
            size: DEFAULT_CANVAS_SIZE,
        }
    }
}

/// Canvas background spec: solid fill, two-color gradient, or an image
/// center-cropped to fill the canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    Solid {
        color: String,
    },
    Gradient {
        start: String,
        end: String,
        #[serde(default)]
        direction: GradientDirection,
    },
    Image {
        path: PathBuf,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid {
            color: "#ffffff".into(),
        }
    }
}

/// Interpolation axis for gradient backgrounds.
///
/// Unrecognized direction strings deserialize to [`GradientDirection::Flat`],
/// which fills the canvas uniformly with the start color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    #[default]
    Vertical,
    Horizontal,
    Diagonal,
    #[serde(other)]
    Flat,
}

/// Parse a `#rgb` or `#rrggbb` hex color string.
pub fn parse_hex_color(input: &str) -> Result<Rgb<u8>, AdCanvasError> {
    let invalid = || AdCanvasError::InvalidColor(input.to_string());

    let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (i, ch) in channels.iter_mut().enumerate() {
                let nibble = u8::from_str_radix(&hex[i..i + 1], 16).map_err(|_| invalid())?;
                *ch = nibble * 0x11;
            }
            Ok(Rgb(channels))
        }
        6 => {
            let mut channels = [0u8; 3];
            for (i, ch) in channels.iter_mut().enumerate() {
                *ch = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16).map_err(|_| invalid())?;
            }
            Ok(Rgb(channels))
        }
        _ => Err(invalid()),
    }
}
