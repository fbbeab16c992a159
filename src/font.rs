//! Font loading.
//!
//! Fonts are read once, up front, and held in memory for the remainder of a
//! render. A DejaVu Sans is bundled for the CLI default and for tests.

use std::path::Path;
use std::sync::OnceLock;

use ab_glyph::FontArc;

use crate::error::AdCanvasError;

static BUNDLED: OnceLock<FontArc> = OnceLock::new();

/// The bundled default font (DejaVu Sans), parsed on first use.
pub fn bundled_font() -> &'static FontArc {
    BUNDLED.get_or_init(|| {
        FontArc::try_from_slice(include_bytes!("../assets/fonts/DejaVuSans.ttf"))
            .expect("Failed to load bundled DejaVu Sans")
    })
}

/// Load a TTF/OTF font from disk.
pub fn load_font(path: &Path) -> Result<FontArc, AdCanvasError> {
    let bytes = std::fs::read(path).map_err(|e| {
        AdCanvasError::FontLoad(format!("failed to read font {}: {e}", path.display()))
    })?;
    FontArc::try_from_vec(bytes).map_err(|e| {
        AdCanvasError::FontLoad(format!("failed to parse font {}: {e}", path.display()))
    })
}

/// Parse a font from an in-memory byte buffer.
pub fn font_from_bytes(bytes: Vec<u8>) -> Result<FontArc, AdCanvasError> {
    FontArc::try_from_vec(bytes)
        .map_err(|e| AdCanvasError::FontLoad(format!("failed to parse font: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_font_parses() {
        // First call parses, second returns the cached instance.
        let a = bundled_font();
        let b = bundled_font();
        assert_eq!(a as *const _, b as *const _);
    }

    #[test]
    fn missing_font_file_is_font_load_error() {
        let err = load_font(Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert!(matches!(err, AdCanvasError::FontLoad(_)));
    }

    #[test]
    fn garbage_bytes_are_font_load_error() {
        let err = font_from_bytes(vec![0u8; 64]).unwrap_err();
        assert!(matches!(err, AdCanvasError::FontLoad(_)));
    }
}
