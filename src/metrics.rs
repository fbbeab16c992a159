//! Text metrics: pixel-width measurement, ink-height measurement, greedy
//! word wrap, and block height arithmetic.
//!
//! Everything here is a pure function of (font, scale, text): no I/O, no
//! caching, no side effects. Font metrics are deterministic for a given font
//! file and pixel size, so repeated calls always agree.
//!
//! Two related vertical quantities exist:
//! - [`block_height`] — the *measured* height of a wrapped block: line ink
//!   heights plus line spacing between lines (not after the last), plus one
//!   trailing block spacing. Used for fitting and band centering.
//! - [`block_advance`] — the vertical distance the *draw loop* consumes: it
//!   charges line spacing after every line, including the last. One line
//!   spacing larger than `block_height` for non-empty text.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, Rect, ScaleFont, point};

/// Measure the advance width of a single line, including kerning.
pub fn line_width(font: &FontArc, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            width += scaled.kern(prev, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }

    width
}

/// Tight pixel bounds of a line's ink, relative to a pen at the origin with
/// the baseline at y = 0. `None` when no glyph has an outline (e.g. an empty
/// or whitespace-only line).
pub(crate) fn ink_bounds(font: &FontArc, scale: PxScale, text: &str) -> Option<Rect> {
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;
    let mut bounds: Option<Rect> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, 0.0));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let gb = outlined.px_bounds();
            bounds = Some(match bounds {
                None => gb,
                Some(acc) => Rect {
                    min: point(acc.min.x.min(gb.min.x), acc.min.y.min(gb.min.y)),
                    max: point(acc.max.x.max(gb.max.x), acc.max.y.max(gb.max.y)),
                },
            });
        }
    }

    bounds
}

/// Height in pixels of a line's ink (the glyph-box height).
pub fn line_ink_height(font: &FontArc, scale: PxScale, text: &str) -> u32 {
    match ink_bounds(font, scale, text) {
        Some(b) => (b.max.y - b.min.y).ceil() as u32,
        None => 0,
    }
}

/// Greedy word wrap to a maximum pixel width.
///
/// Words accumulate into the current line while the joined line still fits;
/// a word that would overflow closes the line and starts the next one. A
/// single word wider than `max_width` is placed alone on its own line and
/// may overflow horizontally — words are never split. Text with no words
/// yields an empty vec.
pub fn wrap_text(font: &FontArc, scale: PxScale, text: &str, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if line_width(font, scale, &candidate) <= max_width {
            line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(line);
            }
            line = word.to_string();
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }

    lines
}

/// Measured height of a wrapped text block; 0 for text with no words.
pub fn block_height(
    font: &FontArc,
    scale: PxScale,
    text: &str,
    max_width: f32,
    line_spacing: u32,
    block_spacing: u32,
) -> u32 {
    let lines = wrap_text(font, scale, text, max_width);
    if lines.is_empty() {
        return 0;
    }
    let total: u32 = lines
        .iter()
        .map(|line| line_ink_height(font, scale, line) + line_spacing)
        .sum();
    total - line_spacing + block_spacing
}

/// Vertical distance the draw loop consumes for a block; 0 for text with no
/// words.
pub fn block_advance(
    font: &FontArc,
    scale: PxScale,
    text: &str,
    max_width: f32,
    line_spacing: u32,
    block_spacing: u32,
) -> u32 {
    let lines = wrap_text(font, scale, text, max_width);
    if lines.is_empty() {
        return 0;
    }
    let total: u32 = lines
        .iter()
        .map(|line| line_ink_height(font, scale, line) + line_spacing)
        .sum();
    total + block_spacing
}
