//! Layout compositor: places three vertical bands on the canvas and draws
//! every non-empty block's wrapped lines.
//!
//! Band order, top to bottom:
//! 1. **Top band** — company name, left-aligned at the top margin.
//! 2. **Middle band** — headline, body, call to action, hashtags; each
//!    centered horizontally, vertically centered as a group in the space
//!    left between the other two bands (biased by the two spacing offsets).
//! 3. **Bottom band** — contact lines, left-aligned, anchored to the bottom
//!    margin.
//!
//! The whole pass is measure-then-draw: [`plan`] resolves all band geometry
//! (including the fitting search for the middle band's font size) before a
//! single pixel changes. Empty fields contribute no lines, no height, and
//! no spacing — bands collapse cleanly.

use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::Rgb;

use crate::Canvas;
use crate::ad::AdRecord;
use crate::error::AdCanvasError;
use crate::fitting::{FitBlock, FitParams, choose_font_size};
use crate::metrics::{block_advance, block_height, ink_bounds, line_width, wrap_text};

/// Tunable layout constants.
///
/// Defaults reproduce the established visual output; all distances are in
/// pixels. The two middle-band offsets bias the vertical centering point and
/// may be negative.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Left/right/top margin for text.
    pub margin: u32,
    /// Gap kept below the bottom band.
    pub bottom_margin: u32,
    /// Vertical gap between wrapped lines (top and middle bands).
    pub line_spacing: u32,
    /// Vertical gap appended after each block.
    pub block_spacing: u32,
    /// Vertical gap between wrapped lines of contact text.
    pub contact_spacing: u32,
    pub spacing_above_middle: i32,
    pub spacing_below_middle: i32,
    /// Fixed company-name size (top band).
    pub company_size: f32,
    /// Fixed contact-line size (bottom band).
    pub contact_size: f32,
    /// Middle-band font size search.
    pub fit: FitParams,
    /// When true, a middle band that overflows even at the minimum size
    /// fails with [`AdCanvasError::LayoutOverflow`] instead of rendering
    /// clipped.
    pub strict: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            margin: 50,
            bottom_margin: 40,
            line_spacing: 10,
            block_spacing: 25,
            contact_spacing: 5,
            spacing_above_middle: -10,
            spacing_below_middle: 30,
            company_size: 50.0,
            contact_size: 28.0,
            fit: FitParams::default(),
            strict: false,
        }
    }
}

/// Resolved band geometry for one render pass.
#[derive(Debug, Clone)]
pub(crate) struct LayoutPlan {
    /// Chosen middle-band font size (body roles; headline is 1.2×).
    pub font_size: u32,
    /// Y where the top band ends (the top margin when no company name).
    pub top_end_y: i32,
    pub middle_start_y: i32,
    pub middle_height: u32,
    pub contact_start_y: i32,
    pub contact_height: u32,
    /// Middle band exceeds the available space even at the minimum size.
    pub overflow: bool,
}

/// Assemble the bottom band's contact lines.
///
/// Formatting policy lives here, not in the fitting engine: lines whose
/// source fields are empty are omitted entirely, and the phone/email line
/// drops the missing half when only one of the two is present.
fn contact_lines(ad: &AdRecord) -> Vec<String> {
    let mut lines = Vec::new();
    if !ad.location.is_empty() {
        lines.push(format!("We are located at {}", ad.location));
    }
    match (ad.phone.is_empty(), ad.email.is_empty()) {
        (false, false) => lines.push(format!("Contact us at {} or {}", ad.phone, ad.email)),
        (false, true) => lines.push(format!("Contact us at {}", ad.phone)),
        (true, false) => lines.push(format!("Contact us at {}", ad.email)),
        (true, true) => {}
    }
    if !ad.website.is_empty() {
        lines.push(format!("Visit us: {}", ad.website));
    }
    lines
}

/// Measure all bands and run the fitting search. No drawing.
pub(crate) fn plan(
    ad: &AdRecord,
    width: u32,
    height: u32,
    font: &FontArc,
    params: &LayoutParams,
) -> LayoutPlan {
    let max_width = width.saturating_sub(2 * params.margin) as f32;

    // Top band: the draw loop charges line spacing after every line, so the
    // band's end is the drawn advance, not the measured height.
    let top_advance = block_advance(
        font,
        PxScale::from(params.company_size),
        &ad.company_name,
        max_width,
        params.line_spacing,
        params.block_spacing,
    );
    let top_end_y = params.margin as i32 + top_advance as i32;

    // Bottom band: each contact line is its own block with tighter line
    // spacing.
    let contact_scale = PxScale::from(params.contact_size);
    let contact_height: u32 = contact_lines(ad)
        .iter()
        .map(|line| {
            block_height(
                font,
                contact_scale,
                line,
                max_width,
                params.contact_spacing,
                params.block_spacing,
            )
        })
        .sum();

    // Middle band: single best-fit size across all roles, headline scaled up.
    let hashtags = ad.hashtags_line();
    let blocks = [
        FitBlock {
            text: &ad.headline,
            subheading: true,
        },
        FitBlock {
            text: &ad.text,
            subheading: false,
        },
        FitBlock {
            text: &ad.call_to_action,
            subheading: false,
        },
        FitBlock {
            text: &hashtags,
            subheading: false,
        },
    ];
    let available = height as i32
        - top_end_y
        - contact_height as i32
        - params.bottom_margin as i32
        - params.spacing_above_middle
        - params.spacing_below_middle;
    let font_size = choose_font_size(
        &blocks,
        font,
        max_width,
        available.max(0) as u32,
        params.line_spacing,
        params.block_spacing,
        &params.fit,
    );

    let middle_height: u32 = blocks
        .iter()
        .map(|block| {
            let px = if block.subheading {
                font_size as f32 * params.fit.subheading_scale
            } else {
                font_size as f32
            };
            block_height(
                font,
                PxScale::from(px),
                block.text,
                max_width,
                params.line_spacing,
                params.block_spacing,
            )
        })
        .sum();

    // Split the remaining slack evenly above and below the middle band,
    // then apply the bias offsets. Truncating division.
    let middle_start_y =
        top_end_y + params.spacing_above_middle + (available - middle_height as i32) / 2;

    LayoutPlan {
        font_size,
        top_end_y,
        middle_start_y,
        middle_height,
        contact_start_y: height as i32 - contact_height as i32 - params.bottom_margin as i32,
        contact_height,
        overflow: middle_height as i32 > available,
    }
}

/// Render an ad record onto the canvas.
///
/// The sole drawing entry point: mutates `canvas` in place. With default
/// (lenient) params an overflowing layout renders as-is and may clip past
/// the canvas edge; with `strict` set it fails before drawing anything.
pub fn render(
    ad: &AdRecord,
    canvas: &mut Canvas,
    color: Rgb<u8>,
    font: &FontArc,
    params: &LayoutParams,
) -> Result<(), AdCanvasError> {
    let (width, height) = canvas.dimensions();
    let plan = plan(ad, width, height, font, params);
    if params.strict && plan.overflow {
        return Err(AdCanvasError::LayoutOverflow);
    }

    let max_width = width.saturating_sub(2 * params.margin) as f32;

    // 1. Top band
    draw_text_block(
        canvas,
        font,
        PxScale::from(params.company_size),
        &ad.company_name,
        max_width,
        params.margin as i32,
        false,
        params.line_spacing,
        params.block_spacing,
        params.margin,
        color,
    );

    // 2. Middle band
    let headline_scale = PxScale::from(plan.font_size as f32 * params.fit.subheading_scale);
    let body_scale = PxScale::from(plan.font_size as f32);
    let hashtags = ad.hashtags_line();
    let mut y = plan.middle_start_y;
    for (text, scale) in [
        (ad.headline.as_str(), headline_scale),
        (ad.text.as_str(), body_scale),
        (ad.call_to_action.as_str(), body_scale),
        (hashtags.as_str(), body_scale),
    ] {
        y = draw_text_block(
            canvas,
            font,
            scale,
            text,
            max_width,
            y,
            true,
            params.line_spacing,
            params.block_spacing,
            params.margin,
            color,
        );
    }

    // 3. Bottom band
    let contact_scale = PxScale::from(params.contact_size);
    let mut y = plan.contact_start_y;
    for line in contact_lines(ad) {
        y = draw_text_block(
            canvas,
            font,
            contact_scale,
            &line,
            max_width,
            y,
            false,
            params.contact_spacing,
            params.block_spacing,
            params.margin,
            color,
        );
    }

    Ok(())
}

/// Wrap and draw one block; returns the Y where the next block starts.
///
/// Empty text draws nothing and returns `y` unchanged. Per line, the x
/// position is the margin (left-aligned) or `(width − line_width) / 2`
/// (centered); the vertical advance is the line's ink height plus line
/// spacing, and the block closes with one block-spacing gap.
#[allow(clippy::too_many_arguments)]
fn draw_text_block(
    canvas: &mut Canvas,
    font: &FontArc,
    scale: PxScale,
    text: &str,
    max_width: f32,
    y: i32,
    centered: bool,
    line_spacing: u32,
    block_spacing: u32,
    margin: u32,
    color: Rgb<u8>,
) -> i32 {
    let lines = wrap_text(font, scale, text, max_width);
    if lines.is_empty() {
        return y;
    }

    let canvas_width = canvas.width();
    let mut y = y;
    for line in &lines {
        let x = if centered {
            ((canvas_width as f32 - line_width(font, scale, line)) / 2.0) as i32
        } else {
            margin as i32
        };
        let ink = draw_line(canvas, font, scale, line, x, y, color);
        y += ink as i32 + line_spacing as i32;
    }
    y + block_spacing as i32
}

/// Rasterize one line with its ink's top edge at `y` and the pen origin at
/// `x`. Returns the line's ink height.
///
/// Glyph coverage is alpha-blended onto the canvas; pixels outside the
/// canvas are discarded (overflow clips, by policy).
fn draw_line(
    canvas: &mut Canvas,
    font: &FontArc,
    scale: PxScale,
    text: &str,
    x: i32,
    y: i32,
    color: Rgb<u8>,
) -> u32 {
    let Some(bounds) = ink_bounds(font, scale, text) else {
        return 0;
    };
    let baseline = y as f32 - bounds.min.y;

    let scaled = font.as_scaled(scale);
    let (canvas_width, canvas_height) = canvas.dimensions();
    let mut caret = 0.0f32;
    let mut prev: Option<GlyphId> = None;

    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = prev {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(x as f32 + caret, baseline));
        caret += scaled.h_advance(id);
        prev = Some(id);

        if let Some(outlined) = font.outline_glyph(glyph) {
            let gb = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = gb.min.x as i32 + gx as i32;
                let py = gb.min.y as i32 + gy as i32;
                if px < 0 || py < 0 || px as u32 >= canvas_width || py as u32 >= canvas_height {
                    return;
                }
                let c = coverage.clamp(0.0, 1.0);
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                for (dst, src) in pixel.0.iter_mut().zip(color.0) {
                    *dst = (*dst as f32 * (1.0 - c) + src as f32 * c).round() as u8;
                }
            });
        }
    }

    (bounds.max.y - bounds.min.y).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::solid;
    use crate::font::bundled_font;
    use pretty_assertions::assert_eq;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    fn full_ad() -> AdRecord {
        AdRecord {
            company_name: "Acme Tools".into(),
            headline: "Spring Sale".into(),
            text: "Everything for the workshop at twenty percent off".into(),
            call_to_action: "Shop Now".into(),
            hashtags: vec!["#Sale".into(), "#Tools".into()],
            location: "12 Forge Street".into(),
            phone: "555-0134".into(),
            email: "hello@acme.example".into(),
            website: "acme.example".into(),
        }
    }

    /// Params with neutral centering offsets, for geometry assertions.
    fn neutral_params() -> LayoutParams {
        LayoutParams {
            spacing_above_middle: 0,
            spacing_below_middle: 0,
            ..Default::default()
        }
    }

    // ── contact lines ───────────────────────────────────────────────────

    #[test]
    fn contact_lines_full() {
        let lines = contact_lines(&full_ad());
        assert_eq!(
            lines,
            vec![
                "We are located at 12 Forge Street",
                "Contact us at 555-0134 or hello@acme.example",
                "Visit us: acme.example",
            ]
        );
    }

    #[test]
    fn contact_lines_empty_fields_are_omitted() {
        assert!(contact_lines(&AdRecord::default()).is_empty());
    }

    #[test]
    fn contact_line_with_phone_only() {
        let ad = AdRecord {
            phone: "555-0134".into(),
            ..Default::default()
        };
        assert_eq!(contact_lines(&ad), vec!["Contact us at 555-0134"]);
    }

    #[test]
    fn contact_line_with_email_only() {
        let ad = AdRecord {
            email: "hi@x.example".into(),
            ..Default::default()
        };
        assert_eq!(contact_lines(&ad), vec!["Contact us at hi@x.example"]);
    }

    // ── plan geometry ───────────────────────────────────────────────────

    #[test]
    fn empty_ad_collapses_all_bands() {
        let ad = AdRecord::default();
        let params = LayoutParams::default();
        let plan = plan(&ad, 1080, 1080, bundled_font(), &params);
        assert_eq!(plan.top_end_y, params.margin as i32);
        assert_eq!(plan.contact_height, 0);
        assert_eq!(plan.middle_height, 0);
        assert!(!plan.overflow);
        assert_eq!(
            plan.contact_start_y,
            1080 - params.bottom_margin as i32
        );
    }

    #[test]
    fn bands_do_not_overlap_when_fit_succeeds() {
        let params = neutral_params();
        let plan = plan(&full_ad(), 1080, 1080, bundled_font(), &params);
        assert!(!plan.overflow);
        assert!(plan.middle_start_y >= plan.top_end_y);
        assert!(plan.middle_start_y + plan.middle_height as i32 <= plan.contact_start_y);
    }

    #[test]
    fn middle_band_is_centered_in_remaining_space() {
        let params = neutral_params();
        let plan = plan(&full_ad(), 1080, 1080, bundled_font(), &params);
        let above = plan.middle_start_y - plan.top_end_y;
        let below = plan.contact_start_y - (plan.middle_start_y + plan.middle_height as i32);
        // Slack above and below differs by at most the truncated pixel.
        assert!((above - below).abs() <= 1, "above {above} vs below {below}");
    }

    #[test]
    fn empty_company_starts_middle_higher() {
        let with_company = plan(
            &full_ad(),
            1080,
            1080,
            bundled_font(),
            &LayoutParams::default(),
        );
        let mut ad = full_ad();
        ad.company_name.clear();
        let without_company = plan(&ad, 1080, 1080, bundled_font(), &LayoutParams::default());
        assert!(without_company.top_end_y < with_company.top_end_y);
        assert!(without_company.middle_start_y < with_company.middle_start_y);
    }

    #[test]
    fn tiny_canvas_overflows() {
        let plan = plan(&full_ad(), 300, 200, bundled_font(), &LayoutParams::default());
        assert!(plan.overflow);
        assert_eq!(plan.font_size, 20);
    }

    // ── render ──────────────────────────────────────────────────────────

    #[test]
    fn render_marks_the_canvas() {
        let mut canvas = solid(WHITE, 1080);
        render(
            &full_ad(),
            &mut canvas,
            BLACK,
            bundled_font(),
            &LayoutParams::default(),
        )
        .unwrap();
        assert!(canvas.pixels().any(|p| *p != WHITE));
    }

    #[test]
    fn render_empty_ad_leaves_canvas_untouched() {
        let mut canvas = solid(WHITE, 256);
        render(
            &AdRecord::default(),
            &mut canvas,
            BLACK,
            bundled_font(),
            &LayoutParams::default(),
        )
        .unwrap();
        assert!(canvas.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn strict_mode_fails_on_overflow_without_drawing() {
        let mut canvas = solid(WHITE, 200);
        let params = LayoutParams {
            strict: true,
            ..Default::default()
        };
        let err = render(&full_ad(), &mut canvas, BLACK, bundled_font(), &params).unwrap_err();
        assert!(matches!(err, AdCanvasError::LayoutOverflow));
        assert!(canvas.pixels().all(|p| *p == WHITE), "no partial canvas");
    }

    #[test]
    fn lenient_mode_renders_overflowing_layout() {
        let mut canvas = solid(WHITE, 200);
        render(
            &full_ad(),
            &mut canvas,
            BLACK,
            bundled_font(),
            &LayoutParams::default(),
        )
        .unwrap();
        assert!(canvas.pixels().any(|p| *p != WHITE));
    }

    #[test]
    fn left_aligned_top_band_starts_at_margin() {
        let ad = AdRecord {
            company_name: "Acme".into(),
            ..Default::default()
        };
        let params = LayoutParams::default();
        let mut canvas = solid(WHITE, 512);
        render(&ad, &mut canvas, BLACK, bundled_font(), &params).unwrap();

        // Nothing drawn left of the margin...
        for y in 0..canvas.height() {
            for x in 0..params.margin {
                assert_eq!(*canvas.get_pixel(x, y), WHITE);
            }
        }
        // ...and the company row region contains ink near it.
        let mut leftmost = u32::MAX;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if *canvas.get_pixel(x, y) != WHITE {
                    leftmost = leftmost.min(x);
                }
            }
        }
        assert!(leftmost >= params.margin && leftmost < params.margin + 10);
    }

    #[test]
    fn centered_block_is_horizontally_balanced() {
        let ad = AdRecord {
            headline: "Sale".into(),
            ..Default::default()
        };
        let mut canvas = solid(WHITE, 512);
        render(
            &ad,
            &mut canvas,
            BLACK,
            bundled_font(),
            &LayoutParams::default(),
        )
        .unwrap();

        let (mut min_x, mut max_x) = (u32::MAX, 0);
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if *canvas.get_pixel(x, y) != WHITE {
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                }
            }
        }
        let left_gap = min_x as i32;
        let right_gap = canvas.width() as i32 - 1 - max_x as i32;
        // Pen-based centering plus side bearings: allow a few pixels.
        assert!(
            (left_gap - right_gap).abs() <= 6,
            "left {left_gap} vs right {right_gap}"
        );
    }
}
