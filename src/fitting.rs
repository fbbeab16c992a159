//! Fitting engine: finds the largest font size at which a set of text
//! blocks fits the available vertical space.
//!
//! The search walks candidate sizes from `max_size` down to `min_size` in
//! `step` decrements and accepts the first candidate whose summed block
//! heights fit. When nothing fits, `min_size` is returned and the caller
//! renders oversized — overflow is an accepted policy, not an error (see
//! [`crate::layout::LayoutParams::strict`] for the opt-in stricter mode).

use ab_glyph::{FontArc, PxScale};

use crate::metrics::block_height;

/// One block of text participating in the size search.
#[derive(Debug, Clone, Copy)]
pub struct FitBlock<'a> {
    pub text: &'a str,
    /// Subheadings are measured at `subheading_scale ×` the candidate size.
    pub subheading: bool,
}

/// Bounds and granularity of the size search.
#[derive(Debug, Clone)]
pub struct FitParams {
    pub max_size: u32,
    pub min_size: u32,
    pub step: u32,
    /// Multiplier applied to subheading blocks (headline vs body).
    pub subheading_scale: f32,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            max_size: 60,
            min_size: 20,
            step: 2,
            subheading_scale: 1.2,
        }
    }
}

/// Choose the largest size in `[min_size, max_size]` at which every block's
/// wrapped height sums to at most `max_height`.
///
/// Empty blocks contribute zero height. Returns `min_size` when even the
/// smallest candidate overflows.
pub fn choose_font_size(
    blocks: &[FitBlock<'_>],
    font: &FontArc,
    max_width: f32,
    max_height: u32,
    line_spacing: u32,
    block_spacing: u32,
    params: &FitParams,
) -> u32 {
    let step = params.step.max(1) as i32;
    let mut size = params.max_size as i32;

    while size >= params.min_size as i32 {
        let total: u32 = blocks
            .iter()
            .map(|block| {
                let px = if block.subheading {
                    size as f32 * params.subheading_scale
                } else {
                    size as f32
                };
                block_height(
                    font,
                    PxScale::from(px),
                    block.text,
                    max_width,
                    line_spacing,
                    block_spacing,
                )
            })
            .sum();
        if total <= max_height {
            return size as u32;
        }
        size -= step;
    }

    params.min_size
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::bundled_font;

    fn fit(blocks: &[FitBlock<'_>], max_height: u32) -> u32 {
        choose_font_size(
            blocks,
            bundled_font(),
            980.0,
            max_height,
            10,
            25,
            &FitParams::default(),
        )
    }

    #[test]
    fn short_text_gets_max_size() {
        let blocks = [FitBlock {
            text: "Hi",
            subheading: false,
        }];
        assert_eq!(fit(&blocks, 900), 60);
    }

    #[test]
    fn empty_blocks_always_fit() {
        let blocks = [
            FitBlock {
                text: "",
                subheading: true,
            },
            FitBlock {
                text: "",
                subheading: false,
            },
        ];
        assert_eq!(fit(&blocks, 0), 60);
    }

    #[test]
    fn impossible_height_returns_min_size() {
        let blocks = [FitBlock {
            text: "this will never fit anywhere at all",
            subheading: false,
        }];
        assert_eq!(fit(&blocks, 1), 20);
    }

    #[test]
    fn chosen_size_stays_within_bounds() {
        let long = "a reasonably long body of ad copy that wraps over \
                    several lines and pushes the size search downward";
        let blocks = [
            FitBlock {
                text: "Headline",
                subheading: true,
            },
            FitBlock {
                text: long,
                subheading: false,
            },
        ];
        for max_height in [50, 150, 300, 600, 1200] {
            let size = fit(&blocks, max_height);
            assert!((20..=60).contains(&size), "size {size} out of bounds");
        }
    }

    #[test]
    fn size_is_non_increasing_in_text_length() {
        let base = "limited weekend offer on everything in store";
        let mut text = String::new();
        let mut prev = u32::MAX;
        for _ in 0..6 {
            text.push_str(base);
            text.push(' ');
            let blocks = [FitBlock {
                text: &text,
                subheading: false,
            }];
            let size = fit(&blocks, 400);
            assert!(size <= prev, "size grew from {prev} to {size}");
            prev = size;
        }
    }

    #[test]
    fn chosen_size_actually_fits_when_above_min() {
        let text = "half price on all garden furniture this saturday and sunday only";
        let blocks = [FitBlock {
            text,
            subheading: false,
        }];
        let max_height = 220;
        let size = fit(&blocks, max_height);
        if size > 20 {
            let total = crate::metrics::block_height(
                bundled_font(),
                PxScale::from(size as f32),
                text,
                980.0,
                10,
                25,
            );
            assert!(total <= max_height);
        }
    }

    #[test]
    fn subheading_measured_larger_than_body() {
        // A subheading block must stop fitting earlier than the same text
        // as a body block, since it is measured at 1.2x.
        let text = "grand opening celebration";
        let body_only = [FitBlock {
            text,
            subheading: false,
        }];
        let subhead_only = [FitBlock {
            text,
            subheading: true,
        }];
        // Find a height where the body fits at max but the subheading must shrink.
        let body_height = crate::metrics::block_height(
            bundled_font(),
            PxScale::from(60.0),
            text,
            980.0,
            10,
            25,
        );
        assert_eq!(fit(&body_only, body_height), 60);
        assert!(fit(&subhead_only, body_height) < 60);
    }
}
