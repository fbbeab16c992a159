//! Background builder: produces the fixed-size square canvas an ad is
//! rendered onto.
//!
//! Three sources: a solid fill, a two-color gradient, or an arbitrary image
//! normalized by center-crop-to-fill (scale up just enough to cover the
//! target, then crop the centered region — no letterboxing).

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageBuffer, Rgb};

use crate::error::AdCanvasError;
use crate::style::{Background, GradientDirection, StyleConfig, parse_hex_color};
use crate::Canvas;

/// A uniformly filled canvas.
pub fn solid(color: Rgb<u8>, size: u32) -> Canvas {
    ImageBuffer::from_pixel(size, size, color)
}

/// A two-color linear gradient canvas.
///
/// The interpolation ratio per pixel is `y/size` (vertical), `x/size`
/// (horizontal), or `(x+y)/(2·size)` (diagonal). [`GradientDirection::Flat`]
/// pins the ratio to 0, yielding a uniform start-color fill.
pub fn gradient(
    start: Rgb<u8>,
    end: Rgb<u8>,
    direction: GradientDirection,
    size: u32,
) -> Canvas {
    ImageBuffer::from_fn(size, size, |x, y| {
        let ratio = match direction {
            GradientDirection::Vertical => y as f32 / size as f32,
            GradientDirection::Horizontal => x as f32 / size as f32,
            GradientDirection::Diagonal => (x + y) as f32 / (2 * size) as f32,
            GradientDirection::Flat => 0.0,
        };
        Rgb([
            lerp_channel(start[0], end[0], ratio),
            lerp_channel(start[1], end[1], ratio),
            lerp_channel(start[2], end[2], ratio),
        ])
    })
}

fn lerp_channel(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 * (1.0 - t) + b as f32 * t) as u8
}

/// Normalize an already-decoded image to a size × size RGB canvas via
/// center-crop-to-fill.
///
/// If either source dimension is smaller than the target, the image is
/// uniformly upscaled by the larger of the two required factors (aspect
/// ratio preserved), then the centered size × size region is cropped. A
/// source already covering the target is cropped without rescaling.
pub fn from_image(img: DynamicImage, size: u32) -> Canvas {
    let (w, h) = img.dimensions();
    let img = if w < size || h < size {
        let scale = (size as f32 / w as f32).max(size as f32 / h as f32);
        let nw = ((w as f32 * scale).ceil() as u32).max(size);
        let nh = ((h as f32 * scale).ceil() as u32).max(size);
        img.resize_exact(nw, nh, FilterType::Lanczos3)
    } else {
        img
    };

    let (w, h) = img.dimensions();
    let left = (w - size) / 2;
    let top = (h - size) / 2;
    img.crop_imm(left, top, size, size).to_rgb8()
}

/// Decode raw image bytes and normalize them to the canvas size.
pub fn from_image_bytes(bytes: &[u8], size: u32) -> Result<Canvas, AdCanvasError> {
    let img = image::load_from_memory(bytes).map_err(AdCanvasError::ImageDecode)?;
    Ok(from_image(img, size))
}

/// Build the canvas described by a [`StyleConfig`].
///
/// The only I/O is the one-time read of an `Image` background's file; solid
/// and gradient backgrounds are computed in memory.
pub fn build_background(style: &StyleConfig) -> Result<Canvas, AdCanvasError> {
    match &style.background {
        Background::Solid { color } => Ok(solid(parse_hex_color(color)?, style.size)),
        Background::Gradient {
            start,
            end,
            direction,
        } => Ok(gradient(
            parse_hex_color(start)?,
            parse_hex_color(end)?,
            *direction,
            style.size,
        )),
        Background::Image { path } => {
            // An unreadable file is the same failure class as undecodable bytes.
            let bytes = std::fs::read(path)
                .map_err(|e| AdCanvasError::ImageDecode(image::ImageError::IoError(e)))?;
            from_image_bytes(&bytes, style.size)
        }
    }
}
