use std::sync::Arc;

use anyhow::Context;

use crate::assets::tone::ToneAdjust;
use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};

/// Decoded image ready for compositing: premultiplied RGBA8, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Premultiplied RGBA8 bytes.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap premultiplied bytes, checking the buffer length against the dimensions.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ScrollwipeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrollwipeError::asset("image has zero width or height"));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ScrollwipeError::asset("image buffer size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(ScrollwipeError::asset(format!(
                "image byte len {} does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Single-color image, handy for tests and placeholders.
    pub fn solid(width: u32, height: u32, premul: [u8; 4]) -> ScrollwipeResult<Self> {
        let n = (width as usize).saturating_mul(height as usize);
        Self::from_premul(width, height, premul.repeat(n))
    }
}

/// Decode a raster image (any format `image` understands) and apply `tone`.
pub fn decode_image(bytes: &[u8], tone: ToneAdjust) -> ScrollwipeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut data = rgba.into_raw();
    tone.apply_straight_in_place(&mut data);
    premultiply_rgba8_in_place(&mut data);

    PreparedImage::from_premul(width, height, data)
}

/// Parse an SVG document and rasterize it at its natural size.
pub fn decode_svg(bytes: &[u8], tone: ToneAdjust) -> ScrollwipeResult<PreparedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;

    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(ScrollwipeError::asset("svg has invalid width/height"));
    }
    let width = (w.ceil() as u32).max(1);
    let height = (h.ceil() as u32).max(1);

    const MAX_DIM: u32 = 16_384;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(ScrollwipeError::asset(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| ScrollwipeError::asset("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(width as f32 / w, height as f32 / h);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut data = pixmap.data().to_vec();
    if !tone.is_identity() {
        unpremultiply_rgba8_in_place(&mut data);
        tone.apply_straight_in_place(&mut data);
        premultiply_rgba8_in_place(&mut data);
    }
    PreparedImage::from_premul(width, height, data)
}

/// Pick the decoder from the file extension; anything not `.svg` goes through `image`.
pub fn decode_by_name(name: &str, bytes: &[u8], tone: ToneAdjust) -> ScrollwipeResult<PreparedImage> {
    let is_svg = name
        .rsplit('.')
        .next()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        decode_svg(bytes, tone)
    } else {
        decode_image(bytes, tone)
    }
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((*c as u16 * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
