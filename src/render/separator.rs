//! Glowing divider drawn at the wipe boundary.
//!
//! The divider is constant along y, so it is built as a single premultiplied row and
//! composited down every row of the frame.

use crate::config::SeparatorStyle;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::ScrollwipeResult;
use crate::render::blur::{blur_row_rgba8_premul, radius_for_sigma};
use crate::render::composite::over;

/// One row of separator pixels starting at device column `x0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeparatorProfile {
    /// Device-space x of the first pixel (may be negative).
    pub x0: i64,
    /// Premultiplied RGBA8 pixels.
    pub pixels: Vec<u8>,
}

impl SeparatorProfile {
    /// Number of pixels in the row.
    pub fn len(&self) -> usize {
        self.pixels.len() / 4
    }

    /// Return `true` for an empty row.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at device column `x`, transparent outside the row.
    pub fn at(&self, x: i64) -> [u8; 4] {
        let i = x - self.x0;
        if i < 0 || i as usize >= self.len() {
            return [0; 4];
        }
        let i = i as usize * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }
}

/// Build the divider row for a boundary at `divide_x` CSS pixels.
///
/// Layers, bottom to top: the gradient band (`half_width_px` each side, alpha 0 to
/// `peak_alpha` to 0), the blurred glow of the core rect, and the core rect itself filled
/// with the same gradient.
pub fn separator_profile(
    divide_x: f64,
    device_pixel_ratio: f64,
    style: &SeparatorStyle,
) -> ScrollwipeResult<SeparatorProfile> {
    let dpr = device_pixel_ratio;
    let center = divide_x * dpr;
    let half = style.half_width_px * dpr;
    let core_half = style.core_width_px * dpr / 2.0;
    let extent = half.max(core_half);

    let left = (center - extent).floor() as i64 - 1;
    let right = (center + extent).ceil() as i64 + 1;
    let n = (right - left).max(0) as usize;

    let gradient_alpha = |cx: f64| -> f32 {
        if half <= 0.0 {
            return 0.0;
        }
        let t = (cx - (center - half)) / (2.0 * half);
        if !(0.0..=1.0).contains(&t) {
            return 0.0;
        }
        style.peak_alpha * (1.0 - (2.0 * t - 1.0).abs()) as f32
    };
    let coverage = |x: f64, lo: f64, hi: f64| -> f32 { ((x + 1.0).min(hi) - x.max(lo)).max(0.0) as f32 };

    let rgb = style.color_rgb;
    let mut band = Vec::with_capacity(n * 4);
    let mut core = Vec::with_capacity(n * 4);
    let mut glow_src = Vec::with_capacity(n * 4);
    for i in 0..n {
        let x = (left + i as i64) as f64;
        let g = gradient_alpha(x + 0.5);
        let band_cov = coverage(x, center - half, center + half);
        let core_cov = coverage(x, center - core_half, center + core_half);

        band.extend_from_slice(&Rgba8Premul::from_rgb_alpha(rgb, g * band_cov).to_array());
        core.extend_from_slice(&Rgba8Premul::from_rgb_alpha(rgb, g * core_cov).to_array());
        glow_src.extend_from_slice(
            &Rgba8Premul::from_rgb_alpha(rgb, style.glow_alpha * g * core_cov).to_array(),
        );
    }

    let sigma = (style.glow_blur_px * dpr / 2.0) as f32;
    let radius = radius_for_sigma(sigma);
    let glow = blur_row_rgba8_premul(&glow_src, radius, sigma)?;

    let r = radius as usize;
    let mut pixels = glow;
    for i in 0..n {
        let o = (i + r) * 4;
        let under = [pixels[o], pixels[o + 1], pixels[o + 2], pixels[o + 3]];
        let b = [band[i * 4], band[i * 4 + 1], band[i * 4 + 2], band[i * 4 + 3]];
        let c = [core[i * 4], core[i * 4 + 1], core[i * 4 + 2], core[i * 4 + 3]];
        // The band is drawn before the shadowed core, so it sits under the glow.
        let out = over(over(b, under, 1.0), c, 1.0);
        pixels[o..o + 4].copy_from_slice(&out);
    }

    Ok(SeparatorProfile {
        x0: left - radius as i64,
        pixels,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/separator.rs"]
mod tests;
