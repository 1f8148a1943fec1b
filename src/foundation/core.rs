use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};
use crate::foundation::math::unit_to_u8;

pub use kurbo::{Affine, Rect};

/// Vertical scroll direction.
///
/// `Down` is the forward direction of a sequence (source image towards target image).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    /// Towards the top of the page.
    Up,
    /// Towards the bottom of the page.
    #[default]
    Down,
}

impl ScrollDirection {
    /// Direction implied by a signed vertical delta (`> 0` is down).
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 { Self::Down } else { Self::Up }
    }
}

/// Visible area of the host window.
///
/// Sizes are CSS pixels; the backing surface is `css size * device_pixel_ratio`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
    /// Physical pixels per CSS pixel.
    #[serde(default = "default_dpr")]
    pub device_pixel_ratio: f64,
}

fn default_dpr() -> f64 {
    1.0
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            device_pixel_ratio: 1.0,
        }
    }
}

impl Viewport {
    /// Create a validated viewport.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> ScrollwipeResult<Self> {
        let vp = Self {
            width,
            height,
            device_pixel_ratio,
        };
        vp.validate()?;
        Ok(vp)
    }

    /// Check that every dimension is finite and positive.
    pub fn validate(&self) -> ScrollwipeResult<()> {
        for (name, v) in [
            ("width", self.width),
            ("height", self.height),
            ("device_pixel_ratio", self.device_pixel_ratio),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(ScrollwipeError::validation(format!(
                    "viewport {name} must be finite and > 0 (got {v})"
                )));
            }
        }
        Ok(())
    }

    /// Backing surface size in physical pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        let w = (self.width * self.device_pixel_ratio).round().max(1.0);
        let h = (self.height * self.device_pixel_ratio).round().max(1.0);
        (w as u32, h as u32)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Straight RGB plus a float alpha in `[0, 1]`, like CSS `rgba()`.
    pub fn from_rgb_alpha(rgb: [u8; 3], alpha: f32) -> Self {
        Self::from_straight_rgba(rgb[0], rgb[1], rgb[2], unit_to_u8(alpha))
    }

    /// Bytes in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
