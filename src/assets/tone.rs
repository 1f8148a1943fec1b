/// Per-image tone filter, equivalent to CSS `brightness(b) contrast(c)` applied in that order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ToneAdjust {
    /// Linear multiplier on each color channel (1.0 = unchanged).
    #[serde(default = "one")]
    pub brightness: f32,
    /// Contrast around mid-grey (1.0 = unchanged).
    #[serde(default = "one")]
    pub contrast: f32,
}

fn one() -> f32 {
    1.0
}

impl Default for ToneAdjust {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ToneAdjust {
    /// No-op adjustment.
    pub const IDENTITY: Self = Self {
        brightness: 1.0,
        contrast: 1.0,
    };

    /// Build an adjustment from brightness and contrast factors.
    pub fn new(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness,
            contrast,
        }
    }

    /// Return `true` if applying this adjustment leaves pixels untouched.
    pub fn is_identity(&self) -> bool {
        self.brightness == 1.0 && self.contrast == 1.0
    }

    /// Both factors must be finite and non-negative.
    pub fn is_valid(&self) -> bool {
        self.brightness.is_finite()
            && self.contrast.is_finite()
            && self.brightness >= 0.0
            && self.contrast >= 0.0
    }

    /// Adjust straight-alpha RGBA8 pixels in place. Alpha is left untouched.
    pub fn apply_straight_in_place(&self, rgba: &mut [u8]) {
        if self.is_identity() {
            return;
        }
        let lut = self.lut();
        for px in rgba.chunks_exact_mut(4) {
            px[0] = lut[px[0] as usize];
            px[1] = lut[px[1] as usize];
            px[2] = lut[px[2] as usize];
        }
    }

    fn lut(&self) -> [u8; 256] {
        let mut out = [0u8; 256];
        for (i, v) in out.iter_mut().enumerate() {
            let c = (i as f32 / 255.0) * self.brightness;
            let c = c.clamp(0.0, 1.0);
            let c = (c - 0.5) * self.contrast + 0.5;
            *v = (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/tone.rs"]
mod tests;
