//! Sequence configuration.
//!
//! Everything is optional in JSON; missing fields fall back to the values the page shipped with.

use std::path::Path;

use anyhow::Context as _;

use crate::assets::pair::AssetSlot;
use crate::assets::tone::ToneAdjust;
use crate::foundation::core::Viewport;
use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};

/// Upper bound for separator widths and blur, in CSS pixels.
pub const MAX_SEPARATOR_PX: f64 = 1024.0;

/// Tunables for one scroll sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SequenceConfig {
    /// Total input magnitude needed to go from progress 0 to 1.
    pub threshold: f64,
    /// Visible fraction of the section at which it counts as "in view".
    pub visibility_threshold: f64,
    /// Delay between entering view and snapping the section to the viewport top.
    pub snap_delay_ms: u64,
    /// Delay between the snap and taking the scroll lock.
    pub lock_settle_ms: u64,
    /// Delay between completing the forward transition and advancing to the next section.
    pub advance_delay_ms: u64,
    /// Straight RGBA clear color for the surface; transparent when unset.
    pub background_rgba: Option<[u8; 4]>,
    /// Look of the divider drawn while a wipe is in progress.
    pub separator: SeparatorStyle,
    /// Image A.
    pub source: AssetSpec,
    /// Image B.
    pub target: AssetSpec,
    /// Initial viewport.
    pub viewport: Viewport,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            threshold: 4000.0,
            visibility_threshold: 0.5,
            snap_delay_ms: 100,
            lock_settle_ms: 300,
            advance_delay_ms: 500,
            background_rgba: None,
            separator: SeparatorStyle::default(),
            source: AssetSpec::default(),
            target: AssetSpec::default(),
            viewport: Viewport::default(),
        }
    }
}

/// Where an image comes from and how it is toned.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetSpec {
    /// Path relative to the config file.
    #[serde(default)]
    pub path: Option<String>,
    /// Tone override; the slot default applies when unset.
    #[serde(default)]
    pub tone: Option<ToneAdjust>,
}

impl AssetSpec {
    /// Tone to apply for `slot`.
    pub fn effective_tone(&self, slot: AssetSlot) -> ToneAdjust {
        self.tone.unwrap_or_else(|| slot.default_tone())
    }
}

/// Glowing divider parameters, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SeparatorStyle {
    /// Straight RGB of the line and glow.
    pub color_rgb: [u8; 3],
    /// Half width of the gradient band around the divider.
    pub half_width_px: f64,
    /// Width of the bright core rect that casts the glow.
    pub core_width_px: f64,
    /// Alpha at the center of the gradient band.
    pub peak_alpha: f32,
    /// Alpha of the glow color.
    pub glow_alpha: f32,
    /// Glow blur, in the canvas `shadowBlur` sense (sigma = blur / 2).
    pub glow_blur_px: f64,
}

impl Default for SeparatorStyle {
    fn default() -> Self {
        Self {
            color_rgb: [0, 200, 255],
            half_width_px: 3.0,
            core_width_px: 2.0,
            peak_alpha: 0.9,
            glow_alpha: 0.8,
            glow_blur_px: 20.0,
        }
    }
}

impl SequenceConfig {
    /// Read and validate a JSON config file.
    pub fn from_json_path(path: &Path) -> ScrollwipeResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_slice(&bytes)
    }

    /// Parse and validate JSON config bytes.
    pub fn from_json_slice(bytes: &[u8]) -> ScrollwipeResult<Self> {
        let cfg: Self = serde_json::from_slice(bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Asset description for `slot`.
    pub fn asset(&self, slot: AssetSlot) -> &AssetSpec {
        match slot {
            AssetSlot::Source => &self.source,
            AssetSlot::Target => &self.target,
        }
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> ScrollwipeResult<()> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ScrollwipeError::validation(
                "threshold must be finite and > 0",
            ));
        }
        if !(self.visibility_threshold > 0.0 && self.visibility_threshold <= 1.0) {
            return Err(ScrollwipeError::validation(
                "visibility_threshold must be in (0, 1]",
            ));
        }
        self.viewport.validate()?;

        let s = &self.separator;
        for (name, v) in [
            ("separator.half_width_px", s.half_width_px),
            ("separator.core_width_px", s.core_width_px),
            ("separator.glow_blur_px", s.glow_blur_px),
        ] {
            if !v.is_finite() || !(0.0..=MAX_SEPARATOR_PX).contains(&v) {
                return Err(ScrollwipeError::validation(format!(
                    "{name} must be in [0, {MAX_SEPARATOR_PX}]"
                )));
            }
        }
        for (name, v) in [
            ("separator.peak_alpha", s.peak_alpha),
            ("separator.glow_alpha", s.glow_alpha),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(ScrollwipeError::validation(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }

        for slot in [AssetSlot::Source, AssetSlot::Target] {
            if let Some(t) = self.asset(slot).tone
                && !t.is_valid()
            {
                return Err(ScrollwipeError::validation(format!(
                    "{slot:?} tone must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
