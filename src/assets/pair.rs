use std::path::Path;

use crate::assets::decode::{PreparedImage, decode_by_name};
use crate::assets::tone::ToneAdjust;
use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};

/// Which of the two sequence images an asset fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssetSlot {
    /// Image A, shown at progress 0 (the wireframe).
    Source,
    /// Image B, revealed as progress grows (the realistic render).
    Target,
}

impl AssetSlot {
    /// Tone applied when the configuration does not name one.
    pub fn default_tone(self) -> ToneAdjust {
        match self {
            Self::Source => ToneAdjust::new(1.1, 1.15),
            Self::Target => ToneAdjust::new(1.0, 1.08),
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Target => "target",
        }
    }
}

/// Load state of a single slot.
#[derive(Clone, Debug, Default)]
pub enum SlotState {
    /// Nothing delivered yet.
    #[default]
    Pending,
    /// Decoded and ready to draw.
    Ready(PreparedImage),
    /// Loading failed; the slot never becomes ready.
    Failed(String),
}

/// Readiness join over the two sequence images.
///
/// Each slot resolves independently; the pair is ready once both have loaded, and stays
/// unready forever if either one fails.
#[derive(Clone, Debug, Default)]
pub struct AssetPair {
    source: SlotState,
    target: SlotState,
}

impl AssetPair {
    /// Create a pair with both slots pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver the outcome of one slot's load.
    ///
    /// Returns `true` exactly when this call completed the join.
    pub fn resolve(&mut self, slot: AssetSlot, result: ScrollwipeResult<PreparedImage>) -> bool {
        let was_ready = self.is_ready();
        let state = match result {
            Ok(img) => {
                tracing::info!(
                    slot = slot.label(),
                    width = img.width,
                    height = img.height,
                    "image loaded"
                );
                SlotState::Ready(img)
            }
            Err(e) => {
                tracing::error!(slot = slot.label(), error = %e, "image load failed");
                SlotState::Failed(e.to_string())
            }
        };
        *self.slot_mut(slot) = state;
        !was_ready && self.is_ready()
    }

    /// Current state of `slot`.
    pub fn slot(&self, slot: AssetSlot) -> &SlotState {
        match slot {
            AssetSlot::Source => &self.source,
            AssetSlot::Target => &self.target,
        }
    }

    fn slot_mut(&mut self, slot: AssetSlot) -> &mut SlotState {
        match slot {
            AssetSlot::Source => &mut self.source,
            AssetSlot::Target => &mut self.target,
        }
    }

    /// Number of slots that loaded successfully (0, 1 or 2).
    pub fn loaded_count(&self) -> usize {
        [&self.source, &self.target]
            .into_iter()
            .filter(|s| matches!(s, SlotState::Ready(_)))
            .count()
    }

    /// Return `true` once both images are ready.
    pub fn is_ready(&self) -> bool {
        self.loaded_count() == 2
    }

    /// Return `true` if either slot failed.
    pub fn has_failed(&self) -> bool {
        matches!(self.source, SlotState::Failed(_)) || matches!(self.target, SlotState::Failed(_))
    }

    /// Borrow both images, if ready.
    pub fn images(&self) -> Option<(&PreparedImage, &PreparedImage)> {
        match (&self.source, &self.target) {
            (SlotState::Ready(s), SlotState::Ready(t)) => Some((s, t)),
            _ => None,
        }
    }
}

/// Read and decode one asset below `root`.
pub fn load_asset(root: &Path, rel: &str, tone: ToneAdjust) -> ScrollwipeResult<PreparedImage> {
    let norm = normalize_rel_path(rel)?;
    let p = root.join(Path::new(&norm));
    let bytes = std::fs::read(&p).map_err(|e| {
        ScrollwipeError::asset(format!("failed to read asset '{}': {e}", p.display()))
    })?;
    decode_by_name(&norm, &bytes, tone)
}

pub(crate) fn normalize_rel_path(source: &str) -> ScrollwipeResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(ScrollwipeError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(ScrollwipeError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(ScrollwipeError::validation(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(ScrollwipeError::validation(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/pair.rs"]
mod tests;
