//! Page-level driver: owns the section layout and the one sequence it governs.
//!
//! The page turns raw scroll offsets into visibility ratios and resolves
//! [`ScrollTarget`]s into concrete offsets, so a host only deals in pixels.

use std::path::Path;

use anyhow::Context as _;

use crate::assets::decode::PreparedImage;
use crate::assets::pair::AssetSlot;
use crate::config::SequenceConfig;
use crate::foundation::core::Viewport;
use crate::foundation::error::ScrollwipeResult;
use crate::sequence::controller::{
    HostCommand, InputOutcome, ScrollSequence, ScrollTarget, Siblings,
};

/// One vertical block of the page, in CSS pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Section {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

/// Ordered list of page sections.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageLayout {
    pub sections: Vec<Section>,
}

impl PageLayout {
    pub fn from_json_path(path: &Path) -> ScrollwipeResult<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("read layout '{}'", path.display()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}

/// A page with at most one scroll sequence attached to a named section.
pub struct Page {
    layout: PageLayout,
    governed: Option<usize>,
    sequence: Option<ScrollSequence>,
    viewport: Viewport,
    scroll_y: f64,
}

impl Page {
    /// Attach a sequence to section `governed_id`.
    ///
    /// A missing section is not an error: the page is built without a sequence and ignores
    /// every event.
    pub fn new(
        layout: PageLayout,
        governed_id: &str,
        mut config: SequenceConfig,
        viewport: Viewport,
    ) -> ScrollwipeResult<Self> {
        viewport.validate()?;
        let governed = layout.position(governed_id);
        let sequence = match governed {
            Some(idx) => {
                let siblings = Siblings {
                    previous: idx > 0,
                    next: idx + 1 < layout.sections.len(),
                };
                config.viewport = viewport;
                Some(ScrollSequence::new(config, siblings)?)
            }
            None => {
                tracing::warn!(section = governed_id, "governed section not found; page is inert");
                None
            }
        };
        Ok(Self {
            layout,
            governed,
            sequence,
            viewport,
            scroll_y: 0.0,
        })
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn sequence(&self) -> Option<&ScrollSequence> {
        self.sequence.as_ref()
    }

    pub fn sequence_mut(&mut self) -> Option<&mut ScrollSequence> {
        self.sequence.as_mut()
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Fraction of the governed section inside the viewport at the current offset.
    pub fn visible_ratio(&self) -> f64 {
        let Some(section) = self.governed.and_then(|i| self.layout.sections.get(i)) else {
            return 0.0;
        };
        if section.height <= 0.0 {
            return 0.0;
        }
        let top = section.offset_top.max(self.scroll_y);
        let bottom =
            (section.offset_top + section.height).min(self.scroll_y + self.viewport.height);
        ((bottom - top).max(0.0) / section.height).min(1.0)
    }

    /// The page scrolled to `scroll_y`.
    pub fn on_scroll(&mut self, scroll_y: f64, now_ms: u64) -> Vec<HostCommand> {
        self.scroll_y = scroll_y;
        let ratio = self.visible_ratio();
        let Some(seq) = self.sequence.as_mut() else {
            return Vec::new();
        };
        seq.on_scroll(scroll_y);
        seq.on_visibility(ratio, now_ms)
    }

    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> InputOutcome {
        match self.sequence.as_mut() {
            Some(seq) => seq.on_wheel(delta_y, now_ms),
            None => InputOutcome::default(),
        }
    }

    pub fn on_touch_start(&mut self, y: f64) {
        if let Some(seq) = self.sequence.as_mut() {
            seq.on_touch_start(y);
        }
    }

    pub fn on_touch_move(&mut self, y: f64, now_ms: u64) -> InputOutcome {
        match self.sequence.as_mut() {
            Some(seq) => seq.on_touch_move(y, now_ms),
            None => InputOutcome::default(),
        }
    }

    pub fn tick(&mut self, now_ms: u64) -> Vec<HostCommand> {
        match self.sequence.as_mut() {
            Some(seq) => seq.tick(now_ms),
            None => Vec::new(),
        }
    }

    /// The viewport changed size. A resize can move the governed section across the
    /// visibility threshold, so the ratio is re-fed to the sequence.
    pub fn on_resize(
        &mut self,
        viewport: Viewport,
        now_ms: u64,
    ) -> ScrollwipeResult<Vec<HostCommand>> {
        viewport.validate()?;
        self.viewport = viewport;
        let ratio = self.visible_ratio();
        let Some(seq) = self.sequence.as_mut() else {
            return Ok(Vec::new());
        };
        seq.on_resize(viewport)?;
        Ok(seq.on_visibility(ratio, now_ms))
    }

    pub fn on_asset_loaded(
        &mut self,
        slot: AssetSlot,
        result: ScrollwipeResult<PreparedImage>,
    ) -> bool {
        match self.sequence.as_mut() {
            Some(seq) => seq.on_asset_loaded(slot, result),
            None => false,
        }
    }

    /// Scroll offset a [`HostCommand::ScrollTo`] resolves to.
    ///
    /// Returns `None` for non-scroll commands and for targets with no section behind them.
    pub fn resolve(&self, cmd: HostCommand) -> Option<f64> {
        let HostCommand::ScrollTo(target) = cmd else {
            return None;
        };
        let idx = self.governed?;
        let idx = match target {
            ScrollTarget::SectionTop => idx,
            ScrollTarget::NextSection => idx + 1,
            ScrollTarget::PreviousSection => idx.checked_sub(1)?,
        };
        self.layout.sections.get(idx).map(|s| s.offset_top)
    }

    /// Carry out `cmd` the way a browser would: scroll commands jump to their offset
    /// (smooth scrolling collapses to its end point) and feed the new offset back in.
    ///
    /// Returns the commands produced by that scroll.
    pub fn apply(&mut self, cmd: HostCommand, now_ms: u64) -> Vec<HostCommand> {
        match self.resolve(cmd) {
            Some(offset) => self.on_scroll(offset, now_ms),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/page.rs"]
mod tests;
