use std::path::Path;

use crate::assets::decode::PreparedImage;
use crate::assets::pair::{AssetPair, AssetSlot, load_asset};
use crate::config::SequenceConfig;
use crate::foundation::core::{ScrollDirection, Viewport};
use crate::foundation::error::{ScrollwipeError, ScrollwipeResult};
use crate::input::{
    AmbientDirection, InputDelta, TouchTracker, VisibilityChange, VisibilityObserver,
};
use crate::render::backend::{BackendKind, FrameRGBA, WipeBackend, WipeRequest, create_backend};
use crate::sequence::state::{BlendState, Phase, Step};
use crate::sequence::timers::{Deferred, TimerQueue};

/// Where the host should scroll the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollTarget {
    /// Align the governed section's top with the viewport top.
    SectionTop,
    /// Bring the section after the governed one into view.
    NextSection,
    /// Bring the section before the governed one into view.
    PreviousSection,
}

/// Side effect the host must carry out. All scrolls are smooth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HostCommand {
    ScrollTo(ScrollTarget),
    /// Update the progress bar/text to a whole percentage.
    SetProgress { percent: u8 },
    /// Show or hide the "scroll locked" indicator.
    SetLockIndicator(bool),
    /// Show or hide the "keep scrolling" hint.
    SetScrollHint(bool),
}

/// Result of handing one input event to the sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputOutcome {
    /// The host must cancel the event's native scroll.
    pub suppress_default: bool,
    pub commands: Vec<HostCommand>,
}

/// Which neighbours the governed section has.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Siblings {
    pub previous: bool,
    pub next: bool,
}

/// Scroll-jacking controller that blends image A into image B as input accumulates.
///
/// Single-threaded and event-driven: every handler runs to completion, and delayed work is
/// queued until the host calls [`ScrollSequence::tick`] with a later timestamp.
pub struct ScrollSequence {
    cfg: SequenceConfig,
    state: BlendState,
    assets: AssetPair,
    timers: TimerQueue,
    visibility: VisibilityObserver,
    ambient: AmbientDirection,
    touch: TouchTracker,
    viewport: Viewport,
    siblings: Siblings,
    backend: Box<dyn WipeBackend>,
    renders: u64,
}

impl ScrollSequence {
    /// Create a sequence drawing with the CPU backend.
    pub fn new(cfg: SequenceConfig, siblings: Siblings) -> ScrollwipeResult<Self> {
        Self::with_backend(cfg, siblings, create_backend(BackendKind::Cpu))
    }

    /// Create a sequence drawing into `backend`.
    pub fn with_backend(
        cfg: SequenceConfig,
        siblings: Siblings,
        backend: Box<dyn WipeBackend>,
    ) -> ScrollwipeResult<Self> {
        cfg.validate()?;
        Ok(Self {
            state: BlendState::new(cfg.threshold),
            assets: AssetPair::new(),
            timers: TimerQueue::default(),
            visibility: VisibilityObserver::new(cfg.visibility_threshold),
            ambient: AmbientDirection::default(),
            touch: TouchTracker::default(),
            viewport: cfg.viewport,
            siblings,
            backend,
            renders: 0,
            cfg,
        })
    }

    pub fn state(&self) -> &BlendState {
        &self.state
    }

    pub fn assets(&self) -> &AssetPair {
        &self.assets
    }

    pub fn config(&self) -> &SequenceConfig {
        &self.cfg
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last rendered frame.
    pub fn frame(&self) -> Option<&FrameRGBA> {
        self.backend.frame()
    }

    /// Number of successful renders so far.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Return `true` while a delayed action is waiting for [`ScrollSequence::tick`].
    pub fn has_pending_timers(&self) -> bool {
        !self.timers.is_empty()
    }

    /// Return `true` between completing the wipe and handing off to the next section.
    pub fn advance_pending(&self) -> bool {
        self.timers.is_pending(Deferred::Advance)
    }

    /// Host time at which [`ScrollSequence::tick`] next has work to do.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.timers.next_due()
    }

    /// Deliver one image load outcome. Renders once both images are in.
    pub fn on_asset_loaded(
        &mut self,
        slot: AssetSlot,
        result: ScrollwipeResult<PreparedImage>,
    ) -> bool {
        let joined = self.assets.resolve(slot, result);
        if joined {
            self.render();
        }
        joined
    }

    /// Load both configured images from paths relative to `root`.
    ///
    /// Returns `true` if the pair became ready. Failures are recorded per slot, not returned.
    pub fn load_configured_assets(&mut self, root: &Path) -> bool {
        let mut joined = false;
        for slot in [AssetSlot::Source, AssetSlot::Target] {
            let spec = self.cfg.asset(slot);
            let tone = spec.effective_tone(slot);
            let result = match spec.path.as_deref() {
                Some(rel) => load_asset(root, rel, tone),
                None => Err(ScrollwipeError::asset(format!(
                    "no path configured for {} image",
                    slot.label()
                ))),
            };
            joined |= self.on_asset_loaded(slot, result);
        }
        joined
    }

    /// Record the page's own scroll offset (ambient direction tracking).
    pub fn on_scroll(&mut self, scroll_y: f64) -> ScrollDirection {
        let dir = self.ambient.observe(scroll_y);
        self.state.set_direction(dir);
        dir
    }

    /// Feed the governed section's visible ratio; crossings become enter/exit calls.
    pub fn on_visibility(&mut self, ratio: f64, now_ms: u64) -> Vec<HostCommand> {
        match self.visibility.observe(ratio) {
            Some(VisibilityChange::Entered) => {
                let dir = self.ambient.current();
                self.on_enter_view(dir, now_ms)
            }
            Some(VisibilityChange::Left) => self.on_exit_view(),
            None => Vec::new(),
        }
    }

    /// The section became visible while the page was scrolling in `direction`.
    pub fn on_enter_view(&mut self, direction: ScrollDirection, now_ms: u64) -> Vec<HostCommand> {
        if !self.assets.is_ready() {
            tracing::debug!(
                loaded = self.assets.loaded_count(),
                "section entered view before images loaded; staying inactive"
            );
            return Vec::new();
        }
        if self.state.phase() != Phase::Inactive {
            return Vec::new();
        }

        self.state.enter(direction);
        tracing::info!(
            ?direction,
            progress = self.state.progress(),
            "section entered view; arming scroll lock"
        );
        self.render();

        self.timers.clear();
        self.timers
            .schedule(now_ms.saturating_add(self.cfg.snap_delay_ms), Deferred::Snap);
        vec![HostCommand::SetProgress {
            percent: self.state.percent(),
        }]
    }

    /// The section stopped being visible. Progress is kept for the next entry.
    pub fn on_exit_view(&mut self) -> Vec<HostCommand> {
        if self.state.phase() == Phase::Inactive {
            return Vec::new();
        }
        self.state.exit();
        self.timers.clear();
        tracing::info!(
            progress = self.state.progress(),
            "section left view; scroll lock released"
        );
        vec![
            HostCommand::SetScrollHint(true),
            HostCommand::SetLockIndicator(false),
        ]
    }

    /// Run every delayed action due at or before `now_ms`, in due order.
    pub fn tick(&mut self, now_ms: u64) -> Vec<HostCommand> {
        let mut cmds = Vec::new();
        while let Some((due_ms, action)) = self.timers.pop_due(now_ms) {
            match action {
                Deferred::Snap => {
                    if self.state.phase() == Phase::Arming {
                        cmds.push(HostCommand::ScrollTo(ScrollTarget::SectionTop));
                        self.timers.schedule(
                            due_ms.saturating_add(self.cfg.lock_settle_ms),
                            Deferred::Lock,
                        );
                    }
                }
                Deferred::Lock => {
                    if self.state.phase() == Phase::Arming {
                        self.state.lock();
                        tracing::info!("scroll locked");
                        cmds.push(HostCommand::SetScrollHint(false));
                        cmds.push(HostCommand::SetLockIndicator(true));
                    }
                }
                Deferred::Advance => {
                    if self.state.locked() && self.state.complete() {
                        self.state.unlock();
                        if self.siblings.next {
                            tracing::info!("advancing to next section");
                            cmds.push(HostCommand::ScrollTo(ScrollTarget::NextSection));
                        }
                    }
                }
            }
        }
        cmds
    }

    /// Wheel event with the browser's signed `deltaY` (`> 0` scrolls down).
    pub fn on_wheel(&mut self, delta_y: f64, now_ms: u64) -> InputOutcome {
        let d = InputDelta::from_signed(delta_y);
        self.on_input_delta(d.magnitude, d.direction, now_ms)
    }

    pub fn on_touch_start(&mut self, y: f64) {
        self.touch.start(y);
    }

    /// Touch-move sample at screen `y`.
    pub fn on_touch_move(&mut self, y: f64, now_ms: u64) -> InputOutcome {
        match self.touch.move_to(y) {
            Some(d) => self.on_input_delta(d.magnitude, d.direction, now_ms),
            None => InputOutcome::default(),
        }
    }

    /// Core transition: one delta of `magnitude` towards `direction`.
    pub fn on_input_delta(
        &mut self,
        magnitude: f64,
        direction: ScrollDirection,
        now_ms: u64,
    ) -> InputOutcome {
        if !self.assets.is_ready() || !self.state.in_view() || !self.state.locked() {
            return InputOutcome::default();
        }

        let mut out = InputOutcome {
            suppress_default: true,
            commands: Vec::new(),
        };
        // Zero or NaN deltas carry no direction (horizontal swipes, stationary touches).
        if magnitude.is_nan() || magnitude == 0.0 {
            return out;
        }
        match self.state.apply(magnitude, direction) {
            Step::Ignored => {
                // Completed on entry from below: forward input still hands off downwards.
                if direction == ScrollDirection::Down
                    && self.state.complete()
                    && !self.timers.is_pending(Deferred::Advance)
                {
                    tracing::info!("forward input at completed sequence; scheduling advance");
                    out.commands.push(HostCommand::SetLockIndicator(false));
                    self.timers.schedule(
                        now_ms.saturating_add(self.cfg.advance_delay_ms),
                        Deferred::Advance,
                    );
                }
            }
            Step::Advanced {
                progress,
                completed,
                reopened,
            } => {
                if reopened {
                    // Reversing out of completion cancels the pending hand-off.
                    self.timers.cancel(Deferred::Advance);
                    tracing::info!("reversing out of completed sequence");
                    out.commands.push(HostCommand::SetLockIndicator(true));
                }
                self.render();
                out.commands.push(HostCommand::SetProgress {
                    percent: self.state.percent(),
                });
                tracing::debug!(?direction, magnitude, progress, "sequence progress");

                if completed {
                    tracing::info!("sequence complete");
                    out.commands.push(HostCommand::SetLockIndicator(false));
                    self.timers.schedule(
                        now_ms.saturating_add(self.cfg.advance_delay_ms),
                        Deferred::Advance,
                    );
                }
            }
            Step::ExitTop => {
                self.state.unlock();
                if self.siblings.previous {
                    tracing::info!("leaving through the top; scrolling to previous section");
                    out.commands
                        .push(HostCommand::ScrollTo(ScrollTarget::PreviousSection));
                }
            }
        }
        out
    }

    /// Viewport changed size; re-render at the current progress.
    pub fn on_resize(&mut self, viewport: Viewport) -> ScrollwipeResult<()> {
        viewport.validate()?;
        self.viewport = viewport;
        self.render();
        Ok(())
    }

    /// Draw the current progress. Returns `false` if nothing was drawn.
    ///
    /// Render failures are logged and leave the previous frame in place.
    pub fn render(&mut self) -> bool {
        let Some((source, target)) = self.assets.images() else {
            return false;
        };
        let req = WipeRequest {
            viewport: self.viewport,
            progress: self.state.progress(),
            source,
            target,
            separator: &self.cfg.separator,
            background_rgba: self.cfg.background_rgba,
        };
        match self.backend.render_wipe(&req) {
            Ok(()) => {
                self.renders += 1;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "wipe render failed");
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/controller.rs"]
mod tests;
