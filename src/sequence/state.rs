use crate::foundation::core::ScrollDirection;
use crate::foundation::math::clamp01;

/// Where the governed section stands relative to the viewport and the input gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Section is not in view; input passes through.
    #[default]
    Inactive,
    /// Section crossed the visibility threshold; waiting for the snap to settle.
    Arming,
    /// In view but not intercepting input (after an auto-advance or a top exit).
    Tracking,
    /// In view and intercepting every input delta.
    Locked,
}

/// What a single forward/reverse delta did to the state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// Input was dropped (forward while complete).
    Ignored,
    /// Progress moved; `completed` is set on the delta that reached 1.
    Advanced {
        /// Progress after the delta.
        progress: f64,
        /// This delta reached the end of the forward transition.
        completed: bool,
        /// This delta cleared a previous completion.
        reopened: bool,
    },
    /// Reverse input at progress 0: leave through the top.
    ExitTop,
}

/// Progress accumulator plus the explicit lock phase.
///
/// `progress` is never stored; it is always `clamp(accumulator / threshold, 0, 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct BlendState {
    accumulator: f64,
    threshold: f64,
    complete: bool,
    direction: ScrollDirection,
    phase: Phase,
}

impl BlendState {
    /// Fresh state at progress 0. `threshold` must be positive.
    pub fn new(threshold: f64) -> Self {
        Self {
            accumulator: 0.0,
            threshold,
            complete: false,
            direction: ScrollDirection::Down,
            phase: Phase::Inactive,
        }
    }

    pub fn progress(&self) -> f64 {
        clamp01(self.accumulator / self.threshold)
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn complete(&self) -> bool {
        self.complete
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Last ambient scroll direction seen.
    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn in_view(&self) -> bool {
        matches!(self.phase, Phase::Tracking | Phase::Locked)
    }

    pub fn locked(&self) -> bool {
        matches!(self.phase, Phase::Locked)
    }

    /// Progress as a whole percentage, for indicators.
    pub fn percent(&self) -> u8 {
        (self.progress() * 100.0).round() as u8
    }

    pub(crate) fn set_direction(&mut self, direction: ScrollDirection) {
        self.direction = direction;
    }

    /// Enter from `direction`: down starts at image A, up starts completed at image B.
    ///
    /// Entry direction always wins over whatever progress was left behind.
    pub(crate) fn enter(&mut self, direction: ScrollDirection) {
        match direction {
            ScrollDirection::Down => {
                self.accumulator = 0.0;
                self.complete = false;
            }
            ScrollDirection::Up => {
                self.accumulator = self.threshold;
                self.complete = true;
            }
        }
        self.phase = Phase::Arming;
    }

    pub(crate) fn lock(&mut self) {
        self.phase = Phase::Locked;
    }

    /// Stop intercepting input but stay in view.
    pub(crate) fn unlock(&mut self) {
        if self.phase == Phase::Locked {
            self.phase = Phase::Tracking;
        }
    }

    /// Leave view. Progress, accumulator and completion are kept.
    pub(crate) fn exit(&mut self) {
        self.phase = Phase::Inactive;
    }

    /// Apply one input delta. The caller gates on phase and asset readiness.
    pub(crate) fn apply(&mut self, magnitude: f64, direction: ScrollDirection) -> Step {
        let magnitude = if magnitude.is_finite() {
            magnitude.abs()
        } else if magnitude.is_nan() {
            0.0
        } else {
            f64::MAX
        };

        match direction {
            ScrollDirection::Down => {
                if self.complete {
                    return Step::Ignored;
                }
                self.accumulator = (self.accumulator + magnitude).min(self.threshold);
                let progress = self.progress();
                let completed = progress >= 1.0;
                if completed {
                    self.complete = true;
                }
                Step::Advanced {
                    progress,
                    completed,
                    reopened: false,
                }
            }
            ScrollDirection::Up => {
                if self.progress() <= 0.0 {
                    return Step::ExitTop;
                }
                let reopened = std::mem::replace(&mut self.complete, false);
                self.accumulator = (self.accumulator - magnitude).max(0.0);
                Step::Advanced {
                    progress: self.progress(),
                    completed: false,
                    reopened,
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/state.rs"]
mod tests;
