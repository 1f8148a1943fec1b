//! Raw host input turned into the deltas and transitions the sequence consumes.

use crate::foundation::core::ScrollDirection;

/// Signed vertical delta from a wheel or touch gesture, split into magnitude and direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputDelta {
    /// Absolute size of the delta.
    pub magnitude: f64,
    /// `Down` for positive deltas.
    pub direction: ScrollDirection,
}

impl InputDelta {
    /// Split a signed delta (`> 0` is down/forward).
    pub fn from_signed(delta: f64) -> Self {
        Self {
            magnitude: delta.abs(),
            direction: ScrollDirection::from_delta(delta),
        }
    }
}

/// Converts consecutive touch samples into deltas.
///
/// Every sample re-anchors the tracker, so each move yields only the displacement since the
/// previous sample.
#[derive(Clone, Copy, Debug, Default)]
pub struct TouchTracker {
    last_y: Option<f64>,
}

impl TouchTracker {
    pub fn start(&mut self, y: f64) {
        self.last_y = Some(y);
    }

    /// Record a move to `y`; finger moving up the screen is a forward (down) delta.
    ///
    /// A move without a preceding start only anchors.
    pub fn move_to(&mut self, y: f64) -> Option<InputDelta> {
        let prev = self.last_y.replace(y)?;
        Some(InputDelta::from_signed(prev - y))
    }
}

/// Tracks the page's own scroll offset to know which way it last moved.
#[derive(Clone, Copy, Debug, Default)]
pub struct AmbientDirection {
    last_scroll_y: f64,
    direction: ScrollDirection,
}

impl AmbientDirection {
    /// Record a new scroll offset; down iff it grew.
    pub fn observe(&mut self, scroll_y: f64) -> ScrollDirection {
        self.direction = if scroll_y > self.last_scroll_y {
            ScrollDirection::Down
        } else {
            ScrollDirection::Up
        };
        self.last_scroll_y = scroll_y;
        self.direction
    }

    pub fn current(&self) -> ScrollDirection {
        self.direction
    }
}

/// Crossing reported by [`VisibilityObserver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisibilityChange {
    Entered,
    Left,
}

/// Threshold observer over a section's visible fraction.
///
/// Only crossings are reported; repeated ratios on the same side are silent.
#[derive(Clone, Copy, Debug)]
pub struct VisibilityObserver {
    threshold: f64,
    intersecting: bool,
}

impl VisibilityObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            intersecting: false,
        }
    }

    pub fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    /// Feed the current visible ratio in `[0, 1]`.
    pub fn observe(&mut self, ratio: f64) -> Option<VisibilityChange> {
        let now = ratio >= self.threshold;
        if now == self.intersecting {
            return None;
        }
        self.intersecting = now;
        Some(if now {
            VisibilityChange::Entered
        } else {
            VisibilityChange::Left
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/input.rs"]
mod tests;
