/// Work the controller postpones until host time catches up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Deferred {
    /// Snap the section to the viewport top.
    Snap,
    /// Take the scroll lock after the snap settled.
    Lock,
    /// Release the lock after completion and move to the next section.
    Advance,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    due_ms: u64,
    seq: u64,
    action: Deferred,
}

/// Single-threaded timer list keyed on host milliseconds.
///
/// Ties on `due_ms` fire in scheduling order.
#[derive(Clone, Debug, Default)]
pub(crate) struct TimerQueue {
    timers: Vec<Timer>,
    next_seq: u64,
}

impl TimerQueue {
    pub(crate) fn schedule(&mut self, due_ms: u64, action: Deferred) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.timers.push(Timer {
            due_ms,
            seq,
            action,
        });
    }

    pub(crate) fn cancel(&mut self, action: Deferred) {
        self.timers.retain(|t| t.action != action);
    }

    pub(crate) fn clear(&mut self) {
        self.timers.clear();
    }

    pub(crate) fn is_pending(&self, action: Deferred) -> bool {
        self.timers.iter().any(|t| t.action == action)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Earliest due time still queued.
    pub(crate) fn next_due(&self) -> Option<u64> {
        self.timers.iter().map(|t| t.due_ms).min()
    }

    /// Remove and return the earliest timer due at or before `now_ms`.
    pub(crate) fn pop_due(&mut self, now_ms: u64) -> Option<(u64, Deferred)> {
        let (idx, _) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= now_ms)
            .min_by_key(|(_, t)| (t.due_ms, t.seq))?;
        let t = self.timers.swap_remove(idx);
        Some((t.due_ms, t.action))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/timers.rs"]
mod tests;
