//! Debouncing of selection-change notifications.
//!
//! Hosts fire selection-change events on every caret movement during a
//! drag. The debouncer coalesces them into one evaluation per quiet
//! window, while pointer/touch/key release forces an immediate evaluation
//! for responsiveness. Time is injected, so tests drive it with a manual
//! clock.

use std::time::{Duration, Instant};

/// Trailing-edge debouncer for selection processing.
#[derive(Debug)]
pub struct SelectionDebouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl SelectionDebouncer {
    /// Create a debouncer with the given quiet window.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Create a debouncer with the configured coalescing window.
    pub fn from_config(config: &crate::selection::SelectionConfig) -> Self {
        Self::new(Duration::from_millis(config.debounce_ms))
    }

    /// Record a selection-change notification at `now`, restarting the
    /// quiet window.
    pub fn notify(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether an evaluation is due at `now`. Consumes the pending state
    /// when it fires.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            },
            _ => false,
        }
    }

    /// Force an immediate evaluation (pointer/touch/key release). Returns
    /// whether a notification was pending.
    pub fn flush(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    /// Whether a notification is waiting for its quiet window.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }
}
