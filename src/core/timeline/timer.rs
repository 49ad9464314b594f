//! Hover-to-expand countdown for collapsed ranges.
//!
//! Time is passed in by the caller so the timer can be driven by a real
//! clock or stepped in tests.

use std::time::{Duration, Instant};

pub const DEFAULT_EXPAND_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpandTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl ExpandTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Start the countdown unless one is already pending.
    /// Returns true when this call armed the timer.
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.deadline.is_some() {
            return false;
        }
        self.deadline = Some(now + self.delay);
        true
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    /// True exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for ExpandTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_EXPAND_DELAY_MS))
    }
}
