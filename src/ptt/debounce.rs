//! Input debouncing.
//!
//! # State Transitions
//! ```text
//! stable L, read L'   → candidate L' since now
//! candidate L' held ≥ debounce → stable L' (reported once)
//! read back L before that      → candidate dropped (bounce)
//! ```

use std::time::Duration;

use tokio::time::Instant;

/// Logic level of the input pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl Level {
    /// Active low: a pressed button pulls the pin to ground.
    pub fn is_pressed(&self) -> bool {
        matches!(self, Level::Low)
    }
}

/// Reports a level change only after it has held for the debounce time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    stable: Level,
    candidate: Option<(Level, Instant)>,
    hold: Duration,
}

impl Debouncer {
    pub fn new(initial: Level, hold: Duration) -> Self {
        Self {
            stable: initial,
            candidate: None,
            hold,
        }
    }

    pub fn stable(&self) -> Level {
        self.stable
    }

    /// Feed one sample. Returns the new stable level when a transition is accepted.
    pub fn observe(&mut self, level: Level, now: Instant) -> Option<Level> {
        if level == self.stable {
            self.candidate = None;
            return None;
        }

        let since = match self.candidate {
            Some((candidate, since)) if candidate == level => since,
            _ => {
                self.candidate = Some((level, now));
                now
            }
        };

        if now.duration_since(since) >= self.hold {
            self.stable = level;
            self.candidate = None;
            return Some(level);
        }
        None
    }
}
