//! Down confirmation for the bound endpoint.
//!
//! # State Transitions
//! ```text
//! Up → Down: consecutive failures >= threshold
//! any success: counter reset
//! ```

/// Counts consecutive probe failures until they reach a threshold.
#[derive(Debug, Clone)]
pub struct FailureConfirmation {
    threshold: u32,
    consecutive_failures: u32,
}

impl FailureConfirmation {
    /// A threshold of 0 is treated as 1.
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1),
            consecutive_failures: 0,
        }
    }

    /// Record a probe outcome. Returns true once the failure is confirmed.
    pub fn observe(&mut self, reachable: bool) -> bool {
        if reachable {
            self.consecutive_failures = 0;
            return false;
        }
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        self.consecutive_failures >= self.threshold
    }

    pub fn reset(&mut self) {
        self.consecutive_failures = 0;
    }

    pub fn failures(&self) -> u32 {
        self.consecutive_failures
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }
}
