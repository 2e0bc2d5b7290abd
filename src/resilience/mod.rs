//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Every blocking step of the control loop:
//!     → timeouts.rs (single bounded-wait primitive)
//!         - probe connect deadline
//!         - graceful stop wait
//!         - kill confirmation wait
//!
//! Bound endpoint probe results:
//!     → confirm.rs (consecutive-failure count before failover)
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; the loop never blocks without a deadline
//! - Down confirmation defaults to one failure (immediate failover)
//! - Any success resets the failure count

pub mod confirm;
pub mod timeouts;
