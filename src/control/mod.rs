//! Failover control loop.
//!
//! # Data Flow
//! ```text
//! every iteration (controller.rs):
//!     child not running → select (priority order) → launch → settle
//!     on secondary      → probe primary → reachable? stop (failback)
//!     bound endpoint    → probe → confirmed down? stop (failover)
//!     otherwise         → wait primary_poll / secondary_poll
//! ```
//!
//! # State Machine (state.rs)
//! ```text
//! NoConnection ──launch idx 0──▶ ConnectedPrimary
//! NoConnection ──launch idx >0─▶ ConnectedSecondary
//! Connected*   ──exit / failover / failback──▶ NoConnection
//! ```
//!
//! # Design Decisions
//! - One sequential loop; every operation it awaits has a deadline
//! - Each iteration returns its own wait, so cadence is testable
//! - Failback re-selects from scratch instead of switching directly

pub mod controller;
pub mod state;

pub use controller::{Action, ControlSettings, Controller, Step};
pub use state::ConnectionState;
