//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Build prober + supervisor → Controller
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     Trigger → control loop leaves at its next wait → stop client → exit 0
//! ```
//!
//! # Design Decisions
//! - Signals are caught once, at the top level
//! - The loop only observes shutdown while waiting; steps run to completion
//! - Client cleanup runs on every exit path of the loop

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::build_controller;
