//! Reachability probing subsystem.
//!
//! # Data Flow
//! ```text
//! Control loop asks for a check
//!     → probe.rs (TCP connect under a deadline)
//!     → ProbeResult { reachable, checked_at }
//!     → selection / failover decisions
//! ```
//!
//! # Design Decisions
//! - A probe is a bare TCP connect; the socket is closed immediately
//! - Name resolution counts against the same deadline as the connect
//! - Every failure mode collapses to `reachable = false`
//! - No retries here; retry cadence belongs to the control loop

pub mod probe;

pub use probe::{probe, ProbeResult, Prober, TcpProber};
