//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Prober, supervisor, control loop produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and the connection-state gauge)
//!
//! Consumers:
//!     → journal / stdout
//!     → optional Prometheus scrape endpoint
//! ```
//!
//! # Design Decisions
//! - Structured fields (`endpoint = %ep`) rather than formatted messages
//! - RUST_LOG overrides the configured level
//! - Metrics go through the `metrics` facade; without an exporter they are no-ops

pub mod logging;
pub mod metrics;
