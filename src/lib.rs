//! Voice client failover supervisor.
//!
//! Keeps a single voice-chat client connected to the most preferred reachable
//! server in a priority list, failing over when it drops and failing back
//! when the primary returns.

pub mod config;
pub mod control;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod ptt;
pub mod resilience;
pub mod selection;
pub mod supervisor;

pub use config::FailoverConfig;
pub use control::{ConnectionState, Controller};
pub use lifecycle::Shutdown;
pub use selection::Endpoint;
