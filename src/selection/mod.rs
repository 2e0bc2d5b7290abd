//! Server selection subsystem.
//!
//! # Data Flow
//! ```text
//! Priority list (config.servers, index 0 = primary)
//!     → endpoint.rs (typed host/port values)
//!     → priority.rs (first reachable endpoint wins)
//!     → Selection { index, endpoint } or None
//! ```
//!
//! # Design Decisions
//! - Selection is stateless; hysteresis lives in the control loop
//! - Strict list order, no weighting or randomization
//! - Probing stops at the first reachable endpoint

pub mod endpoint;
pub mod priority;

pub use endpoint::Endpoint;
pub use priority::{select, Selection};
