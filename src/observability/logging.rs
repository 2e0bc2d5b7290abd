//! Structured logging setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `directive` is used as the filter
/// (for example `voice_failover=info`). Calling this twice is harmless.
pub fn init_logging(directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| directive.into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Default filter directive for a crate at the given level.
pub fn default_directive(crate_name: &str, level: &str) -> String {
    format!("{}={}", crate_name, level)
}
