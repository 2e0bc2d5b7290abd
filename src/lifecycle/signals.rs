//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGINT (Ctrl+C) and SIGTERM (service manager stop)
//! - Translate the first one into a shutdown trigger
//!
//! # Design Decisions
//! - Registration happens up front so a failure aborts startup
//! - Later signals are ignored; cleanup is already under way

use crate::lifecycle::shutdown::Shutdown;

/// Register handlers and spawn a task that triggers `shutdown` on the first
/// termination signal. Must be called inside a Tokio runtime.
#[cfg(unix)]
pub fn install_signal_handlers(shutdown: Shutdown) -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        let name = tokio::select! {
            _ = interrupt.recv() => "SIGINT",
            _ = terminate.recv() => "SIGTERM",
        };
        tracing::info!(signal = name, "Shutdown signal received");
        shutdown.trigger();
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn install_signal_handlers(shutdown: Shutdown) -> std::io::Result<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!(signal = "Ctrl+C", "Shutdown signal received");
        }
        shutdown.trigger();
    });
    Ok(())
}
