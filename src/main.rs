//! Voice client failover supervisor (v1)
//!
//! Keeps a Mumble client connected to the best reachable server.
//!
//! # Architecture Overview
//!
//! ```text
//!     ┌───────────────────────────────────────────────────────────┐
//!     │                     VOICE FAILOVER                         │
//!     │                                                            │
//!     │   ┌──────────┐    ┌────────────┐    ┌──────────────┐       │
//!     │   │  health  │───▶│ selection  │───▶│   control    │       │
//!     │   │  probe   │    │  priority  │    │    loop      │       │
//!     │   └────▲─────┘    └────────────┘    └──────┬───────┘       │
//!     │        │                                   │               │
//!     │        │ TCP connect                       ▼               │
//!     │   ┌────┴─────┐                      ┌──────────────┐       │
//!     │   │ servers  │◀──── voice traffic ──│  supervisor  │       │
//!     │   │ (list)   │                      │ mumble child │       │
//!     │   └──────────┘                      └──────────────┘       │
//!     │                                                            │
//!     │   config · lifecycle (signals) · observability · resilience│
//!     └───────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use clap::Parser;

use voice_failover::lifecycle::signals::install_signal_handlers;
use voice_failover::lifecycle::startup::{resolve_config, ConfigOverrides, DEFAULT_CONFIG_PATH};
use voice_failover::lifecycle::{build_controller, Shutdown};
use voice_failover::observability::logging::{default_directive, init_logging};
use voice_failover::observability::metrics::init_metrics;
use voice_failover::selection::Endpoint;

#[derive(Parser)]
#[command(name = "voice-failover")]
#[command(about = "Keep a voice client connected to the best reachable server", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults to /etc/voice-failover/failover.toml if present.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Server in priority order; repeat to build the list. Replaces `servers` from the file.
    #[arg(short, long = "server", value_name = "HOST[:PORT]")]
    servers: Vec<Endpoint>,

    /// User name presented to the server.
    #[arg(short, long)]
    username: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Validate the configuration, print it and exit.
    #[arg(long)]
    check: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            servers: self.servers.clone(),
            username: self.username.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match resolve_config(cli.config.as_deref(), Path::new(DEFAULT_CONFIG_PATH), &cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&default_directive("voice_failover", "info"));
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    init_logging(&default_directive(
        "voice_failover",
        &config.observability.log_level.to_ascii_lowercase(),
    ));

    if cli.check {
        let mut shown = config.clone();
        if shown.client.password.is_some() {
            shown.client.password = Some("<redacted>".to_string());
        }
        println!("{}", toml::to_string_pretty(&shown)?);
        return Ok(());
    }

    tracing::info!("voice-failover v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        servers = config.servers.len(),
        primary = %config.servers[0],
        probe_timeout_ms = config.timing.probe_timeout_ms,
        primary_poll_ms = config.timing.primary_poll_ms,
        secondary_poll_ms = config.timing.secondary_poll_ms,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            init_metrics(addr);
        }
    }

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    install_signal_handlers(shutdown.clone())?;

    let mut controller = build_controller(&config);
    controller.run(shutdown_rx).await;

    tracing::info!("Shutdown complete");
    Ok(())
}
