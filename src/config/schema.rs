//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the failover
//! supervisor. All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::selection::Endpoint;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FailoverConfig {
    /// Voice client settings (binary, identity, environment).
    pub client: ClientConfig,

    /// Priority list; the first entry is the primary.
    pub servers: Vec<Endpoint>,

    /// Probe timeout, poll intervals and stop deadlines.
    pub timing: TimingConfig,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,
}

/// Voice client configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Client executable. Looked up on `PATH` when unset.
    pub binary: Option<PathBuf>,

    /// Name searched on `PATH` when `binary` is unset.
    pub binary_name: String,

    /// URL scheme of the connection descriptor.
    pub scheme: String,

    /// User name presented to the server.
    pub username: String,

    /// Optional server password. Empty means none.
    pub password: Option<String>,

    /// Provide DISPLAY / XDG_RUNTIME_DIR / DBUS_SESSION_BUS_ADDRESS defaults
    /// for a GUI client started outside a desktop session.
    pub desktop_session: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            binary: None,
            binary_name: "mumble".to_string(),
            scheme: "mumble".to_string(),
            username: "user01".to_string(),
            password: None,
            desktop_session: true,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("binary", &self.binary)
            .field("binary_name", &self.binary_name)
            .field("scheme", &self.scheme)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("desktop_session", &self.desktop_session)
            .finish()
    }
}

/// Timing configuration for the control loop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Deadline for a single TCP probe.
    pub probe_timeout_ms: u64,

    /// Wait between attempts while no server is reachable or a launch failed.
    pub down_retry_ms: u64,

    /// Poll interval while connected to the primary.
    pub primary_poll_ms: u64,

    /// Poll interval while connected to a secondary (failback check).
    pub secondary_poll_ms: u64,

    /// Pause before the first iteration.
    pub startup_delay_ms: u64,

    /// Pause after launching a client.
    pub launch_settle_ms: u64,

    /// Wait after SIGTERM before escalating to SIGKILL.
    pub stop_grace_ms: u64,

    /// Wait after SIGKILL for exit confirmation.
    pub kill_grace_ms: u64,

    /// Consecutive failed probes of the bound server before failing over.
    pub failover_confirmations: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            probe_timeout_ms: 1000,
            down_retry_ms: 3000,
            primary_poll_ms: 3000,
            secondary_poll_ms: 15000,
            startup_delay_ms: 2000,
            launch_settle_ms: 2000,
            stop_grace_ms: 5000,
            kill_grace_ms: 3000,
            failover_confirmations: 1,
        }
    }
}

impl TimingConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn down_retry(&self) -> Duration {
        Duration::from_millis(self.down_retry_ms)
    }

    pub fn primary_poll(&self) -> Duration {
        Duration::from_millis(self.primary_poll_ms)
    }

    pub fn secondary_poll(&self) -> Duration {
        Duration::from_millis(self.secondary_poll_ms)
    }

    pub fn startup_delay(&self) -> Duration {
        Duration::from_millis(self.startup_delay_ms)
    }

    pub fn launch_settle(&self) -> Duration {
        Duration::from_millis(self.launch_settle_ms)
    }

    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }

    pub fn kill_grace(&self) -> Duration {
        Duration::from_millis(self.kill_grace_ms)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9464".to_string(),
        }
    }
}
