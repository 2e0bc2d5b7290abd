//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require a non-empty, duplicate-free priority list
//! - Validate value ranges (intervals > 0, ports valid)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FailoverConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::FailoverConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no servers configured")]
    NoServers,

    #[error("server #{0} has an empty host")]
    EmptyHost(usize),

    #[error("server #{0} host must be a bare hostname or IP literal (no brackets or port)")]
    InvalidHost(usize),

    #[error("server #{0} has port 0")]
    ZeroPort(usize),

    #[error("server {0} is listed more than once")]
    DuplicateServer(String),

    #[error("timing.{0} must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("timing.failover_confirmations must be at least 1")]
    ZeroConfirmations,

    #[error("client.scheme must not be empty")]
    EmptyScheme,

    #[error("client.binary_name must not be empty when client.binary is unset")]
    EmptyBinaryName,

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &FailoverConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.servers.is_empty() {
        errors.push(ValidationError::NoServers);
    }

    let mut seen = HashSet::new();
    for (i, server) in config.servers.iter().enumerate() {
        if server.host.trim().is_empty() {
            errors.push(ValidationError::EmptyHost(i));
        } else if !server.has_valid_host() {
            errors.push(ValidationError::InvalidHost(i));
        }
        if server.port == 0 {
            errors.push(ValidationError::ZeroPort(i));
        }
        if !seen.insert(server) {
            errors.push(ValidationError::DuplicateServer(server.to_string()));
        }
    }

    let timing = &config.timing;
    let intervals = [
        ("probe_timeout_ms", timing.probe_timeout_ms),
        ("down_retry_ms", timing.down_retry_ms),
        ("primary_poll_ms", timing.primary_poll_ms),
        ("secondary_poll_ms", timing.secondary_poll_ms),
        ("stop_grace_ms", timing.stop_grace_ms),
        ("kill_grace_ms", timing.kill_grace_ms),
    ];
    for (name, value) in intervals {
        if value == 0 {
            errors.push(ValidationError::ZeroInterval(name));
        }
    }
    if timing.failover_confirmations == 0 {
        errors.push(ValidationError::ZeroConfirmations);
    }

    if config.client.scheme.trim().is_empty() {
        errors.push(ValidationError::EmptyScheme);
    }
    if config.client.binary.is_none() && config.client.binary_name.trim().is_empty() {
        errors.push(ValidationError::EmptyBinaryName);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
