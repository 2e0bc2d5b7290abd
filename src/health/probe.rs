//! TCP reachability probe.
//!
//! # Responsibilities
//! - Open a TCP connection to an endpoint within a deadline
//! - Report reachability, never an error
//! - Record probe outcomes for observability

use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::net::TcpStream;

use crate::observability::metrics;
use crate::resilience::timeouts::within;
use crate::selection::Endpoint;

/// Why a probe reported the endpoint as unreachable.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Resolution plus connect did not finish within the deadline.
    #[error("connect timed out after {0:?}")]
    Timeout(Duration),

    /// Refused, unreachable, DNS failure, ...
    #[error("connect failed: {0}")]
    Connect(#[from] std::io::Error),
}

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub endpoint: Endpoint,
    pub reachable: bool,
    pub checked_at: Instant,
}

impl ProbeResult {
    /// Result stamped with the current instant.
    pub fn now(endpoint: Endpoint, reachable: bool) -> Self {
        Self {
            endpoint,
            reachable,
            checked_at: Instant::now(),
        }
    }
}

/// Source of reachability results for the control loop.
pub trait Prober {
    /// Probe `endpoint` once. Must complete in bounded time.
    fn check(&self, endpoint: &Endpoint) -> impl Future<Output = ProbeResult> + Send;
}

/// Production prober: TCP connect with a fixed timeout.
#[derive(Debug, Clone)]
pub struct TcpProber {
    timeout: Duration,
}

impl TcpProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Prober for TcpProber {
    async fn check(&self, endpoint: &Endpoint) -> ProbeResult {
        let reachable = probe(endpoint, self.timeout).await;
        metrics::record_probe(endpoint, reachable);
        ProbeResult::now(endpoint.clone(), reachable)
    }
}

/// Return true if a TCP connection to `endpoint` succeeds within `timeout`.
pub async fn probe(endpoint: &Endpoint, timeout: Duration) -> bool {
    match try_connect(endpoint, timeout).await {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!(endpoint = %endpoint, error = %e, "Probe failed");
            false
        }
    }
}

async fn try_connect(endpoint: &Endpoint, timeout: Duration) -> Result<(), ProbeError> {
    let connect = TcpStream::connect((endpoint.host.as_str(), endpoint.port));
    match within(timeout, connect).await {
        // Dropping the stream closes it.
        Some(stream) => stream.map(drop).map_err(ProbeError::from),
        None => Err(ProbeError::Timeout(timeout)),
    }
}
