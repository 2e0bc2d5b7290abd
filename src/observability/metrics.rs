//! Metrics collection and exposition.
//!
//! # Metrics
//! - `failover_probes_total` (counter): probes by endpoint and outcome
//! - `failover_launches_total` (counter): client launches by endpoint
//! - `failover_switches_total` (counter): failover / failback / crash restarts
//! - `failover_connection_state` (gauge): 0=none, 1=primary, 2=secondary

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::selection::Endpoint;

/// Why the loop abandoned its current client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchReason {
    Failover,
    Failback,
    Crash,
}

impl SwitchReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwitchReason::Failover => "failover",
            SwitchReason::Failback => "failback",
            SwitchReason::Crash => "crash",
        }
    }
}

/// Start the Prometheus scrape endpoint. Must run inside a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_probe(endpoint: &Endpoint, reachable: bool) {
    metrics::counter!(
        "failover_probes_total",
        "endpoint" => endpoint.to_string(),
        "reachable" => if reachable { "true" } else { "false" }
    )
    .increment(1);
}

pub fn record_launch(endpoint: &Endpoint) {
    metrics::counter!("failover_launches_total", "endpoint" => endpoint.to_string()).increment(1);
}

pub fn record_switch(reason: SwitchReason) {
    metrics::counter!("failover_switches_total", "reason" => reason.as_str()).increment(1);
}

/// 0 = no connection, 1 = primary, 2 = secondary.
pub fn record_connection_state(code: u8) {
    metrics::gauge!("failover_connection_state").set(f64::from(code));
}
