//! The failover controller.
//!
//! # Responsibilities
//! - Own the single supervised client and the connection state
//! - Run one iteration of the failover/failback policy per `step`
//! - Pace iterations and stop the client on shutdown

use std::time::Duration;

use tokio::sync::broadcast;

use crate::config::TimingConfig;
use crate::control::state::ConnectionState;
use crate::health::probe::Prober;
use crate::lifecycle::shutdown::sleep_or_shutdown;
use crate::observability::metrics::{self, SwitchReason};
use crate::resilience::confirm::FailureConfirmation;
use crate::selection::{select, Endpoint, Selection};
use crate::supervisor::{Launcher, StopOutcome, SupervisedProcess, Supervisor};

/// Immutable loop parameters, built once at startup.
#[derive(Debug, Clone)]
pub struct ControlSettings {
    /// Priority list; index 0 is the primary.
    pub servers: Vec<Endpoint>,
    pub down_retry: Duration,
    pub primary_poll: Duration,
    pub secondary_poll: Duration,
    pub startup_delay: Duration,
    pub launch_settle: Duration,
    pub failover_confirmations: u32,
}

impl ControlSettings {
    /// Settings with the default timings.
    pub fn new(servers: Vec<Endpoint>) -> Self {
        Self::from_timing(servers, &TimingConfig::default())
    }

    pub fn from_timing(servers: Vec<Endpoint>, timing: &TimingConfig) -> Self {
        Self {
            servers,
            down_retry: timing.down_retry(),
            primary_poll: timing.primary_poll(),
            secondary_poll: timing.secondary_poll(),
            startup_delay: timing.startup_delay(),
            launch_settle: timing.launch_settle(),
            failover_confirmations: timing.failover_confirmations,
        }
    }

    pub fn primary(&self) -> Option<&Endpoint> {
        self.servers.first()
    }
}

/// What an iteration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing reachable; stays disconnected.
    NoServerReachable,
    /// A client was started against the selection.
    Launched(Selection),
    /// The client could not be started.
    LaunchFailed,
    /// Left a secondary because the primary answered again.
    FailedBack { from: Endpoint },
    /// Left the bound endpoint because it stopped answering.
    FailedOver { from: Endpoint },
    /// The bound endpoint missed a probe, not yet confirmed down.
    FailurePending { failures: u32 },
    /// Connected and healthy.
    Stayed,
}

/// Result of one iteration: what happened and how long to wait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub action: Action,
    pub wait: Duration,
}

impl Step {
    fn new(action: Action, wait: Duration) -> Self {
        Self { action, wait }
    }
}

/// Ties prober, selector and supervisor together.
pub struct Controller<P, L: Launcher> {
    settings: ControlSettings,
    prober: P,
    supervisor: Supervisor<L>,
    process: SupervisedProcess<L::Handle>,
    state: ConnectionState,
    confirmation: FailureConfirmation,
}

impl<P: Prober, L: Launcher> Controller<P, L> {
    pub fn new(settings: ControlSettings, prober: P, supervisor: Supervisor<L>) -> Self {
        let confirmation = FailureConfirmation::new(settings.failover_confirmations);
        Self {
            settings,
            prober,
            supervisor,
            process: SupervisedProcess::stopped(),
            state: ConnectionState::NoConnection,
            confirmation,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn process(&self) -> &SupervisedProcess<L::Handle> {
        &self.process
    }

    pub fn supervisor(&self) -> &Supervisor<L> {
        &self.supervisor
    }

    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    /// Run until `shutdown` fires, then stop the client.
    pub async fn run(&mut self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            servers = ?self.settings.servers.iter().map(ToString::to_string).collect::<Vec<_>>(),
            startup_delay = ?self.settings.startup_delay,
            "Failover loop starting"
        );

        if sleep_or_shutdown(self.settings.startup_delay, &mut shutdown).await {
            loop {
                let step = self.step().await;
                if !sleep_or_shutdown(step.wait, &mut shutdown).await {
                    break;
                }
            }
        }

        tracing::info!("Failover loop stopping");
        self.shutdown().await;
    }

    /// Stop the current client, if any.
    pub async fn shutdown(&mut self) -> StopOutcome {
        let outcome = self.supervisor.stop(&mut self.process).await;
        self.set_state(ConnectionState::NoConnection);
        outcome
    }

    /// One iteration of the failover policy.
    pub async fn step(&mut self) -> Step {
        let alive = self.supervisor.is_alive(&mut self.process);
        let bound = match (alive, self.process.bound_endpoint().cloned()) {
            (true, Some(endpoint)) => endpoint,
            (_, exited) => {
                if let Some(endpoint) = exited {
                    tracing::warn!(endpoint = %endpoint, "Voice client exited, restarting");
                    metrics::record_switch(SwitchReason::Crash);
                }
                self.supervisor.stop(&mut self.process).await;
                self.set_state(ConnectionState::NoConnection);
                return self.connect().await;
            }
        };

        if self.state == ConnectionState::ConnectedSecondary {
            if let Some(primary) = self.settings.primary().cloned() {
                if self.prober.check(&primary).await.reachable {
                    tracing::info!(
                        from = %bound,
                        primary = %primary,
                        "Primary is back online, failing back"
                    );
                    self.disconnect(SwitchReason::Failback).await;
                    return Step::new(Action::FailedBack { from: bound }, Duration::ZERO);
                }
            }
        }

        let reachable = self.prober.check(&bound).await.reachable;
        if self.confirmation.observe(reachable) {
            tracing::warn!(
                endpoint = %bound,
                failures = self.confirmation.failures(),
                "Current server unreachable, failing over"
            );
            self.disconnect(SwitchReason::Failover).await;
            return Step::new(Action::FailedOver { from: bound }, Duration::ZERO);
        }
        if !reachable {
            let failures = self.confirmation.failures();
            tracing::info!(
                endpoint = %bound,
                failures,
                required = self.confirmation.threshold(),
                "Current server missed a probe"
            );
            return Step::new(Action::FailurePending { failures }, self.settings.primary_poll);
        }

        let wait = match self.state {
            ConnectionState::ConnectedPrimary => self.settings.primary_poll,
            _ => self.settings.secondary_poll,
        };
        Step::new(Action::Stayed, wait)
    }

    async fn connect(&mut self) -> Step {
        let Some(selection) = select(&self.settings.servers, &self.prober).await else {
            tracing::warn!(retry_in = ?self.settings.down_retry, "No server reachable, waiting");
            return Step::new(Action::NoServerReachable, self.settings.down_retry);
        };

        match self.supervisor.launch(&selection.endpoint) {
            Ok(process) => {
                self.process = process;
                self.confirmation.reset();
                self.set_state(ConnectionState::for_index(selection.index));
                tracing::info!(
                    endpoint = %selection.endpoint,
                    priority = selection.index,
                    "Connected"
                );
                Step::new(Action::Launched(selection), self.settings.launch_settle)
            }
            Err(e) => {
                tracing::error!(
                    endpoint = %selection.endpoint,
                    error = %e,
                    retry_in = ?self.settings.down_retry,
                    "Failed to launch voice client"
                );
                Step::new(Action::LaunchFailed, self.settings.down_retry)
            }
        }
    }

    async fn disconnect(&mut self, reason: SwitchReason) {
        metrics::record_switch(reason);
        self.supervisor.stop(&mut self.process).await;
        self.confirmation.reset();
        self.set_state(ConnectionState::NoConnection);
    }

    fn set_state(&mut self, next: ConnectionState) {
        if self.state != next {
            tracing::info!(from = %self.state, to = %next, "Connection state changed");
            self.state = next;
        }
        metrics::record_connection_state(next.code());
    }
}
