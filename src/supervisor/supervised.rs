//! The supervised client process and its lifecycle operations.

use std::time::Duration;

use crate::observability::metrics;
use crate::selection::Endpoint;
use crate::supervisor::descriptor::{connection_descriptor, Credentials};
use crate::supervisor::environment::process_desktop_overrides;
use crate::supervisor::error::{LaunchError, StopError};
use crate::supervisor::process::{Launcher, ProcessHandle};

/// Lifecycle state of the supervised process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    Stopped,
    Running,
    Stopping,
}

/// The single client process owned by the control loop.
#[derive(Debug)]
pub struct SupervisedProcess<H> {
    bound_endpoint: Option<Endpoint>,
    handle: Option<H>,
    state: ProcessState,
}

impl<H> SupervisedProcess<H> {
    /// A record with no process behind it.
    pub fn stopped() -> Self {
        Self {
            bound_endpoint: None,
            handle: None,
            state: ProcessState::Stopped,
        }
    }

    fn running(endpoint: Endpoint, handle: H) -> Self {
        Self {
            bound_endpoint: Some(endpoint),
            handle: Some(handle),
            state: ProcessState::Running,
        }
    }

    pub fn bound_endpoint(&self) -> Option<&Endpoint> {
        self.bound_endpoint.as_ref()
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }
}

impl<H> Default for SupervisedProcess<H> {
    fn default() -> Self {
        Self::stopped()
    }
}

/// Deadlines for the two stop phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StopPolicy {
    /// Wait after SIGTERM before escalating.
    pub grace: Duration,
    /// Wait after SIGKILL for exit confirmation.
    pub kill_grace: Duration,
}

impl Default for StopPolicy {
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(5),
            kill_grace: Duration::from_secs(3),
        }
    }
}

/// How a call to [`Supervisor::stop`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// There was no process to stop.
    AlreadyStopped,
    /// The process had already exited; it was reaped.
    Exited,
    /// The process exited after SIGTERM.
    Terminated,
    /// The process ignored SIGTERM and exited after SIGKILL.
    Killed,
    /// Exit could not be confirmed even after SIGKILL.
    Unconfirmed,
}

/// Static settings for launching clients.
#[derive(Debug, Clone)]
pub struct SupervisorSettings {
    /// URL scheme of the connection descriptor.
    pub scheme: String,
    pub credentials: Credentials,
    /// Add display/runtime-dir/bus defaults to the child environment.
    pub desktop_session: bool,
    pub stop: StopPolicy,
}

impl Default for SupervisorSettings {
    fn default() -> Self {
        Self {
            scheme: "mumble".to_string(),
            credentials: Credentials::default(),
            desktop_session: true,
            stop: StopPolicy::default(),
        }
    }
}

/// Launches, checks and stops the client process.
#[derive(Debug)]
pub struct Supervisor<L> {
    launcher: L,
    settings: SupervisorSettings,
}

impl<L: Launcher> Supervisor<L> {
    pub fn new(launcher: L, settings: SupervisorSettings) -> Self {
        Self { launcher, settings }
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn settings(&self) -> &SupervisorSettings {
        &self.settings
    }

    /// Start a client bound to `endpoint`. Returns without waiting for it to connect.
    pub fn launch(&self, endpoint: &Endpoint) -> Result<SupervisedProcess<L::Handle>, LaunchError> {
        let descriptor = connection_descriptor(&self.settings.scheme, &self.settings.credentials, endpoint)?;
        let env = if self.settings.desktop_session {
            process_desktop_overrides()
        } else {
            Vec::new()
        };

        tracing::info!(
            endpoint = %endpoint,
            username = %self.settings.credentials.username,
            "Starting voice client"
        );

        let handle = self.launcher.spawn(&descriptor, &env)?;
        metrics::record_launch(endpoint);
        Ok(SupervisedProcess::running(endpoint.clone(), handle))
    }

    /// Non-blocking liveness check. An exited child is reaped and the record
    /// moves to `Stopped`; its binding is kept until [`Supervisor::stop`].
    pub fn is_alive(&self, process: &mut SupervisedProcess<L::Handle>) -> bool {
        let Some(handle) = process.handle.as_mut() else {
            return false;
        };
        if handle.is_alive() {
            return true;
        }
        process.handle = None;
        process.state = ProcessState::Stopped;
        false
    }

    /// Stop the process: SIGTERM, bounded wait, then SIGKILL and a second
    /// bounded wait. Safe on a stopped record. Errors are only logged.
    pub async fn stop(&self, process: &mut SupervisedProcess<L::Handle>) -> StopOutcome {
        process.bound_endpoint = None;
        let Some(mut handle) = process.handle.take() else {
            process.state = ProcessState::Stopped;
            return StopOutcome::AlreadyStopped;
        };
        process.state = ProcessState::Stopping;

        let outcome = if handle.is_alive() {
            self.terminate(&mut handle).await
        } else {
            StopOutcome::Exited
        };

        process.state = ProcessState::Stopped;
        outcome
    }

    async fn terminate(&self, handle: &mut L::Handle) -> StopOutcome {
        let policy = self.settings.stop;

        tracing::info!(pid = ?handle.id(), "Stopping voice client (SIGTERM)");
        if let Err(source) = handle.signal_terminate() {
            let e = StopError::Signal { signal: "SIGTERM", source };
            tracing::warn!(error = %e, "Graceful stop request failed");
        }
        if handle.wait(policy.grace).await {
            return StopOutcome::Terminated;
        }

        let e = StopError::GraceExpired(policy.grace);
        tracing::warn!(error = %e, "Client not responding, sending SIGKILL");
        if let Err(source) = handle.signal_kill() {
            let e = StopError::Signal { signal: "SIGKILL", source };
            tracing::error!(error = %e, "Forced stop failed");
        }
        if handle.wait(policy.kill_grace).await {
            return StopOutcome::Killed;
        }

        let e = StopError::KillUnconfirmed(policy.kill_grace);
        tracing::error!(error = %e, "Giving up on client process");
        StopOutcome::Unconfirmed
    }
}
