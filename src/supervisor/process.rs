//! Process handle abstraction and the production client launcher.
//!
//! # Responsibilities
//! - Define the minimal operations the supervisor needs from a child
//! - Spawn the voice client with its descriptor and environment
//! - Deliver SIGTERM/SIGKILL and wait with a deadline

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::process::{Child, Command};

use crate::resilience::timeouts::within;
use crate::supervisor::error::LaunchError;

/// Fallback client location when it is not found on `PATH`.
pub const DEFAULT_CLIENT_PATH: &str = "/usr/bin/mumble";

/// A running child process as seen by the supervisor.
pub trait ProcessHandle: Send {
    /// OS process id, if the process has not been reaped yet.
    fn id(&self) -> Option<u32>;

    /// Non-blocking exit check. Reaps the process when it has exited.
    fn is_alive(&mut self) -> bool;

    /// Ask the process to exit (SIGTERM).
    fn signal_terminate(&mut self) -> io::Result<()>;

    /// Force the process to exit (SIGKILL).
    fn signal_kill(&mut self) -> io::Result<()>;

    /// Wait up to `timeout` for exit. Returns true once the process has exited.
    fn wait(&mut self, timeout: Duration) -> impl Future<Output = bool> + Send;
}

/// Starts client processes.
pub trait Launcher {
    type Handle: ProcessHandle;

    /// Spawn the client with `descriptor` as its only argument and `env`
    /// added to the inherited environment. Must not wait for the client.
    fn spawn(&self, descriptor: &str, env: &[(String, String)]) -> Result<Self::Handle, LaunchError>;
}

/// Handle around a `tokio::process::Child`.
#[derive(Debug)]
pub struct ChildHandle {
    child: Child,
}

impl ChildHandle {
    pub fn new(child: Child) -> Self {
        Self { child }
    }
}

impl ProcessHandle for ChildHandle {
    fn id(&self) -> Option<u32> {
        self.child.id()
    }

    fn is_alive(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(None) => true,
            Ok(Some(status)) => {
                tracing::debug!(%status, "Client process exited");
                false
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to query client process status");
                false
            }
        }
    }

    #[cfg(unix)]
    fn signal_terminate(&mut self) -> io::Result<()> {
        use nix::sys::signal::{kill, Signal};
        use nix::unistd::Pid;

        match self.child.id() {
            Some(pid) => kill(Pid::from_raw(pid as i32), Signal::SIGTERM).map_err(io::Error::from),
            // Already reaped.
            None => Ok(()),
        }
    }

    #[cfg(not(unix))]
    fn signal_terminate(&mut self) -> io::Result<()> {
        self.child.start_kill()
    }

    fn signal_kill(&mut self) -> io::Result<()> {
        if self.child.id().is_none() {
            return Ok(());
        }
        self.child.start_kill()
    }

    async fn wait(&mut self, timeout: Duration) -> bool {
        match within(timeout, self.child.wait()).await {
            Some(Ok(status)) => {
                tracing::debug!(%status, "Client process exit confirmed");
                true
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Failed to wait for client process");
                false
            }
            None => false,
        }
    }
}

/// Spawns the real voice client binary.
#[derive(Debug, Clone)]
pub struct ClientLauncher {
    binary: PathBuf,
}

impl ClientLauncher {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Launcher for ClientLauncher {
    type Handle = ChildHandle;

    fn spawn(&self, descriptor: &str, env: &[(String, String)]) -> Result<ChildHandle, LaunchError> {
        let child = Command::new(&self.binary)
            .arg(descriptor)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                binary: self.binary.clone(),
                source,
            })?;

        tracing::debug!(pid = ?child.id(), binary = %self.binary.display(), "Client process spawned");
        Ok(ChildHandle::new(child))
    }
}

/// Locate `name` on `PATH`, falling back to [`DEFAULT_CLIENT_PATH`].
pub fn resolve_client_binary(name: &str) -> PathBuf {
    std::env::var_os("PATH")
        .and_then(|paths| {
            std::env::split_paths(&paths)
                .map(|dir| dir.join(name))
                .find(|candidate| is_executable(candidate))
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CLIENT_PATH))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_missing_binary_fails() {
        let launcher = ClientLauncher::new("/nonexistent/voice-client");
        let err = launcher.spawn("mumble://a:1", &[]).unwrap_err();
        assert!(matches!(err, LaunchError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_child_exit_is_detected_and_reaped() {
        let launcher = ClientLauncher::new("true");
        let mut handle = launcher.spawn("ignored", &[]).unwrap();

        assert!(handle.wait(Duration::from_secs(5)).await);
        assert!(!handle.is_alive());
        assert_eq!(handle.id(), None);
    }

    #[tokio::test]
    async fn test_terminate_running_child() {
        let launcher = ClientLauncher::new("sleep");
        let mut handle = launcher.spawn("30", &[]).unwrap();
        assert!(handle.is_alive());

        handle.signal_terminate().unwrap();
        assert!(handle.wait(Duration::from_secs(5)).await);
        assert!(!handle.is_alive());
    }

    #[test]
    fn test_resolve_falls_back() {
        let path = resolve_client_binary("definitely-not-a-real-voice-client");
        assert_eq!(path, PathBuf::from(DEFAULT_CLIENT_PATH));
    }
}
