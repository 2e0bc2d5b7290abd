//! Supervisor error definitions.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Building the connection descriptor failed.
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("invalid connection URL: {0}")]
    Parse(#[from] url::ParseError),

    #[error("URL '{0}' cannot carry user information")]
    Userinfo(String),
}

/// The client could not be started.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("failed to spawn {}: {source}", binary.display())]
    Spawn {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems met while stopping a client. Logged, never propagated.
#[derive(Debug, Error)]
pub enum StopError {
    #[error("client did not exit within {0:?} of SIGTERM")]
    GraceExpired(Duration),

    #[error("client exit not confirmed within {0:?} of SIGKILL")]
    KillUnconfirmed(Duration),

    #[error("failed to send {signal}: {source}")]
    Signal {
        signal: &'static str,
        #[source]
        source: std::io::Error,
    },
}
