//! Connection state of the control loop.

use std::fmt;

/// Where the supervised client is connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    NoConnection,
    ConnectedPrimary,
    /// Any endpoint after index 0.
    ConnectedSecondary,
}

impl ConnectionState {
    /// State after launching against the endpoint at `index`.
    pub fn for_index(index: usize) -> Self {
        if index == 0 {
            ConnectionState::ConnectedPrimary
        } else {
            ConnectionState::ConnectedSecondary
        }
    }

    /// Gauge encoding: 0 = none, 1 = primary, 2 = secondary.
    pub fn code(&self) -> u8 {
        match self {
            ConnectionState::NoConnection => 0,
            ConnectionState::ConnectedPrimary => 1,
            ConnectionState::ConnectedSecondary => 2,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::NoConnection => "no-connection",
            ConnectionState::ConnectedPrimary => "connected-primary",
            ConnectionState::ConnectedSecondary => "connected-secondary",
        };
        f.write_str(s)
    }
}
