//! Endpoint value type.
//!
//! An endpoint is a voice server address. Equality is by (host, port); the
//! host is kept verbatim so that DNS names are resolved at probe time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Mumble server port.
pub const DEFAULT_PORT: u16 = 64738;

/// A server address in the priority list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Endpoint {
    /// Hostname or IP literal (IPv6 without brackets).
    pub host: String,

    /// TCP port of the voice server.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Endpoint {
    /// Create a new endpoint.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// False for hosts that cannot be probed as written: bracketed literals
    /// or an embedded `:port`. A colon is only allowed in an IPv6 literal.
    pub fn has_valid_host(&self) -> bool {
        let host = self.host.as_str();
        if host.contains(['[', ']']) {
            return false;
        }
        !host.contains(':') || host.parse::<std::net::Ipv6Addr>().is_ok()
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Error returned when an endpoint string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointParseError {
    #[error("endpoint host is empty")]
    EmptyHost,

    #[error("unterminated IPv6 literal in '{0}'")]
    UnterminatedBracket(String),

    #[error("invalid port in '{0}'")]
    InvalidPort(String),
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    /// Parse `host`, `host:port`, `[v6]`, `[v6]:port` or a bare IPv6 literal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (host, port) = if let Some(rest) = s.strip_prefix('[') {
            let close = rest
                .find(']')
                .ok_or_else(|| EndpointParseError::UnterminatedBracket(s.to_string()))?;
            let host = &rest[..close];
            let tail = &rest[close + 1..];
            let port = match tail.strip_prefix(':') {
                Some(p) => Some(p),
                None if tail.is_empty() => None,
                None => return Err(EndpointParseError::InvalidPort(s.to_string())),
            };
            (host, port)
        } else {
            match s.matches(':').count() {
                0 => (s, None),
                1 => {
                    let (h, p) = s.split_once(':').unwrap_or((s, ""));
                    (h, Some(p))
                }
                // Bare IPv6 literal, no port.
                _ => (s, None),
            }
        };

        if host.is_empty() {
            return Err(EndpointParseError::EmptyHost);
        }

        let port = match port {
            Some(p) => p
                .parse::<u16>()
                .ok()
                .filter(|p| *p != 0)
                .ok_or_else(|| EndpointParseError::InvalidPort(s.to_string()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(host, port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_and_port() {
        let ep: Endpoint = "10.30.5.10:64739".parse().unwrap();
        assert_eq!(ep, Endpoint::new("10.30.5.10", 64739));

        let ep: Endpoint = "pi-node-2".parse().unwrap();
        assert_eq!(ep, Endpoint::new("pi-node-2", DEFAULT_PORT));
    }

    #[test]
    fn test_host_shape() {
        assert!(Endpoint::new("10.30.5.10", 1).has_valid_host());
        assert!(Endpoint::new("pi-node-2", 1).has_valid_host());
        assert!(Endpoint::new("fd00::1", 1).has_valid_host());
        assert!(!Endpoint::new("127.0.0.1:36431", 1).has_valid_host());
        assert!(!Endpoint::new("[::1]", 1).has_valid_host());
        assert!(!Endpoint::new("pi-node-2:x", 1).has_valid_host());
    }

    #[test]
    fn test_parse_ipv6() {
        let ep: Endpoint = "[fd00::1]:7000".parse().unwrap();
        assert_eq!(ep, Endpoint::new("fd00::1", 7000));
        assert_eq!(ep.to_string(), "[fd00::1]:7000");

        let ep: Endpoint = "fd00::2".parse().unwrap();
        assert_eq!(ep.port, DEFAULT_PORT);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Endpoint>(), Err(EndpointParseError::EmptyHost));
        assert!(matches!("host:0".parse::<Endpoint>(), Err(EndpointParseError::InvalidPort(_))));
        assert!(matches!("host:abc".parse::<Endpoint>(), Err(EndpointParseError::InvalidPort(_))));
        assert!(matches!("[::1".parse::<Endpoint>(), Err(EndpointParseError::UnterminatedBracket(_))));
    }

    #[test]
    fn test_equality_by_host_and_port() {
        assert_eq!(Endpoint::new("a", 1), Endpoint::new("a", 1));
        assert_ne!(Endpoint::new("a", 1), Endpoint::new("a", 2));
        assert_ne!(Endpoint::new("a", 1), Endpoint::new("b", 1));
    }
}
