//! Startup orchestration.
//!
//! # Responsibilities
//! - Turn a validated `FailoverConfig` into runtime components
//! - Resolve the client binary
//!
//! # Design Decisions
//! - Fail fast: configuration errors are reported before anything starts
//! - Components receive plain settings values, never the config file itself

use std::path::{Path, PathBuf};

use crate::config::{read_config, validate_config, ConfigError, FailoverConfig};
use crate::control::{ControlSettings, Controller};
use crate::health::TcpProber;
use crate::selection::Endpoint;
use crate::supervisor::process::resolve_client_binary;
use crate::supervisor::{ClientLauncher, Credentials, StopPolicy, Supervisor, SupervisorSettings};

/// The production controller type.
pub type ClientController = Controller<TcpProber, ClientLauncher>;

/// Well-known configuration location used when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/voice-failover/failover.toml";

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces the whole priority list when non-empty.
    pub servers: Vec<Endpoint>,
    pub username: Option<String>,
    pub log_level: Option<String>,
}

/// Build the effective configuration.
///
/// Source: `explicit` if given, else `default_path` if it exists, else the
/// built-in defaults. Overrides are applied before validation.
pub fn resolve_config(
    explicit: Option<&Path>,
    default_path: &Path,
    overrides: &ConfigOverrides,
) -> Result<FailoverConfig, ConfigError> {
    let mut config = match explicit {
        Some(path) => read_config(path)?,
        None if default_path.exists() => read_config(default_path)?,
        None => FailoverConfig::default(),
    };

    if !overrides.servers.is_empty() {
        config.servers = overrides.servers.clone();
    }
    if let Some(username) = &overrides.username {
        config.client.username = username.clone();
    }
    if let Some(level) = &overrides.log_level {
        config.observability.log_level = level.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Client executable: configured path, else `binary_name` on `PATH`.
pub fn client_binary(config: &FailoverConfig) -> PathBuf {
    match &config.client.binary {
        Some(path) => path.clone(),
        None => resolve_client_binary(&config.client.binary_name),
    }
}

pub fn supervisor_settings(config: &FailoverConfig) -> SupervisorSettings {
    SupervisorSettings {
        scheme: config.client.scheme.clone(),
        credentials: Credentials::new(config.client.username.clone(), config.client.password.clone()),
        desktop_session: config.client.desktop_session,
        stop: StopPolicy {
            grace: config.timing.stop_grace(),
            kill_grace: config.timing.kill_grace(),
        },
    }
}

pub fn control_settings(config: &FailoverConfig) -> ControlSettings {
    ControlSettings::from_timing(config.servers.clone(), &config.timing)
}

/// Build the controller described by `config`.
pub fn build_controller(config: &FailoverConfig) -> ClientController {
    let binary = client_binary(config);
    tracing::info!(binary = %binary.display(), "Using voice client");

    let supervisor = Supervisor::new(ClientLauncher::new(binary), supervisor_settings(config));
    let prober = TcpProber::new(config.timing.probe_timeout());
    Controller::new(control_settings(config), prober, supervisor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use std::time::Duration;

    const FILE: &str = r#"
        [client]
        username = "user07"

        [[servers]]
        host = "10.30.5.10"

        [[servers]]
        host = "10.30.5.20"
    "#;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("voice-failover-startup-{}-{}.toml", name, std::process::id()));
        std::fs::write(&path, content).unwrap();
        path
    }

    fn missing() -> &'static Path {
        Path::new("/nonexistent/voice-failover/failover.toml")
    }

    #[test]
    fn test_cli_servers_replace_file_list() {
        let path = temp_config("replace", FILE);
        let overrides = ConfigOverrides {
            servers: vec![Endpoint::new("10.0.0.9", 7000)],
            username: Some("user42".into()),
            log_level: Some("debug".into()),
        };

        let config = resolve_config(Some(&path), missing(), &overrides).unwrap();
        assert_eq!(config.servers, vec![Endpoint::new("10.0.0.9", 7000)]);
        assert_eq!(config.client.username, "user42");
        assert_eq!(config.observability.log_level, "debug");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_file_values_kept_without_overrides() {
        let path = temp_config("keep", FILE);
        let config = resolve_config(Some(&path), missing(), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.servers.len(), 2);
        assert_eq!(config.client.username, "user07");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let path = temp_config("invalid", FILE);
        let overrides = ConfigOverrides {
            log_level: Some("loud".into()),
            ..Default::default()
        };

        match resolve_config(Some(&path), missing(), &overrides) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec![ValidationError::UnknownLogLevel("loud".into())]);
            }
            other => panic!("unexpected result: {:?}", other.map(|c| c.servers)),
        }
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_default_path_used_when_present() {
        let path = temp_config("default", FILE);
        let config = resolve_config(None, &path, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.client.username, "user07");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_builtin_defaults_need_servers() {
        let err = resolve_config(None, missing(), &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref e) if e == &vec![ValidationError::NoServers]));

        let overrides = ConfigOverrides {
            servers: vec![Endpoint::new("10.30.5.10", 64738)],
            ..Default::default()
        };
        let config = resolve_config(None, missing(), &overrides).unwrap();
        assert_eq!(config.client.username, "user01");
        assert_eq!(config.timing.primary_poll_ms, 3000);
    }

    #[test]
    fn test_settings_follow_config() {
        let mut config = FailoverConfig::default();
        config.servers = vec![Endpoint::new("a", 1), Endpoint::new("b", 2)];
        config.client.binary = Some("/opt/mumble/bin/mumble".into());
        config.client.password = Some("pw".into());
        config.timing.secondary_poll_ms = 20_000;
        config.timing.stop_grace_ms = 1_500;

        let control = control_settings(&config);
        assert_eq!(control.servers, config.servers);
        assert_eq!(control.secondary_poll, Duration::from_secs(20));
        assert_eq!(control.primary(), Some(&Endpoint::new("a", 1)));

        let sup = supervisor_settings(&config);
        assert_eq!(sup.stop.grace, Duration::from_millis(1_500));
        assert_eq!(sup.credentials.secret(), Some("pw"));

        assert_eq!(client_binary(&config), PathBuf::from("/opt/mumble/bin/mumble"));
    }

    #[tokio::test]
    async fn test_build_controller_starts_disconnected() {
        let mut config = FailoverConfig::default();
        config.servers = vec![Endpoint::new("a", 1)];
        let controller = build_controller(&config);
        assert_eq!(controller.state(), crate::control::ConnectionState::NoConnection);
    }
}
