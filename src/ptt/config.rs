//! `ptt.env` loading.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

/// Well-known location of the push-to-talk settings.
pub const DEFAULT_PTT_CONFIG: &str = "/etc/walkietalkie/ptt.env";

/// Errors of the push-to-talk utility.
#[derive(Debug, Error)]
pub enum PttError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing key {0}")]
    MissingKey(&'static str),

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("GPIO error: {0}")]
    Gpio(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("failed to run mixer: {0}")]
    MixerSpawn(#[source] std::io::Error),

    #[error("mixer exited with {status}: {stderr}")]
    MixerFailed { status: std::process::ExitStatus, stderr: String },
}

/// Settings read from `ptt.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PttConfig {
    /// BCM pin number of the button.
    pub pin: u8,
    /// ALSA card passed to `amixer -c`.
    pub card_index: String,
    /// Capture control toggled on press/release.
    pub capture_control: String,
    /// Time a new level must hold before it counts.
    pub debounce: Duration,
}

/// Collect `KEY=value` pairs. Lines the dotenv parser rejects (for example
/// ones without `=`) are skipped rather than failing the whole file.
fn collect_vars<R: Read>(reader: R) -> HashMap<String, String> {
    dotenvy::from_read_iter(reader)
        .filter_map(|item| match item {
            Ok(pair) => Some(pair),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unparsable ptt.env line");
                None
            }
        })
        .collect()
}

impl PttConfig {
    pub fn from_env_str(content: &str) -> Result<Self, PttError> {
        Self::from_vars(collect_vars(content.as_bytes()))
    }

    fn from_vars(vars: HashMap<String, String>) -> Result<Self, PttError> {
        let get = |key: &'static str| -> Result<String, PttError> {
            vars.get(key)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or(PttError::MissingKey(key))
        };

        let pin_raw = get("GPIO_PIN")?;
        let pin = pin_raw.parse().map_err(|_| PttError::InvalidValue {
            key: "GPIO_PIN",
            value: pin_raw.clone(),
        })?;

        let debounce_raw = get("DEBOUNCE_MS")?;
        let debounce_ms: u64 = debounce_raw.parse().map_err(|_| PttError::InvalidValue {
            key: "DEBOUNCE_MS",
            value: debounce_raw.clone(),
        })?;

        Ok(Self {
            pin,
            card_index: get("ALSA_CARD_INDEX")?,
            capture_control: get("ALSA_CAPTURE_CONTROL")?,
            debounce: Duration::from_millis(debounce_ms),
        })
    }

    pub fn load(path: &Path) -> Result<Self, PttError> {
        let file = File::open(path).map_err(|source| PttError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_vars(collect_vars(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# walkie-talkie button
GPIO_PIN=17
ALSA_CARD_INDEX=1
ALSA_CAPTURE_CONTROL=\"Mic\"

DEBOUNCE_MS=30
garbage line
";

    #[test]
    fn test_parse_sample() {
        let config = PttConfig::from_env_str(SAMPLE).unwrap();
        assert_eq!(
            config,
            PttConfig {
                pin: 17,
                card_index: "1".into(),
                capture_control: "Mic".into(),
                debounce: Duration::from_millis(30),
            }
        );
    }

    #[test]
    fn test_value_may_contain_equals() {
        let content = SAMPLE.replace("ALSA_CAPTURE_CONTROL=\"Mic\"", "ALSA_CAPTURE_CONTROL=Capture=Left");
        let config = PttConfig::from_env_str(&content).unwrap();
        assert_eq!(config.capture_control, "Capture=Left");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("ptt-{}.env", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let config = PttConfig::load(&path).unwrap();
        assert_eq!(config.pin, 17);
        assert_eq!(config.capture_control, "Mic");
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_pin_out_of_range() {
        let err = PttConfig::from_env_str(&SAMPLE.replace("GPIO_PIN=17", "GPIO_PIN=300")).unwrap_err();
        assert!(matches!(err, PttError::InvalidValue { key: "GPIO_PIN", .. }));
    }

    #[test]
    fn test_missing_key() {
        let err = PttConfig::from_env_str("GPIO_PIN=17\nDEBOUNCE_MS=30\nALSA_CARD_INDEX=1\n").unwrap_err();
        assert!(matches!(err, PttError::MissingKey("ALSA_CAPTURE_CONTROL")));
    }

    #[test]
    fn test_invalid_number() {
        let err = PttConfig::from_env_str(&SAMPLE.replace("GPIO_PIN=17", "GPIO_PIN=seventeen")).unwrap_err();
        assert!(matches!(err, PttError::InvalidValue { key: "GPIO_PIN", .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PttConfig::load(Path::new("/nonexistent/ptt.env")).unwrap_err();
        assert!(matches!(err, PttError::Io { .. }));
    }
}
