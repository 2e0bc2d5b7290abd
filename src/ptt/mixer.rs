//! Capture control switching through `amixer`.

use std::future::Future;

use tokio::process::Command;

use crate::ptt::config::PttError;

/// Something that can open or close the microphone capture path.
pub trait CaptureSwitch {
    fn set_capture(&self, enabled: bool) -> impl Future<Output = Result<(), PttError>> + Send;
}

/// `amixer -c <card> sset <control> cap|nocap`.
#[derive(Debug, Clone)]
pub struct Amixer {
    program: String,
    card_index: String,
    control: String,
}

impl Amixer {
    pub fn new(card_index: impl Into<String>, control: impl Into<String>) -> Self {
        Self {
            program: "amixer".to_string(),
            card_index: card_index.into(),
            control: control.into(),
        }
    }

    /// Use a different executable (tests, non-standard installs).
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn args(&self, enabled: bool) -> Vec<String> {
        vec![
            "-c".to_string(),
            self.card_index.clone(),
            "sset".to_string(),
            self.control.clone(),
            if enabled { "cap" } else { "nocap" }.to_string(),
        ]
    }
}

impl CaptureSwitch for Amixer {
    async fn set_capture(&self, enabled: bool) -> Result<(), PttError> {
        let output = Command::new(&self.program)
            .args(self.args(enabled))
            .output()
            .await
            .map_err(PttError::MixerSpawn)?;

        if output.status.success() {
            Ok(())
        } else {
            Err(PttError::MixerFailed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
