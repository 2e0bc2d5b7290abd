//! Push-to-talk debouncer (companion utility).
//!
//! Runs as its own process (`ptt-debounce`); nothing here is used by the
//! failover loop.
//!
//! # Data Flow
//! ```text
//! /etc/walkietalkie/ptt.env
//!     → config.rs (GPIO_PIN, ALSA_CARD_INDEX, ALSA_CAPTURE_CONTROL, DEBOUNCE_MS)
//!
//! every 10 ms (runner.rs):
//!     gpio.rs (read BCM pin level, internal pull-up)
//!     → debounce.rs (level must hold for DEBOUNCE_MS)
//!     → mixer.rs (amixer sset <control> cap | nocap)
//! ```
//!
//! # Design Decisions
//! - Active low: pin pulled to ground means the button is pressed
//! - Mixer failures are logged; the loop keeps watching the pin

pub mod config;
pub mod debounce;
pub mod gpio;
pub mod mixer;
pub mod runner;

pub use config::{PttConfig, PttError, DEFAULT_PTT_CONFIG};
pub use debounce::{Debouncer, Level};
#[cfg(target_os = "linux")]
pub use gpio::ButtonPin;
pub use gpio::InputPin;
pub use mixer::{Amixer, CaptureSwitch};
pub use runner::run;
