//! Push-to-talk button debouncer.
//!
//! Opens the microphone capture while the button is held down.

use std::path::PathBuf;

use clap::Parser;

use voice_failover::lifecycle::signals::install_signal_handlers;
use voice_failover::lifecycle::Shutdown;
use voice_failover::observability::logging::init_logging;
use voice_failover::ptt::runner::POLL_INTERVAL;
use voice_failover::ptt::{run, Amixer, Debouncer, InputPin, PttConfig, PttError, DEFAULT_PTT_CONFIG};

#[derive(Parser)]
#[command(name = "ptt-debounce")]
#[command(about = "Toggle microphone capture from a GPIO push-to-talk button", long_about = None)]
struct Cli {
    /// Settings file with GPIO_PIN, ALSA_CARD_INDEX, ALSA_CAPTURE_CONTROL, DEBOUNCE_MS.
    #[arg(short, long, default_value = DEFAULT_PTT_CONFIG)]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging("ptt_debounce=info,voice_failover=info");

    let config = PttConfig::load(&cli.config).inspect_err(|e| {
        tracing::error!(error = %e, path = %cli.config.display(), "Invalid push-to-talk settings");
    })?;
    tracing::info!(
        pin = config.pin,
        card = %config.card_index,
        control = %config.capture_control,
        debounce_ms = config.debounce.as_millis() as u64,
        "Push-to-talk settings loaded"
    );

    let mut pin = open_button(config.pin)?;
    let initial = pin.read().map_err(|e| PttError::Gpio(Box::new(e)))?;
    let mixer = Amixer::new(config.card_index.clone(), config.capture_control.clone());

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    install_signal_handlers(shutdown.clone())?;

    run(
        &mut pin,
        Debouncer::new(initial, config.debounce),
        &mixer,
        POLL_INTERVAL,
        shutdown_rx,
    )
    .await;

    drop(pin);
    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(target_os = "linux")]
fn open_button(pin: u8) -> Result<impl InputPin, PttError> {
    voice_failover::ptt::ButtonPin::open(pin)
}

/// No GPIO backend off Linux; never constructed.
#[cfg(not(target_os = "linux"))]
enum NoPin {}

#[cfg(not(target_os = "linux"))]
impl InputPin for NoPin {
    fn read(&mut self) -> std::io::Result<voice_failover::ptt::Level> {
        match *self {}
    }
}

#[cfg(not(target_os = "linux"))]
fn open_button(_pin: u8) -> Result<NoPin, PttError> {
    Err(PttError::Gpio("GPIO access requires Linux".into()))
}
