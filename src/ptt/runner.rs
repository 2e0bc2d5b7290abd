//! Polling loop tying the pin, debouncer and mixer together.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;

use crate::lifecycle::shutdown::sleep_or_shutdown;
use crate::ptt::debounce::{Debouncer, Level};
use crate::ptt::gpio::InputPin;
use crate::ptt::mixer::CaptureSwitch;

/// Pin sampling period.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Sample `pin` every `poll` until shutdown, switching capture on each
/// debounced transition. Returns the last stable level.
pub async fn run<P, S>(
    pin: &mut P,
    mut debouncer: Debouncer,
    switch: &S,
    poll: Duration,
    mut shutdown: broadcast::Receiver<()>,
) -> Level
where
    P: InputPin,
    S: CaptureSwitch,
{
    tracing::info!(level = ?debouncer.stable(), "Watching push-to-talk button");

    while sleep_or_shutdown(poll, &mut shutdown).await {
        let level = match pin.read() {
            Ok(level) => level,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read GPIO pin");
                continue;
            }
        };

        let Some(level) = debouncer.observe(level, Instant::now()) else {
            continue;
        };

        let capture = level.is_pressed();
        tracing::debug!(?level, capture, "Button state changed");
        if let Err(e) = switch.set_capture(capture).await {
            tracing::warn!(error = %e, capture, "Failed to switch capture");
        }
    }

    debouncer.stable()
}
