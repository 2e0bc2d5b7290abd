//! Button input on the Raspberry Pi GPIO header.
//!
//! Pins use BCM numbering. The internal pull-up is enabled, so an idle button
//! reads high and a press pulls the line low.

use std::io;

use crate::ptt::debounce::Level;

/// Source of pin levels.
pub trait InputPin {
    fn read(&mut self) -> io::Result<Level>;
}

#[cfg(target_os = "linux")]
pub use rpi::ButtonPin;

#[cfg(target_os = "linux")]
mod rpi {
    use std::io;

    use rppal::gpio::{Gpio, InputPin as GpioInput, Level as GpioLevel};

    use super::InputPin;
    use crate::ptt::config::PttError;
    use crate::ptt::debounce::Level;

    impl From<GpioLevel> for Level {
        fn from(level: GpioLevel) -> Self {
            match level {
                GpioLevel::Low => Level::Low,
                GpioLevel::High => Level::High,
            }
        }
    }

    /// A BCM pin configured as input with pull-up.
    ///
    /// Dropping it restores the pin's previous mode and bias.
    #[derive(Debug)]
    pub struct ButtonPin {
        input: GpioInput,
    }

    impl ButtonPin {
        pub fn open(bcm: u8) -> Result<Self, PttError> {
            let gpio = Gpio::new().map_err(|e| PttError::Gpio(Box::new(e)))?;
            let input = gpio
                .get(bcm)
                .map_err(|e| PttError::Gpio(Box::new(e)))?
                .into_input_pullup();
            tracing::debug!(pin = bcm, "GPIO input configured with pull-up");
            Ok(Self { input })
        }
    }

    impl InputPin for ButtonPin {
        fn read(&mut self) -> io::Result<Level> {
            Ok(self.input.read().into())
        }
    }

}
