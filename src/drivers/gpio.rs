//! Line-level capabilities backed by the raw ESP-IDF calls in [`hw_init`].
//!
//! Digital lines implement the `embedded-hal` 1.0 [`InputPin`] /
//! [`OutputPin`] traits so sensors and switched outputs stay generic over
//! real pins and the scripted doubles in [`sim`](super::sim).  The ADC has
//! no blocking one-shot trait in `embedded-hal` 1.0, hence [`AnalogInput`].

use core::convert::Infallible;

use embedded_hal::digital::{ErrorKind, ErrorType, InputPin, OutputPin};

use super::hw_init;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Analog input
// ───────────────────────────────────────────────────────────────

/// Blocking one-shot analog read.
pub trait AnalogInput {
    fn read_raw(&mut self) -> Result<u16, SensorError>;
}

/// One ADC1 oneshot channel.
pub struct EspAdcChannel {
    channel: u32,
}

impl EspAdcChannel {
    /// The channel must already be configured by [`hw_init::init_peripherals`].
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl AnalogInput for EspAdcChannel {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        hw_init::adc1_read(self.channel).map_err(|rc| {
            log::error!("ADC1 CH{} read failed (rc={})", self.channel, rc);
            SensorError::AdcReadFailed
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Digital lines
// ───────────────────────────────────────────────────────────────

/// ESP-IDF error code from a GPIO call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl embedded_hal::digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// A GPIO configured as input.  Reading the level register cannot fail.
pub struct EspInput {
    pin: i32,
}

impl EspInput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for EspInput {
    type Error = Infallible;
}

impl InputPin for EspInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(hw_init::gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!hw_init::gpio_read(self.pin))
    }
}

/// A GPIO configured as push-pull output.
pub struct EspOutput {
    pin: i32,
}

impl EspOutput {
    pub fn new(pin: i32) -> Self {
        Self { pin }
    }
}

impl ErrorType for EspOutput {
    type Error = GpioError;
}

impl OutputPin for EspOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, false).map_err(GpioError)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.pin, true).map_err(GpioError)
    }
}
