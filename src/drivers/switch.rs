//! On/off load driver (lamps, active buzzer).
//!
//! Tracks the last commanded level so state changes can be logged once,
//! and re-drives the pin on every call: a glitched output is corrected on
//! the next tick.

use embedded_hal::digital::OutputPin;
use log::info;

use crate::error::ActuatorError;

pub struct SwitchedOutput<P: OutputPin> {
    label: &'static str,
    pin: P,
    on: bool,
}

impl<P: OutputPin> SwitchedOutput<P> {
    /// Starts logically off; the pin is not touched until the first `set`.
    pub fn new(label: &'static str, pin: P) -> Self {
        Self {
            label,
            pin,
            on: false,
        }
    }

    pub fn set(&mut self, on: bool) -> Result<(), ActuatorError> {
        let result = if on { self.pin.set_high() } else { self.pin.set_low() };
        result.map_err(|_| ActuatorError::GpioWriteFailed(self.label))?;

        if on != self.on {
            info!("{}: {}", self.label, if on { "ON" } else { "OFF" });
        }
        self.on = on;
        Ok(())
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}
