//! Buzzer silence button.
//!
//! ## Hardware
//!
//! Active-low momentary switch with internal pull-up, sampled once per
//! control tick (no ISR: at a 5 s cadence a press must be held across a
//! sample to register).
//!
//! ## Hold detection
//!
//! | `hold_ms` | Counts as pressed when                               |
//! |-----------|------------------------------------------------------|
//! | 0         | the line reads low on this sample                    |
//! | > 0       | the line has read low on every sample for `hold_ms` |

use embedded_hal::digital::InputPin;
use log::debug;

use crate::error::SensorError;

pub struct SilenceButton<P: InputPin> {
    pin: P,
    hold_ms: u32,
    /// Uptime of the first low sample in the current press.
    pressed_since: Option<u64>,
}

impl<P: InputPin> SilenceButton<P> {
    pub fn new(pin: P, hold_ms: u32) -> Self {
        Self {
            pin,
            hold_ms,
            pressed_since: None,
        }
    }

    /// Sample the line at monotonic time `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Result<bool, SensorError> {
        let low = self
            .pin
            .is_low()
            .map_err(|_| SensorError::GpioReadFailed)?;

        if !low {
            self.pressed_since = None;
            return Ok(false);
        }
        if self.hold_ms == 0 {
            return Ok(true);
        }

        let since = *self.pressed_since.get_or_insert(now_ms);
        let held = now_ms.saturating_sub(since);
        if held >= u64::from(self.hold_ms) {
            return Ok(true);
        }
        debug!("Button: held {} of {} ms", held, self.hold_ms);
        Ok(false)
    }

    pub fn hold_ms(&self) -> u32 {
        self.hold_ms
    }
}
