//! LDR ambient-light sensor.
//!
//! The LDR sits in a divider whose output rises as the room gets darker,
//! so the raw ADC value maps directly to a darkness percentage:
//!
//! ```text
//!   darkness% = round(min(raw, full_scale) * 100 / full_scale)
//! ```
//!
//! No filtering: one ADC sample per tick.  Readings above the configured
//! full scale (miscalibration, a different ADC width) are clamped to 100 %
//! and logged.

use log::warn;

use crate::drivers::gpio::AnalogInput;
use crate::error::SensorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LightReading {
    pub raw: u16,
    pub darkness_percent: u8,
}

pub struct LightSensor<A: AnalogInput> {
    adc: A,
    full_scale: u16,
}

impl<A: AnalogInput> LightSensor<A> {
    /// `full_scale` must be non-zero (enforced by config validation).
    pub fn new(adc: A, full_scale: u16) -> Self {
        Self { adc, full_scale }
    }

    pub fn read(&mut self) -> Result<LightReading, SensorError> {
        let raw = self.adc.read_raw()?;
        if raw > self.full_scale {
            warn!(
                "LDR: raw {} above full scale {}, clamping",
                raw, self.full_scale
            );
        }
        Ok(LightReading {
            raw,
            darkness_percent: darkness_percent(raw, self.full_scale),
        })
    }

    pub fn full_scale(&self) -> u16 {
        self.full_scale
    }
}

/// Rounded darkness percentage, always within 0..=100.
pub fn darkness_percent(raw: u16, full_scale: u16) -> u8 {
    if full_scale == 0 {
        return 100;
    }
    let fs = u32::from(full_scale);
    let clamped = u32::from(raw).min(fs);
    ((clamped * 100 + fs / 2) / fs) as u8
}
