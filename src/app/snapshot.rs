//! Per-tick value types: clock reading, sensor sample, actuator state and
//! the immutable [`StatusSnapshot`] handed to every reporting collaborator.
//!
//! ```text
//!   ClockReading ─┐
//!   SensorSample ─┼──▶ StatusSnapshot ──▶ display · sink A · sink B
//!   ActuatorState ┘
//! ```

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::control::buzzer::HourMinute;
use crate::error::ClockError;

/// Anything before 2020-01-01T00:00:00Z means SNTP has not run yet.
pub const EPOCH_2020_MS: u64 = 1_577_836_800_000;

// ───────────────────────────────────────────────────────────────
// ClockReading
// ───────────────────────────────────────────────────────────────

/// Local calendar reading plus the raw UTC epoch it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockReading {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    /// Milliseconds since the Unix epoch, UTC.
    pub epoch_millis: u64,
}

impl ClockReading {
    /// Convert a UTC epoch timestamp to local wall-clock time using a fixed
    /// offset (minutes east of UTC).
    pub fn from_epoch_millis(epoch_millis: u64, utc_offset_minutes: i32) -> Result<Self, ClockError> {
        let offset = FixedOffset::east_opt(utc_offset_minutes * 60).ok_or(ClockError::InvalidOffset)?;
        let ms = i64::try_from(epoch_millis).map_err(|_| ClockError::OutOfRange)?;
        let local = DateTime::from_timestamp_millis(ms)
            .ok_or(ClockError::OutOfRange)?
            .with_timezone(&offset);

        Ok(Self {
            year: u16::try_from(local.year()).map_err(|_| ClockError::OutOfRange)?,
            month: local.month() as u8,
            day: local.day() as u8,
            hour: local.hour() as u8,
            minute: local.minute() as u8,
            // Leap seconds fold into :59.
            second: local.second().min(59) as u8,
            epoch_millis,
        })
    }

    pub fn hm(&self) -> HourMinute {
        HourMinute::new(self.hour, self.minute)
    }

    /// `false` while the wall clock is still counting from boot.
    pub fn is_synchronised(&self) -> bool {
        self.epoch_millis >= EPOCH_2020_MS
    }

    /// `DD/MM/YYYY`
    pub fn date_dmy(&self) -> String {
        format!("{:02}/{:02}/{:04}", self.day, self.month, self.year)
    }

    /// `HH:MM:SS`
    pub fn time_hms(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// `YYYY-MM-DD HH:MM:SS`
    pub fn timestamp(&self) -> String {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

// ───────────────────────────────────────────────────────────────
// SensorSample / ActuatorState
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorSample {
    /// 0–100, always clamped.
    pub darkness_percent: u8,
    pub motion_detected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub red_on: bool,
    pub yellow_on: bool,
    pub buzzer_on: bool,
}

// ───────────────────────────────────────────────────────────────
// StatusSnapshot
// ───────────────────────────────────────────────────────────────

/// Everything that happened in one tick.  Built once, read by each
/// collaborator, then dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub clock: ClockReading,
    pub sensors: SensorSample,
    pub actuators: ActuatorState,
}

impl StatusSnapshot {
    pub fn new(clock: ClockReading, sensors: SensorSample, actuators: ActuatorState) -> Self {
        Self {
            clock,
            sensors,
            actuators,
        }
    }
}
