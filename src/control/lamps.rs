//! Night/day lamp rule.
//!
//! Memoryless: the lamp outputs are a pure function of the hour, the
//! darkness percentage and the motion flag of the same tick.
//!
//! | Mode  | Red | Yellow                                  |
//! |-------|-----|-----------------------------------------|
//! | Night | ON  | OFF                                     |
//! | Day   | OFF | darkness > threshold AND motion detected |

use serde::{Deserialize, Serialize};

use crate::app::snapshot::SensorSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LampMode {
    Night,
    Day,
}

/// Hour range during which the red night lamp is forced on.
/// `start_hour..end_hour`, wrapping around midnight when `start > end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NightWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl NightWindow {
    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            // 22..6 wraps around midnight
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

/// Desired lamp outputs for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LampOutputs {
    pub mode: LampMode,
    pub red_on: bool,
    pub yellow_on: bool,
}

#[derive(Debug, Clone)]
pub struct LampPolicy {
    night: NightWindow,
    darkness_threshold: u8,
}

impl LampPolicy {
    pub fn new(night: NightWindow, darkness_threshold: u8) -> Self {
        Self {
            night,
            darkness_threshold,
        }
    }

    pub fn mode(&self, hour: u8) -> LampMode {
        if self.night.contains(hour) {
            LampMode::Night
        } else {
            LampMode::Day
        }
    }

    pub fn evaluate(&self, hour: u8, sample: &SensorSample) -> LampOutputs {
        match self.mode(hour) {
            LampMode::Night => LampOutputs {
                mode: LampMode::Night,
                red_on: true,
                yellow_on: false,
            },
            LampMode::Day => LampOutputs {
                mode: LampMode::Day,
                red_on: false,
                // Strictly greater: the threshold value itself is not dark enough.
                yellow_on: sample.darkness_percent > self.darkness_threshold
                    && sample.motion_detected,
            },
        }
    }
}
