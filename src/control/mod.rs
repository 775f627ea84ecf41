//! Decision engine: clock + sensors + button → lamp and buzzer outputs.
//!
//! ```text
//!   ClockReading ──┐
//!   SensorSample ──┼──▶ ActuatorController ──▶ ActuatorState
//!   button       ──┘    (BuzzerSchedule, LampPolicy)
//! ```
//!
//! Buzzer rules run before the lamp rule, matching the tick order of the
//! control loop.  The controller owns all cross-tick state; nothing here
//! touches hardware.

pub mod buzzer;
pub mod lamps;

use crate::app::snapshot::{ActuatorState, ClockReading, SensorSample};
use crate::config::SystemConfig;

use buzzer::{BuzzerSchedule, Transitions};
use lamps::{LampMode, LampPolicy, NightWindow};

/// Result of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub state: ActuatorState,
    pub mode: LampMode,
    pub buzzer: Transitions,
}

pub struct ActuatorController {
    lamps: LampPolicy,
    buzzer: BuzzerSchedule,
    state: ActuatorState,
}

impl ActuatorController {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            lamps: LampPolicy::new(
                NightWindow {
                    start_hour: config.night_start_hour,
                    end_hour: config.night_end_hour,
                },
                config.darkness_threshold_percent,
            ),
            buzzer: BuzzerSchedule::new(config.buzzer_window_start, config.buzzer_window_end),
            state: ActuatorState::default(),
        }
    }

    /// Compute the actuator state for this tick.
    pub fn evaluate(
        &mut self,
        clock: &ClockReading,
        sample: &SensorSample,
        silence_requested: bool,
    ) -> Decision {
        let buzzer = self.buzzer.evaluate(clock.hm(), silence_requested);
        let lamps = self.lamps.evaluate(clock.hour, sample);

        self.state = ActuatorState {
            red_on: lamps.red_on,
            yellow_on: lamps.yellow_on,
            buzzer_on: self.buzzer.is_sounding(),
        };

        Decision {
            state: self.state,
            mode: lamps.mode,
            buzzer,
        }
    }

    /// Actuator state from the most recent evaluation (all off before the first).
    pub fn state(&self) -> ActuatorState {
        self.state
    }

    pub fn buzzer(&self) -> &BuzzerSchedule {
        &self.buzzer
    }
}
