//! Hardware adapter: bridges line drivers to the domain port traits.
//!
//! Owns the [`SensorReader`], the silence button and the three switched
//! outputs, exposing them through [`SensorPort`] and [`ActuatorPort`].
//! Generic over the line types so the same adapter runs on ESP32 GPIO and
//! on the scripted doubles in [`drivers::sim`](crate::drivers::sim).

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::app::snapshot::{ActuatorState, SensorSample};
use crate::drivers::button::SilenceButton;
use crate::drivers::gpio::AnalogInput;
use crate::drivers::switch::SwitchedOutput;
use crate::error::{ActuatorError, SensorError};
use crate::sensors::SensorReader;

/// The three switched loads.
pub struct Outputs<O: OutputPin> {
    pub red: SwitchedOutput<O>,
    pub yellow: SwitchedOutput<O>,
    pub buzzer: SwitchedOutput<O>,
}

impl<O: OutputPin> Outputs<O> {
    pub fn new(red: O, yellow: O, buzzer: O) -> Self {
        Self {
            red: SwitchedOutput::new("red lamp", red),
            yellow: SwitchedOutput::new("yellow lamp", yellow),
            buzzer: SwitchedOutput::new("buzzer", buzzer),
        }
    }
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<A: AnalogInput, I: InputPin, O: OutputPin> {
    sensors: SensorReader<A, I>,
    button: SilenceButton<I>,
    outputs: Outputs<O>,
}

impl<A: AnalogInput, I: InputPin, O: OutputPin> HardwareAdapter<A, I, O> {
    pub fn new(sensors: SensorReader<A, I>, button: SilenceButton<I>, outputs: Outputs<O>) -> Self {
        Self {
            sensors,
            button,
            outputs,
        }
    }

    /// Levels last written to (red, yellow, buzzer).
    pub fn output_levels(&self) -> ActuatorState {
        ActuatorState {
            red_on: self.outputs.red.is_on(),
            yellow_on: self.outputs.yellow.is_on(),
            buzzer_on: self.outputs.buzzer.is_on(),
        }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<A: AnalogInput, I: InputPin, O: OutputPin> SensorPort for HardwareAdapter<A, I, O> {
    fn sample(&mut self) -> Result<SensorSample, SensorError> {
        self.sensors.sample()
    }

    fn silence_requested(&mut self, uptime_ms: u64) -> Result<bool, SensorError> {
        self.button.poll(uptime_ms)
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<A: AnalogInput, I: InputPin, O: OutputPin> ActuatorPort for HardwareAdapter<A, I, O> {
    fn apply(&mut self, state: &ActuatorState) -> Result<(), ActuatorError> {
        self.outputs.red.set(state.red_on)?;
        self.outputs.yellow.set(state.yellow_on)?;
        self.outputs.buzzer.set(state.buzzer_on)
    }
}
