//! Sensor subsystem: individual drivers and the aggregating [`SensorReader`].
//!
//! The reader owns both sensor drivers and produces a [`SensorSample`]
//! each tick.

pub mod light;
pub mod motion;

use embedded_hal::digital::InputPin;

use crate::app::snapshot::SensorSample;
use crate::drivers::gpio::AnalogInput;
use crate::error::SensorError;
use light::LightSensor;
use motion::MotionSensor;

pub struct SensorReader<A: AnalogInput, P: InputPin> {
    pub light: LightSensor<A>,
    pub motion: MotionSensor<P>,
}

impl<A: AnalogInput, P: InputPin> SensorReader<A, P> {
    pub fn new(light: LightSensor<A>, motion: MotionSensor<P>) -> Self {
        Self { light, motion }
    }

    /// Read both sensors.  Any driver failure aborts the sample.
    pub fn sample(&mut self) -> Result<SensorSample, SensorError> {
        let light = self.light.read()?;
        let motion_detected = self.motion.detected()?;
        Ok(SensorSample {
            darkness_percent: light.darkness_percent,
            motion_detected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::sim::{ScriptedAnalog, ScriptedInput};

    #[test]
    fn combines_both_sensors() {
        let adc = ScriptedAnalog::new(3071);
        let pir = ScriptedInput::new(true);
        let mut reader = SensorReader::new(LightSensor::new(adc, 4095), MotionSensor::new(pir));
        assert_eq!(
            reader.sample(),
            Ok(SensorSample {
                darkness_percent: 75,
                motion_detected: true
            })
        );
    }
}
