//! PIR motion sensor: HIGH while motion is detected.

use embedded_hal::digital::InputPin;

use crate::error::SensorError;

pub struct MotionSensor<P: InputPin> {
    pin: P,
}

impl<P: InputPin> MotionSensor<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn detected(&mut self) -> Result<bool, SensorError> {
        self.pin.is_high().map_err(|_| SensorError::GpioReadFailed)
    }
}
