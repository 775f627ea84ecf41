//! Scripted line doubles for host builds and tests.
//!
//! Each double is a cheap handle over shared state (`Rc<RefCell<..>>`), so a
//! test can keep one clone to script or inspect while the control loop owns
//! the other.
//!
//! - [`ScriptedInput`] / [`ScriptedAnalog`]: replay a queue of levels,
//!   repeating the last value once the queue drains.
//! - [`RecordingOutput`]: remembers every level it was driven to.

use core::cell::RefCell;
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use super::gpio::AnalogInput;
use crate::error::SensorError;

// ───────────────────────────────────────────────────────────────
// Scripted queue shared by both input doubles
// ───────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Script<T: Copy> {
    queue: VecDeque<T>,
    current: T,
}

impl<T: Copy> Script<T> {
    fn next(&mut self) -> T {
        if let Some(v) = self.queue.pop_front() {
            self.current = v;
        }
        self.current
    }
}

// ───────────────────────────────────────────────────────────────
// Digital input
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ScriptedInput {
    script: Rc<RefCell<Script<bool>>>,
}

impl ScriptedInput {
    pub fn new(initial: bool) -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                queue: VecDeque::new(),
                current: initial,
            })),
        }
    }

    /// Hold `level` from the next read onwards.
    pub fn set(&self, level: bool) {
        let mut s = self.script.borrow_mut();
        s.queue.clear();
        s.current = level;
    }

    /// Queue levels for the next reads, one per read.
    pub fn push(&self, levels: &[bool]) {
        self.script.borrow_mut().queue.extend(levels.iter().copied());
    }
}

impl ErrorType for ScriptedInput {
    type Error = Infallible;
}

impl InputPin for ScriptedInput {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.script.borrow_mut().next())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.script.borrow_mut().next())
    }
}

// ───────────────────────────────────────────────────────────────
// Analog input
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct ScriptedAnalog {
    script: Rc<RefCell<Script<Option<u16>>>>,
}

impl ScriptedAnalog {
    pub fn new(initial: u16) -> Self {
        Self {
            script: Rc::new(RefCell::new(Script {
                queue: VecDeque::new(),
                current: Some(initial),
            })),
        }
    }

    pub fn set(&self, raw: u16) {
        let mut s = self.script.borrow_mut();
        s.queue.clear();
        s.current = Some(raw);
    }

    pub fn push(&self, raws: &[u16]) {
        self.script
            .borrow_mut()
            .queue
            .extend(raws.iter().copied().map(Some));
    }

    /// Make every subsequent read fail like a dead ADC driver.
    pub fn fail(&self) {
        let mut s = self.script.borrow_mut();
        s.queue.clear();
        s.current = None;
    }
}

impl AnalogInput for ScriptedAnalog {
    fn read_raw(&mut self) -> Result<u16, SensorError> {
        self.script
            .borrow_mut()
            .next()
            .ok_or(SensorError::AdcReadFailed)
    }
}

// ───────────────────────────────────────────────────────────────
// Digital output
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct RecordingOutput {
    history: Rc<RefCell<Vec<bool>>>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last driven level (`false` if never driven).
    pub fn is_on(&self) -> bool {
        self.history.borrow().last().copied().unwrap_or(false)
    }

    pub fn history(&self) -> Vec<bool> {
        self.history.borrow().clone()
    }
}

impl ErrorType for RecordingOutput {
    type Error = Infallible;
}

impl OutputPin for RecordingOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.history.borrow_mut().push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.history.borrow_mut().push(true);
        Ok(())
    }
}
