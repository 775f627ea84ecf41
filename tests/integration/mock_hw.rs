//! Mock adapters for integration tests.
//!
//! Records every actuator command, event, display frame and telemetry
//! publish so tests can assert on the full history without real GPIO or
//! network.  Shared-state handles (`Rc<RefCell<..>>`) let a test keep a
//! handle while the control loop owns the adapter.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use smartlamp::adapters::time::SimulatedClock;
use smartlamp::app::events::AppEvent;
use smartlamp::app::ports::{
    ActuatorError, ActuatorPort, DisplayError, DisplayPort, EventSink, SensorError, SensorPort,
    TelemetryError, TelemetrySink,
};
use smartlamp::app::snapshot::{ActuatorState, SensorSample, StatusSnapshot};

// ── MockHardware ──────────────────────────────────────────────

/// Sensor/button script plus a record of every `apply` call.
pub struct MockHardware {
    pub sample: SensorSample,
    /// Per-tick button levels; `button_default` once drained.
    pub button_script: VecDeque<bool>,
    pub button_default: bool,
    pub sensor_fault: Option<SensorError>,
    pub actuator_fault: Option<ActuatorError>,
    pub applied: Vec<ActuatorState>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new(darkness_percent: u8, motion_detected: bool) -> Self {
        Self {
            sample: SensorSample {
                darkness_percent,
                motion_detected,
            },
            button_script: VecDeque::new(),
            button_default: false,
            sensor_fault: None,
            actuator_fault: None,
            applied: Vec::new(),
        }
    }

    pub fn last_applied(&self) -> Option<ActuatorState> {
        self.applied.last().copied()
    }

    pub fn press_button_next_tick(&mut self) {
        self.button_script.push_back(true);
    }
}

impl SensorPort for MockHardware {
    fn sample(&mut self) -> Result<SensorSample, SensorError> {
        match self.sensor_fault {
            Some(e) => Err(e),
            None => Ok(self.sample),
        }
    }

    fn silence_requested(&mut self, _uptime_ms: u64) -> Result<bool, SensorError> {
        Ok(self
            .button_script
            .pop_front()
            .unwrap_or(self.button_default))
    }
}

impl ActuatorPort for MockHardware {
    fn apply(&mut self, state: &ActuatorState) -> Result<(), ActuatorError> {
        if let Some(e) = self.actuator_fault {
            return Err(e);
        }
        self.applied.push(*state);
        Ok(())
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub shown: usize,
    pub fail: bool,
}

impl DisplayPort for MockDisplay {
    fn show(&mut self, _snapshot: &StatusSnapshot) -> Result<(), DisplayError> {
        if self.fail {
            return Err(DisplayError::Bus);
        }
        self.shown += 1;
        Ok(())
    }
}

// ── RecordingEvents ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingEvents {
    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── MockSink ──────────────────────────────────────────────────

#[derive(Default)]
pub struct SinkLog {
    pub published: Vec<StatusSnapshot>,
    pub attempts: usize,
}

/// Telemetry sink with scripted failure and latency.
pub struct MockSink {
    name: &'static str,
    log: Rc<RefCell<SinkLog>>,
    fail: Option<TelemetryError>,
    /// Simulated request duration, charged to this clock.
    latency: Option<(SimulatedClock, u64)>,
}

#[allow(dead_code)]
impl MockSink {
    pub fn ok(name: &'static str) -> (Self, Rc<RefCell<SinkLog>>) {
        let log = Rc::new(RefCell::new(SinkLog::default()));
        (
            Self {
                name,
                log: Rc::clone(&log),
                fail: None,
                latency: None,
            },
            log,
        )
    }

    pub fn failing(name: &'static str, error: TelemetryError) -> (Self, Rc<RefCell<SinkLog>>) {
        let (mut sink, log) = Self::ok(name);
        sink.fail = Some(error);
        (sink, log)
    }

    pub fn slow(
        name: &'static str,
        clock: SimulatedClock,
        ms: u64,
    ) -> (Self, Rc<RefCell<SinkLog>>) {
        let (mut sink, log) = Self::ok(name);
        sink.latency = Some((clock, ms));
        (sink, log)
    }
}

impl TelemetrySink for MockSink {
    fn name(&self) -> &'static str {
        self.name
    }

    fn publish(&mut self, snapshot: &StatusSnapshot) -> Result<(), TelemetryError> {
        let mut log = self.log.borrow_mut();
        log.attempts += 1;
        if let Some((clock, ms)) = &self.latency {
            clock.advance(*ms);
        }
        if let Some(e) = self.fail {
            return Err(e);
        }
        log.published.push(*snapshot);
        Ok(())
    }
}
