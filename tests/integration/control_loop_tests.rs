//! ControlLoop integration tests.
//!
//! Drives the full tick pipeline (clock → sensors → decision → actuators →
//! snapshot → display → sinks) against the mocks in `mock_hw`, using the
//! shared `SimulatedClock` for both wall-clock and scheduler time.

use smartlamp::adapters::display::LogDisplay;
use smartlamp::adapters::hardware::{HardwareAdapter, Outputs};
use smartlamp::adapters::telemetry::http::HttpTransport;
use smartlamp::adapters::telemetry::{MetricsSink, StatusStoreSink};
use smartlamp::adapters::time::SimulatedClock;
use smartlamp::app::control_loop::ControlLoop;
use smartlamp::app::events::AppEvent;
use smartlamp::app::ports::{SensorError, TelemetryError};
use smartlamp::app::snapshot::ActuatorState;
use smartlamp::config::SystemConfig;
use smartlamp::control::buzzer::BuzzerTransition;
use smartlamp::control::lamps::LampMode;
use smartlamp::drivers::button::SilenceButton;
use smartlamp::drivers::sim::{RecordingOutput, ScriptedAnalog, ScriptedInput};
use smartlamp::error::Error;
use smartlamp::scheduler::Scheduler;
use smartlamp::sensors::SensorReader;
use smartlamp::sensors::light::LightSensor;
use smartlamp::sensors::motion::MotionSensor;

use std::cell::RefCell;
use std::rc::Rc;

use crate::mock_hw::{MockDisplay, MockHardware, MockSink, RecordingEvents};

/// Local midnight 2024-03-10 at UTC+07:00, as UTC epoch milliseconds.
const MIDNIGHT: u64 = 1_710_003_600_000;
const DAY_MS: u64 = 24 * 3_600_000;
const WIB: i32 = 7 * 60;

fn at(hour: u64, minute: u64) -> u64 {
    MIDNIGHT + (hour * 60 + minute) * 60_000
}

type TestLoop = ControlLoop<SimulatedClock, MockHardware, MockDisplay, RecordingEvents>;

fn make_loop(clock: &SimulatedClock, hw: MockHardware) -> TestLoop {
    ControlLoop::new(
        &SystemConfig::default(),
        clock.clone(),
        hw,
        MockDisplay::default(),
        RecordingEvents::default(),
    )
}

fn buzzer_events(control: &TestLoop, t: BuzzerTransition) -> usize {
    control
        .events()
        .count(|e| *e == AppEvent::Buzzer(t))
}

// ── Lamp and buzzer scenarios ─────────────────────────────────

#[test]
fn night_forces_red_regardless_of_sensors() {
    let clock = SimulatedClock::new(at(5, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(90, true));

    let snap = control.tick(0).unwrap();

    let expected = ActuatorState {
        red_on: true,
        yellow_on: false,
        buzzer_on: false,
    };
    assert_eq!(snap.actuators, expected);
    assert_eq!(control.hw().last_applied(), Some(expected));
    assert_eq!(snap.clock.hour, 5);
}

#[test]
fn day_dark_with_motion_lights_yellow() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(70, true));

    let snap = control.tick(0).unwrap();

    assert!(!snap.actuators.red_on);
    assert!(snap.actuators.yellow_on);
    assert!(!snap.actuators.buzzer_on);
}

#[test]
fn day_dark_without_motion_keeps_lamps_off() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(70, false));

    let snap = control.tick(0).unwrap();

    assert!(!snap.actuators.red_on);
    assert!(!snap.actuators.yellow_on);
}

#[test]
fn day_threshold_is_strict() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(60, true));

    assert!(!control.tick(0).unwrap().actuators.yellow_on);

    control.hw_mut().sample.darkness_percent = 61;
    assert!(control.tick(5_000).unwrap().actuators.yellow_on);
}

#[test]
fn buzzer_starts_at_window_open() {
    let clock = SimulatedClock::new(at(6, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(0, false));

    let snap = control.tick(0).unwrap();

    assert!(snap.actuators.buzzer_on);
    assert!(control.controller().buzzer().triggered_today());
    assert_eq!(buzzer_events(&control, BuzzerTransition::Started), 1);
}

#[test]
fn button_silences_buzzer_on_same_tick() {
    let clock = SimulatedClock::new(at(6, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(0, false));

    assert!(control.tick(0).unwrap().actuators.buzzer_on);

    clock.advance(5_000);
    control.hw_mut().press_button_next_tick();
    let snap = control.tick(5_000).unwrap();

    assert!(!snap.actuators.buzzer_on);
    assert!(!control.hw().last_applied().unwrap().buzzer_on);
    assert_eq!(buzzer_events(&control, BuzzerTransition::Silenced), 1);

    // Still inside the window: the latch holds, no re-trigger.
    clock.advance(5_000);
    assert!(!control.tick(10_000).unwrap().actuators.buzzer_on);
    assert_eq!(buzzer_events(&control, BuzzerTransition::Started), 1);
}

#[test]
fn latch_rearms_after_window_and_fires_next_day() {
    let clock = SimulatedClock::new(at(6, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(0, false));
    control.tick(0).unwrap();

    clock.set_epoch_millis(at(6, 16));
    let snap = control.tick(5_000).unwrap();
    assert!(!snap.actuators.buzzer_on);
    assert!(!control.controller().buzzer().triggered_today());
    assert_eq!(buzzer_events(&control, BuzzerTransition::TimedOut), 1);
    assert_eq!(buzzer_events(&control, BuzzerTransition::Rearmed), 1);

    clock.set_epoch_millis(at(6, 0) + DAY_MS);
    assert!(control.tick(10_000).unwrap().actuators.buzzer_on);
    assert_eq!(buzzer_events(&control, BuzzerTransition::Started), 2);
}

#[test]
fn button_outside_window_is_ignored() {
    let clock = SimulatedClock::new(at(12, 0), WIB);
    let mut hw = MockHardware::new(0, false);
    hw.button_default = true;
    let mut control = make_loop(&clock, hw);

    let snap = control.tick(0).unwrap();
    assert!(!snap.actuators.buzzer_on);
    assert_eq!(control.events().count(|e| matches!(e, AppEvent::Buzzer(_))), 0);
}

// ── Scheduled runs ────────────────────────────────────────────

#[test]
fn simulated_morning_sounds_once_for_the_whole_window() {
    let clock = SimulatedClock::new(at(5, 59), WIB);
    let mut control = make_loop(&clock, MockHardware::new(10, false));
    let mut scheduler = Scheduler::new(clock.clone(), clock.clone(), 5_000);

    // 05:59:00 → 06:20:00 inclusive.
    let ran = control.run(&mut scheduler, Some(253)).unwrap();
    assert_eq!(ran, 253);
    assert_eq!(scheduler.overruns(), 0);
    assert_eq!(clock.epoch_millis(), at(6, 20));

    // 06:00:00 ..= 06:15:55
    let sounding = control.hw().applied.iter().filter(|s| s.buzzer_on).count();
    assert_eq!(sounding, 16 * 12);

    assert_eq!(buzzer_events(&control, BuzzerTransition::Started), 1);
    assert_eq!(buzzer_events(&control, BuzzerTransition::TimedOut), 1);
    assert_eq!(buzzer_events(&control, BuzzerTransition::Rearmed), 1);
    assert_eq!(control.display().shown, 253);
}

#[test]
fn start_event_emitted_once() {
    let clock = SimulatedClock::new(at(12, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(0, false));
    let mut scheduler = Scheduler::new(clock.clone(), clock.clone(), 5_000);

    control.run(&mut scheduler, Some(2)).unwrap();
    control.run(&mut scheduler, Some(2)).unwrap();

    assert_eq!(
        control
            .events()
            .count(|e| matches!(e, AppEvent::Started { interval_ms: 5000 })),
        1
    );
    assert_eq!(control.tick_count(), 4);
}

#[test]
fn mode_change_reported_on_transition_only() {
    let clock = SimulatedClock::new(at(21, 59), WIB);
    let mut control = make_loop(&clock, MockHardware::new(0, false));
    let mut scheduler = Scheduler::new(clock.clone(), clock.clone(), 5_000);

    // 21:59:00 → 22:00:55
    control.run(&mut scheduler, Some(24)).unwrap();

    let modes: Vec<LampMode> = control
        .events()
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::ModeChanged(m) => Some(*m),
            _ => None,
        })
        .collect();
    assert_eq!(modes, vec![LampMode::Day, LampMode::Night]);
}

// ── Telemetry isolation ───────────────────────────────────────

#[test]
fn failing_sink_does_not_block_the_other() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(70, true));
    let (bad, bad_log) = MockSink::failing("status-store", TelemetryError::Timeout);
    let (good, good_log) = MockSink::ok("metrics");
    control.add_sink(Box::new(bad));
    control.add_sink(Box::new(good));

    let snap = control.tick(0).unwrap();

    assert_eq!(bad_log.borrow().attempts, 1);
    assert!(bad_log.borrow().published.is_empty());
    assert_eq!(good_log.borrow().published, vec![snap]);
    assert!(control.events().events.contains(&AppEvent::TelemetryFailed {
        sink: "status-store",
        error: TelemetryError::Timeout,
    }));
    assert!(
        control
            .events()
            .events
            .contains(&AppEvent::TelemetrySent { sink: "metrics" })
    );
    // Outputs were driven before telemetry ran.
    assert!(control.hw().last_applied().unwrap().yellow_on);
}

#[test]
fn slow_sink_overruns_without_replaying_ticks() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(0, false));
    let (slow, log) = MockSink::slow("status-store", clock.clone(), 7_000);
    control.add_sink(Box::new(slow));
    let mut scheduler = Scheduler::new(clock.clone(), clock.clone(), 5_000);

    let ran = control.run(&mut scheduler, Some(3)).unwrap();

    assert_eq!(ran, 3);
    assert_eq!(scheduler.overruns(), 2);
    assert_eq!(log.borrow().published.len(), 3);
    let starts: Vec<u64> = log
        .borrow()
        .published
        .iter()
        .map(|s| s.clock.epoch_millis - at(10, 0))
        .collect();
    assert_eq!(starts, vec![0, 7_000, 14_000]);
}

#[test]
fn display_failure_is_tolerated() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut control = ControlLoop::new(
        &SystemConfig::default(),
        clock.clone(),
        MockHardware::new(70, true),
        MockDisplay {
            shown: 0,
            fail: true,
        },
        RecordingEvents::default(),
    );
    let (sink, log) = MockSink::ok("metrics");
    control.add_sink(Box::new(sink));

    let snap = control.tick(0).unwrap();
    assert!(snap.actuators.yellow_on);
    assert_eq!(log.borrow().published, vec![snap]);
    assert_eq!(control.display().shown, 0);
}

#[test]
fn each_tick_reports_its_own_snapshot() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut control = make_loop(&clock, MockHardware::new(70, true));
    let (sink, log) = MockSink::ok("metrics");
    control.add_sink(Box::new(sink));

    let first = control.tick(0).unwrap();
    clock.advance(5_000);
    control.hw_mut().sample.motion_detected = false;
    let second = control.tick(5_000).unwrap();

    assert!(first.actuators.yellow_on);
    assert!(!second.actuators.yellow_on);
    assert_eq!(second.clock.epoch_millis, first.clock.epoch_millis + 5_000);
    assert_eq!(log.borrow().published, vec![first, second]);

    let reported: Vec<_> = control
        .events()
        .events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Status(s) => Some(*s),
            _ => None,
        })
        .collect();
    assert_eq!(reported, vec![first, second]);
}

// ── Fatal paths ───────────────────────────────────────────────

#[test]
fn sensor_failure_aborts_tick_before_actuation() {
    let clock = SimulatedClock::new(at(10, 0), WIB);
    let mut hw = MockHardware::new(70, true);
    hw.sensor_fault = Some(SensorError::AdcReadFailed);
    let mut control = make_loop(&clock, hw);
    let (sink, log) = MockSink::ok("metrics");
    control.add_sink(Box::new(sink));
    let mut scheduler = Scheduler::new(clock.clone(), clock.clone(), 5_000);

    let result = control.run(&mut scheduler, Some(10));

    assert_eq!(result, Err(Error::Sensor(SensorError::AdcReadFailed)));
    assert!(control.hw().applied.is_empty());
    assert_eq!(log.borrow().attempts, 0);
    assert_eq!(scheduler.ticks(), 0);
}

// ── Clock sync ────────────────────────────────────────────────

#[test]
fn unsynchronised_clock_reported_once_until_resync() {
    // Boot-relative RTC: 1970-01-01.
    let clock = SimulatedClock::new(0, WIB);
    let mut control = make_loop(&clock, MockHardware::new(0, false));
    let mut scheduler = Scheduler::new(clock.clone(), clock.clone(), 5_000);

    control.run(&mut scheduler, Some(3)).unwrap();
    assert_eq!(control.events().count(|e| *e == AppEvent::ClockUnsynchronised), 1);

    clock.set_epoch_millis(at(10, 0));
    let snap = control.tick(10_000).unwrap();
    assert!(snap.clock.is_synchronised());
    assert_eq!((snap.clock.hour, snap.clock.minute), (10, 0));
    assert_eq!(control.events().count(|e| *e == AppEvent::ClockUnsynchronised), 1);
}

// ── End to end over simulated lines and real sinks ────────────

#[derive(Default)]
struct Posted {
    requests: Vec<(String, Vec<(String, String)>, serde_json::Value)>,
}

#[derive(Clone, Default)]
struct RecordingTransport {
    posted: Rc<RefCell<Posted>>,
}

impl HttpTransport for RecordingTransport {
    fn post_json(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
        body: &[u8],
    ) -> Result<u16, TelemetryError> {
        let json = serde_json::from_slice(body).map_err(|_| TelemetryError::Encode)?;
        self.posted.borrow_mut().requests.push((
            url.to_owned(),
            headers
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            json,
        ));
        Ok(200)
    }
}

#[test]
fn end_to_end_tick_drives_lines_and_posts_both_records() {
    let clock = SimulatedClock::new(at(19, 30) + 5_000, WIB);

    // 75% dark, motion, button released (high).
    let ldr = ScriptedAnalog::new(3071);
    let pir = ScriptedInput::new(true);
    let button = ScriptedInput::new(true);
    let red = RecordingOutput::new();
    let yellow = RecordingOutput::new();
    let buzzer = RecordingOutput::new();

    let hw = HardwareAdapter::new(
        SensorReader::new(LightSensor::new(ldr, 4095), MotionSensor::new(pir)),
        SilenceButton::new(button, 0),
        Outputs::new(red.clone(), yellow.clone(), buzzer.clone()),
    );
    let mut control = ControlLoop::new(
        &SystemConfig::default(),
        clock.clone(),
        hw,
        LogDisplay::new(),
        RecordingEvents::default(),
    );

    let transport = RecordingTransport::default();
    control.add_sink(Box::new(StatusStoreSink::new(
        "http://status.local/sensor1",
        transport.clone(),
    )));
    control.add_sink(Box::new(MetricsSink::new(
        "http://metrics.local/api/devices/bedroom".to_owned(),
        "tok",
        transport.clone(),
    )));

    let snap = control.tick(0).unwrap();

    assert_eq!(snap.sensors.darkness_percent, 75);
    assert!(!red.is_on());
    assert!(yellow.is_on());
    assert!(!buzzer.is_on());

    let frame = control.display().last_frame().unwrap();
    assert!(frame.lines.iter().any(|l| l.contains("19:30:05")));

    let posted = transport.posted.borrow();
    assert_eq!(posted.requests.len(), 2);

    let (url, _, status) = &posted.requests[0];
    assert_eq!(url, "http://status.local/sensor1");
    assert_eq!(
        status["status"],
        "[Tanggal] 10/03/2024 | [Jam] 19:30:05 [Gelap]: 75% | [Motion]: YES [Merah]: OFF | [Kuning]: ON"
    );
    assert_eq!(status["timestamp"], "2024-03-10 19:30:05");

    let (url, headers, metrics) = &posted.requests[1];
    assert_eq!(url, "http://metrics.local/api/devices/bedroom");
    assert!(headers.contains(&("X-Auth-Token".to_owned(), "tok".to_owned())));
    assert_eq!(metrics["ldr_percentage"], 75.0);
    assert_eq!(metrics["motion_detected"], 1);
    assert_eq!(metrics["lampu_merah"], 0);
    assert_eq!(metrics["lampu_kuning"], 1);
    assert_eq!(metrics["timestamp"], at(19, 30) + 5_000);
}
