//! Control loop: the hexagonal core.
//!
//! [`ControlLoop`] owns the decision engine and every collaborator.  Each
//! tick runs strictly in order:
//!
//! ```text
//!  TimePort ──┐                                          ┌──▶ DisplayPort
//!             ├──▶ ActuatorController ──▶ ActuatorPort   ├──▶ TelemetrySink A
//! SensorPort ─┘        (buzzer, lamps)       │           └──▶ TelemetrySink B
//!                                            ▼                 (best effort)
//!                                      StatusSnapshot ──▶ EventSink
//! ```
//!
//! Clock, sensor and actuator failures abort the tick and propagate.
//! Display and telemetry failures are logged, emitted as events and
//! otherwise ignored: they never alter actuator state or stop the loop.

use log::{info, warn};

use crate::config::SystemConfig;
use crate::control::ActuatorController;
use crate::control::lamps::LampMode;
use crate::error::Result;
use crate::scheduler::{MonotonicClock, Scheduler, Sleeper};

use super::events::AppEvent;
use super::ports::{ActuatorPort, DisplayPort, EventSink, SensorPort, TelemetrySink, TimePort};
use super::snapshot::StatusSnapshot;

// ───────────────────────────────────────────────────────────────
// ControlLoop
// ───────────────────────────────────────────────────────────────

pub struct ControlLoop<T, H, D, E>
where
    T: TimePort,
    H: SensorPort + ActuatorPort,
    D: DisplayPort,
    E: EventSink,
{
    time: T,
    hw: H,
    display: D,
    events: E,
    sinks: Vec<Box<dyn TelemetrySink>>,
    controller: ActuatorController,
    interval_ms: u32,
    started: bool,
    tick_count: u64,
    last_mode: Option<LampMode>,
    last_lamps: Option<(bool, bool)>,
    clock_warned: bool,
}

impl<T, H, D, E> ControlLoop<T, H, D, E>
where
    T: TimePort,
    H: SensorPort + ActuatorPort,
    D: DisplayPort,
    E: EventSink,
{
    /// `config` must already have passed [`SystemConfig::validate`].
    pub fn new(config: &SystemConfig, time: T, hw: H, display: D, events: E) -> Self {
        Self {
            time,
            hw,
            display,
            events,
            sinks: Vec::new(),
            controller: ActuatorController::new(config),
            interval_ms: config.control_loop_interval_ms,
            started: false,
            tick_count: 0,
            last_mode: None,
            last_lamps: None,
            clock_warned: false,
        }
    }

    /// Register a telemetry sink.  Sinks are dispatched in registration order.
    pub fn add_sink(&mut self, sink: Box<dyn TelemetrySink>) {
        info!("ControlLoop: registered sink '{}'", sink.name());
        self.sinks.push(sink);
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        info!(
            "ControlLoop started: interval={} ms, sinks={}",
            self.interval_ms,
            self.sinks.len()
        );
        self.events.emit(&AppEvent::Started {
            interval_ms: self.interval_ms,
        });
    }

    /// Drive the loop on `scheduler` until a fatal error or `limit` ticks.
    pub fn run<C, S>(&mut self, scheduler: &mut Scheduler<C, S>, limit: Option<u64>) -> Result<u64>
    where
        C: MonotonicClock,
        S: Sleeper,
    {
        self.start();
        scheduler.run(limit, |uptime_ms| self.tick(uptime_ms).map(|_| ()))
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle at monotonic time `uptime_ms`.
    pub fn tick(&mut self, uptime_ms: u64) -> Result<StatusSnapshot> {
        self.tick_count += 1;

        // 1. Clock
        let clock = self.time.now()?;
        if clock.is_synchronised() {
            self.clock_warned = false;
        } else if !self.clock_warned {
            warn!("Wall clock not synchronised, running on boot-relative time");
            self.clock_warned = true;
            self.events.emit(&AppEvent::ClockUnsynchronised);
        }

        // 2. Sensors and button
        let sample = self.hw.sample()?;
        let silence = self.hw.silence_requested(uptime_ms)?;

        // 3–4. Buzzer rule, then lamp rule
        let decision = self.controller.evaluate(&clock, &sample, silence);

        // Drive the outputs before reporting anything.
        self.hw.apply(&decision.state)?;

        for transition in &decision.buzzer {
            self.events.emit(&AppEvent::Buzzer(*transition));
        }
        if self.last_mode != Some(decision.mode) {
            self.last_mode = Some(decision.mode);
            self.events.emit(&AppEvent::ModeChanged(decision.mode));
        }
        let lamps = (decision.state.red_on, decision.state.yellow_on);
        if self.last_lamps != Some(lamps) {
            self.last_lamps = Some(lamps);
            self.events.emit(&AppEvent::LampsChanged {
                red: lamps.0,
                yellow: lamps.1,
            });
        }

        // 5. Snapshot
        let snapshot = StatusSnapshot::new(clock, sample, decision.state);
        self.events.emit(&AppEvent::Status(snapshot));

        // 6. Display (best effort)
        if let Err(e) = self.display.show(&snapshot) {
            warn!("Display update failed: {}", e);
        }

        // 7. Telemetry (best effort, each sink independent)
        for sink in &mut self.sinks {
            match sink.publish(&snapshot) {
                Ok(()) => self.events.emit(&AppEvent::TelemetrySent { sink: sink.name() }),
                Err(error) => {
                    warn!("Telemetry sink '{}' failed: {}", sink.name(), error);
                    self.events.emit(&AppEvent::TelemetryFailed {
                        sink: sink.name(),
                        error,
                    });
                }
            }
        }

        Ok(snapshot)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn controller(&self) -> &ActuatorController {
        &self.controller
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    pub fn hw(&self) -> &H {
        &self.hw
    }

    pub fn hw_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    pub fn time_mut(&mut self) -> &mut T {
        &mut self.time
    }
}
