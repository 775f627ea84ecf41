//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop (domain)
//! ```
//!
//! Driven adapters (clock, sensors, actuators, display, telemetry, event
//! sinks) implement these traits.  The [`ControlLoop`](super::control_loop::ControlLoop)
//! consumes them via generics (or trait objects for the sink list), so the
//! domain core never touches hardware or the network directly.
//!
//! ## Failure contract
//!
//! - **TimePort**, **SensorPort** and **ActuatorPort** errors are fatal to
//!   the loop.
//! - **DisplayPort** and **TelemetrySink** errors are reported and dropped.

use super::events::AppEvent;
use super::snapshot::{ActuatorState, ClockReading, SensorSample, StatusSnapshot};

pub use crate::error::{ActuatorError, ClockError, SensorError, TelemetryError};

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: wall clock → domain)
// ───────────────────────────────────────────────────────────────

/// Wall-clock source, assumed synchronised externally (SNTP).
pub trait TimePort {
    /// Current local calendar reading plus raw UTC epoch milliseconds.
    ///
    /// An unsynchronised clock still yields a reading (counting from
    /// 1970); only unrepresentable timestamps are errors.
    fn now(&mut self) -> Result<ClockReading, ClockError>;
}

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Darkness percentage and motion flag for this tick.
    fn sample(&mut self) -> Result<SensorSample, SensorError>;

    /// Whether the silence button counts as pressed at `uptime_ms`.
    fn silence_requested(&mut self, uptime_ms: u64) -> Result<bool, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain calls this to drive the lamps and buzzer.
pub trait ActuatorPort {
    /// Drive every output line to match `state`.
    fn apply(&mut self, state: &ActuatorState) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Display port (best effort)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    fn show(&mut self, snapshot: &StatusSnapshot) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Telemetry sink port (best effort)
// ───────────────────────────────────────────────────────────────

/// One remote telemetry destination.  Each sink derives its own payload
/// from the snapshot and reports success or failure independently.
pub trait TelemetrySink {
    /// Short tag used in logs and events.
    fn name(&self) -> &'static str;

    fn publish(&mut self, snapshot: &StatusSnapshot) -> Result<(), TelemetryError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.  Adapters
/// decide where they go (serial log, test recorder, ...).
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Configuration validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

/// Errors from [`DisplayPort`] implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Panel did not acknowledge on the bus.
    Bus,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus => write!(f, "display bus error"),
        }
    }
}
