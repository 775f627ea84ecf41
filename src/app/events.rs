//! Outbound application events.
//!
//! The [`ControlLoop`](super::control_loop::ControlLoop) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::control::buzzer::BuzzerTransition;
use crate::control::lamps::LampMode;
use crate::error::TelemetryError;

use super::snapshot::StatusSnapshot;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The control loop has started.
    Started { interval_ms: u32 },

    /// Night/day lamp mode flipped (also emitted for the first tick).
    ModeChanged(LampMode),

    /// Red or yellow lamp output changed.
    LampsChanged { red: bool, yellow: bool },

    /// Buzzer schedule edge.
    Buzzer(BuzzerTransition),

    /// Per-tick status snapshot.
    Status(StatusSnapshot),

    /// A telemetry sink accepted the snapshot.
    TelemetrySent { sink: &'static str },

    /// A telemetry sink failed; the snapshot was dropped for that sink.
    TelemetryFailed {
        sink: &'static str,
        error: TelemetryError,
    },

    /// Wall clock still reads before 2020 (SNTP not yet synced).
    ClockUnsynchronised,
}
