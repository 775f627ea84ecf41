//! Sink A: free-form status store.
//!
//! ```text
//! POST <status_url>
//! Content-Type: application/json
//!
//! {"status": "<status line>", "timestamp": "YYYY-MM-DD HH:MM:SS"}
//! ```
//!
//! The timestamp is local wall-clock time as a string.  The same status
//! line is printed to the serial log every tick.

use serde::Serialize;

use super::http::{HttpTransport, check_status};
use crate::app::ports::TelemetrySink;
use crate::app::snapshot::StatusSnapshot;
use crate::error::TelemetryError;

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}

/// Single-line human-readable status.
pub fn status_line(s: &StatusSnapshot) -> String {
    format!(
        "[Tanggal] {} | [Jam] {} [Gelap]: {}% | [Motion]: {} [Merah]: {} | [Kuning]: {}",
        s.clock.date_dmy(),
        s.clock.time_hms(),
        s.sensors.darkness_percent,
        if s.sensors.motion_detected { "YES" } else { "NO" },
        on_off(s.actuators.red_on),
        on_off(s.actuators.yellow_on),
    )
}

#[derive(Debug, Serialize)]
pub struct StatusRecord {
    pub status: String,
    pub timestamp: String,
}

impl StatusRecord {
    pub fn from_snapshot(s: &StatusSnapshot) -> Self {
        Self {
            status: status_line(s),
            timestamp: s.clock.timestamp(),
        }
    }
}

pub struct StatusStoreSink<T: HttpTransport> {
    url: String,
    transport: T,
}

impl<T: HttpTransport> StatusStoreSink<T> {
    pub fn new(url: &str, transport: T) -> Self {
        Self {
            url: url.to_owned(),
            transport,
        }
    }
}

impl<T: HttpTransport> TelemetrySink for StatusStoreSink<T> {
    fn name(&self) -> &'static str {
        "status-store"
    }

    fn publish(&mut self, snapshot: &StatusSnapshot) -> Result<(), TelemetryError> {
        if self.url.is_empty() {
            return Err(TelemetryError::NotConfigured);
        }
        let body = serde_json::to_vec(&StatusRecord::from_snapshot(snapshot))
            .map_err(|_| TelemetryError::Encode)?;
        let status = self.transport.post_json(&self.url, &[], &body)?;
        check_status(status)
    }
}
