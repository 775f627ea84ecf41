//! Sink B: epoch-timestamped metrics service.
//!
//! ```text
//! POST <metrics_base_url>/<device_label>
//! X-Auth-Token: <token>
//! Content-Type: application/json
//!
//! {"ldr_percentage": 75.0, "motion_detected": 1, "lampu_merah": 0,
//!  "lampu_kuning": 1, "timestamp": 1710000000000}
//! ```
//!
//! Booleans travel as 0/1 and the timestamp is UTC epoch milliseconds.
//! An empty token disables the sink.

use serde::Serialize;

use super::http::{HttpTransport, check_status};
use crate::app::ports::TelemetrySink;
use crate::app::snapshot::StatusSnapshot;
use crate::error::TelemetryError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsRecord {
    pub ldr_percentage: f32,
    pub motion_detected: u8,
    pub lampu_merah: u8,
    pub lampu_kuning: u8,
    pub timestamp: u64,
}

impl MetricsRecord {
    pub fn from_snapshot(s: &StatusSnapshot) -> Self {
        Self {
            ldr_percentage: f32::from(s.sensors.darkness_percent),
            motion_detected: u8::from(s.sensors.motion_detected),
            lampu_merah: u8::from(s.actuators.red_on),
            lampu_kuning: u8::from(s.actuators.yellow_on),
            timestamp: s.clock.epoch_millis,
        }
    }
}

pub struct MetricsSink<T: HttpTransport> {
    url: String,
    token: String,
    transport: T,
}

impl<T: HttpTransport> MetricsSink<T> {
    pub fn new(url: String, token: &str, transport: T) -> Self {
        Self {
            url,
            token: token.to_owned(),
            transport,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.url.is_empty()
    }
}

impl<T: HttpTransport> TelemetrySink for MetricsSink<T> {
    fn name(&self) -> &'static str {
        "metrics"
    }

    fn publish(&mut self, snapshot: &StatusSnapshot) -> Result<(), TelemetryError> {
        if !self.is_configured() {
            return Err(TelemetryError::NotConfigured);
        }
        let body = serde_json::to_vec(&MetricsRecord::from_snapshot(snapshot))
            .map_err(|_| TelemetryError::Encode)?;
        let status = self.transport.post_json(
            &self.url,
            &[("X-Auth-Token", self.token.as_str())],
            &body,
        )?;
        check_status(status)
    }
}
