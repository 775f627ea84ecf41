//! System configuration parameters
//!
//! All tunable parameters for the SmartLamp controller.  Defaults match the
//! deployed bedroom unit; network credentials and sink endpoints can be
//! overridden at build time through `SMARTLAMP_*` environment variables.

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::control::buzzer::HourMinute;
use crate::pins;

/// Largest accepted wall-clock offset from UTC (UTC±14:00).
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Timing ---
    /// Control loop period (milliseconds)
    pub control_loop_interval_ms: u32,
    /// Local wall-clock offset from UTC (minutes, east positive)
    pub utc_offset_minutes: i32,

    // --- Lamps ---
    /// First hour of night mode (red lamp forced on)
    pub night_start_hour: u8,
    /// First hour of day mode
    pub night_end_hour: u8,
    /// Darkness (0-100%) that must be exceeded before the yellow lamp may light
    pub darkness_threshold_percent: u8,
    /// Raw ADC reading that maps to 100% darkness
    pub light_full_scale: u16,

    // --- Wake buzzer ---
    /// First minute of the daily buzzer window (inclusive)
    pub buzzer_window_start: HourMinute,
    /// Last minute of the daily buzzer window (inclusive)
    pub buzzer_window_end: HourMinute,
    /// How long the button must be held to silence the buzzer (0 = one sample)
    pub silence_hold_ms: u32,

    // --- Network ---
    pub wifi_ssid: heapless::String<32>,
    pub wifi_password: heapless::String<64>,
    /// Full URL of the status store (`POST /sensor1`)
    pub status_url: heapless::String<128>,
    /// Base URL of the metrics service; the device label is appended
    pub metrics_base_url: heapless::String<128>,
    /// Device label on the metrics service
    pub metrics_device_label: heapless::String<32>,
    /// Static `X-Auth-Token` for the metrics service (empty = sink disabled)
    pub metrics_token: heapless::String<64>,
    /// Per-request HTTP timeout (milliseconds)
    pub http_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Timing
            control_loop_interval_ms: 5000, // 0.2 Hz
            utc_offset_minutes: 7 * 60,     // WIB

            // Lamps
            night_start_hour: 22,
            night_end_hour: 6,
            darkness_threshold_percent: 60,
            light_full_scale: pins::ADC_FULL_SCALE,

            // Wake buzzer
            buzzer_window_start: HourMinute::new(6, 0),
            buzzer_window_end: HourMinute::new(6, 15),
            silence_hold_ms: 0,

            // Network
            wifi_ssid: bounded(option_env!("SMARTLAMP_WIFI_SSID").unwrap_or("")),
            wifi_password: bounded(option_env!("SMARTLAMP_WIFI_PASSWORD").unwrap_or("")),
            status_url: bounded(
                option_env!("SMARTLAMP_STATUS_URL").unwrap_or("http://192.168.100.61:5000/sensor1"),
            ),
            metrics_base_url: bounded(
                option_env!("SMARTLAMP_METRICS_URL")
                    .unwrap_or("http://industrial.api.ubidots.com/api/v1.6/devices"),
            ),
            metrics_device_label: bounded("iot_isfamily"),
            metrics_token: bounded(option_env!("SMARTLAMP_METRICS_TOKEN").unwrap_or("")),
            http_timeout_ms: 3000,
        }
    }
}

impl SystemConfig {
    /// Reject out-of-range values instead of silently clamping them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control_loop_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("control_loop_interval_ms must be > 0"));
        }
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::ValidationFailed("utc_offset_minutes outside UTC±14:00"));
        }
        if self.night_start_hour > 23 || self.night_end_hour > 23 {
            return Err(ConfigError::ValidationFailed("night hours must be 0-23"));
        }
        if self.night_start_hour == self.night_end_hour {
            return Err(ConfigError::ValidationFailed("night window must not be empty"));
        }
        if self.darkness_threshold_percent > 100 {
            return Err(ConfigError::ValidationFailed("darkness_threshold_percent must be 0-100"));
        }
        if self.light_full_scale == 0 {
            return Err(ConfigError::ValidationFailed("light_full_scale must be > 0"));
        }
        if !self.buzzer_window_start.is_valid() || !self.buzzer_window_end.is_valid() {
            return Err(ConfigError::ValidationFailed("buzzer window bounds must be valid times"));
        }
        if self.buzzer_window_start > self.buzzer_window_end {
            return Err(ConfigError::ValidationFailed("buzzer window must not wrap midnight"));
        }
        if self.http_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("http_timeout_ms must be > 0"));
        }
        Ok(())
    }

    /// Metrics endpoint for this device: `<base>/<label>`.
    pub fn metrics_url(&self) -> String {
        format!(
            "{}/{}",
            self.metrics_base_url.trim_end_matches('/'),
            self.metrics_device_label
        )
    }
}

/// Copy `s` into a fixed-capacity string, truncating at capacity.
fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
