//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (UART in production, stderr on host).

use log::{info, warn};

use crate::adapters::telemetry::status_store::status_line;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::control::buzzer::BuzzerTransition;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { interval_ms } => {
                info!("START | interval={}ms", interval_ms);
            }
            AppEvent::ModeChanged(mode) => {
                info!("LAMP | mode={:?}", mode);
            }
            AppEvent::LampsChanged { red, yellow } => {
                info!(
                    "LAMP | red={} yellow={}",
                    if *red { "ON" } else { "OFF" },
                    if *yellow { "ON" } else { "OFF" }
                );
            }
            AppEvent::Buzzer(t) => {
                let what = match t {
                    BuzzerTransition::Started => "sounding",
                    BuzzerTransition::Silenced => "silenced by button",
                    BuzzerTransition::TimedOut => "window closed",
                    BuzzerTransition::Rearmed => "re-armed for tomorrow",
                };
                info!("BUZZER | {}", what);
            }
            AppEvent::Status(s) => {
                info!("STATUS | {}", status_line(s));
            }
            AppEvent::TelemetrySent { sink } => {
                info!("TELEM | {} ok", sink);
            }
            AppEvent::TelemetryFailed { sink, error } => {
                warn!("TELEM | {} failed: {}", sink, error);
            }
            AppEvent::ClockUnsynchronised => {
                warn!("START | wall clock not synchronised");
            }
        }
    }
}
