//! SmartLamp Firmware: Main Entry Point
//!
//! Hexagonal architecture driven by a fixed-cadence control loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter    LogEventSink   Esp32TimeAdapter  LogDisplay│
//! │  (Sensor+Actuator)  (EventSink)    (TimePort)        (Display) │
//! │  StatusStoreSink    MetricsSink    WiFi STA · SNTP             │
//! │  (TelemetrySink)    (TelemetrySink)                            │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlLoop (pure logic)                  │    │
//! │  │  ActuatorController · BuzzerSchedule · LampPolicy      │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (5 s fixed cadence)                                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result, anyhow};
use log::{error, info};

use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::prelude::Peripherals;
use esp_idf_svc::nvs::EspDefaultNvsPartition;

use smartlamp::adapters::display::LogDisplay;
use smartlamp::adapters::hardware::{HardwareAdapter, Outputs};
use smartlamp::adapters::log_sink::LogEventSink;
use smartlamp::adapters::telemetry::http::EspHttpTransport;
use smartlamp::adapters::telemetry::{MetricsSink, StatusStoreSink};
use smartlamp::adapters::time::{self, Esp32TimeAdapter};
use smartlamp::adapters::wifi;
use smartlamp::app::control_loop::ControlLoop;
use smartlamp::config::SystemConfig;
use smartlamp::drivers::button::SilenceButton;
use smartlamp::drivers::gpio::{EspAdcChannel, EspInput, EspOutput};
use smartlamp::drivers::hw_init;
use smartlamp::error::Error;
use smartlamp::pins;
use smartlamp::scheduler::{Scheduler, ThreadSleeper};
use smartlamp::sensors::SensorReader;
use smartlamp::sensors::light::LightSensor;
use smartlamp::sensors::motion::MotionSensor;

/// How long boot waits for the first SNTP sync.
const SNTP_WAIT_MS: u64 = 15_000;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SmartLamp v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    config
        .validate()
        .map_err(Error::from)
        .context("invalid configuration")?;

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals()
        .map_err(Error::from)
        .context("HAL init failed")?;

    // ── 4. Network + wall clock ───────────────────────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;
    let sys_loop = EspSystemEventLoop::take().context("system event loop")?;
    let nvs = EspDefaultNvsPartition::take().context("default NVS partition")?;

    let _wifi = wifi::connect_station(
        peripherals.modem,
        sys_loop,
        nvs,
        &config.wifi_ssid,
        &config.wifi_password,
    )
    .map_err(|e| anyhow!("WiFi: {}", e))?;

    let _sntp = match time::start_sntp(SNTP_WAIT_MS) {
        Ok(sntp) => Some(sntp),
        Err(e) => {
            error!("SNTP start failed: {:?}, running on RTC time", e);
            None
        }
    };

    // ── 5. Construct adapters ─────────────────────────────────
    let hw = HardwareAdapter::new(
        SensorReader::new(
            LightSensor::new(EspAdcChannel::new(pins::LDR_ADC_CHANNEL), config.light_full_scale),
            MotionSensor::new(EspInput::new(pins::PIR_GPIO)),
        ),
        SilenceButton::new(EspInput::new(pins::BUTTON_GPIO), config.silence_hold_ms),
        Outputs::new(
            EspOutput::new(pins::RED_LAMP_GPIO),
            EspOutput::new(pins::YELLOW_LAMP_GPIO),
            EspOutput::new(pins::BUZZER_GPIO),
        ),
    );

    let mut control = ControlLoop::new(
        &config,
        Esp32TimeAdapter::new(config.utc_offset_minutes),
        hw,
        LogDisplay::new(),
        LogEventSink::new(),
    );
    control.add_sink(Box::new(StatusStoreSink::new(
        &config.status_url,
        EspHttpTransport::new(config.http_timeout_ms),
    )));
    control.add_sink(Box::new(MetricsSink::new(
        config.metrics_url(),
        &config.metrics_token,
        EspHttpTransport::new(config.http_timeout_ms),
    )));

    // ── 6. Control loop ───────────────────────────────────────
    let mut scheduler = Scheduler::new(
        Esp32TimeAdapter::new(config.utc_offset_minutes),
        ThreadSleeper,
        u64::from(config.control_loop_interval_ms),
    );

    info!("System ready. Entering control loop.");
    let result = control.run(&mut scheduler, None);

    // Only a fatal hardware or clock error gets here.
    let e = match result {
        Ok(ticks) => anyhow!("control loop stopped after {} ticks", ticks),
        Err(e) => anyhow!("control loop failed: {}", e),
    };
    error!("{}", e);
    Err(e)
}
