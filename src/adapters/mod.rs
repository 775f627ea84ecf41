//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements              | Connects to                 |
//! |-------------|-------------------------|-----------------------------|
//! | `display`   | DisplayPort             | Status panel / serial       |
//! | `hardware`  | SensorPort              | ESP32 ADC, GPIO             |
//! |             | ActuatorPort            | ESP32 GPIO                  |
//! | `log_sink`  | EventSink               | Serial log output           |
//! | `telemetry` | TelemetrySink           | HTTP status store, metrics  |
//! | `time`      | TimePort                | System RTC (SNTP-synced)    |
//! |             | MonotonicClock, Sleeper | Uptime timer / simulation   |
//! | `wifi`      | -                       | ESP-IDF WiFi STA            |

pub mod display;
pub mod hardware;
pub mod log_sink;
pub mod telemetry;
pub mod time;
pub mod wifi;
