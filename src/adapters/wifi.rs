//! WiFi station-mode bring-up.
//!
//! Both telemetry sinks need the station link; the control loop itself does
//! not.  Connection happens once at boot and failure is fatal there (the
//! device resets and tries again).
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: real ESP-IDF WiFi driver via `esp_idf_svc::wifi`.
//! - **all targets**: credential validation and the retry backoff schedule.
//!
//! ## Retry policy
//!
//! Up to [`CONNECT_ATTEMPTS`] tries with exponential backoff
//! (2 s → 4 s → 8 s … capped at 60 s).

use core::fmt;

#[cfg(target_os = "espidf")]
use log::{info, warn};

// ───────────────────────────────────────────────────────────────
// Errors
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    NoCredentials,
    InvalidSsid,
    InvalidPassword,
    DriverInit,
    ConnectionFailed,
}

impl fmt::Display for ConnectivityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCredentials => write!(f, "no WiFi credentials configured"),
            Self::InvalidSsid => write!(f, "SSID invalid (must be 1-32 printable ASCII bytes)"),
            Self::InvalidPassword => {
                write!(f, "password invalid (must be 8-64 bytes for WPA2, or empty for open)")
            }
            Self::DriverInit => write!(f, "WiFi driver initialisation failed"),
            Self::ConnectionFailed => write!(f, "WiFi connection failed"),
        }
    }
}

impl core::error::Error for ConnectivityError {}

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

pub const CONNECT_ATTEMPTS: u32 = 5;
const INITIAL_BACKOFF_MS: u64 = 2_000;
const MAX_BACKOFF_MS: u64 = 60_000;

fn is_printable_ascii(s: &str) -> bool {
    s.bytes().all(|b| (0x20..=0x7E).contains(&b))
}

fn validate_ssid(ssid: &str) -> Result<(), ConnectivityError> {
    if ssid.len() > 32 || !is_printable_ascii(ssid) {
        return Err(ConnectivityError::InvalidSsid);
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ConnectivityError> {
    if password.is_empty() {
        return Ok(());
    }
    if password.len() < 8 || password.len() > 64 {
        return Err(ConnectivityError::InvalidPassword);
    }
    Ok(())
}

/// Check credentials before touching the radio.
pub fn validate_credentials(ssid: &str, password: &str) -> Result<(), ConnectivityError> {
    if ssid.is_empty() {
        return Err(ConnectivityError::NoCredentials);
    }
    validate_ssid(ssid)?;
    validate_password(password)
}

/// Delay before retry number `attempt` (0-based).
pub fn backoff_ms(attempt: u32) -> u64 {
    INITIAL_BACKOFF_MS
        .saturating_mul(1u64 << attempt.min(16))
        .min(MAX_BACKOFF_MS)
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF station
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub type Station = esp_idf_svc::wifi::BlockingWifi<esp_idf_svc::wifi::EspWifi<'static>>;

/// Associate with the configured AP and wait for an IP.  The returned
/// driver must be kept alive for the link to stay up.
#[cfg(target_os = "espidf")]
pub fn connect_station(
    modem: esp_idf_svc::hal::modem::Modem,
    sys_loop: esp_idf_svc::eventloop::EspSystemEventLoop,
    nvs: esp_idf_svc::nvs::EspDefaultNvsPartition,
    ssid: &str,
    password: &str,
) -> Result<Station, ConnectivityError> {
    use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
    use esp_idf_svc::wifi::{BlockingWifi, EspWifi};

    validate_credentials(ssid, password)?;

    let driver = EspWifi::new(modem, sys_loop.clone(), Some(nvs)).map_err(|e| {
        warn!("WiFi: driver init failed: {:?}", e);
        ConnectivityError::DriverInit
    })?;
    let mut wifi = BlockingWifi::wrap(driver, sys_loop).map_err(|e| {
        warn!("WiFi: event loop wrap failed: {:?}", e);
        ConnectivityError::DriverInit
    })?;

    let auth_method = if password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };
    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: ssid.try_into().map_err(|_| ConnectivityError::InvalidSsid)?,
        password: password
            .try_into()
            .map_err(|_| ConnectivityError::InvalidPassword)?,
        auth_method,
        ..Default::default()
    }))
    .map_err(|_| ConnectivityError::DriverInit)?;
    wifi.start().map_err(|_| ConnectivityError::DriverInit)?;
    info!("WiFi: connecting to '{}'", ssid);

    for attempt in 0..CONNECT_ATTEMPTS {
        match wifi.connect().and_then(|()| wifi.wait_netif_up()) {
            Ok(()) => {
                match wifi.wifi().sta_netif().get_ip_info() {
                    Ok(ip) => info!("WiFi: connected, ip={}", ip.ip),
                    Err(_) => info!("WiFi: connected"),
                }
                return Ok(wifi);
            }
            Err(e) => {
                let delay = backoff_ms(attempt);
                warn!(
                    "WiFi: attempt {}/{} failed ({:?}), retrying in {} ms",
                    attempt + 1,
                    CONNECT_ATTEMPTS,
                    e,
                    delay
                );
                let _ = wifi.disconnect();
                std::thread::sleep(std::time::Duration::from_millis(delay));
            }
        }
    }
    Err(ConnectivityError::ConnectionFailed)
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────
