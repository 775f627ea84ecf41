//! Time adapters.
//!
//! - [`Esp32TimeAdapter`]: wall clock from the system RTC (kept in sync by
//!   SNTP) plus a monotonic uptime clock for the scheduler.
//!   - **`target_os = "espidf"`**: uptime from `esp_timer_get_time()`.
//!   - **`not(target_os = "espidf")`**: uptime from `std::time::Instant`.
//! - [`SimulatedClock`]: shared, manually advanced clock for host tests.
//!   Sleeping on it advances time instantly.

use core::cell::Cell;
use std::rc::Rc;

use crate::app::ports::TimePort;
use crate::app::snapshot::ClockReading;
use crate::error::ClockError;
use crate::scheduler::{MonotonicClock, Sleeper};

// ───────────────────────────────────────────────────────────────
// ESP32 (and host std) clock
// ───────────────────────────────────────────────────────────────

pub struct Esp32TimeAdapter {
    utc_offset_minutes: i32,
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Esp32TimeAdapter {
    pub fn new(utc_offset_minutes: i32) -> Self {
        Self {
            utc_offset_minutes,
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }

    /// Milliseconds since the Unix epoch; 0 if the RTC reads before 1970.
    pub fn epoch_millis(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_ms(&self) -> u64 {
        // SAFETY: esp_timer_get_time reads a free-running 64-bit counter.
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl TimePort for Esp32TimeAdapter {
    fn now(&mut self) -> Result<ClockReading, ClockError> {
        ClockReading::from_epoch_millis(self.epoch_millis(), self.utc_offset_minutes)
    }
}

impl MonotonicClock for Esp32TimeAdapter {
    fn now_ms(&self) -> u64 {
        self.uptime_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// SNTP
// ───────────────────────────────────────────────────────────────

/// Start SNTP against `pool.ntp.org` and wait up to `wait_ms` for the first
/// sync.  A timeout is logged and tolerated; the returned handle keeps the
/// service running in the background.
#[cfg(target_os = "espidf")]
pub fn start_sntp(
    wait_ms: u64,
) -> Result<esp_idf_svc::sntp::EspSntp<'static>, esp_idf_svc::sys::EspError> {
    use esp_idf_svc::sntp::{EspSntp, SyncStatus};
    use log::{info, warn};

    let sntp = EspSntp::new_default()?;
    info!("SNTP: started, waiting up to {} ms for sync", wait_ms);

    let started = std::time::Instant::now();
    while sntp.get_sync_status() != SyncStatus::Completed {
        if started.elapsed().as_millis() as u64 >= wait_ms {
            warn!("SNTP: no sync after {} ms, continuing with RTC time", wait_ms);
            return Ok(sntp);
        }
        std::thread::sleep(std::time::Duration::from_millis(200));
    }
    info!("SNTP: synchronised");
    Ok(sntp)
}

// ───────────────────────────────────────────────────────────────
// Simulated clock
// ───────────────────────────────────────────────────────────────

/// Cloneable handle over one shared simulated timeline.
///
/// Wall clock = `epoch_base_ms + uptime`, so advancing the monotonic clock
/// (directly or by sleeping) moves the calendar reading too.
#[derive(Debug, Clone)]
pub struct SimulatedClock {
    uptime_ms: Rc<Cell<u64>>,
    epoch_base_ms: Rc<Cell<u64>>,
    utc_offset_minutes: i32,
}

impl SimulatedClock {
    /// Start at uptime 0 with the wall clock at `epoch_base_ms` (UTC).
    pub fn new(epoch_base_ms: u64, utc_offset_minutes: i32) -> Self {
        Self {
            uptime_ms: Rc::new(Cell::new(0)),
            epoch_base_ms: Rc::new(Cell::new(epoch_base_ms)),
            utc_offset_minutes,
        }
    }

    pub fn advance(&self, ms: u64) {
        self.uptime_ms.set(self.uptime_ms.get() + ms);
    }

    /// Step the wall clock without moving uptime (an SNTP correction).
    pub fn set_epoch_millis(&self, epoch_ms: u64) {
        self.epoch_base_ms
            .set(epoch_ms.saturating_sub(self.uptime_ms.get()));
    }

    pub fn epoch_millis(&self) -> u64 {
        self.epoch_base_ms.get() + self.uptime_ms.get()
    }
}

impl MonotonicClock for SimulatedClock {
    fn now_ms(&self) -> u64 {
        self.uptime_ms.get()
    }
}

impl Sleeper for SimulatedClock {
    fn sleep_ms(&mut self, ms: u64) {
        self.advance(ms);
    }
}

impl TimePort for SimulatedClock {
    fn now(&mut self) -> Result<ClockReading, ClockError> {
        ClockReading::from_epoch_millis(self.epoch_millis(), self.utc_offset_minutes)
    }
}
