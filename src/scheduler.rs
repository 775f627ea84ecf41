//! Fixed-cadence tick scheduler.
//!
//! ```text
//!   deadline ─┬─ tick ─ sleep ─┬─ tick ─ sleep ─┬─ tick ──── overrun ──┬─ tick
//!             0               5 s             10 s                    17 s
//! ```
//!
//! Deadlines advance by one period per tick.  When a tick (typically a slow
//! telemetry sink) runs past its deadline the next tick starts immediately
//! and the cadence re-anchors to that moment; missed ticks are not replayed.
//!
//! Time and sleeping are injected through [`MonotonicClock`] and
//! [`Sleeper`] so host tests can simulate days of operation instantly.

use log::warn;

// ═══════════════════════════════════════════════════════════════
//  Time seams
// ═══════════════════════════════════════════════════════════════

/// Milliseconds since an arbitrary fixed origin; never goes backwards.
pub trait MonotonicClock {
    fn now_ms(&self) -> u64;
}

/// Blocks the calling task.
pub trait Sleeper {
    fn sleep_ms(&mut self, ms: u64);
}

/// `std::thread::sleep` (yields to FreeRTOS on target).
#[derive(Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep_ms(&mut self, ms: u64) {
        std::thread::sleep(std::time::Duration::from_millis(ms));
    }
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

pub struct Scheduler<C: MonotonicClock, S: Sleeper> {
    clock: C,
    sleeper: S,
    period_ms: u64,
    /// Ticks completed over the scheduler's lifetime.
    ticks: u64,
    /// Ticks that finished after the next deadline.
    overruns: u64,
}

impl<C: MonotonicClock, S: Sleeper> Scheduler<C, S> {
    pub fn new(clock: C, sleeper: S, period_ms: u64) -> Self {
        Self {
            clock,
            sleeper,
            period_ms,
            ticks: 0,
            overruns: 0,
        }
    }

    /// Run `tick` on the cadence until it fails or `limit` ticks have run
    /// (`None` = forever).  The tick receives the monotonic time it started
    /// at.  Returns the number of ticks run by this call.
    ///
    /// No sleep follows the final tick of a bounded run.
    pub fn run<E, F>(&mut self, limit: Option<u64>, mut tick: F) -> Result<u64, E>
    where
        F: FnMut(u64) -> Result<(), E>,
    {
        let mut ran = 0u64;
        if limit == Some(0) {
            return Ok(ran);
        }

        let mut deadline = self.clock.now_ms();
        loop {
            let started = self.clock.now_ms();
            tick(started)?;
            self.ticks += 1;
            ran += 1;

            if limit.is_some_and(|n| ran >= n) {
                return Ok(ran);
            }

            deadline += self.period_ms;
            let now = self.clock.now_ms();
            if now >= deadline {
                self.overruns += 1;
                warn!(
                    "Scheduler: tick {} overran by {} ms",
                    self.ticks,
                    now - deadline
                );
                deadline = now;
            } else {
                self.sleeper.sleep_ms(deadline - now);
            }
        }
    }

    /// Bounded run of exactly `ticks` ticks (unless one fails).
    pub fn run_for<E, F>(&mut self, ticks: u64, tick: F) -> Result<u64, E>
    where
        F: FnMut(u64) -> Result<(), E>,
    {
        self.run(Some(ticks), tick)
    }

    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
