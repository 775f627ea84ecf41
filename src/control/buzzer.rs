//! Daily wake-buzzer schedule.
//!
//! ```text
//!            [in window && !triggered_today]
//!   IDLE ─────────────────────────────────────▶ SOUNDING
//!    ▲                                             │
//!    └──────[silence requested | past window]──────┘
//!
//!   triggered_today: set on IDLE → SOUNDING, cleared once past window end
//! ```
//!
//! The latch is independent of the IDLE/SOUNDING state and is consulted only
//! for the IDLE → SOUNDING edge, so a buzzer silenced at 06:03 stays silent
//! for the rest of the window and re-arms for the next morning.

use core::fmt;

use log::info;
use serde::{Deserialize, Serialize};

/// Wall-clock minute, ordered lexicographically by (hour, minute).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HourMinute {
    pub hour: u8,
    pub minute: u8,
}

impl HourMinute {
    pub const fn new(hour: u8, minute: u8) -> Self {
        Self { hour, minute }
    }

    pub fn is_valid(&self) -> bool {
        self.hour < 24 && self.minute < 60
    }
}

impl fmt::Display for HourMinute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerState {
    Idle,
    Sounding,
}

/// Edges produced by one evaluation, in the order they happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuzzerTransition {
    /// Window entered with the latch clear, buzzer switched on.
    Started,
    /// Button override while sounding.
    Silenced,
    /// Clock passed the window end while sounding.
    TimedOut,
    /// Latch cleared for the next day.
    Rearmed,
}

/// At most every transition once per evaluation.
pub type Transitions = heapless::Vec<BuzzerTransition, 4>;

#[derive(Debug, Clone)]
pub struct BuzzerSchedule {
    window_start: HourMinute,
    window_end: HourMinute,
    triggered_today: bool,
    state: BuzzerState,
}

impl BuzzerSchedule {
    /// Bounds are inclusive; `window_start <= window_end` (validated by config).
    pub fn new(window_start: HourMinute, window_end: HourMinute) -> Self {
        Self {
            window_start,
            window_end,
            triggered_today: false,
            state: BuzzerState::Idle,
        }
    }

    /// Run the four buzzer rules in order: activate, silence, timeout, re-arm.
    pub fn evaluate(&mut self, now: HourMinute, silence_requested: bool) -> Transitions {
        let mut out = Transitions::new();

        if self.state == BuzzerState::Idle && !self.triggered_today && self.in_window(now) {
            self.state = BuzzerState::Sounding;
            self.triggered_today = true;
            info!("Buzzer: window entered at {}, sounding", now);
            let _ = out.push(BuzzerTransition::Started);
        }

        if self.state == BuzzerState::Sounding && silence_requested {
            self.state = BuzzerState::Idle;
            info!("Buzzer: silenced by button at {}", now);
            let _ = out.push(BuzzerTransition::Silenced);
        }

        if self.state == BuzzerState::Sounding && now > self.window_end {
            self.state = BuzzerState::Idle;
            info!("Buzzer: window closed at {}, timed out", now);
            let _ = out.push(BuzzerTransition::TimedOut);
        }

        if self.triggered_today && now > self.window_end {
            self.triggered_today = false;
            info!("Buzzer: re-armed for tomorrow");
            let _ = out.push(BuzzerTransition::Rearmed);
        }

        out
    }

    pub fn in_window(&self, now: HourMinute) -> bool {
        self.window_start <= now && now <= self.window_end
    }

    pub fn state(&self) -> BuzzerState {
        self.state
    }

    pub fn is_sounding(&self) -> bool {
        self.state == BuzzerState::Sounding
    }

    pub fn triggered_today(&self) -> bool {
        self.triggered_today
    }

    pub fn window(&self) -> (HourMinute, HourMinute) {
        (self.window_start, self.window_end)
    }
}
