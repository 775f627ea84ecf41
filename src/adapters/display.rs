//! Status panel (128x64 monochrome, five text rows).
//!
//! ```text
//!  y=0   09/03/2024
//!  y=12  19:30:05
//!  y=24  Gelap:75% M:Y
//!  y=36  Merah:OFF
//!  y=48  Kuning:ON
//! ```
//!
//! [`DisplayFrame`] is the pure layout.  [`LogDisplay`] mirrors the frame
//! to the debug log; a panel driver implements [`DisplayPort`] the same way.

use log::debug;

use crate::app::ports::{DisplayError, DisplayPort};
use crate::app::snapshot::StatusSnapshot;

/// Row pitch in pixels for the 8x8 font.
pub const ROW_HEIGHT_PX: u8 = 12;
pub const ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFrame {
    pub lines: [String; ROWS],
}

impl DisplayFrame {
    pub fn from_snapshot(s: &StatusSnapshot) -> Self {
        let on_off = |on: bool| if on { "ON" } else { "OFF" };
        Self {
            lines: [
                s.clock.date_dmy(),
                s.clock.time_hms(),
                format!(
                    "Gelap:{}% M:{}",
                    s.sensors.darkness_percent,
                    if s.sensors.motion_detected { "Y" } else { "N" }
                ),
                format!("Merah:{}", on_off(s.actuators.red_on)),
                format!("Kuning:{}", on_off(s.actuators.yellow_on)),
            ],
        }
    }

    /// `(y, text)` for each row, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = (u8, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(i, line)| (i as u8 * ROW_HEIGHT_PX, line.as_str()))
    }
}

/// Serial mirror of the panel.
#[derive(Default)]
pub struct LogDisplay {
    last: Option<DisplayFrame>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_frame(&self) -> Option<&DisplayFrame> {
        self.last.as_ref()
    }
}

impl DisplayPort for LogDisplay {
    fn show(&mut self, snapshot: &StatusSnapshot) -> Result<(), DisplayError> {
        let frame = DisplayFrame::from_snapshot(snapshot);
        for (y, text) in frame.rows() {
            debug!("DISPLAY | y={:2} {}", y, text);
        }
        self.last = Some(frame);
        Ok(())
    }
}
