//! Application core: pure domain orchestration, zero I/O.
//!
//! The control loop, its per-tick value types and the port traits it
//! drives.  All interaction with hardware and the network happens through
//! the traits in [`ports`], keeping this layer fully testable without real
//! peripherals.

pub mod control_loop;
pub mod events;
pub mod ports;
pub mod snapshot;
