//! Line drivers, hardware initialisation, and host-side line doubles.

pub mod button;
pub mod gpio;
pub mod hw_init;
pub mod sim;
pub mod switch;
