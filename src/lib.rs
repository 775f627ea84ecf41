//! SmartLamp firmware library.
//!
//! Bedroom lamp and wake-buzzer controller.  Exposes the pure-logic
//! modules and the adapters for integration testing; all ESP-IDF-specific
//! code is guarded by `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod pins;
pub mod scheduler;

pub mod adapters;
pub mod drivers;
pub mod sensors;
