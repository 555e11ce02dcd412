//! Rotary dial decoder firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod dial;
pub mod events;
pub mod fsm;
pub mod pins;

mod error;

pub use error::{DigitError, Error, Result};

// Hardware-facing modules compile on host with simulation stubs.
pub mod adapters;
pub mod drivers;
