//! Application core: pure decoding logic, zero I/O.
//!
//! This module contains the rules that turn debounced switch edges into
//! digits: the shared [`decoder::DialDecoder`], the events it emits, and the
//! display-side number buffer.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod decoder;
pub mod events;
pub mod number;
pub mod ports;
