//! Pulse count → digit mapping.
//!
//! A rotary dial sends one pulse for digits 1–9 and ten pulses for 0.
//! Counts outside 1..=10 only happen when noise slipped past the
//! debounce filter; they are reported, never wrapped or clamped.

use core::fmt;

use crate::error::DigitError;

/// Fewest pulses a real digit produces ("1").
pub const MIN_PULSES: u8 = 1;
/// Most pulses a real digit produces ("0").
pub const MAX_PULSES: u8 = 10;

/// Map a completed pulse count to its digit value.
pub fn resolve(pulse_count: u8) -> Result<u8, DigitError> {
    match pulse_count {
        MAX_PULSES => Ok(0),
        MIN_PULSES..MAX_PULSES => Ok(pulse_count),
        other => Err(DigitError::OutOfRange(other)),
    }
}

/// A resolved digit together with the pulse train that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitEvent {
    pub digit: u8,
    pub pulse_count: u8,
}

impl DigitEvent {
    pub fn from_pulses(pulse_count: u8) -> Result<Self, DigitError> {
        let digit = resolve(pulse_count)?;
        Ok(Self { digit, pulse_count })
    }

    /// ASCII character for the digit (`'0'..='9'`).
    pub fn as_char(&self) -> char {
        char::from(b'0' + self.digit)
    }
}

impl fmt::Display for DigitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pulses)", self.digit, self.pulse_count)
    }
}
