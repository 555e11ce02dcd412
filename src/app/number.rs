//! Dialed-number assembly for display.
//!
//! Collects consecutive digits and reports the whole number once the dial
//! has been idle for `number_gap_ms`.  Display-side only.

use crate::dial::{Millis, elapsed_ms};

use super::events::DialEvent;

/// Longest number kept; further digits are dropped until the next flush.
pub const MAX_NUMBER_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct DigitBuffer {
    digits: heapless::String<MAX_NUMBER_LEN>,
    last_digit_ms: Millis,
    gap_ms: u32,
}

impl DigitBuffer {
    pub fn new(gap_ms: u32) -> Self {
        Self {
            digits: heapless::String::new(),
            last_digit_ms: 0,
            gap_ms,
        }
    }

    /// Feed a decoder event; only `DigitDialed` is kept.
    pub fn observe(&mut self, event: &DialEvent, now: Millis) {
        if let DialEvent::DigitDialed(digit) = event {
            let _ = self.digits.push(digit.as_char());
            self.last_digit_ms = now;
        }
    }

    /// Hand back the completed number once the gap has elapsed.
    ///
    /// Never completes while a digit is still being dialed.
    pub fn poll(&mut self, now: Millis, dialing: bool) -> Option<heapless::String<MAX_NUMBER_LEN>> {
        if dialing || self.digits.is_empty() {
            return None;
        }
        if elapsed_ms(now, self.last_digit_ms) < self.gap_ms {
            return None;
        }
        Some(core::mem::take(&mut self.digits))
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}
