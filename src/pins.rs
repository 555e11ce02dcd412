//! GPIO pin assignments for the rotary dial board.
//!
//! Single source of truth: the drivers and the binary reference this
//! module rather than hard-coding pin numbers.

use crate::dial::LineId;

// ---------------------------------------------------------------------------
// Rotary dial contacts (both switch to GND, internal pull-ups)
// ---------------------------------------------------------------------------

/// Pulse contact: opens once per pulse while the dial returns.
pub const ROTARY_PULSE_GPIO: i32 = 15;
/// Off-normal (shunt) contact: closed while the dial is away from rest.
pub const ROTARY_SHUNT_GPIO: i32 = 14;

/// GPIO number wired to `line`.
pub const fn line_gpio(line: LineId) -> i32 {
    match line {
        LineId::Pulse => ROTARY_PULSE_GPIO,
        LineId::Shunt => ROTARY_SHUNT_GPIO,
    }
}
