//! The live dial session.
//!
//! `DialSession` is the single record both trigger contexts read and
//! write: the edge path updates it on accepted transitions, the poll loop
//! reads it for timeout checks and display.  It is created once and reset
//! in place between digits.

use super::DialPhase;
use crate::dial::Millis;

/// State of the in-progress dial operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialSession {
    pub phase: DialPhase,
    /// Pulses counted since the shunt left rest.
    pub pulse_count: u8,
    /// When the shunt left rest.
    pub dial_start_ms: Millis,
    /// When the most recent pulse was counted.
    pub last_pulse_ms: Millis,
    /// Most recent start or pulse; the safety timeout runs from here.
    pub last_activity_ms: Millis,
}

impl Default for DialSession {
    fn default() -> Self {
        Self::idle()
    }
}

impl DialSession {
    pub const fn idle() -> Self {
        Self {
            phase: DialPhase::Idle,
            pulse_count: 0,
            dial_start_ms: 0,
            last_pulse_ms: 0,
            last_activity_ms: 0,
        }
    }

    pub fn is_dialing(&self) -> bool {
        self.phase == DialPhase::Dialing
    }

    pub(super) fn begin(&mut self, now: Millis) {
        *self = Self {
            phase: DialPhase::Dialing,
            pulse_count: 0,
            dial_start_ms: now,
            last_pulse_ms: now,
            last_activity_ms: now,
        };
    }

    /// Count one pulse.  Count and timestamps change together.
    pub(super) fn record_pulse(&mut self, now: Millis) -> u8 {
        self.pulse_count = self.pulse_count.saturating_add(1);
        self.last_pulse_ms = now;
        self.last_activity_ms = now;
        self.pulse_count
    }

    /// Back to idle; returns the pulse count of the session just closed.
    pub(super) fn reset(&mut self) -> u8 {
        let pulses = self.pulse_count;
        *self = Self::idle();
        pulses
    }
}
