//! Per-line time-window debounce filter.
//!
//! Runs in the edge-notification path, so every call is O(1), never
//! blocks, and never logs.  A raw level change is trusted only if at least
//! `min_stable_ms` have passed since the last *accepted* transition on
//! the same line:
//!
//! | Condition                               | Outcome      | State change |
//! |-----------------------------------------|--------------|--------------|
//! | elapsed < min_stable_ms                 | `Suppressed` | none         |
//! | raw level == last accepted level        | `Unchanged`  | none         |
//! | otherwise                               | `Accepted`   | level + time |
//!
//! A repeated notification carrying the already-accepted level does not
//! restart the window, so a line chattering at the same level cannot hold
//! the filter closed indefinitely.
//!
//! The window is measured with a plain wrapping difference.  A line that
//! has been quiet for weeks must still open on its next edge, so the
//! future-clamping [`elapsed_ms`] is only used by [`DebounceState::expire`],
//! which the poll loop calls to forget windows that have long closed.

use super::{LineId, LogicalLevel, Millis, elapsed_ms};
use crate::config::DialConfig;

/// Result of offering a raw level to the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOutcome {
    /// Trusted transition to the given level.
    Accepted(LogicalLevel),
    /// Arrived inside the stable window of the previous transition.
    Suppressed,
    /// Same level as already accepted; nothing to do.
    Unchanged,
}

/// Filter state for a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceState {
    /// `None` until the line has been seeded or has accepted a transition.
    last_accepted: Option<LogicalLevel>,
    /// Time of the most recent accepted transition (never a suppressed one).
    last_transition_ms: Option<Millis>,
    min_stable_ms: u32,
}

impl DebounceState {
    pub const fn new(min_stable_ms: u32) -> Self {
        Self {
            last_accepted: None,
            last_transition_ms: None,
            min_stable_ms,
        }
    }

    pub fn consider(&mut self, raw: LogicalLevel, now: Millis) -> FilterOutcome {
        if let Some(last) = self.last_transition_ms {
            if now.wrapping_sub(last) < self.min_stable_ms {
                return FilterOutcome::Suppressed;
            }
        }

        if self.last_accepted == Some(raw) {
            return FilterOutcome::Unchanged;
        }

        self.last_accepted = Some(raw);
        self.last_transition_ms = Some(now);
        FilterOutcome::Accepted(raw)
    }

    /// Record the level observed at boot without opening a stable window.
    pub fn seed(&mut self, level: LogicalLevel) {
        self.last_accepted = Some(level);
    }

    /// Drop the transition time once its window has closed.
    ///
    /// A timestamp stamped after `now` by a racing ISR reads as 0 elapsed
    /// and is kept.
    pub fn expire(&mut self, now: Millis) {
        if let Some(last) = self.last_transition_ms {
            if elapsed_ms(now, last) >= self.min_stable_ms {
                self.last_transition_ms = None;
            }
        }
    }

    pub fn last_accepted(&self) -> Option<LogicalLevel> {
        self.last_accepted
    }

    pub fn last_transition_ms(&self) -> Option<Millis> {
        self.last_transition_ms
    }
}

/// Debounce filters for both dial lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceFilter {
    lines: [DebounceState; LineId::COUNT],
}

impl DebounceFilter {
    pub const fn new(pulse_ms: u32, shunt_ms: u32) -> Self {
        Self {
            lines: [DebounceState::new(pulse_ms), DebounceState::new(shunt_ms)],
        }
    }

    pub fn from_config(config: &DialConfig) -> Self {
        Self::new(
            config.min_stable_ms(LineId::Pulse),
            config.min_stable_ms(LineId::Shunt),
        )
    }

    /// Offer a raw level for `line` observed at `now`.
    pub fn consider_transition(
        &mut self,
        line: LineId,
        raw: LogicalLevel,
        now: Millis,
    ) -> FilterOutcome {
        self.lines[line.index()].consider(raw, now)
    }

    pub fn seed(&mut self, line: LineId, level: LogicalLevel) {
        self.lines[line.index()].seed(level);
    }

    /// Forget closed windows on both lines.
    pub fn expire(&mut self, now: Millis) {
        for state in &mut self.lines {
            state.expire(now);
        }
    }

    pub fn state(&self, line: LineId) -> &DebounceState {
        &self.lines[line.index()]
    }
}
