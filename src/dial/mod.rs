//! Rotary dial signal model.
//!
//! A rotary dial exposes two mechanical switches:
//!
//! | Line    | Switch           | Behaviour                                      |
//! |---------|------------------|------------------------------------------------|
//! | `Pulse` | pulse switch     | one transition per unit of return rotation     |
//! | `Shunt` | off-normal switch| changes once on wind-up, once on return to rest |
//!
//! Both lines bounce.  Raw level notifications pass through the per-line
//! [`debounce::DebounceFilter`] before the dial state machine sees them;
//! completed pulse trains are mapped to digits by [`resolver::resolve`].

pub mod debounce;
pub mod resolver;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Milliseconds since boot, truncated to `u32` (wraps after ~49 days).
pub type Millis = u32;

/// Elapsed time from `since` to `now` for timeout checks, tolerant of
/// counter wrap-around.
///
/// A `since` that lies *after* `now` (an ISR stamped an edge after the poll
/// loop sampled its clock) yields 0 rather than a huge wrapped interval.
/// Only valid for spans shorter than ~24.8 days; callers comparing against
/// timestamps that can be older must not use it.
pub fn elapsed_ms(now: Millis, since: Millis) -> u32 {
    let delta = now.wrapping_sub(since);
    if delta > u32::MAX / 2 { 0 } else { delta }
}

/// One of the two monitored dial signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LineId {
    Pulse = 0,
    Shunt = 1,
}

impl LineId {
    /// Number of lines, used to size per-line tables.
    pub const COUNT: usize = 2;

    pub const ALL: [LineId; LineId::COUNT] = [LineId::Pulse, LineId::Shunt];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pulse => "PULSE",
            Self::Shunt => "SHUNT",
        }
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Digital level of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalLevel {
    Low,
    High,
}

impl LogicalLevel {
    /// The opposite level.
    pub fn inverted(self) -> Self {
        match self {
            Self::Low => Self::High,
            Self::High => Self::Low,
        }
    }
}

impl From<bool> for LogicalLevel {
    fn from(high: bool) -> Self {
        if high { Self::High } else { Self::Low }
    }
}

impl fmt::Display for LogicalLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("LOW"),
            Self::High => f.write_str("HIGH"),
        }
    }
}
