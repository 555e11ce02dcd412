//! Outbound decoder events.
//!
//! The [`DialDecoder`](super::decoder::DialDecoder) delivers these through
//! the [`EventSink`](super::ports::EventSink) port.  They are advisory
//! telemetry only: no persisted state or wire format hangs off them.

use core::fmt;

use crate::dial::resolver::DigitEvent;

/// Structured events emitted by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialEvent {
    /// The shunt switch left rest; a new session began.
    DialStarted,

    /// A pulse was counted; carries the running total.
    PulseTick(u8),

    /// The shunt switch returned to rest, or an empty session was discarded.
    DialStopped,

    /// The session was force-closed because no activity arrived in time.
    SafetyTimeout,

    /// A complete digit was decoded.
    DigitDialed(DigitEvent),

    /// Something abnormal happened; decoding continues.
    AnomalyDetected(Anomaly),
}

/// Reasons carried by [`DialEvent::AnomalyDetected`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anomaly {
    /// A session closed with a pulse count outside 1..=10.
    PulseCountOutOfRange(u8),
    /// Events were lost because the queue filled between polls.
    EventsDropped(u32),
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PulseCountOutOfRange(n) => write!(f, "pulse count {n} out of range"),
            Self::EventsDropped(n) => write!(f, "{n} events dropped"),
        }
    }
}
