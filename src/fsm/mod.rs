//! Dial state machine.
//!
//! ```text
//!            [SHUNT → active]
//!   IDLE ──────────────────────▶ DIALING ◀──┐
//!    ▲                             │  │     │ [PULSE → counted]
//!    │      [SHUNT → rest]         │  └─────┘  pulse_count += 1
//!    ├─────────────────────────────┤
//!    │      [no pulses, expired]   │
//!    ├─────────────────────────────┤
//!    │      [no activity, expired] │
//!    └─────────────────────────────┘
//! ```
//!
//! Two independent triggers drive it: accepted line transitions
//! ([`DialStateMachine::handle_transition`], edge context) and the polled
//! time check ([`DialStateMachine::check_timeouts`], poll context).  The
//! machine itself is plain data; the decoder serialises both triggers
//! behind one critical section.
//!
//! Handlers report through an `emit` callback instead of logging so they
//! stay safe to run from interrupt context.

pub mod session;

use crate::app::events::{Anomaly, DialEvent};
use crate::config::DialConfig;
use crate::dial::resolver::DigitEvent;
use crate::dial::{LineId, LogicalLevel, Millis, elapsed_ms};
use crate::error::DigitError;

use session::DialSession;

// ---------------------------------------------------------------------------
// Phase identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DialPhase {
    Idle = 0,
    Dialing = 1,
}

impl DialPhase {
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Dialing => "Dialing",
        }
    }
}

/// Why a session ended.  Exactly one per session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Shunt returned to rest.
    AtRest,
    /// No pulse arrived within the no-pulse window.
    NoPulseTimeout,
    /// No activity within the safety window.
    SafetyTimeout,
}

/// Summary of a closed session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEnd {
    pub completion: Completion,
    pub pulse_count: u8,
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DialStateMachine {
    session: DialSession,
    shunt_active: LogicalLevel,
    pulse_counted: LogicalLevel,
    no_pulse_timeout_ms: u32,
    safety_timeout_ms: u32,
}

impl DialStateMachine {
    pub fn new(config: &DialConfig) -> Self {
        Self {
            session: DialSession::idle(),
            shunt_active: config.shunt_active_level,
            pulse_counted: config.pulse_count_level,
            no_pulse_timeout_ms: config.no_pulse_timeout_ms,
            safety_timeout_ms: config.safety_timeout_ms(),
        }
    }

    pub fn phase(&self) -> DialPhase {
        self.session.phase
    }

    pub fn session(&self) -> &DialSession {
        &self.session
    }

    /// Apply an accepted (debounced) transition.
    ///
    /// Returns the closed session if this transition ended one.
    pub fn handle_transition(
        &mut self,
        line: LineId,
        level: LogicalLevel,
        now: Millis,
        emit: &mut impl FnMut(DialEvent),
    ) -> Option<SessionEnd> {
        match (line, self.session.phase) {
            (LineId::Shunt, DialPhase::Idle) if level == self.shunt_active => {
                self.session.begin(now);
                emit(DialEvent::DialStarted);
                None
            }
            (LineId::Shunt, DialPhase::Dialing) if level != self.shunt_active => {
                Some(self.finish(Completion::AtRest, emit))
            }
            (LineId::Pulse, DialPhase::Dialing) if level == self.pulse_counted => {
                let count = self.session.record_pulse(now);
                emit(DialEvent::PulseTick(count));
                None
            }
            // Start edge while dialing, rest edge while idle, pulses while
            // idle, and non-counting pulse edges are all ignored.
            _ => None,
        }
    }

    /// Evaluate the time-driven completion paths.
    pub fn check_timeouts(
        &mut self,
        now: Millis,
        emit: &mut impl FnMut(DialEvent),
    ) -> Option<SessionEnd> {
        if !self.session.is_dialing() {
            return None;
        }

        if self.session.pulse_count == 0
            && elapsed_ms(now, self.session.dial_start_ms) > self.no_pulse_timeout_ms
        {
            return Some(self.finish(Completion::NoPulseTimeout, emit));
        }

        if elapsed_ms(now, self.session.last_activity_ms) > self.safety_timeout_ms {
            return Some(self.finish(Completion::SafetyTimeout, emit));
        }

        None
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn finish(&mut self, completion: Completion, emit: &mut impl FnMut(DialEvent)) -> SessionEnd {
        let pulse_count = self.session.reset();

        match completion {
            Completion::AtRest | Completion::NoPulseTimeout => emit(DialEvent::DialStopped),
            Completion::SafetyTimeout => emit(DialEvent::SafetyTimeout),
        }

        if pulse_count > 0 {
            match DigitEvent::from_pulses(pulse_count) {
                Ok(digit) => emit(DialEvent::DigitDialed(digit)),
                Err(DigitError::OutOfRange(n)) => {
                    emit(DialEvent::AnomalyDetected(Anomaly::PulseCountOutOfRange(n)));
                }
            }
        }

        SessionEnd {
            completion,
            pulse_count,
        }
    }
}
