//! Dial decoder, the hexagonal core.
//!
//! [`DialDecoder`] owns the debounce filter, the dial state machine, the
//! pending-event queue and the statistics.  It is shared by reference
//! between two contexts:
//!
//! ```text
//!  GPIO ISR ──▶ on_line_edge() ──▶ ┌──────────────────────────┐
//!                                  │  critical section        │
//!                                  │  filter · fsm · queue    │
//!  poll loop ─▶ tick() ──────────▶ └──────────────────────────┘ ──▶ EventSink
//! ```
//!
//! The edge path never blocks, logs or allocates.  Everything the sink
//! sees is delivered from [`DialDecoder::tick`], outside the lock.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

use crate::config::DialConfig;
use crate::diagnostics::DialStats;
use crate::dial::debounce::{DebounceFilter, FilterOutcome};
use crate::dial::{LineId, LogicalLevel, Millis};
use crate::events::{EVENT_QUEUE_CAP, EventQueue};
use crate::fsm::session::DialSession;
use crate::fsm::{DialPhase, DialStateMachine};

use super::events::{Anomaly, DialEvent};
use super::ports::EventSink;

/// Queued events plus one drop report plus the two a timeout can add.
const TICK_BATCH_CAP: usize = EVENT_QUEUE_CAP + 4;

/// Everything guarded by the critical section, as one unit.
struct DecoderCore {
    filter: DebounceFilter,
    fsm: DialStateMachine,
    queue: EventQueue,
    stats: DialStats,
}

pub struct DialDecoder {
    core: Mutex<CriticalSectionRawMutex, RefCell<DecoderCore>>,
    config: DialConfig,
}

impl DialDecoder {
    /// Build a decoder from a configuration the caller trusts.
    ///
    /// Use [`try_new`](Self::try_new) for configuration from storage or
    /// provisioning.
    pub fn new(config: DialConfig) -> Self {
        let core = DecoderCore {
            filter: DebounceFilter::from_config(&config),
            fsm: DialStateMachine::new(&config),
            queue: EventQueue::new(),
            stats: DialStats::default(),
        };
        Self {
            core: Mutex::new(RefCell::new(core)),
            config,
        }
    }

    /// Validate `config`, then build the decoder.
    pub fn try_new(config: DialConfig) -> crate::Result<Self> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Record the level a line rests at before any edge arrives.
    pub fn seed(&self, line: LineId, level: LogicalLevel) {
        self.core.lock(|c| c.borrow_mut().filter.seed(line, level));
    }

    /// Edge notification entry point.  Safe to call from an ISR.
    ///
    /// `raw` is the level sampled right after the edge; `now` is the
    /// timestamp taken in the same context.
    pub fn on_line_edge(&self, line: LineId, raw: LogicalLevel, now: Millis) -> FilterOutcome {
        self.core.lock(|c| {
            let mut guard = c.borrow_mut();
            let DecoderCore {
                filter,
                fsm,
                queue,
                stats,
            } = &mut *guard;

            let outcome = filter.consider_transition(line, raw, now);
            match outcome {
                FilterOutcome::Accepted(level) => {
                    let end = fsm.handle_transition(line, level, now, &mut |event| {
                        stats.record_event(&event);
                        queue.push(event);
                    });
                    if let Some(end) = end {
                        stats.record_end(&end);
                    }
                }
                FilterOutcome::Suppressed => stats.record_suppressed(),
                FilterOutcome::Unchanged => {}
            }
            outcome
        })
    }

    /// Periodic service: flush pending events, evaluate timeouts and
    /// forget closed debounce windows.
    ///
    /// Returns the number of events delivered to `sink`.
    pub fn tick(&self, now: Millis, sink: &mut impl EventSink) -> usize {
        let mut batch: heapless::Vec<DialEvent, TICK_BATCH_CAP> = heapless::Vec::new();

        self.core.lock(|c| {
            let mut guard = c.borrow_mut();
            let DecoderCore {
                filter,
                fsm,
                queue,
                stats,
            } = &mut *guard;

            queue.drain(|event| {
                let _ = batch.push(event);
            });

            let dropped = queue.take_dropped();
            if dropped > 0 {
                let event = DialEvent::AnomalyDetected(Anomaly::EventsDropped(dropped));
                stats.record_event(&event);
                let _ = batch.push(event);
            }

            let end = fsm.check_timeouts(now, &mut |event| {
                stats.record_event(&event);
                let _ = batch.push(event);
            });
            if let Some(end) = end {
                stats.record_end(&end);
            }

            filter.expire(now);
        });

        for event in &batch {
            sink.emit(event);
        }
        batch.len()
    }

    /// Consistent copy of the live session.
    pub fn session(&self) -> DialSession {
        self.core.lock(|c| *c.borrow().fsm.session())
    }

    pub fn phase(&self) -> DialPhase {
        self.core.lock(|c| c.borrow().fsm.phase())
    }

    /// Consistent copy of the counters.
    pub fn stats(&self) -> DialStats {
        self.core.lock(|c| c.borrow().stats)
    }

    /// Events waiting for the next [`tick`](Self::tick).
    pub fn pending(&self) -> usize {
        self.core.lock(|c| c.borrow().queue.len())
    }

    pub fn config(&self) -> &DialConfig {
        &self.config
    }
}
