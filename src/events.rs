//! Bounded event queue between the edge path and the poll loop.
//!
//! Events are produced by:
//! - GPIO ISRs (accepted shunt/pulse transitions)
//! - The poll loop itself (timeout evaluation)
//!
//! and consumed by the poll loop, which hands them to the event sink
//! in FIFO order.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ PULSE ISR   │────▶│              │     │              │
//! │ SHUNT ISR   │────▶│  EventQueue  │────▶│  Poll loop   │
//! │             │     │  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The queue itself is not synchronised; the decoder keeps it inside the
//! same critical section as the dial session.
//!
//! Pulse feedback is a running count, so back-to-back `PulseTick`s collapse
//! into the latest one.  When the queue is full, lifecycle and digit events
//! evict the oldest queued `PulseTick` before anything is dropped.

use heapless::Deque;

use crate::app::events::DialEvent;

/// Maximum number of pending events.
/// One digit produces at most 4 events (start, tick, stop, digit).
pub const EVENT_QUEUE_CAP: usize = 32;

/// Fixed-capacity FIFO with pulse-tick coalescing.  Every lost event is
/// counted.
#[derive(Debug, Default)]
pub struct EventQueue {
    buf: Deque<DialEvent, EVENT_QUEUE_CAP>,
    dropped: u32,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            buf: Deque::new(),
            dropped: 0,
        }
    }

    /// Push an event.
    /// Returns `false` if the queue is full (event dropped).
    pub fn push(&mut self, event: DialEvent) -> bool {
        let is_tick = matches!(event, DialEvent::PulseTick(_));

        if is_tick {
            if let Some(back) = self.buf.back_mut() {
                if matches!(back, DialEvent::PulseTick(_)) {
                    *back = event;
                    return true;
                }
            }
        } else if self.buf.is_full() {
            self.evict_pulse_tick();
        }

        if self.buf.push_back(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
            return false;
        }
        true
    }

    /// Remove the oldest queued `PulseTick`, keeping the order of the rest.
    fn evict_pulse_tick(&mut self) {
        let Some(pos) = self
            .buf
            .iter()
            .position(|e| matches!(e, DialEvent::PulseTick(_)))
        else {
            return;
        };

        for i in 0..self.buf.len() {
            if let Some(event) = self.buf.pop_front() {
                if i != pos {
                    let _ = self.buf.push_back(event);
                }
            }
        }
        self.dropped = self.dropped.saturating_add(1);
    }

    /// Pop the oldest event.
    pub fn pop(&mut self) -> Option<DialEvent> {
        self.buf.pop_front()
    }

    /// Drain all pending events into a callback, oldest first.
    pub fn drain(&mut self, mut handler: impl FnMut(DialEvent)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    /// Number of events dropped since the last call; resets the counter.
    pub fn take_dropped(&mut self) -> u32 {
        core::mem::take(&mut self.dropped)
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
