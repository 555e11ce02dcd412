//! Decoder statistics and runtime diagnostics.
//!
//! [`DialStats`] is updated inside the decoder's critical section alongside
//! the session, so a snapshot is always internally consistent.
//!
//! Runtime metrics (uptime, heap) are collected on demand for the periodic
//! status line.

use serde::{Deserialize, Serialize};

use crate::app::events::{Anomaly, DialEvent};
use crate::fsm::{Completion, SessionEnd};

/// Running counters since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialStats {
    pub sessions_started: u32,
    pub digits_decoded: u32,
    /// Sessions that closed without a single pulse.
    pub empty_sessions: u32,
    pub no_pulse_timeouts: u32,
    pub safety_timeouts: u32,
    pub anomalies: u32,
    /// Edges rejected by the debounce filter.
    pub suppressed_edges: u32,
    pub events_dropped: u32,
}

impl DialStats {
    /// Account for an event as it is produced.
    pub fn record_event(&mut self, event: &DialEvent) {
        match event {
            DialEvent::DialStarted => bump(&mut self.sessions_started),
            DialEvent::DigitDialed(_) => bump(&mut self.digits_decoded),
            DialEvent::AnomalyDetected(anomaly) => {
                bump(&mut self.anomalies);
                if let Anomaly::EventsDropped(n) = anomaly {
                    self.events_dropped = self.events_dropped.saturating_add(*n);
                }
            }
            DialEvent::PulseTick(_) | DialEvent::DialStopped | DialEvent::SafetyTimeout => {}
        }
    }

    /// Account for how a session closed.
    pub fn record_end(&mut self, end: &SessionEnd) {
        match end.completion {
            Completion::AtRest => {}
            Completion::NoPulseTimeout => bump(&mut self.no_pulse_timeouts),
            Completion::SafetyTimeout => bump(&mut self.safety_timeouts),
        }
        if end.pulse_count == 0 {
            bump(&mut self.empty_sessions);
        }
    }

    pub fn record_suppressed(&mut self) {
        bump(&mut self.suppressed_edges);
    }
}

fn bump(counter: &mut u32) {
    *counter = counter.saturating_add(1);
}

/// Runtime diagnostics snapshot collected on-demand.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeMetrics {
    pub uptime_secs: u64,
    pub heap_free: u32,
    pub heap_min_free: u32,
}

impl RuntimeMetrics {
    #[cfg(target_os = "espidf")]
    pub fn collect() -> Self {
        use esp_idf_svc::sys::*;
        let uptime_us = unsafe { esp_timer_get_time() };
        let heap_free = unsafe { esp_get_free_heap_size() };
        let heap_min_free = unsafe { esp_get_minimum_free_heap_size() };
        Self {
            uptime_secs: (uptime_us / 1_000_000) as u64,
            heap_free,
            heap_min_free,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn collect() -> Self {
        Self {
            uptime_secs: 0,
            heap_free: 0,
            heap_min_free: 0,
        }
    }
}
