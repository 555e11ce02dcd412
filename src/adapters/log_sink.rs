//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing decoder events to the ESP-IDF
//! logger (UART / USB-CDC in production), one `TAG | detail` line each.
//! It also assembles digits into the dialed number and reports it once
//! the dial has gone quiet.

use log::{debug, info, warn};

use crate::app::events::DialEvent;
use crate::app::number::{DigitBuffer, MAX_NUMBER_LEN};
use crate::app::ports::{ClockSource, EventSink};

/// Adapter that logs every [`DialEvent`] to the serial console.
pub struct LogEventSink<C: ClockSource> {
    clock: C,
    number: DigitBuffer,
    /// Pulses seen in the session being rendered.
    pulses: u8,
}

impl<C: ClockSource> LogEventSink<C> {
    pub fn new(clock: C, number_gap_ms: u32) -> Self {
        Self {
            clock,
            number: DigitBuffer::new(number_gap_ms),
            pulses: 0,
        }
    }

    /// Log and return the dialed number once it is complete.
    pub fn poll_number(&mut self, dialing: bool) -> Option<heapless::String<MAX_NUMBER_LEN>> {
        let number = self.number.poll(self.clock.now_ms(), dialing)?;
        info!("NUMBER | {}", number);
        Some(number)
    }

    /// Digits collected so far.
    pub fn pending_number(&self) -> &str {
        self.number.as_str()
    }
}

impl<C: ClockSource> EventSink for LogEventSink<C> {
    fn emit(&mut self, event: &DialEvent) {
        match event {
            DialEvent::DialStarted => {
                self.pulses = 0;
                info!("DIAL | started");
            }
            DialEvent::PulseTick(n) => {
                self.pulses = *n;
                debug!("PULSE | {}", n);
            }
            DialEvent::DialStopped => {
                if self.pulses == 0 {
                    debug!("DIAL | stopped, empty session discarded");
                } else {
                    info!("DIAL | stopped after {} pulses", self.pulses);
                }
            }
            DialEvent::SafetyTimeout => {
                warn!("TIMEOUT | no activity, session force-closed after {} pulses", self.pulses);
            }
            DialEvent::DigitDialed(digit) => {
                info!("DIGIT | {}", digit);
            }
            DialEvent::AnomalyDetected(anomaly) => {
                warn!("ANOMALY | {}", anomaly);
            }
        }
        self.number.observe(event, self.clock.now_ms());
    }
}
