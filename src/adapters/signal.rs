//! Signal port adapter over `embedded-hal` input pins.
//!
//! [`LinePins`] reads both dial contacts on demand.  The binary uses it to
//! seed the decoder with the resting levels at boot, and as a polling
//! fallback when GPIO interrupts are unavailable.

use embedded_hal::digital::InputPin;

use crate::app::decoder::DialDecoder;
use crate::dial::debounce::FilterOutcome;
use crate::dial::{LineId, LogicalLevel, Millis};

/// A contact could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalError(pub LineId);

impl core::fmt::Display for SignalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "failed to read {} line", self.0)
    }
}

impl std::error::Error for SignalError {}

/// The PULSE and SHUNT inputs as one unit.
pub struct LinePins<P, S> {
    pulse: P,
    shunt: S,
}

impl<P: InputPin, S: InputPin> LinePins<P, S> {
    pub fn new(pulse: P, shunt: S) -> Self {
        Self { pulse, shunt }
    }

    /// Current raw level of `line`.
    pub fn read(&mut self, line: LineId) -> Result<LogicalLevel, SignalError> {
        let high = match line {
            LineId::Pulse => self.pulse.is_high().map_err(|_| SignalError(line))?,
            LineId::Shunt => self.shunt.is_high().map_err(|_| SignalError(line))?,
        };
        Ok(LogicalLevel::from(high))
    }

    /// Read both lines and seed the decoder's filters with them.
    ///
    /// Returns the levels in [`LineId::ALL`] order.
    pub fn seed_decoder(
        &mut self,
        decoder: &DialDecoder,
    ) -> Result<[LogicalLevel; LineId::COUNT], SignalError> {
        let mut levels = [LogicalLevel::High; LineId::COUNT];
        for line in LineId::ALL {
            let level = self.read(line)?;
            decoder.seed(line, level);
            levels[line.index()] = level;
        }
        Ok(levels)
    }

    /// Sample both lines and forward them to the decoder.
    ///
    /// Every sample is offered to the filter; a level that was suppressed
    /// inside its stability window is offered again on the next poll.
    /// Returns the number of accepted transitions.
    pub fn poll_edges(&mut self, decoder: &DialDecoder, now: Millis) -> Result<usize, SignalError> {
        let mut accepted = 0;
        for line in LineId::ALL {
            let level = self.read(line)?;
            if let FilterOutcome::Accepted(_) = decoder.on_line_edge(line, level, now) {
                accepted += 1;
            }
        }
        Ok(accepted)
    }
}
