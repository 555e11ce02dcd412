//! Mock dial hardware for integration tests.
//!
//! [`DialHarness`] plays the part of both the GPIO ISRs and the poll loop:
//! it injects edges with a simulated clock and ticks the decoder at the
//! configured poll interval, recording every event the decoder emits.

use rotarydial::app::decoder::DialDecoder;
use rotarydial::app::events::DialEvent;
use rotarydial::app::ports::EventSink;
use rotarydial::config::DialConfig;
use rotarydial::dial::debounce::FilterOutcome;
use rotarydial::dial::{LineId, LogicalLevel, Millis};

// ── Recording sink ────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<DialEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn digits(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                DialEvent::DigitDialed(d) => Some(d.digit),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: &DialEvent) -> usize {
        self.events.iter().filter(|e| *e == wanted).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &DialEvent) {
        self.events.push(*event);
    }
}

// ── DialHarness ───────────────────────────────────────────────

pub struct DialHarness {
    pub decoder: DialDecoder,
    pub sink: RecordingSink,
    pub now: Millis,
    shunt_active: LogicalLevel,
    pulse_counted: LogicalLevel,
    poll_ms: u32,
}

#[allow(dead_code)]
impl DialHarness {
    pub fn new() -> Self {
        Self::with_config(DialConfig::default())
    }

    pub fn with_config(config: DialConfig) -> Self {
        Self::starting_at(config, 0)
    }

    /// Harness whose clock starts at `now` (for roll-over tests).
    pub fn starting_at(config: DialConfig, now: Millis) -> Self {
        let shunt_active = config.shunt_active_level;
        let pulse_counted = config.pulse_count_level;
        let poll_ms = config.poll_interval_ms;
        let decoder = DialDecoder::try_new(config).expect("valid config");
        decoder.seed(LineId::Shunt, shunt_active.inverted());
        decoder.seed(LineId::Pulse, pulse_counted.inverted());
        Self {
            decoder,
            sink: RecordingSink::default(),
            now,
            shunt_active,
            pulse_counted,
            poll_ms,
        }
    }

    /// Inject one raw edge at the current time.
    pub fn edge(&mut self, line: LineId, level: LogicalLevel) -> FilterOutcome {
        self.decoder.on_line_edge(line, level, self.now)
    }

    /// Let time pass, ticking the decoder like the poll loop would.
    pub fn advance(&mut self, ms: u32) {
        let mut remaining = ms;
        while remaining > 0 {
            let step = remaining.min(self.poll_ms);
            self.now = self.now.wrapping_add(step);
            remaining -= step;
            self.decoder.tick(self.now, &mut self.sink);
        }
    }

    /// Let time pass with the poll loop stalled (no ticks).
    pub fn stall(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }

    /// Jump the clock forward and run a single tick, as after a long idle
    /// stretch observed only at its end.
    pub fn jump(&mut self, ms: u32) {
        self.stall(ms);
        self.decoder.tick(self.now, &mut self.sink);
    }

    /// Finger in the hole, dial pulled off normal.
    pub fn pull_off(&mut self) {
        self.edge(LineId::Shunt, self.shunt_active);
        self.advance(150);
    }

    /// One clean pulse at 10 pps (40 ms counted, 60 ms rest).
    pub fn pulse(&mut self) {
        self.edge(LineId::Pulse, self.pulse_counted);
        self.advance(40);
        self.edge(LineId::Pulse, self.pulse_counted.inverted());
        self.advance(60);
    }

    /// One pulse whose contact chatters on both edges.
    pub fn bouncy_pulse(&mut self) {
        let counted = self.pulse_counted;
        let rest = counted.inverted();
        self.edge(LineId::Pulse, counted);
        for level in [rest, counted, rest, counted] {
            self.now = self.now.wrapping_add(2);
            self.edge(LineId::Pulse, level);
        }
        self.advance(32);
        self.edge(LineId::Pulse, rest);
        for level in [counted, rest] {
            self.now = self.now.wrapping_add(3);
            self.edge(LineId::Pulse, level);
        }
        self.advance(54);
    }

    /// Dial back at rest.
    pub fn release(&mut self) {
        self.edge(LineId::Shunt, self.shunt_active.inverted());
        self.advance(20);
    }

    /// A complete, clean dial of `digit`.
    pub fn dial(&mut self, digit: u8) {
        let pulses = if digit == 0 { 10 } else { digit };
        self.pull_off();
        for _ in 0..pulses {
            self.pulse();
        }
        self.release();
        self.advance(300);
    }

    /// A complete dial of `digit` while the poll loop is stalled.
    pub fn dial_stalled(&mut self, digit: u8) {
        let pulses = if digit == 0 { 10 } else { digit };
        self.edge(LineId::Shunt, self.shunt_active);
        self.stall(150);
        for _ in 0..pulses {
            self.edge(LineId::Pulse, self.pulse_counted);
            self.stall(40);
            self.edge(LineId::Pulse, self.pulse_counted.inverted());
            self.stall(60);
        }
        self.edge(LineId::Shunt, self.shunt_active.inverted());
        self.stall(300);
    }
}
