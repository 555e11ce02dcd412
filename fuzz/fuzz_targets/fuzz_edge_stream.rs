//! Fuzz target: `DialDecoder::on_line_edge` / `DialDecoder::tick`
//!
//! Each input byte is one step: bit 7 selects edge or tick, bit 6 the
//! line, bit 5 the level, and the low five bits the time advance (×8 ms).
//! Asserts the decoder never panics, never yields a digit outside 0..=9,
//! and always returns to idle once the clock runs past every timeout.
//!
//! cargo fuzz run fuzz_edge_stream

#![no_main]

use libfuzzer_sys::fuzz_target;
use rotarydial::app::decoder::DialDecoder;
use rotarydial::app::events::DialEvent;
use rotarydial::app::ports::EventSink;
use rotarydial::config::DialConfig;
use rotarydial::dial::{LineId, LogicalLevel};
use rotarydial::fsm::DialPhase;

struct DigitCheck;

impl EventSink for DigitCheck {
    fn emit(&mut self, event: &DialEvent) {
        if let DialEvent::DigitDialed(d) = event {
            assert!(d.digit <= 9, "digit out of range: {}", d.digit);
            assert!((1..=10).contains(&d.pulse_count));
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let decoder = DialDecoder::new(DialConfig::default());
    let mut sink = DigitCheck;

    // Start near the roll-over point so wrapping paths get exercised.
    let mut now: u32 = u32::MAX - 2_000;
    for &b in data {
        now = now.wrapping_add(u32::from(b & 0x1f) * 8);
        if b & 0x80 == 0 {
            let line = if b & 0x40 == 0 { LineId::Pulse } else { LineId::Shunt };
            decoder.on_line_edge(line, LogicalLevel::from(b & 0x20 != 0), now);
        } else {
            decoder.tick(now, &mut sink);
        }
    }

    decoder.tick(now.wrapping_add(10_000), &mut sink);
    assert_eq!(decoder.phase(), DialPhase::Idle);
});
