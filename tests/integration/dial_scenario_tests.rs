//! End-to-end dialing scenarios: edges in, events out.
//!
//! Each test drives the public [`DialDecoder`] API through the harness in
//! `mock_hw` and asserts on the exact event stream.

use super::mock_hw::DialHarness;

use rotarydial::app::events::{Anomaly, DialEvent};
use rotarydial::dial::debounce::FilterOutcome;
use rotarydial::dial::resolver::DigitEvent;
use rotarydial::dial::{LineId, LogicalLevel};
use rotarydial::fsm::DialPhase;

fn digit(d: u8, pulses: u8) -> DialEvent {
    DialEvent::DigitDialed(DigitEvent { digit: d, pulse_count: pulses })
}

// ── Clean digits ─────────────────────────────────────────────

#[test]
fn dialing_one() {
    let mut h = DialHarness::new();
    h.dial(1);
    assert_eq!(
        h.sink.events,
        vec![
            DialEvent::DialStarted,
            DialEvent::PulseTick(1),
            DialEvent::DialStopped,
            digit(1, 1),
        ]
    );
    assert_eq!(h.decoder.phase(), DialPhase::Idle);
}

#[test]
fn dialing_five() {
    let mut h = DialHarness::new();
    h.dial(5);

    let ticks: Vec<u8> = h
        .sink
        .events
        .iter()
        .filter_map(|e| match e {
            DialEvent::PulseTick(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![1, 2, 3, 4, 5], "each pulse counted exactly once");
    assert_eq!(h.sink.events.last(), Some(&digit(5, 5)));
}

#[test]
fn dialing_zero_takes_ten_pulses() {
    let mut h = DialHarness::new();
    h.dial(0);
    assert_eq!(h.sink.events.last(), Some(&digit(0, 10)));
    assert_eq!(h.sink.count(&DialEvent::DialStopped), 1);
}

#[test]
fn consecutive_digits_are_independent() {
    let mut h = DialHarness::new();
    for d in [5, 5, 5, 0, 1, 9, 9] {
        h.dial(d);
    }
    assert_eq!(h.sink.digits(), vec![5, 5, 5, 0, 1, 9, 9]);

    let stats = h.decoder.stats();
    assert_eq!(stats.sessions_started, 7);
    assert_eq!(stats.digits_decoded, 7);
    assert_eq!(stats.safety_timeouts, 0);
}

#[test]
fn digits_dialed_while_poll_loop_stalls_are_kept() {
    let mut h = DialHarness::new();
    for _ in 0..3 {
        h.dial_stalled(0);
    }
    h.advance(10);

    assert_eq!(h.sink.digits(), vec![0, 0, 0]);
    assert_eq!(h.sink.count(&DialEvent::PulseTick(10)), 3);
    assert_eq!(h.decoder.stats().digits_decoded, 3);
    assert_eq!(h.decoder.stats().events_dropped, 0);
}

#[test]
fn long_stall_sheds_pulse_feedback_not_digits() {
    let mut h = DialHarness::new();
    for d in [1, 2, 3, 4, 5, 6, 7, 8, 9, 0] {
        h.dial_stalled(d);
    }
    h.advance(10);

    assert_eq!(h.sink.digits(), vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 0]);
    assert!(h.decoder.stats().events_dropped > 0);
    assert!(matches!(
        h.sink.events.last(),
        Some(DialEvent::AnomalyDetected(Anomaly::EventsDropped(_)))
    ));
}

// ── Spurious sessions and timeouts ───────────────────────────

#[test]
fn empty_session_emits_no_digit() {
    let mut h = DialHarness::new();
    h.pull_off();
    h.advance(300);
    h.release();
    h.advance(500);

    assert_eq!(h.sink.events, vec![DialEvent::DialStarted, DialEvent::DialStopped]);
    assert_eq!(h.decoder.stats().empty_sessions, 1);
}

#[test]
fn no_pulse_session_expires_quietly() {
    let mut h = DialHarness::new();
    h.pull_off();
    h.advance(2000);

    assert_eq!(h.decoder.phase(), DialPhase::Idle);
    assert_eq!(h.sink.events, vec![DialEvent::DialStarted, DialEvent::DialStopped]);
    assert_eq!(h.decoder.stats().no_pulse_timeouts, 1);

    // The late rest edge finds the decoder idle and is ignored.
    h.release();
    h.advance(100);
    assert_eq!(h.sink.events.len(), 2);
}

#[test]
fn stuck_shunt_with_three_pulses_times_out_with_digit() {
    let mut h = DialHarness::new();
    h.pull_off();
    for _ in 0..3 {
        h.pulse();
    }
    h.advance(3100);

    assert_eq!(h.decoder.phase(), DialPhase::Idle);
    let tail = &h.sink.events[h.sink.events.len() - 2..];
    assert_eq!(tail, &[DialEvent::SafetyTimeout, digit(3, 3)]);
    assert_eq!(h.sink.count(&DialEvent::SafetyTimeout), 1);
    assert_eq!(h.sink.count(&DialEvent::DialStopped), 0);

    // Shunt finally frees itself: no second digit.
    h.release();
    h.advance(500);
    assert_eq!(h.sink.digits(), vec![3]);

    // And the dial keeps working afterwards.
    h.dial(7);
    assert_eq!(h.sink.digits(), vec![3, 7]);
}

#[test]
fn slow_return_does_not_trip_safety_timeout() {
    let mut h = DialHarness::new();
    h.pull_off();
    h.pulse();
    h.advance(2500);
    h.pulse();
    h.release();
    h.advance(100);
    assert_eq!(h.sink.digits(), vec![2]);
    assert_eq!(h.sink.count(&DialEvent::SafetyTimeout), 0);
}

// ── Noise ────────────────────────────────────────────────────

#[test]
fn pulses_while_idle_are_ignored() {
    let mut h = DialHarness::new();
    for _ in 0..4 {
        h.pulse();
    }
    assert!(h.sink.events.is_empty());
    assert_eq!(h.decoder.session().pulse_count, 0);

    h.dial(2);
    assert_eq!(h.sink.digits(), vec![2]);
}

#[test]
fn contact_bounce_is_filtered() {
    let mut h = DialHarness::new();
    h.pull_off();
    for _ in 0..4 {
        h.bouncy_pulse();
    }
    // Chattering release.
    h.edge(LineId::Shunt, LogicalLevel::High);
    h.now += 5;
    assert_eq!(h.edge(LineId::Shunt, LogicalLevel::Low), FilterOutcome::Suppressed);
    h.now += 5;
    assert_eq!(h.edge(LineId::Shunt, LogicalLevel::High), FilterOutcome::Suppressed);
    h.advance(200);

    assert_eq!(h.sink.digits(), vec![4]);
    assert_eq!(h.sink.count(&DialEvent::DialStarted), 1);
    assert_eq!(h.decoder.stats().suppressed_edges, 4 * 6 + 2);
}

#[test]
fn repeated_level_is_a_no_op() {
    let mut h = DialHarness::new();
    h.pull_off();
    let before = h.decoder.stats();
    h.advance(100);
    assert_eq!(h.edge(LineId::Shunt, LogicalLevel::Low), FilterOutcome::Unchanged);
    assert_eq!(h.decoder.stats(), before);
    assert_eq!(h.sink.count(&DialEvent::DialStarted), 1);
}

#[test]
fn eleven_pulses_are_flagged_not_wrapped() {
    let mut h = DialHarness::new();
    h.pull_off();
    for _ in 0..11 {
        h.pulse();
    }
    h.release();
    h.advance(100);

    assert!(h.sink.digits().is_empty());
    assert_eq!(
        h.sink.events.last(),
        Some(&DialEvent::AnomalyDetected(Anomaly::PulseCountOutOfRange(11)))
    );
    assert_eq!(h.decoder.phase(), DialPhase::Idle);
}

// ── Clock roll-over ──────────────────────────────────────────

const DAY_MS: u32 = 24 * 60 * 60 * 1000;

#[test]
fn dial_works_after_weeks_of_idle() {
    let mut h = DialHarness::new();
    h.dial(3);
    h.jump(25 * DAY_MS);

    assert_eq!(h.edge(LineId::Shunt, LogicalLevel::Low), FilterOutcome::Accepted(LogicalLevel::Low));
    assert_eq!(h.decoder.phase(), DialPhase::Dialing);
    h.advance(150);
    h.pulse();
    h.release();
    h.advance(100);
    assert_eq!(h.sink.digits(), vec![3, 1]);
}

#[test]
fn dial_works_after_a_full_counter_period() {
    let mut h = DialHarness::new();
    h.dial(4);
    // Exactly 2^32 ms later the counter shows the same value again.
    h.jump(u32::MAX);
    h.jump(1);
    h.dial(2);
    assert_eq!(h.sink.digits(), vec![4, 2]);
}

#[test]
fn digit_spanning_counter_rollover() {
    let mut h = DialHarness::starting_at(Default::default(), u32::MAX - 250);
    h.dial(6);
    assert!(h.now < 10_000, "clock should have wrapped");
    assert_eq!(h.sink.digits(), vec![6]);
    assert_eq!(h.sink.count(&DialEvent::SafetyTimeout), 0);
}

#[test]
fn timeout_spanning_counter_rollover() {
    let mut h = DialHarness::starting_at(Default::default(), u32::MAX - 1000);
    h.pull_off();
    h.pulse();
    h.pulse();
    h.advance(3100);
    assert_eq!(h.sink.digits(), vec![2]);
    assert_eq!(h.sink.count(&DialEvent::SafetyTimeout), 1);
}
