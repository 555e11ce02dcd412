//! Configuration flow: provisioning JSON → NVS store → decoder behaviour.

use super::mock_hw::DialHarness;

use rotarydial::adapters::nvs::NvsConfigStore;
use rotarydial::app::decoder::DialDecoder;
use rotarydial::app::events::DialEvent;
use rotarydial::app::ports::{ConfigError, ConfigPort};
use rotarydial::config::DialConfig;
use rotarydial::dial::LogicalLevel;
use rotarydial::Error;

#[test]
fn provisioned_config_survives_store_and_drives_decoder() {
    let json = r#"{
        "pulse_debounce_ms": 10,
        "shunt_debounce_ms": 30,
        "dial_timeout_ms": 1000,
        "safety_timeout_multiplier": 3,
        "no_pulse_timeout_ms": 1500,
        "shunt_active_level": "High",
        "pulse_count_level": "Low",
        "poll_interval_ms": 5,
        "number_gap_ms": 2000
    }"#;
    let cfg = DialConfig::from_json(json).unwrap();
    assert_eq!(cfg.safety_timeout_ms(), 3000);

    let store = NvsConfigStore::new().unwrap();
    store.save(&cfg).unwrap();
    let loaded = store.load().unwrap();
    assert_eq!(loaded, cfg);

    // Inverted wiring: shunt goes HIGH while dialing, pulses count on LOW.
    let mut h = DialHarness::with_config(loaded);
    h.dial(3);
    h.dial(0);
    assert_eq!(h.sink.digits(), vec![3, 0]);
}

#[test]
fn invalid_provisioning_is_rejected_before_storage() {
    let store = NvsConfigStore::new().unwrap();
    let bad = DialConfig {
        dial_timeout_ms: 10,
        ..DialConfig::default()
    };
    assert!(matches!(store.save(&bad), Err(ConfigError::ValidationFailed(_))));
    assert!(matches!(
        DialDecoder::try_new(bad),
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
    assert_eq!(store.load(), Ok(DialConfig::default()));
}

#[test]
fn corrupted_store_falls_back_to_defaults() {
    let store = NvsConfigStore::with_blob(vec![0x80, 0x80, 0x80]);
    let cfg = store.load().unwrap_or_default();
    assert_eq!(cfg, DialConfig::default());
}

#[test]
fn tighter_no_pulse_window_is_honoured() {
    let cfg = DialConfig {
        no_pulse_timeout_ms: 500,
        ..DialConfig::default()
    };
    let mut h = DialHarness::with_config(cfg);
    h.pull_off();
    h.advance(400);
    assert_eq!(h.sink.events, vec![DialEvent::DialStarted, DialEvent::DialStopped]);
}

#[test]
fn polarity_levels_round_trip_through_json() {
    let cfg = DialConfig {
        shunt_active_level: LogicalLevel::High,
        ..DialConfig::default()
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains(r#""shunt_active_level":"High""#));
    assert_eq!(DialConfig::from_json(&json).unwrap(), cfg);
}
