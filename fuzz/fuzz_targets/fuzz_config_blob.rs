//! Fuzz target: `DialConfig::from_bytes`
//!
//! Arbitrary NVS blobs must either be rejected or decode to a config that
//! passes validation and builds a decoder.
//!
//! cargo fuzz run fuzz_config_blob

#![no_main]

use libfuzzer_sys::fuzz_target;
use rotarydial::app::decoder::DialDecoder;
use rotarydial::config::DialConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(cfg) = DialConfig::from_bytes(data) {
        assert!(cfg.validate().is_ok());
        assert!(cfg.safety_timeout_ms() > cfg.dial_timeout_ms);
        assert!(DialDecoder::try_new(cfg).is_ok());
    }
});
