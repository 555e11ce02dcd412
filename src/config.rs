//! Dial decoder configuration parameters
//!
//! All tunable timing and polarity parameters for the decoder.
//! Values can be overridden via NVS (non-volatile storage).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;
use crate::dial::{LineId, LogicalLevel};

/// Upper bound for the poll interval; timeouts tolerate this much slack.
pub const MAX_POLL_INTERVAL_MS: u32 = 50;

/// Upper bound for every timeout and gap, keeping the longest safety
/// window far below the half-range of the wrapping millisecond clock.
pub const MAX_TIMEOUT_MS: u32 = 60_000;

/// Core decoder configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialConfig {
    // --- Debounce ---
    /// Minimum stable time on the pulse switch (milliseconds)
    pub pulse_debounce_ms: u32,
    /// Minimum stable time on the shunt switch (milliseconds)
    pub shunt_debounce_ms: u32,

    // --- Completion ---
    /// Inter-pulse completion threshold (milliseconds)
    pub dial_timeout_ms: u32,
    /// Safety timeout = `dial_timeout_ms` × this multiplier
    pub safety_timeout_multiplier: u32,
    /// A session with no pulses is discarded after this long (milliseconds)
    pub no_pulse_timeout_ms: u32,

    // --- Polarity ---
    /// Shunt level while the dial is off-normal
    pub shunt_active_level: LogicalLevel,
    /// Pulse level that counts as one pulse
    pub pulse_count_level: LogicalLevel,

    // --- Timing ---
    /// Main loop poll interval (milliseconds)
    pub poll_interval_ms: u32,
    /// Idle gap after which collected digits form a complete number (milliseconds)
    pub number_gap_ms: u32,
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            // Debounce
            pulse_debounce_ms: 20,
            shunt_debounce_ms: 50,

            // Completion
            dial_timeout_ms: 1500,
            safety_timeout_multiplier: 2, // 3 s backstop
            no_pulse_timeout_ms: 2000,

            // Polarity (pull-ups: shunt pulls LOW while dialing)
            shunt_active_level: LogicalLevel::Low,
            pulse_count_level: LogicalLevel::High,

            // Timing
            poll_interval_ms: 10,
            number_gap_ms: 4000,
        }
    }
}

impl DialConfig {
    /// Time without any activity after which a dialing session is force-closed.
    pub fn safety_timeout_ms(&self) -> u32 {
        self.dial_timeout_ms
            .saturating_mul(self.safety_timeout_multiplier)
    }

    /// Debounce window for the given line.
    pub fn min_stable_ms(&self, line: LineId) -> u32 {
        match line {
            LineId::Pulse => self.pulse_debounce_ms,
            LineId::Shunt => self.shunt_debounce_ms,
        }
    }

    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=500).contains(&self.pulse_debounce_ms) {
            return Err(ConfigError::ValidationFailed(
                "pulse_debounce_ms must be 1–500",
            ));
        }
        if !(1..=500).contains(&self.shunt_debounce_ms) {
            return Err(ConfigError::ValidationFailed(
                "shunt_debounce_ms must be 1–500",
            ));
        }
        if self.dial_timeout_ms <= self.pulse_debounce_ms.max(self.shunt_debounce_ms) {
            return Err(ConfigError::ValidationFailed(
                "dial_timeout_ms must exceed both debounce windows",
            ));
        }
        if self.dial_timeout_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::ValidationFailed(
                "dial_timeout_ms must be at most 60000",
            ));
        }
        if !(2..=10).contains(&self.safety_timeout_multiplier) {
            return Err(ConfigError::ValidationFailed(
                "safety_timeout_multiplier must be 2–10",
            ));
        }
        if !(1..=MAX_TIMEOUT_MS).contains(&self.no_pulse_timeout_ms) {
            return Err(ConfigError::ValidationFailed(
                "no_pulse_timeout_ms must be 1–60000",
            ));
        }
        if self.number_gap_ms > MAX_TIMEOUT_MS {
            return Err(ConfigError::ValidationFailed(
                "number_gap_ms must be at most 60000",
            ));
        }
        if !(1..=MAX_POLL_INTERVAL_MS).contains(&self.poll_interval_ms) {
            return Err(ConfigError::ValidationFailed(
                "poll_interval_ms must be 1–50",
            ));
        }
        Ok(())
    }

    /// Compact binary encoding for NVS persistence.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        postcard::to_allocvec(self).map_err(|_| ConfigError::IoError)
    }

    /// Decode and validate a persisted blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        let cfg: Self = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a JSON provisioning document and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
