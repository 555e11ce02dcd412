//! Port traits: the hexagonal boundary between the decoder and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ DialDecoder (domain)
//! ```
//!
//! Driven adapters (clock, event sinks, config storage) implement these
//! traits.  The [`DialDecoder`](super::decoder::DialDecoder) consumes them
//! via generics, so the decoding core never touches hardware directly.

use crate::config::DialConfig;
use crate::dial::Millis;

use super::events::DialEvent;

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: hardware timer → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter.
pub trait ClockSource {
    fn now_ms(&self) -> Millis;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → console / logging)
// ───────────────────────────────────────────────────────────────

/// The decoder delivers [`DialEvent`]s through this port, always from the
/// polling context.  Adapters decide where they go (serial log, display,
/// a higher-level protocol).
pub trait EventSink {
    fn emit(&mut self, event: &DialEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists decoder configuration.
///
/// Implementations MUST validate before persisting; invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`DialConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<DialConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &DialConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations and config validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed deserialization.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
