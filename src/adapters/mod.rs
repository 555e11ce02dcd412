//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements   | Connects to                    |
//! |------------|--------------|--------------------------------|
//! | `log_sink` | EventSink    | Serial log output              |
//! | `nvs`      | ConfigPort   | NVS / in-memory store          |
//! | `signal`   | (SignalPort) | `embedded-hal` input pins      |
//! | `time`     | ClockSource  | ESP32 system timer             |

pub mod log_sink;
pub mod nvs;
pub mod signal;
pub mod time;
