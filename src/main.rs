//! Rotary dial decoder firmware main entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  GPIO ISRs / LinePins   LogEventSink   NvsConfigStore          │
//! │  (edges in)             (EventSink)    (ConfigPort)            │
//! │  Esp32Clock (ClockSource)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              DialDecoder (pure logic)                  │    │
//! │  │  Debounce · Dial FSM · Digit resolver                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_svc::hal::delay::FreeRtos;
use log::{info, warn};

use rotarydial::adapters::log_sink::LogEventSink;
use rotarydial::adapters::nvs::NvsConfigStore;
use rotarydial::adapters::signal::LinePins;
use rotarydial::adapters::time::Esp32Clock;
use rotarydial::app::decoder::DialDecoder;
use rotarydial::app::ports::{ClockSource, ConfigPort};
use rotarydial::config::DialConfig;
use rotarydial::diagnostics::RuntimeMetrics;
use rotarydial::dial::{LineId, elapsed_ms};
use rotarydial::drivers::hw_init::{self, EspGpioInput};
use rotarydial::fsm::DialPhase;
use rotarydial::pins;

/// How often the status line is logged.
const STATS_INTERVAL_MS: u32 = 60_000;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Rotary Dial Decoder v{}          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Load config from NVS (or defaults) ─────────────────
    let config = match NvsConfigStore::new() {
        Ok(nvs) => match nvs.load() {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("NVS config load failed ({}), using defaults", e);
                DialConfig::default()
            }
        },
        Err(e) => {
            warn!("NVS init failed ({}), running with defaults", e);
            DialConfig::default()
        }
    };
    info!(
        "Config: debounce pulse={}ms shunt={}ms | safety={}ms | no-pulse={}ms | poll={}ms",
        config.pulse_debounce_ms,
        config.shunt_debounce_ms,
        config.safety_timeout_ms(),
        config.no_pulse_timeout_ms,
        config.poll_interval_ms,
    );

    // ── 3. Decoder lives for the whole program ────────────────
    let decoder: &'static DialDecoder = Box::leak(Box::new(DialDecoder::try_new(config)?));
    let config = decoder.config();

    // ── 4. Inputs, seeding, interrupts ────────────────────────
    hw_init::init_dial_inputs()?;
    let mut lines = LinePins::new(
        EspGpioInput::for_line(LineId::Pulse),
        EspGpioInput::for_line(LineId::Shunt),
    );
    let levels = lines.seed_decoder(decoder)?;
    for line in LineId::ALL {
        info!("PINS | {} (GPIO{}) = {}", line, pins::line_gpio(line), levels[line.index()]);
    }

    let polling = match hw_init::install_dial_isrs(decoder) {
        Ok(()) => false,
        Err(e) => {
            warn!("ISR install failed ({}), falling back to polling", e);
            true
        }
    };

    let clock = Esp32Clock::new();
    let mut sink = LogEventSink::new(clock, config.number_gap_ms);
    let mut last_stats = clock.now_ms();

    info!("Ready. Dial a number.");

    // ── 5. Poll loop ──────────────────────────────────────────
    loop {
        let now = clock.now_ms();

        if polling {
            if let Err(e) = lines.poll_edges(decoder, now) {
                warn!("Line poll failed: {}", e);
            }
        }

        decoder.tick(now, &mut sink);
        sink.poll_number(decoder.phase() == DialPhase::Dialing);

        if elapsed_ms(now, last_stats) >= STATS_INTERVAL_MS {
            last_stats = now;
            let s = decoder.stats();
            let m = RuntimeMetrics::collect();
            info!(
                "STATS | up={}s | sessions={} digits={} empty={} | timeouts safety={} no_pulse={} | \
                 anomalies={} bounces={} dropped={} | heap={}/{}",
                m.uptime_secs,
                s.sessions_started,
                s.digits_decoded,
                s.empty_sessions,
                s.safety_timeouts,
                s.no_pulse_timeouts,
                s.anomalies,
                s.suppressed_edges,
                s.events_dropped,
                m.heap_free,
                m.heap_min_free,
            );
        }

        FreeRtos::delay_ms(config.poll_interval_ms);
    }
}
