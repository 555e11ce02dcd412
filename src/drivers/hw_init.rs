//! One-shot hardware initialization for the dial inputs.
//!
//! Configures both dial contacts as pulled-up inputs with any-edge
//! interrupts, and installs the ISRs that feed the shared decoder.  Uses
//! raw ESP-IDF sys calls.  Called once from `main()` before the poll loop
//! starts.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::app::decoder::DialDecoder;
use crate::dial::LineId;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrAttachFailed(LineId, i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrAttachFailed(line, rc) => {
                write!(f, "{} ISR handler attach failed (rc={})", line, rc)
            }
        }
    }
}

impl std::error::Error for HwInitError {}

// ── GPIO Inputs ───────────────────────────────────────────────

/// Configure both dial contacts as inputs with pull-ups and any-edge
/// interrupts (not yet routed to a handler).
#[cfg(target_os = "espidf")]
pub fn init_dial_inputs() -> Result<(), HwInitError> {
    for line in LineId::ALL {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pins::line_gpio(line),
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_ANYEDGE,
        };
        // SAFETY: Called once from main() before the poll loop; single-threaded.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!(
        "hw_init: dial inputs configured (PULSE=GPIO{}, SHUNT=GPIO{})",
        pins::ROTARY_PULSE_GPIO,
        pins::ROTARY_SHUNT_GPIO
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_dial_inputs() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): dial input config skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe from any context.
    (unsafe { gpio_get_level(pin) }) != 0
}

/// Idle level of a pulled-up contact.
#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

/// A configured dial input exposed through `embedded-hal`.
pub struct EspGpioInput {
    pin: i32,
}

impl EspGpioInput {
    pub fn for_line(line: LineId) -> Self {
        Self {
            pin: pins::line_gpio(line),
        }
    }

    pub fn pin(&self) -> i32 {
        self.pin
    }
}

impl ErrorType for EspGpioInput {
    type Error = Infallible;
}

impl InputPin for EspGpioInput {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(gpio_read(self.pin))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!gpio_read(self.pin))
    }
}

// ── GPIO ISR Service ──────────────────────────────────────────

/// Sample the line and the timer, then hand both to the decoder.
///
/// SAFETY: `arg` is the `&'static DialDecoder` registered in
/// [`install_dial_isrs`].
#[cfg(target_os = "espidf")]
unsafe fn forward_edge(line: LineId, arg: *mut core::ffi::c_void) {
    let decoder = unsafe { &*(arg as *const DialDecoder) };
    // SAFETY: esp_timer_get_time is a RTC counter read; safe in ISR context.
    let now_ms = (unsafe { esp_timer_get_time() } / 1_000) as u32;
    let level = gpio_read(pins::line_gpio(line));
    decoder.on_line_edge(line, level.into(), now_ms);
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn pulse_gpio_isr(arg: *mut core::ffi::c_void) {
    unsafe { forward_edge(LineId::Pulse, arg) };
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn shunt_gpio_isr(arg: *mut core::ffi::c_void) {
    unsafe { forward_edge(LineId::Shunt, arg) };
}

/// Install the per-pin GPIO ISR service and route both dial contacts to
/// `decoder`.  Call after [`init_dial_inputs`] and after seeding.
#[cfg(target_os = "espidf")]
pub fn install_dial_isrs(decoder: &'static DialDecoder) -> Result<(), HwInitError> {
    let arg = decoder as *const DialDecoder as *mut core::ffi::c_void;

    // SAFETY: gpio_install_isr_service is idempotent; ESP_ERR_INVALID_STATE
    // means it was already installed (acceptable).  The handlers only touch
    // the decoder through its critical section, and the decoder outlives
    // every interrupt because it is 'static.
    unsafe {
        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let handlers: [(LineId, unsafe extern "C" fn(*mut core::ffi::c_void)); 2] = [
            (LineId::Pulse, pulse_gpio_isr),
            (LineId::Shunt, shunt_gpio_isr),
        ];
        for (line, handler) in handlers {
            let gpio = pins::line_gpio(line);
            let ret = gpio_isr_handler_add(gpio, Some(handler), arg);
            if ret != ESP_OK as i32 {
                return Err(HwInitError::IsrAttachFailed(line, ret));
            }
            gpio_intr_enable(gpio);
        }
    }

    info!("hw_init: ISR service installed (pulse, shunt)");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn install_dial_isrs(_decoder: &'static DialDecoder) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): ISR service skipped");
    Ok(())
}
