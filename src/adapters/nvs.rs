//! NVS (Non-Volatile Storage) config adapter.
//!
//! Implements [`ConfigPort`] for the decoder.  The whole [`DialConfig`] is
//! stored as one postcard blob.
//!
//! - Validation: every field is range-checked before persistence and again
//!   after load.
//! - Atomic writes: ESP-IDF NVS commits are atomic per `nvs_commit()`.
//! - Host builds keep the blob in memory (dev/test only).

use log::info;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::DialConfig;

#[cfg(target_os = "espidf")]
use core::ffi::CStr;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
const CONFIG_NAMESPACE: &CStr = c"rotarydial";
#[cfg(target_os = "espidf")]
const CONFIG_KEY: &CStr = c"dialcfg";

#[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
const MAX_BLOB_SIZE: usize = 256;

pub struct NvsConfigStore {
    #[cfg(not(target_os = "espidf"))]
    blob: std::cell::RefCell<Option<Vec<u8>>>,
}

impl NvsConfigStore {
    /// Create the store and initialise NVS flash.
    ///
    /// Returns `Err(ConfigError::IoError)` if flash initialisation fails
    /// unrecoverably. On first boot or after a version mismatch the NVS
    /// partition is erased and re-initialised automatically.
    pub fn new() -> Result<Self, ConfigError> {
        #[cfg(target_os = "espidf")]
        {
            // SAFETY: nvs_flash_init / nvs_flash_erase are called from the
            // single main-task context before any other NVS access.
            let ret = unsafe { nvs_flash_init() };
            if ret == ESP_ERR_NVS_NO_FREE_PAGES as i32 || ret == ESP_ERR_NVS_NEW_VERSION_FOUND as i32 {
                warn!("NVS: erasing and re-initialising flash partition");
                if unsafe { nvs_flash_erase() } != ESP_OK as i32 {
                    return Err(ConfigError::IoError);
                }
                if unsafe { nvs_flash_init() } != ESP_OK as i32 {
                    return Err(ConfigError::IoError);
                }
            } else if ret != ESP_OK as i32 {
                return Err(ConfigError::IoError);
            }
            info!("NvsConfigStore: ESP-IDF NVS initialised");
        }

        #[cfg(not(target_os = "espidf"))]
        info!("NvsConfigStore: simulation backend");

        Ok(Self {
            #[cfg(not(target_os = "espidf"))]
            blob: std::cell::RefCell::new(None),
        })
    }

    /// Simulation store pre-loaded with a raw blob.
    #[cfg(not(target_os = "espidf"))]
    pub fn with_blob(bytes: Vec<u8>) -> Self {
        Self {
            blob: std::cell::RefCell::new(Some(bytes)),
        }
    }

    /// Open the config namespace, execute a closure with the handle, then close.
    #[cfg(target_os = "espidf")]
    fn with_nvs_handle<F, T>(write: bool, f: F) -> Result<T, i32>
    where
        F: FnOnce(nvs_handle_t) -> Result<T, i32>,
    {
        let mut handle: nvs_handle_t = 0;
        let mode = if write {
            nvs_open_mode_t_NVS_READWRITE
        } else {
            nvs_open_mode_t_NVS_READONLY
        };

        let ret = unsafe { nvs_open(CONFIG_NAMESPACE.as_ptr(), mode, &mut handle) };
        if ret != ESP_OK as i32 {
            return Err(ret);
        }

        let result = f(handle);
        unsafe {
            nvs_close(handle);
        }
        result
    }

    #[cfg(target_os = "espidf")]
    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        let result = Self::with_nvs_handle(false, |handle| {
            let mut size: usize = 0;

            // First call: get size
            let ret = unsafe {
                nvs_get_blob(handle, CONFIG_KEY.as_ptr(), core::ptr::null_mut(), &mut size)
            };
            if ret != ESP_OK as i32 {
                return Err(ret);
            }
            if size == 0 || size > MAX_BLOB_SIZE {
                return Err(ESP_ERR_NVS_INVALID_LENGTH as i32);
            }

            let mut buf = vec![0u8; size];
            let ret = unsafe {
                nvs_get_blob(handle, CONFIG_KEY.as_ptr(), buf.as_mut_ptr() as *mut _, &mut size)
            };
            if ret != ESP_OK as i32 {
                return Err(ret);
            }
            Ok(buf)
        });

        match result {
            Ok(bytes) => Ok(Some(bytes)),
            // A namespace that was never written cannot be opened read-only.
            Err(e) if e == ESP_ERR_NVS_NOT_FOUND as i32 => Ok(None),
            Err(e) => {
                warn!("NvsConfigStore: NVS read error {}", e);
                Err(ConfigError::IoError)
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self) -> Result<Option<Vec<u8>>, ConfigError> {
        Ok(self.blob.borrow().clone())
    }

    #[cfg(target_os = "espidf")]
    fn write_blob(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        let result = Self::with_nvs_handle(true, |handle| {
            let ret = unsafe {
                nvs_set_blob(handle, CONFIG_KEY.as_ptr(), bytes.as_ptr() as *const _, bytes.len())
            };
            if ret != ESP_OK as i32 {
                return Err(ret);
            }
            let ret = unsafe { nvs_commit(handle) };
            if ret != ESP_OK as i32 {
                return Err(ret);
            }
            Ok(())
        });
        result.map_err(|e| {
            warn!("NvsConfigStore: NVS write error {}", e);
            ConfigError::IoError
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_blob(&self, bytes: &[u8]) -> Result<(), ConfigError> {
        *self.blob.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

impl ConfigPort for NvsConfigStore {
    fn load(&self) -> Result<DialConfig, ConfigError> {
        match self.read_blob()? {
            Some(bytes) => {
                let cfg = DialConfig::from_bytes(&bytes)?;
                info!("NvsConfigStore: loaded config ({} bytes)", bytes.len());
                Ok(cfg)
            }
            None => {
                info!("NvsConfigStore: no stored config, using defaults");
                Ok(DialConfig::default())
            }
        }
    }

    fn save(&self, config: &DialConfig) -> Result<(), ConfigError> {
        config.validate()?;
        let bytes = config.to_bytes()?;
        if bytes.len() > MAX_BLOB_SIZE {
            return Err(ConfigError::IoError);
        }
        self.write_blob(&bytes)?;
        info!("NvsConfigStore: config saved ({} bytes)", bytes.len());
        Ok(())
    }
}
