//! Utility functions for hardware testing.
//!
//! Provides helpers for reading the device-under-test setup from the
//! environment and skipping cleanly when no hardware is attached.

#![allow(dead_code)]

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dut_harness::dut::SerialSettings;

/// Device-under-test configuration from environment.
pub struct DutTestConfig {
    pub port_name: String,
    pub baud_rate: u32,
    pub target: String,
}

impl DutTestConfig {
    /// Get test configuration from environment variables.
    pub fn from_env() -> Option<Self> {
        let port_name = env::var("DUT_PORT").ok()?;
        let baud_rate = env::var("DUT_BAUD")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(115_200);
        let target = env::var("DUT_TARGET").unwrap_or_else(|_| "esp32".to_string());

        Some(DutTestConfig {
            port_name,
            baud_rate,
            target,
        })
    }

    /// Serial settings for opening the device console.
    pub fn serial_settings(&self) -> SerialSettings {
        SerialSettings {
            baud_rate: self.baud_rate,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// Firmware image pair for the size budget test, from environment.
pub struct SizeTestConfig {
    pub with_softap: PathBuf,
    pub without_softap: PathBuf,
    pub sdkconfig_with: Option<PathBuf>,
    pub sdkconfig_without: Option<PathBuf>,
}

impl SizeTestConfig {
    /// Get image paths from environment variables.
    pub fn from_env() -> Option<Self> {
        let with_softap = PathBuf::from(env::var("DUT_BIN_WITH_SOFTAP").ok()?);
        let without_softap = PathBuf::from(env::var("DUT_BIN_WITHOUT_SOFTAP").ok()?);

        Some(SizeTestConfig {
            with_softap,
            without_softap,
            sdkconfig_with: env::var("DUT_SDKCONFIG_WITH").ok().map(PathBuf::from),
            sdkconfig_without: env::var("DUT_SDKCONFIG_WITHOUT").ok().map(PathBuf::from),
        })
    }
}

/// Skip test with a clear message if hardware is not available.
pub fn skip_without_device() -> Option<DutTestConfig> {
    let config = DutTestConfig::from_env();
    if config.is_none() {
        println!("⏭️  Skipping hardware test: DUT_PORT not set");
        println!("   Set DUT_PORT=/dev/ttyUSB0 (or COM3) to run hardware tests");
    }
    config
}

/// Skip test with a clear message if the firmware image pair is not available.
pub fn skip_without_images() -> Option<SizeTestConfig> {
    let config = SizeTestConfig::from_env();
    if config.is_none() {
        println!("⏭️  Skipping size test: DUT_BIN_WITH_SOFTAP / DUT_BIN_WITHOUT_SOFTAP not set");
    }
    config
}
