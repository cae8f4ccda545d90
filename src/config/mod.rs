//! Configuration module for the DUT harness.
//!
//! This module provides TOML-based configuration with environment variable
//! overrides.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of priority):
//!
//! 1. `DUT_HARNESS_CONFIG` environment variable (explicit path)
//! 2. `./dut-harness.toml` (current directory)
//! 3. The platform config directory (XDG on Linux/macOS, APPDATA on Windows)
//! 4. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! Any configuration value can be overridden via environment variables.
//! The pattern is: `DUT_HARNESS_<SECTION>_<KEY>`
//!
//! Examples:
//! - `DUT_HARNESS_SERIAL_PORT=/dev/ttyUSB0`
//! - `DUT_HARNESS_SERIAL_BAUD=921600`
//! - `DUT_HARNESS_SIZE_CHECK_DEFAULT_THRESHOLD=50000`
//!
//! The hardware test suite's `DUT_PORT` and `DUT_BAUD` variables are also
//! honored.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{resolve_config_path, ConfigLoader};
pub use schema::{Config, HttpConfig, LogFormat, LoggingConfig, SerialConfig, SizeCheckConfig};
