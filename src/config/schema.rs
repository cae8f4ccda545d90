//! Configuration schema definitions.
//!
//! This module defines the structure of the configuration file using serde.
//! All configuration sections are defined here with appropriate defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::checks::ConnectSettings;
use crate::dut::SerialSettings;
use crate::size::{ThresholdTable, DEFAULT_THRESHOLD};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial console configuration
    pub serial: SerialConfig,
    /// HTTP probe configuration
    pub http: HttpConfig,
    /// Binary size check configuration
    pub size_check: SizeCheckConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Fixture timeouts derived from the serial and http sections.
    pub fn connect_settings(&self) -> ConnectSettings {
        ConnectSettings {
            ip_timeout: self.serial.ip_timeout(),
            request_timeout: self.http.request_timeout(),
            readiness_deadline: self.http.readiness_deadline(),
            readiness_interval: self.http.readiness_interval(),
        }
    }
}

/// Serial console configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Serial port the device console is attached to
    pub port: Option<String>,
    /// Baud rate of the console UART
    pub baud: u32,
    /// Timeout for a single underlying read, in milliseconds
    pub read_timeout_ms: u64,
    /// How long to wait for the device to report its IP, in seconds
    pub ip_timeout_secs: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: 115_200,
            read_timeout_ms: 100,
            ip_timeout_secs: 90,
        }
    }
}

impl SerialConfig {
    /// Serial line settings for opening the console.
    pub fn settings(&self) -> SerialSettings {
        SerialSettings {
            baud_rate: self.baud,
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }

    /// Get the IP wait timeout as Duration.
    pub fn ip_timeout(&self) -> Duration {
        Duration::from_secs(self.ip_timeout_secs)
    }
}

/// HTTP probe configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Wall-clock deadline for the web server to come up, in seconds
    pub readiness_deadline_secs: u64,
    /// Delay between readiness attempts, in milliseconds
    pub readiness_interval_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: 10,
            readiness_deadline_secs: 15,
            readiness_interval_ms: 1_000,
        }
    }
}

impl HttpConfig {
    /// Get the per-request timeout as Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the readiness deadline as Duration.
    pub fn readiness_deadline(&self) -> Duration {
        Duration::from_secs(self.readiness_deadline_secs)
    }

    /// Get the readiness interval as Duration.
    pub fn readiness_interval(&self) -> Duration {
        Duration::from_millis(self.readiness_interval_ms)
    }
}

/// Binary size check configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeCheckConfig {
    /// Threshold for targets without a dedicated entry, in bytes
    pub default_threshold: u64,
    /// Optional JSON-lines file for metric records
    pub metrics_file: Option<PathBuf>,
    /// Per-target thresholds, in bytes
    #[serde(default)]
    pub thresholds: HashMap<String, u64>,
}

impl Default for SizeCheckConfig {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_THRESHOLD,
            metrics_file: None,
            thresholds: HashMap::from([
                ("esp32s2".to_string(), 40_000),
                ("esp32s3".to_string(), 40_000),
            ]),
        }
    }
}

impl SizeCheckConfig {
    /// Build the immutable threshold table.
    pub fn threshold_table(&self) -> ThresholdTable {
        ThresholdTable::new(self.thresholds.clone(), self.default_threshold)
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Log format: "json", "pretty", "compact"
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format
    Json,
    /// Pretty format with colors
    #[default]
    Pretty,
    /// Compact format
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.serial.baud, 115_200);
        assert_eq!(config.serial.ip_timeout_secs, 90);
        assert_eq!(config.http.readiness_deadline_secs, 15);
        assert_eq!(config.size_check.default_threshold, 45_000);
    }

    #[test]
    fn test_connect_settings_derivation() {
        let config = Config::default();
        let settings = config.connect_settings();
        assert_eq!(settings.ip_timeout, Duration::from_secs(90));
        assert_eq!(settings.readiness_deadline, Duration::from_secs(15));
        assert_eq!(settings.readiness_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[serial]"));
        assert!(toml_str.contains("[http]"));
        assert!(toml_str.contains("[size_check]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [serial]
            port = "/dev/ttyUSB0"
            baud = 921600

            [size_check]
            default_threshold = 50000

            [size_check.thresholds]
            esp32c2 = 42000
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.serial.port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(config.serial.baud, 921_600);

        let table = config.size_check.threshold_table();
        assert_eq!(table.threshold_for("esp32c2"), 42_000);
        assert_eq!(table.threshold_for("esp32"), 50_000);
        // Defaults should still work
        assert_eq!(config.http.request_timeout_secs, 10);
    }
}
