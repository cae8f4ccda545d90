//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "DUT_HARNESS";

/// Config file name
const CONFIG_FILE_NAME: &str = "dut-harness.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "DUT_HARNESS_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `DUT_HARNESS_CONFIG` environment variable (explicit path)
    /// 2. `./dut-harness.toml` (current directory)
    /// 3. The platform config directory (XDG on Linux/macOS, APPDATA on Windows)
    /// 4. Built-in defaults (no file required)
    ///
    /// Environment variables can override any config file values.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = if let Some(ref path) = config_path {
            load_from_file(path)?
        } else {
            Config::default()
        };

        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Still apply env overrides even with defaults
        let _ = apply_env_overrides(&mut config);

        Self {
            config_path: None,
            config,
        }
    }

    /// Get the loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Consume the loader and return the configuration.
    pub fn into_config(self) -> Config {
        self.config
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    // 1. Explicit environment variable
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. Current directory
    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    // 3. Platform config directory
    if let Some(dirs) = ProjectDirs::from("", "", "dut-harness") {
        let app_config = dirs.config_dir().join(CONFIG_FILE_NAME);
        if app_config.exists() {
            return Some(app_config);
        }
    }

    // 4. No config file found - will use defaults
    None
}

/// Load configuration from a file.
fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Apply environment variable overrides to the configuration.
///
/// Environment variables follow the pattern: `DUT_HARNESS_<SECTION>_<KEY>`
/// For example:
/// - `DUT_HARNESS_SERIAL_PORT=/dev/ttyUSB0`
/// - `DUT_HARNESS_SERIAL_BAUD=921600`
/// - `DUT_HARNESS_HTTP_REQUEST_TIMEOUT_SECS=30`
///
/// Legacy environment variables are also supported:
/// - `DUT_PORT`, `DUT_BAUD` (used by the hardware test suite)
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    // Serial overrides
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_SERIAL_PORT")) {
        config.serial.port = Some(val);
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_SERIAL_BAUD")) {
        config.serial.baud = parse_env(&format!("{ENV_PREFIX}_SERIAL_BAUD"), &val)?;
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_SERIAL_IP_TIMEOUT_SECS")) {
        config.serial.ip_timeout_secs =
            parse_env(&format!("{ENV_PREFIX}_SERIAL_IP_TIMEOUT_SECS"), &val)?;
    }

    // HTTP overrides
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_HTTP_REQUEST_TIMEOUT_SECS")) {
        config.http.request_timeout_secs =
            parse_env(&format!("{ENV_PREFIX}_HTTP_REQUEST_TIMEOUT_SECS"), &val)?;
    }
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_HTTP_READINESS_DEADLINE_SECS")) {
        config.http.readiness_deadline_secs =
            parse_env(&format!("{ENV_PREFIX}_HTTP_READINESS_DEADLINE_SECS"), &val)?;
    }

    // Size check overrides
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_SIZE_CHECK_DEFAULT_THRESHOLD")) {
        config.size_check.default_threshold =
            parse_env(&format!("{ENV_PREFIX}_SIZE_CHECK_DEFAULT_THRESHOLD"), &val)?;
    }

    // Logging overrides
    if let Ok(val) = std::env::var(format!("{ENV_PREFIX}_LOGGING_LEVEL")) {
        config.logging.level = val;
    }

    // Legacy variables used by the hardware test suite
    if let Ok(val) = std::env::var("DUT_PORT") {
        config.serial.port = Some(val);
    }
    if let Ok(val) = std::env::var("DUT_BAUD") {
        config.serial.baud = parse_env("DUT_BAUD", &val)?;
    }

    Ok(())
}

fn parse_env<T: std::str::FromStr>(var: &str, val: &str) -> ConfigResult<T>
where
    T::Err: std::fmt::Display,
{
    val.parse()
        .map_err(|e: T::Err| ConfigError::env_parse(var, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let loader = ConfigLoader::with_defaults();
        assert_eq!(loader.config().serial.baud, 115_200);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[serial]\nbaud = 74880\n").unwrap();

        let loader = ConfigLoader::load_from(&path).unwrap();
        assert_eq!(loader.config().serial.baud, 74_880);
        assert_eq!(loader.config_path, Some(path));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let result = ConfigLoader::load_from("/nonexistent/dut-harness.toml");
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_parse_error_from_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[serial\nbaud = oops").unwrap();

        let result = ConfigLoader::load_from(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
