//! Parser for ESP-IDF `sdkconfig` files.
//!
//! The build bakes a key/value configuration set into every firmware
//! image; the harness reads the build's `sdkconfig` file to confirm which
//! variant it is looking at before trusting a size comparison.
//!
//! Format, line oriented:
//! - `CONFIG_FOO=y`: boolean true
//! - `CONFIG_FOO="bar"`: string
//! - `CONFIG_FOO=123`: integer
//! - `# CONFIG_FOO is not set`: boolean false
//! - anything else starting with `#`: comment

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while loading an sdkconfig file.
#[derive(Debug, Error)]
pub enum SdkconfigError {
    /// Failed to read the file.
    #[error("Failed to read sdkconfig '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A single sdkconfig value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkconfigValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

/// A parsed sdkconfig, keyed without the `CONFIG_` prefix.
#[derive(Debug, Clone, Default)]
pub struct Sdkconfig {
    values: HashMap<String, SdkconfigValue>,
}

impl Sdkconfig {
    /// Load and parse an sdkconfig file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SdkconfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| SdkconfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(Self::parse(&content))
    }

    /// Parse sdkconfig text. Unparseable lines are skipped.
    pub fn parse(content: &str) -> Self {
        let mut values = HashMap::new();

        for line in content.lines() {
            let line = line.trim();

            if let Some(rest) = line.strip_prefix("# ") {
                // `# CONFIG_FOO is not set` records an explicit false.
                if let Some(key) = rest.strip_suffix(" is not set") {
                    values.insert(normalize_key(key), SdkconfigValue::Bool(false));
                }
                continue;
            }

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, raw)) = line.split_once('=') else {
                continue;
            };

            values.insert(normalize_key(key), parse_value(raw));
        }

        Self { values }
    }

    /// Look up a value; the `CONFIG_` prefix is optional.
    pub fn get(&self, key: &str) -> Option<&SdkconfigValue> {
        self.values.get(&normalize_key(key))
    }

    /// Boolean view of a flag. Missing keys read as false, matching how
    /// the build system treats unset options.
    pub fn bool_flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some(SdkconfigValue::Bool(true)))
    }
}

fn normalize_key(key: &str) -> String {
    key.trim()
        .strip_prefix("CONFIG_")
        .unwrap_or(key.trim())
        .to_string()
}

fn parse_value(raw: &str) -> SdkconfigValue {
    let raw = raw.trim();

    if raw == "y" {
        return SdkconfigValue::Bool(true);
    }
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        return SdkconfigValue::Str(raw[1..raw.len() - 1].to_string());
    }
    if let Ok(n) = raw.parse::<i64>() {
        return SdkconfigValue::Int(n);
    }
    SdkconfigValue::Str(raw.to_string())
}
