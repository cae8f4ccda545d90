//! Firmware binary size regression check.
//!
//! Compiling SoftAP support out of the Wi-Fi stack must save a
//! target-specific number of bytes. Given the two already-built images,
//! the check computes `size(with) - size(without)` and fails unless the
//! delta strictly exceeds the target's threshold. The measured delta is
//! always recorded as a performance metric, pass or fail.

pub mod sdkconfig;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::metrics::MetricsSink;

pub use sdkconfig::{Sdkconfig, SdkconfigError, SdkconfigValue};

/// sdkconfig flag that controls SoftAP support.
pub const SOFTAP_SUPPORT_KEY: &str = "ESP_WIFI_SOFTAP_SUPPORT";

/// Metric name consumed by external reporting.
pub const SOFTAP_SIZE_METRIC: &str = "wifi_disable_softap_save_bin_size";

/// Threshold for targets without a dedicated table entry.
pub const DEFAULT_THRESHOLD: u64 = 45_000;

/// Errors from the size check.
#[derive(Debug, Error)]
pub enum SizeCheckError {
    /// A firmware image could not be inspected.
    #[error("Failed to read firmware image '{path}': {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The measured delta did not exceed the threshold.
    #[error(
        "Binary size delta is {delta} bytes, expected more than {threshold} bytes for target '{target}'"
    )]
    DeltaTooSmall {
        delta: i64,
        threshold: u64,
        target: String,
    },

    /// An sdkconfig did not describe the expected build variant.
    #[error("sdkconfig '{path}' has {key}={actual}, expected {expected}")]
    VariantMismatch {
        path: PathBuf,
        key: String,
        expected: bool,
        actual: bool,
    },

    /// An sdkconfig file could not be loaded.
    #[error(transparent)]
    Sdkconfig(#[from] SdkconfigError),
}

/// Minimum expected size savings per target, with a default fallback.
///
/// Immutable after construction; defined once at load time from the
/// built-in table or from configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdTable {
    entries: HashMap<String, u64>,
    default: u64,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        // The S2/S3 Wi-Fi libraries carry a smaller SoftAP footprint
        // (~45K there, ~50K elsewhere).
        let entries = HashMap::from([
            ("esp32s2".to_string(), 40_000),
            ("esp32s3".to_string(), 40_000),
        ]);

        Self {
            entries,
            default: DEFAULT_THRESHOLD,
        }
    }
}

impl ThresholdTable {
    /// Build a table from explicit entries and a default.
    pub fn new(entries: HashMap<String, u64>, default: u64) -> Self {
        Self { entries, default }
    }

    /// Threshold for a target, falling back to the default entry for any
    /// target not present.
    pub fn threshold_for(&self, target: &str) -> u64 {
        self.entries.get(target).copied().unwrap_or(self.default)
    }
}

/// Outcome of a passing size check.
#[derive(Debug, Clone, Serialize)]
pub struct SizeDelta {
    pub target: String,
    pub with_softap_bytes: u64,
    pub without_softap_bytes: u64,
    pub delta_bytes: i64,
    pub threshold_bytes: u64,
}

/// Verify that an sdkconfig describes the expected SoftAP variant.
pub fn verify_softap_variant(
    sdkconfig_path: &Path,
    expect_softap: bool,
) -> Result<(), SizeCheckError> {
    let cfg = Sdkconfig::load(sdkconfig_path)?;
    let actual = cfg.bool_flag(SOFTAP_SUPPORT_KEY);

    if actual == expect_softap {
        Ok(())
    } else {
        Err(SizeCheckError::VariantMismatch {
            path: sdkconfig_path.to_path_buf(),
            key: SOFTAP_SUPPORT_KEY.to_string(),
            expected: expect_softap,
            actual,
        })
    }
}

/// Compare the two firmware images and enforce the size budget.
///
/// The delta is recorded under [`SOFTAP_SIZE_METRIC`] before the threshold
/// comparison, so external reporting sees the measurement even when the
/// check fails. Strict inequality: a delta equal to the threshold fails.
pub fn check_softap_size_delta(
    with_softap: &Path,
    without_softap: &Path,
    target: &str,
    thresholds: &ThresholdTable,
    metrics: &MetricsSink,
) -> Result<SizeDelta, SizeCheckError> {
    let with_bytes = image_size(with_softap)?;
    let without_bytes = image_size(without_softap)?;
    let delta = with_bytes as i64 - without_bytes as i64;

    metrics.log_performance(SOFTAP_SIZE_METRIC, format!("{delta} bytes"));

    let threshold = thresholds.threshold_for(target);
    if delta > threshold as i64 {
        info!(target, delta, threshold, "size budget ok");
        Ok(SizeDelta {
            target: target.to_string(),
            with_softap_bytes: with_bytes,
            without_softap_bytes: without_bytes,
            delta_bytes: delta,
            threshold_bytes: threshold,
        })
    } else {
        Err(SizeCheckError::DeltaTooSmall {
            delta,
            threshold,
            target: target.to_string(),
        })
    }
}

fn image_size(path: &Path) -> Result<u64, SizeCheckError> {
    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| SizeCheckError::Image {
            path: path.to_path_buf(),
            source: e,
        })
}
