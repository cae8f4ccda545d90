//! Performance metric emission.
//!
//! External reporting scrapes `[Performance][<name>]: <value>` lines from
//! the harness log. A sink can additionally append each metric as a JSON
//! line to a file for machine consumption.

use std::fmt::Display;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use serde_json::json;
use tracing::{info, warn};

/// Sink for named performance metrics.
#[derive(Debug, Default)]
pub struct MetricsSink {
    file: Option<Mutex<File>>,
}

impl MetricsSink {
    /// A sink that only writes to the log.
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that also appends JSON lines to `path`.
    pub fn with_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path.as_ref())?;

        Ok(Self {
            file: Some(Mutex::new(file)),
        })
    }

    /// Record one named metric.
    ///
    /// File write failures are logged and swallowed; a metrics problem must
    /// not fail a hardware check.
    pub fn log_performance(&self, name: &str, value: impl Display) {
        let value = value.to_string();
        info!("[Performance][{name}]: {value}");

        if let Some(file) = &self.file {
            let record = json!({
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "name": name,
                "value": value,
            });

            let mut file = match file.lock() {
                Ok(f) => f,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Err(e) = writeln!(file, "{record}") {
                warn!(name, error = %e, "failed to append metric record");
            }
        }
    }
}
