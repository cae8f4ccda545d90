//! Core trait for the device-under-test console.
//!
//! Defines the `ConsoleSource` trait that allows both a real serial console
//! and a scripted mock to be used interchangeably by the checks.

use super::error::ConsoleError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on a single `read_line` wait inside `expect`, so the scan
/// can re-check the overall deadline at a reasonable cadence.
const EXPECT_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Serial line settings for the device console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialSettings {
    /// Baud rate (bits per second).
    pub baud_rate: u32,

    /// Read timeout for a single underlying read call.
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            read_timeout: Duration::from_millis(100),
        }
    }
}

/// Trait for line-oriented access to the device console.
///
/// This trait abstracts over the device's log stream, allowing both real
/// serial hardware and mock implementations for testing.
pub trait ConsoleSource: Send {
    /// Read the next complete log line, waiting up to `timeout`.
    ///
    /// Returns `Ok(None)` when no complete line arrived within the window;
    /// the caller decides whether that exhausts its own deadline.
    fn read_line(&mut self, timeout: Duration) -> Result<Option<String>, ConsoleError>;

    /// Get the name/path of this console for diagnostics.
    fn name(&self) -> &str;

    /// Scan the log stream until `pattern` matches a line or `timeout` elapses.
    ///
    /// Returns the capture groups of the first matching line (group 0 is the
    /// whole match). Lines read while waiting are echoed to the debug log.
    fn expect(&mut self, pattern: &Regex, timeout: Duration) -> Result<Vec<String>, ConsoleError> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return Err(ConsoleError::expect_timeout(pattern.as_str(), timeout));
            }

            let line = self.read_line(remaining.min(EXPECT_POLL_INTERVAL))?;
            let Some(line) = line else { continue };

            debug!(console = self.name(), "{line}");

            if let Some(caps) = pattern.captures(&line) {
                let groups = caps
                    .iter()
                    .map(|m| m.map(|m| m.as_str().to_string()).unwrap_or_default())
                    .collect();
                return Ok(groups);
            }
        }
    }
}
