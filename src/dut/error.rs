//! Console-specific error types.
//!
//! Defines error types for serial console operations, separate from
//! check-level errors to maintain clean separation of concerns.

use thiserror::Error;

/// Errors that can occur while reading the device console.
#[derive(Debug, Error)]
pub enum ConsoleError {
    /// The specified serial port was not found on the system.
    #[error("Serial port not found: {0}")]
    NotFound(String),

    /// An I/O error occurred during console operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Console configuration failed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The expected log pattern did not appear within the timeout window.
    #[error("Pattern '{pattern}' not seen on the console within {timeout:?}")]
    ExpectTimeout {
        pattern: String,
        timeout: std::time::Duration,
    },

    /// A serialport-specific error occurred.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl ConsoleError {
    /// Create a NotFound error from a port name.
    pub fn not_found(port_name: impl Into<String>) -> Self {
        Self::NotFound(port_name.into())
    }

    /// Create a Config error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an ExpectTimeout error from a pattern and the elapsed window.
    pub fn expect_timeout(pattern: impl Into<String>, timeout: std::time::Duration) -> Self {
        Self::ExpectTimeout {
            pattern: pattern.into(),
            timeout,
        }
    }
}
