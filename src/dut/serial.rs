//! Serial console implementation.
//!
//! Wraps the `serialport` crate's `SerialPort` trait with our own
//! `ConsoleSource` trait for dependency injection and testing. The raw byte
//! stream is reassembled into text lines for the log-expectation checks.

use super::error::ConsoleError;
use super::traits::{ConsoleSource, SerialSettings};
use std::io::Read;
use std::time::{Duration, Instant};

/// Device console backed by a real serial port.
pub struct SerialConsole {
    /// The underlying serial port implementation.
    port: Box<dyn serialport::SerialPort>,
    /// The port name/path for identification.
    name: String,
    /// Bytes received but not yet consumed as a complete line.
    pending: Vec<u8>,
}

impl SerialConsole {
    /// Open the device console with the given settings.
    ///
    /// # Arguments
    /// * `port_name` - The system path to the serial port (e.g., "/dev/ttyUSB0" or "COM3")
    /// * `settings` - Serial line settings
    ///
    /// # Example
    /// ```no_run
    /// use dut_harness::dut::{SerialConsole, SerialSettings};
    ///
    /// let console = SerialConsole::open("/dev/ttyUSB0", SerialSettings::default())?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(port_name: &str, settings: SerialSettings) -> Result<Self, ConsoleError> {
        let port = serialport::new(port_name, settings.baud_rate)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| match e.kind() {
                serialport::ErrorKind::NoDevice
                | serialport::ErrorKind::Io(std::io::ErrorKind::NotFound) => {
                    ConsoleError::not_found(port_name)
                }
                serialport::ErrorKind::InvalidInput => ConsoleError::config(e.to_string()),
                _ => ConsoleError::Serial(e),
            })?;

        Ok(Self {
            port,
            name: port_name.to_string(),
            pending: Vec::new(),
        })
    }

    /// Open the device console with default settings (115200 baud).
    pub fn open_default(port_name: &str) -> Result<Self, ConsoleError> {
        Self::open(port_name, SerialSettings::default())
    }

    /// Pop the next complete line out of the pending buffer, if any.
    ///
    /// Strips the trailing `\n` (and `\r` for CRLF consoles); the rest of
    /// the line is decoded lossily since boot output may contain garbage
    /// bytes from the ROM bootloader.
    fn take_line(&mut self) -> Option<String> {
        let idx = memchr::memchr(b'\n', &self.pending)?;
        let mut line: Vec<u8> = self.pending.drain(..=idx).collect();
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}

impl ConsoleSource for SerialConsole {
    fn read_line(&mut self, timeout: Duration) -> Result<Option<String>, ConsoleError> {
        if let Some(line) = self.take_line() {
            return Ok(Some(line));
        }

        let deadline = Instant::now() + timeout;
        let mut chunk = [0u8; 256];

        loop {
            match self.port.read(&mut chunk) {
                Ok(0) => {}
                Ok(n) => {
                    self.pending.extend_from_slice(&chunk[..n]);
                    if let Some(line) = self.take_line() {
                        return Ok(Some(line));
                    }
                }
                // The per-read timeout configured at open; not fatal, the
                // device may simply be quiet.
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => {}
                Err(e) => return Err(ConsoleError::Io(e)),
            }

            if Instant::now() >= deadline {
                return Ok(None);
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for SerialConsole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialConsole")
            .field("name", &self.name)
            .field("baud_rate", &self.port.baud_rate())
            .finish()
    }
}
