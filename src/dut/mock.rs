//! Mock console implementation for testing.
//!
//! Provides a `MockConsole` that simulates the device's serial log without
//! requiring actual hardware. Tests script the lines the "device" will
//! print; an exhausted script behaves like a silent console.

use super::error::ConsoleError;
use super::traits::ConsoleSource;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Inner state of the mock console, protected by a mutex for interior mutability.
#[derive(Debug, Default)]
struct MockConsoleState {
    /// Queue of lines to be returned by read operations.
    lines: VecDeque<String>,
}

/// Mock console implementation for testing.
///
/// # Example
/// ```
/// use dut_harness::dut::{ConsoleSource, MockConsole};
/// use std::time::Duration;
///
/// let mut console = MockConsole::new("MOCK0");
/// console.push_line("I (4242) wifi: connected");
/// console.push_line("I (4243) wifi: Got IP: 192.168.4.1");
///
/// let line = console.read_line(Duration::from_millis(10)).unwrap();
/// assert_eq!(line.as_deref(), Some("I (4242) wifi: connected"));
/// ```
#[derive(Debug, Clone)]
pub struct MockConsole {
    /// The console name/identifier.
    name: String,
    /// The internal state, wrapped in Arc<Mutex<>> for interior mutability.
    state: Arc<Mutex<MockConsoleState>>,
}

impl MockConsole {
    /// Create a new mock console with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockConsoleState::default())),
        }
    }

    /// Append a single line to the scripted log output.
    pub fn push_line(&mut self, line: impl Into<String>) {
        let mut state = self.state.lock().unwrap();
        state.lines.push_back(line.into());
    }

    /// Append every line of a text blob to the scripted log output.
    pub fn push_log(&mut self, log: &str) {
        let mut state = self.state.lock().unwrap();
        state.lines.extend(log.lines().map(String::from));
    }

    /// Number of scripted lines not yet consumed.
    pub fn remaining_lines(&self) -> usize {
        self.state.lock().unwrap().lines.len()
    }
}

impl ConsoleSource for MockConsole {
    fn read_line(&mut self, _timeout: Duration) -> Result<Option<String>, ConsoleError> {
        let mut state = self.state.lock().unwrap();
        // An exhausted script reads like a silent device; returning None
        // immediately (instead of sleeping out the timeout) keeps the
        // expect-timeout tests fast.
        Ok(state.lines.pop_front())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
