//! Connectivity and endpoint checks plus the suite runner.
//!
//! The checks mirror the firmware's acceptance suite: wait for the device
//! to join Wi-Fi, poll its web server up, then exercise each HTTP endpoint
//! with substring assertions. Checks run sequentially against one shared
//! [`ConnectedDevice`]; each check is all-or-nothing, and a failure in one
//! does not stop the others.

pub mod connectivity;
pub mod endpoints;

use std::time::Duration;

use thiserror::Error;
use tracing::{error, info};

use crate::dut::{ConsoleError, ConsoleSource};
use crate::net::{self, HttpProbe, ProbeError, READINESS_DEADLINE, READINESS_INTERVAL};

/// Errors surfaced by the device checks.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A response body was missing an expected phrase.
    #[error("{request}: response did not contain '{expected}'; body was: {body:?}")]
    MissingSubstring {
        request: String,
        expected: String,
        body: String,
    },

    /// The device reported something that is not a dotted-quad address.
    #[error("Malformed IPv4 address from device: '{ip}'")]
    BadIp { ip: String },

    /// A console-level failure (serial I/O, log-pattern timeout).
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// An HTTP-level failure (transport error, bad status, readiness
    /// deadline).
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// The blocking console reader task died.
    #[error("Console reader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Timeouts governing fixture creation.
#[derive(Debug, Clone)]
pub struct ConnectSettings {
    /// How long to wait for the `Got IP:` log line.
    pub ip_timeout: Duration,
    /// Per-request timeout for HTTP probes.
    pub request_timeout: Duration,
    /// Wall-clock deadline for the web server to come up.
    pub readiness_deadline: Duration,
    /// Delay between readiness attempts.
    pub readiness_interval: Duration,
}

impl Default for ConnectSettings {
    fn default() -> Self {
        Self {
            ip_timeout: connectivity::IP_WAIT_TIMEOUT,
            request_timeout: Duration::from_secs(10),
            readiness_deadline: READINESS_DEADLINE,
            readiness_interval: READINESS_INTERVAL,
        }
    }
}

/// A device that has joined Wi-Fi and answers HTTP.
///
/// Created once, then shared read-only by every check in the suite.
pub struct ConnectedDevice {
    console: Box<dyn ConsoleSource>,
    ip: String,
    probe: HttpProbe,
}

impl ConnectedDevice {
    /// Wait for the device to report its IP, then poll its web server up.
    ///
    /// The blocking serial wait runs on the blocking pool so the HTTP side
    /// of the harness stays on the async runtime.
    pub async fn connect(
        console: Box<dyn ConsoleSource>,
        settings: &ConnectSettings,
    ) -> Result<Self, CheckError> {
        let ip_timeout = settings.ip_timeout;
        let (console, ip) = tokio::task::spawn_blocking(move || {
            let mut console = console;
            let ip = connectivity::wait_for_ip(console.as_mut(), ip_timeout)?;
            Ok::<_, CheckError>((console, ip))
        })
        .await??;

        info!(%ip, "device joined Wi-Fi");

        let probe = HttpProbe::with_timeout(&format!("http://{ip}"), settings.request_timeout)?;
        net::wait_for_server(
            &probe,
            settings.readiness_deadline,
            settings.readiness_interval,
        )
        .await?;

        Ok(Self { console, ip, probe })
    }

    /// Build a fixture around an already-known address, skipping the serial
    /// wait. Used by tests that talk to a fake device server.
    pub async fn attach(
        console: Box<dyn ConsoleSource>,
        base_url: &str,
        settings: &ConnectSettings,
    ) -> Result<Self, CheckError> {
        let probe = HttpProbe::with_timeout(base_url, settings.request_timeout)?;
        net::wait_for_server(
            &probe,
            settings.readiness_deadline,
            settings.readiness_interval,
        )
        .await?;

        let ip = probe
            .base_url()
            .host_str()
            .unwrap_or_default()
            .to_string();

        Ok(Self { console, ip, probe })
    }

    /// The address the device reported.
    pub fn ip(&self) -> &str {
        &self.ip
    }

    /// Probe bound to the device's base URL.
    pub fn probe(&self) -> &HttpProbe {
        &self.probe
    }

    /// Name of the underlying console, for diagnostics.
    pub fn console_name(&self) -> &str {
        self.console.name()
    }
}

/// Outcome of one named check.
pub struct CheckResult {
    pub name: &'static str,
    pub outcome: Result<(), CheckError>,
}

/// Results of a full suite run, in execution order.
pub struct SuiteReport {
    pub results: Vec<CheckResult>,
}

impl SuiteReport {
    /// True when every check passed.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.outcome.is_ok())
    }

    /// Names of the checks that failed.
    pub fn failed_checks(&self) -> Vec<&'static str> {
        self.results
            .iter()
            .filter(|r| r.outcome.is_err())
            .map(|r| r.name)
            .collect()
    }
}

/// Run every check against one connected device, sequentially.
pub async fn run_suite(device: &ConnectedDevice) -> SuiteReport {
    let mut results = Vec::new();

    results.push(CheckResult {
        name: "wifi_connection",
        outcome: connectivity::check_ip_format(device.ip()),
    });
    results.push(CheckResult {
        name: "led_control_endpoints",
        outcome: endpoints::check_led(device.probe()).await,
    });
    results.push(CheckResult {
        name: "storage_crud_endpoints",
        outcome: endpoints::check_storage(device.probe()).await,
    });
    results.push(CheckResult {
        name: "web_server_root_page",
        outcome: endpoints::check_root_page(device.probe()).await,
    });

    for result in &results {
        match &result.outcome {
            Ok(()) => info!(check = result.name, "PASS"),
            Err(e) => error!(check = result.name, error = %e, "FAIL"),
        }
    }

    SuiteReport { results }
}
