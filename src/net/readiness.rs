//! Web-server readiness poll.
//!
//! The firmware starts its web server immediately after Wi-Fi connects, but
//! the first request can race the listener. This poll retries plain GETs at
//! a fixed interval until the server answers or a wall-clock deadline
//! elapses. Only transport errors are retried; a response with any HTTP
//! status means the server is up.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::error::ProbeError;
use super::probe::HttpProbe;

/// Wall-clock deadline for the device's web server to come up.
pub const READINESS_DEADLINE: Duration = Duration::from_secs(15);

/// Fixed delay between readiness attempts. No backoff, no jitter.
pub const READINESS_INTERVAL: Duration = Duration::from_secs(1);

/// Poll `GET /` until the server responds or `deadline` elapses.
///
/// Succeeds immediately on the first answered request, without sleeping.
/// Fails with [`ProbeError::ServerNotReady`] once the deadline has passed,
/// rather than surfacing the last transport error.
pub async fn wait_for_server(
    probe: &HttpProbe,
    deadline: Duration,
    interval: Duration,
) -> Result<(), ProbeError> {
    let give_up_at = Instant::now() + deadline;

    while Instant::now() < give_up_at {
        match probe.get("/").await {
            Ok(_) => {
                info!(base_url = %probe.base_url(), "web server is up");
                return Ok(());
            }
            // An HTTP error status still proves the listener is accepting
            // connections; the endpoint checks will judge the content.
            Err(ProbeError::Status { status, .. }) => {
                info!(base_url = %probe.base_url(), %status, "web server is up");
                return Ok(());
            }
            Err(ProbeError::Transport(err)) => {
                debug!(base_url = %probe.base_url(), %err, "web server not up yet");
            }
            Err(err) => return Err(err),
        }

        tokio::time::sleep(interval).await;
    }

    Err(ProbeError::ServerNotReady)
}
