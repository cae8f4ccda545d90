//! HTTP probe error types.

use thiserror::Error;

/// Errors that can occur while probing the device's web server.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The request never produced an HTTP response (refused connection,
    /// DNS failure, request timeout).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
        body: String,
    },

    /// The probe URL could not be constructed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The web server did not become reachable within the readiness window.
    #[error("Web server did not respond in time")]
    ServerNotReady,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_not_ready_message() {
        // External reporting matches on this exact phrase.
        assert_eq!(
            ProbeError::ServerNotReady.to_string(),
            "Web server did not respond in time"
        );
    }
}
