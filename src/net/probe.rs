//! One-shot HTTP probe helper.
//!
//! Issues a single request against the device's web server and returns the
//! decoded text body. Any non-2xx response or transport failure propagates
//! to the caller; there is no retry here.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use tracing::debug;
use url::Url;

use super::error::ProbeError;

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP probe bound to one device's base URL.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    base_url: Url,
}

impl HttpProbe {
    /// Create a new probe for the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the device web server (e.g., "http://192.168.4.1")
    pub fn new(base_url: &str) -> Result<Self, ProbeError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a new probe with a custom per-request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ProbeError> {
        let client = Client::builder().timeout(timeout).build()?;
        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// GET a path and return the response body.
    pub async fn get(&self, path: &str) -> Result<String, ProbeError> {
        let url = self.base_url.join(path)?;
        self.run(self.client.get(url)).await
    }

    /// POST a form-encoded body to a path and return the response body.
    pub async fn post_form(
        &self,
        path: &str,
        form: &[(&str, &str)],
    ) -> Result<String, ProbeError> {
        let url = self.base_url.join(path)?;
        self.run(self.client.post(url).form(form)).await
    }

    /// DELETE a path and return the response body.
    pub async fn delete(&self, path: &str) -> Result<String, ProbeError> {
        let url = self.base_url.join(path)?;
        self.run(self.client.request(Method::DELETE, url)).await
    }

    async fn run(&self, request: RequestBuilder) -> Result<String, ProbeError> {
        let response = request.send().await?;

        let status = response.status();
        let url = response.url().to_string();
        debug!(%status, %url, "probe response");

        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            Err(ProbeError::Status { status, url, body })
        }
    }
}
