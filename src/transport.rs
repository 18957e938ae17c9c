//! Shared HTTP transport.
//!
//! One [`Transport`] is constructed in `main` and passed by reference into
//! the aggregator and every adapter, so client identity and timeouts live in
//! exactly one place. Every request carries the same `popular_press/<version>`
//! user agent; remote logs can attribute the traffic to this tool.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};

use crate::error::FetchError;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("popular_press/", env!("CARGO_PKG_VERSION"));

/// Default per-request timeout for primary page and feed fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client wrapper used by all adapters.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    /// Build a transport with the given default timeout.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Transport { client })
    }

    /// Fetch a URL and return the response body.
    ///
    /// Non-2xx responses are failures, not partial successes.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }

    /// Fetch a URL with a tighter per-request timeout.
    ///
    /// Used for preview fetches, which are opportunistic and must not stall
    /// the run on one slow article server.
    pub async fn fetch_with_timeout(
        &self,
        url: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.text().await?)
    }
}
