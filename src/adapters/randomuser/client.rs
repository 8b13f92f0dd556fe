//! HTTP client for the upstream user API
//!
//! [`PageSource`] is a single attempt against one page URL. Retrying is the
//! caller's job (see `core::ingest::fetcher`).

use super::models::{PageResponse, RawUser};
use crate::config::UpstreamConfig;
use crate::domain::{Result, RosterError, UpstreamError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use url::Url;

/// A source of upstream user pages
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Performs exactly one request for `url` and returns its records
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Upstream` for network failures, non-2xx statuses
    /// and bodies that are not the expected JSON shape.
    async fn fetch_page(&self, url: &Url) -> Result<Vec<RawUser>>;
}

/// `reqwest`-backed page source
pub struct RandomUserClient {
    client: Client,
}

impl RandomUserClient {
    /// Create a new client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(config.timeout_seconds.min(10)))
            .user_agent(concat!("roster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                RosterError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageSource for RandomUserClient {
    async fn fetch_page(&self, url: &Url) -> Result<Vec<RawUser>> {
        tracing::debug!(url = %url, "Requesting upstream page");

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    UpstreamError::Timeout(e.to_string())
                } else {
                    UpstreamError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message: body,
            }
            .into());
        }

        let page: PageResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::MalformedBody(e.to_string()))?;

        Ok(page.into_results())
    }
}
