//! Fetch-with-retry for a single upstream page
//!
//! A failed request and a successful request that yields no records are both
//! retryable. After the last attempt the page is given up as empty; nothing is
//! surfaced to the caller.

use crate::adapters::randomuser::{PageSource, RawUser};
use crate::config::UpstreamConfig;
use crate::domain::Result;
use crate::log_retry_attempt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per page, including the first
    pub max_attempts: u32,

    /// Pause between two attempts on the same page
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &UpstreamConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&UpstreamConfig::default())
    }
}

/// Whether one attempt's outcome should be retried
///
/// Errors are always retryable; so is an empty page.
pub fn is_retryable(page: &Result<Vec<RawUser>>) -> bool {
    match page {
        Ok(users) => users.is_empty(),
        Err(_) => true,
    }
}

/// Retries a [`PageSource`] according to a [`RetryPolicy`]
pub struct PageFetcher {
    source: Arc<dyn PageSource>,
    policy: RetryPolicy,
}

impl PageFetcher {
    pub fn new(source: Arc<dyn PageSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Returns the records for `url`, or an empty list once every attempt
    /// has failed or come back empty
    pub async fn fetch_with_retry(&self, url: &Url) -> Vec<RawUser> {
        let max_attempts = self.policy.max_attempts;
        let mut attempt = 1;

        loop {
            let outcome = self.source.fetch_page(url).await;

            if !is_retryable(&outcome) {
                return match outcome {
                    Ok(users) => users,
                    Err(_) => Vec::new(),
                };
            }

            let reason = match &outcome {
                Ok(_) => "Got 0 users".to_string(),
                Err(e) => e.to_string(),
            };

            if attempt >= max_attempts {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    reason = %reason,
                    url = %url,
                    "Page fetch attempts exhausted"
                );
                return Vec::new();
            }

            log_retry_attempt!(attempt, max_attempts, reason);
            tokio::time::sleep(self.policy.retry_delay).await;
            attempt += 1;
        }
    }
}
