//! Ingestion coordinator - crawl, transform, load
//!
//! One run is strictly sequential. Concurrent runs are allowed; the store's
//! insert-or-ignore keeps them from double-inserting a uuid.

use super::fetcher::{PageFetcher, RetryPolicy};
use super::loader::BulkLoader;
use super::paginator::Paginator;
use super::summary::IngestSummary;
use super::transform::transform_users;
use crate::adapters::database::UserStore;
use crate::adapters::randomuser::{PageSource, RandomUserClient};
use crate::config::UpstreamConfig;
use crate::domain::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Runs the full ingestion pipeline
pub struct IngestCoordinator {
    paginator: Paginator,
    loader: BulkLoader,
}

impl IngestCoordinator {
    /// Create a coordinator backed by the HTTP upstream client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the base URL
    /// is invalid.
    pub fn new(config: &UpstreamConfig, store: Arc<dyn UserStore>) -> Result<Self> {
        let source = Arc::new(RandomUserClient::new(config)?);
        Self::with_source(config, source, store)
    }

    /// Create a coordinator over any page source
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_source(
        config: &UpstreamConfig,
        source: Arc<dyn PageSource>,
        store: Arc<dyn UserStore>,
    ) -> Result<Self> {
        let fetcher = PageFetcher::new(source, RetryPolicy::from_config(config));
        let paginator = Paginator::new(fetcher, config)?;

        Ok(Self {
            paginator,
            loader: BulkLoader::new(store),
        })
    }

    /// Execute one ingestion run
    ///
    /// Upstream failures never fail the run; they only shrink it. With
    /// `dry_run` the batch is transformed but not written.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Transform` for a malformed record and
    /// `RosterError::Store` if the bulk write fails. Nothing is written in
    /// either case.
    pub async fn run(&self, dry_run: bool) -> Result<IngestSummary> {
        let start_time = Instant::now();
        let mut summary = IngestSummary {
            started_at: Utc::now(),
            dry_run,
            ..IngestSummary::new()
        };

        tracing::info!(
            total_pages = self.paginator.total_pages(),
            dry_run,
            "Starting ingestion"
        );

        let crawl = self.paginator.crawl().await;
        summary.fetched_count = crawl.fetched_count();
        summary.pages_succeeded = crawl.succeeded_pages;
        summary.pages_failed = crawl.failed_pages;

        let users = transform_users(crawl.records).map_err(|e| {
            tracing::error!(error = %e, "Aborting ingestion on malformed record");
            e
        })?;

        if dry_run {
            tracing::info!(
                count = users.len(),
                "DRY RUN: Would insert {} users",
                users.len()
            );
        } else {
            summary.inserted_count = self.loader.load(users).await?;
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }
}
