//! Ingestion run summary and reporting

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Outcome of one ingestion run
#[derive(Debug, Clone, PartialEq)]
pub struct IngestSummary {
    /// Records collected across all pages
    pub fetched_count: usize,

    /// Rows newly written; never greater than `fetched_count`
    pub inserted_count: u64,

    /// Pages that yielded records
    pub pages_succeeded: Vec<u32>,

    /// Pages given up as empty
    pub pages_failed: Vec<u32>,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the run
    pub duration: Duration,

    /// The write was skipped
    pub dry_run: bool,
}

impl IngestSummary {
    /// Create a new empty summary starting now
    pub fn new() -> Self {
        Self {
            fetched_count: 0,
            inserted_count: 0,
            pages_succeeded: Vec::new(),
            pages_failed: Vec::new(),
            started_at: Utc::now(),
            duration: Duration::from_secs(0),
            dry_run: false,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Fetched records that were already stored (or repeated within the run)
    pub fn skipped_count(&self) -> u64 {
        (self.fetched_count as u64).saturating_sub(self.inserted_count)
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_ingest_complete!(self.fetched_count, self.inserted_count, self.duration);

        tracing::info!(
            started_at = %self.started_at.to_rfc3339(),
            pages_succeeded = self.pages_succeeded.len(),
            pages_failed = self.pages_failed.len(),
            skipped = self.skipped_count(),
            dry_run = self.dry_run,
            "Ingestion summary"
        );

        if !self.pages_failed.is_empty() {
            tracing::warn!(pages = ?self.pages_failed, "Some pages yielded no users");
        }
    }
}

impl Default for IngestSummary {
    fn default() -> Self {
        Self::new()
    }
}
