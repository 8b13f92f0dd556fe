//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Human-readable console output
//! - Optional JSON file output with rotation
//! - `RUST_LOG` overrides
//!
//! # Example
//!
//! ```no_run
//! use roster::logging::init_logging;
//! use roster::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!(page = 1, count = 20, "Page fetched");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use roster::log_retry_attempt;
///
/// log_retry_attempt!(1, 3, "Got 0 users");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying page fetch"
        );
    };
}

/// Log the completion of an ingestion run
///
/// # Example
///
/// ```no_run
/// use roster::log_ingest_complete;
/// use std::time::Duration;
///
/// log_ingest_complete!(1000, 12, Duration::from_secs(20));
/// ```
#[macro_export]
macro_rules! log_ingest_complete {
    ($fetched:expr, $inserted:expr, $duration:expr) => {
        tracing::info!(
            fetched_count = $fetched,
            inserted_count = $inserted,
            duration_ms = $duration.as_millis() as u64,
            "Ingestion completed"
        );
    };
}
