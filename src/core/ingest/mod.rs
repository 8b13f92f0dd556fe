//! Ingestion pipeline
//!
//! - [`fetcher`] - bounded retry for one page
//! - [`paginator`] - sequential crawl over all pages
//! - [`transform`] - raw record to user row
//! - [`loader`] - idempotent bulk write
//! - [`coordinator`] - ties the stages together

pub mod coordinator;
pub mod fetcher;
pub mod loader;
pub mod paginator;
pub mod summary;
pub mod transform;

pub use coordinator::IngestCoordinator;
pub use fetcher::{is_retryable, PageFetcher, RetryPolicy};
pub use loader::BulkLoader;
pub use paginator::{page_url, PageCrawl, Paginator};
pub use summary::IngestSummary;
pub use transform::{transform_user, transform_users};
