//! Core business logic for Roster.
//!
//! # Modules
//!
//! - [`ingest`] - Crawl the upstream API, transform, and bulk load
//! - [`users`] - List and partially update stored users
//!
//! # Ingestion Workflow
//!
//! 1. **Crawl**: Fetch pages `1..=total_pages` in order, retrying empty or failed pages
//! 2. **Transform**: Map each raw record to a user row; a malformed record aborts the run
//! 3. **Load**: Insert all rows, ignoring uuids already stored
//! 4. **Report**: Return fetched and inserted counts
//!
//! # Example
//!
//! ```rust,no_run
//! use roster::adapters::database::create_user_store;
//! use roster::config::load_config;
//! use roster::core::ingest::IngestCoordinator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("roster.toml")?;
//! let store = create_user_store(&config).await?;
//! store.ensure_schema().await?;
//!
//! let coordinator = IngestCoordinator::new(&config.upstream, store)?;
//! let summary = coordinator.run(false).await?;
//!
//! println!("Fetched: {}", summary.fetched_count);
//! println!("Inserted: {}", summary.inserted_count);
//! # Ok(())
//! # }
//! ```

pub mod ingest;
pub mod users;
