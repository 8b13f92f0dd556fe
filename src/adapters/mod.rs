//! External system integrations for Roster.
//!
//! - [`randomuser`] - Upstream user API client
//! - [`database`] - User store abstraction (trait-based)
//! - [`postgresql`] - PostgreSQL store
//! - [`memory`] - In-process store for development and tests
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind traits ([`randomuser::PageSource`],
//! [`database::UserStore`]) so the ingestion pipeline and HTTP layer can be
//! exercised against scripted or in-memory implementations.
//!
//! ```rust,no_run
//! use roster::adapters::randomuser::RandomUserClient;
//! use roster::config::UpstreamConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RandomUserClient::new(&UpstreamConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
pub mod randomuser;
