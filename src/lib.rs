// Roster - User Directory Service
// Copyright (c) 2025 Roster Contributors
// Licensed under the MIT License

//! # Roster - User Directory Service
//!
//! Roster pulls user records from the public randomuser.me API, stores them
//! idempotently keyed by the upstream uuid, and serves them over a small REST API.
//!
//! ## Overview
//!
//! - **Crawling** a fixed number of pages in order, retrying pages that fail or come back empty
//! - **Transforming** each record to `(uuid, "first last", email, city)`
//! - **Loading** with insert-or-ignore, so repeated runs only add new users
//! - **Serving** list and partial-update endpoints
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - HTTP routes, error responses and middleware
//! - [`core`] - Business logic (ingestion pipeline, user queries and updates)
//! - [`adapters`] - External integrations (upstream API, PostgreSQL, in-memory store)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use roster::adapters::database::create_user_store;
//! use roster::config::load_config;
//! use roster::core::ingest::IngestCoordinator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("roster.toml")?;
//!
//!     let store = create_user_store(&config).await?;
//!     store.ensure_schema().await?;
//!
//!     let coordinator = IngestCoordinator::new(&config.upstream, store)?;
//!     let summary = coordinator.run(false).await?;
//!
//!     println!(
//!         "Fetched {} users, inserted {}",
//!         summary.fetched_count, summary.inserted_count
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All fallible library calls return [`domain::Result`], carrying a [`domain::RosterError`].
//! The HTTP layer maps validation errors to 400, missing users to 404 and the rest to 500.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
