//! Configuration management for Roster.
//!
//! Roster reads a TOML file with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `ROSTER_<SECTION>_<KEY>` environment overrides
//! - Default values for optional settings
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use roster::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("roster.toml")?;
//! println!("Upstream: {}", config.upstream.base_url);
//! println!("Pages per run: {}", config.upstream.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! database_target = "postgresql"
//!
//! [server]
//! port = 3000
//!
//! [upstream]
//! base_url = "https://randomuser.me/api/"
//! total_pages = 50
//! results_per_page = 20
//!
//! [postgresql]
//! connection_string = "${ROSTER_DATABASE_URL}"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DatabaseTarget, Environment, LoggingConfig, PostgreSQLConfig,
    RosterConfig, ServerConfig, UpstreamConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
