//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Roster configuration file.

use crate::config::load_config;
use crate::config::schema::DatabaseTarget;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing and applying overrides
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  Listen Address: {}", config.server.bind_address());
        println!("  Upstream: {}", config.upstream.base_url);
        println!(
            "  Pages: {} x {} results",
            config.upstream.total_pages, config.upstream.results_per_page
        );
        println!(
            "  Retry: {} attempts, {}ms apart",
            config.upstream.max_attempts, config.upstream.retry_delay_ms
        );

        match config.database_target {
            DatabaseTarget::PostgreSQL => {
                if let Some(ref pg_config) = config.postgresql {
                    use secrecy::ExposeSecret;
                    let conn: &str = pg_config.connection_string.expose_secret().as_ref();
                    println!("  Database Target: PostgreSQL");
                    println!(
                        "  PostgreSQL Host: {}",
                        conn.rsplit_once('@').map(|(_, host)| host).unwrap_or("***")
                    );
                    println!("  Max Connections: {}", pg_config.max_connections);
                }
            }
            DatabaseTarget::Memory => {
                println!("  Database Target: memory (not persistent)");
            }
        }
        println!();

        Ok(0)
    }
}
