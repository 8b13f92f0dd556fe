//! Ingest command implementation
//!
//! Runs one ingestion pass from the command line, without the HTTP server.

use crate::adapters::database::create_user_store;
use crate::config::load_config;
use crate::core::ingest::IngestCoordinator;
use crate::domain::RosterError;
use clap::Args;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Crawl and transform without writing to the store
    #[arg(long)]
    pub dry_run: bool,

    /// Override the number of pages to fetch
    #[arg(long)]
    pub pages: Option<u32>,
}

impl IngestArgs {
    /// Execute the ingest command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting ingest command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if let Some(pages) = self.pages {
            tracing::info!(pages, "Overriding page count from CLI");
            config.upstream.total_pages = pages;
        }

        if let Err(e) = config.validate() {
            tracing::error!(error = %e, "Configuration validation failed");
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        if self.dry_run {
            println!("DRY RUN MODE - No data will be written to the store");
            println!();
        }

        let store = match create_user_store(&config).await {
            Ok(store) => store,
            Err(e @ RosterError::Configuration(_)) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
            Err(e) => {
                eprintln!("Failed to connect to store: {e}");
                return Ok(4);
            }
        };
        if let Err(e) = store.ensure_schema().await {
            eprintln!("Failed to initialize store: {e}");
            return Ok(4);
        }

        let coordinator = IngestCoordinator::new(&config.upstream, store)?;

        match coordinator.run(self.dry_run).await {
            Ok(summary) => {
                println!("Fetch complete");
                println!("  Fetched: {}", summary.fetched_count);
                println!("  Inserted: {}", summary.inserted_count);
                println!("  Already stored: {}", summary.skipped_count());
                if !summary.pages_failed.is_empty() {
                    println!("  Empty pages: {:?}", summary.pages_failed);
                }
                println!("  Duration: {:.1}s", summary.duration.as_secs_f64());
                Ok(0)
            }
            Err(RosterError::Store(e)) => {
                eprintln!("Failed to write users: {e}");
                Ok(4)
            }
            Err(e) => {
                eprintln!("Failed to fetch data: {e}");
                Ok(5)
            }
        }
    }
}
