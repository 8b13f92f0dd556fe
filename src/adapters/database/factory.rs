//! User store factory
//!
//! This module provides the factory function that creates a user store based on configuration.

use crate::adapters::database::traits::UserStore;
use crate::adapters::memory::MemoryUserStore;
use crate::adapters::postgresql::adapter::PostgreSQLAdapter;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::config::schema::{DatabaseTarget, RosterConfig};
use crate::domain::{Result, RosterError};
use std::sync::Arc;

/// Create a user store based on the configuration
///
/// This factory function examines the `database_target` in the configuration
/// and creates the appropriate store implementation.
///
/// # Arguments
///
/// * `config` - The Roster configuration
///
/// # Returns
///
/// Returns an Arc-wrapped trait object that implements UserStore
///
/// # Errors
///
/// Returns an error if the store cannot be created
pub async fn create_user_store(config: &RosterConfig) -> Result<Arc<dyn UserStore>> {
    match config.database_target {
        DatabaseTarget::PostgreSQL => {
            let pg_config = config.postgresql.as_ref().ok_or_else(|| {
                RosterError::Configuration(
                    "postgresql configuration is required when database_target = 'postgresql'"
                        .to_string(),
                )
            })?;

            tracing::info!("Creating PostgreSQL user store");
            let client = PostgreSQLClient::new(pg_config.clone()).await?;
            tracing::debug!(target_db = %client.connection_string_safe(), "PostgreSQL pool ready");

            Ok(Arc::new(PostgreSQLAdapter::new(client)) as Arc<dyn UserStore>)
        }
        DatabaseTarget::Memory => {
            tracing::info!("Creating in-memory user store");
            Ok(Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;

    #[tokio::test]
    async fn test_create_memory_store() {
        let config = parse_config(
            r#"
            database_target = "memory"
            "#,
        )
        .unwrap();

        let store = create_user_store(&config).await.unwrap();
        assert_eq!(store.store_name(), "memory");
        store.ensure_schema().await.unwrap();
        assert!(store.list_users().await.unwrap().is_empty());
    }
}
