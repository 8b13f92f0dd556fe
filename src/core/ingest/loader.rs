//! Idempotent bulk write of transformed users

use crate::adapters::database::UserStore;
use crate::domain::{NewUser, Result};
use std::collections::HashSet;
use std::sync::Arc;

/// Writes a batch through [`UserStore::insert_ignore`]
pub struct BulkLoader {
    store: Arc<dyn UserStore>,
}

impl BulkLoader {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Inserts `users`, skipping uuids already stored
    ///
    /// Later duplicates of a uuid within the batch are dropped before the
    /// write. An empty batch never reaches the store.
    ///
    /// # Returns
    ///
    /// The number of newly inserted rows.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn load(&self, users: Vec<NewUser>) -> Result<u64> {
        if users.is_empty() {
            tracing::warn!("No values to insert");
            return Ok(0);
        }

        let attempted = users.len();
        let users = dedup_by_uuid(users);
        if users.len() < attempted {
            tracing::debug!(
                duplicates = attempted - users.len(),
                "Dropped duplicate uuids within batch"
            );
        }

        let inserted = self.store.insert_ignore(users).await?;

        tracing::info!(
            attempted,
            inserted,
            store = self.store.store_name(),
            "Bulk insert complete"
        );
        Ok(inserted)
    }
}

fn dedup_by_uuid(users: Vec<NewUser>) -> Vec<NewUser> {
    let mut seen = HashSet::with_capacity(users.len());
    users
        .into_iter()
        .filter(|user| seen.insert(user.uuid.as_str().to_string()))
        .collect()
}
