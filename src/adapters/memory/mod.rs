//! In-process user store
//!
//! Rows live in a `Vec` in insertion order with a uuid index. A single
//! `RwLock` guards both, so a bulk insert is all-or-nothing with respect to
//! concurrent readers and writers.

use crate::adapters::database::traits::UserStore;
use crate::domain::{NewUser, Result, User, UserPatch};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: Vec<User>,
    index: HashMap<String, usize>,
}

/// Non-persistent [`UserStore`] for development and tests
#[derive(Default)]
pub struct MemoryUserStore {
    table: RwLock<Table>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_ignore(&self, users: Vec<NewUser>) -> Result<u64> {
        let mut table = self.table.write().await;
        let mut inserted = 0u64;

        for user in users {
            if table.index.contains_key(user.uuid.as_str()) {
                continue;
            }
            let position = table.rows.len();
            table.index.insert(user.uuid.as_str().to_string(), position);
            table.rows.push(User::from(user));
            inserted += 1;
        }

        Ok(inserted)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.table.read().await.rows.clone())
    }

    async fn update_user(&self, uuid: &str, patch: &UserPatch) -> Result<u64> {
        let mut table = self.table.write().await;

        let Some(&position) = table.index.get(uuid) else {
            return Ok(0);
        };

        patch.apply_to(&mut table.rows[position]);
        Ok(1)
    }

    fn store_name(&self) -> &str {
        "memory"
    }
}
