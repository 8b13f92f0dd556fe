//! Store abstraction traits
//!
//! This module defines the trait that user store backends must implement
//! to work with Roster.

use crate::domain::{NewUser, Result, User, UserPatch};
use async_trait::async_trait;

/// Persistent user table
///
/// Implementations must be safe to share between the HTTP handlers and an
/// ingestion run executing at the same time.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if the connection test fails.
    async fn test_connection(&self) -> Result<()>;

    /// Create the users table if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert users, silently skipping any whose uuid is already stored
    ///
    /// Duplicate uuids within `users` collapse to a single insert. The batch
    /// is applied atomically.
    ///
    /// # Returns
    ///
    /// The number of rows actually inserted.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InsertFailed` on any storage failure; no row of
    /// the batch is kept in that case.
    async fn insert_ignore(&self, users: Vec<NewUser>) -> Result<u64>;

    /// Return every stored user
    ///
    /// # Errors
    ///
    /// Returns `StoreError::QueryFailed` on storage failure.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Apply the supplied fields of `patch` to the row keyed by `uuid`
    ///
    /// `patch` must carry at least one field.
    ///
    /// # Returns
    ///
    /// The number of rows matched (0 or 1).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UpdateFailed` on storage failure.
    async fn update_user(&self, uuid: &str, patch: &UserPatch) -> Result<u64>;

    /// Short backend name for logs
    fn store_name(&self) -> &str;
}
