//! Query and partial update of stored users

use crate::adapters::database::UserStore;
use crate::domain::{Result, RosterError, User, UserPatch};
use std::sync::Arc;

pub const NO_FIELDS_MESSAGE: &str = "At least one field (name, email, or city) is required";
pub const NOT_FOUND_MESSAGE: &str = "User not found";

/// Read/update operations over a [`UserStore`]
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// Every stored user, in store order
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub async fn list(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    /// Writes the supplied fields of `patch` to the user keyed by `uuid`
    ///
    /// # Errors
    ///
    /// - `Validation` when the patch supplies no field (the store is not touched)
    /// - `NotFound` when no row has that uuid
    /// - `Store` on storage failure
    pub async fn update(&self, uuid: &str, patch: &UserPatch) -> Result<()> {
        if patch.is_empty() {
            return Err(RosterError::Validation(NO_FIELDS_MESSAGE.to_string()));
        }

        let matched = self.store.update_user(uuid, patch).await?;
        if matched == 0 {
            return Err(RosterError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }

        tracing::info!(
            uuid,
            fields = ?patch.assignments().iter().map(|(c, _)| c.as_str()).collect::<Vec<_>>(),
            "User updated"
        );
        Ok(())
    }

    /// Round-trip to the store
    ///
    /// # Errors
    ///
    /// Returns the store's connection error.
    pub async fn health(&self) -> Result<()> {
        self.store.test_connection().await
    }
}
