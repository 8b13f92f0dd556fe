//! PostgreSQL adapter implementing the store trait

use crate::adapters::database::traits::UserStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::domain::{NewUser, Result, StoreError, User, UserPatch};
use async_trait::async_trait;
use std::sync::Arc;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

/// Rows per multi-row INSERT; keeps bound parameters well below the
/// protocol limit of 65535.
const INSERT_CHUNK_ROWS: usize = 1000;

const USER_COLUMNS: usize = 4;

/// PostgreSQL implementation of [`UserStore`]
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    /// Create a new PostgreSQL adapter
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// `INSERT ... VALUES ($1,$2,$3,$4),($5,...) ON CONFLICT (uuid) DO NOTHING`
fn insert_statement(rows: usize) -> String {
    let values = (0..rows)
        .map(|row| {
            let base = row * USER_COLUMNS;
            format!(
                "(${}, ${}, ${}, ${})",
                base + 1,
                base + 2,
                base + 3,
                base + 4
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO users (uuid, name, email, city) VALUES {values} ON CONFLICT (uuid) DO NOTHING"
    )
}

/// `UPDATE users SET a = $1, b = $2 WHERE uuid = $3`
///
/// Column names come from [`crate::domain::UserColumn`], never from input.
fn update_statement(patch: &UserPatch) -> String {
    let assignments = patch.assignments();
    let set_clause = assignments
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("{} = ${}", column.as_str(), i + 1))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "UPDATE users SET {set_clause} WHERE uuid = ${}",
        assignments.len() + 1
    )
}

fn row_to_user(row: &Row) -> std::result::Result<User, tokio_postgres::Error> {
    Ok(User {
        uuid: row.try_get("uuid")?,
        name: row.try_get::<_, Option<String>>("name")?.unwrap_or_default(),
        email: row.try_get::<_, Option<String>>("email")?.unwrap_or_default(),
        city: row.try_get::<_, Option<String>>("city")?.unwrap_or_default(),
    })
}

#[async_trait]
impl UserStore for PostgreSQLAdapter {
    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn insert_ignore(&self, users: Vec<NewUser>) -> Result<u64> {
        if users.is_empty() {
            return Ok(0);
        }

        let rows: Vec<User> = users.into_iter().map(User::from).collect();

        let mut conn = self.client.get_connection().await?;
        let transaction = conn
            .transaction()
            .await
            .map_err(|e| StoreError::InsertFailed(format!("Failed to begin transaction: {e}")))?;

        let mut inserted = 0u64;
        for chunk in rows.chunks(INSERT_CHUNK_ROWS) {
            let statement = insert_statement(chunk.len());

            let mut params: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(chunk.len() * USER_COLUMNS);
            for user in chunk {
                params.push(&user.uuid);
                params.push(&user.name);
                params.push(&user.email);
                params.push(&user.city);
            }

            inserted += transaction
                .execute(statement.as_str(), &params)
                .await
                .map_err(|e| StoreError::InsertFailed(e.to_string()))?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| StoreError::InsertFailed(format!("Failed to commit: {e}")))?;

        tracing::debug!(
            attempted = rows.len(),
            inserted,
            "PostgreSQL bulk insert committed"
        );
        Ok(inserted)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let conn = self.client.get_connection().await?;

        let rows = conn
            .query("SELECT uuid, name, email, city FROM users", &[])
            .await
            .map_err(|e| StoreError::QueryFailed(e.to_string()))?;

        let users = rows
            .iter()
            .map(row_to_user)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| StoreError::QueryFailed(format!("Failed to decode row: {e}")))?;

        Ok(users)
    }

    async fn update_user(&self, uuid: &str, patch: &UserPatch) -> Result<u64> {
        let assignments = patch.assignments();
        if assignments.is_empty() {
            return Err(StoreError::UpdateFailed("no fields to update".to_string()).into());
        }

        let statement = update_statement(patch);

        let mut params: Vec<&(dyn ToSql + Sync)> = assignments
            .iter()
            .map(|(_, value)| value as &(dyn ToSql + Sync))
            .collect();
        params.push(&uuid);

        let conn = self.client.get_connection().await?;
        let matched = conn
            .execute(statement.as_str(), &params)
            .await
            .map_err(|e| StoreError::UpdateFailed(e.to_string()))?;

        Ok(matched)
    }

    fn store_name(&self) -> &str {
        "postgresql"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_statement_single_row() {
        assert_eq!(
            insert_statement(1),
            "INSERT INTO users (uuid, name, email, city) VALUES ($1, $2, $3, $4) ON CONFLICT (uuid) DO NOTHING"
        );
    }

    #[test]
    fn test_insert_statement_numbers_placeholders_per_row() {
        let sql = insert_statement(3);
        assert!(sql.contains("($5, $6, $7, $8)"));
        assert!(sql.contains("($9, $10, $11, $12)"));
        assert!(!sql.contains("$13"));
    }

    #[test]
    fn test_update_statement_only_supplied_columns() {
        let patch = UserPatch {
            city: Some("Kyoto".to_string()),
            ..Default::default()
        };
        assert_eq!(
            update_statement(&patch),
            "UPDATE users SET city = $1 WHERE uuid = $2"
        );
    }

    #[test]
    fn test_update_statement_all_columns() {
        let patch = UserPatch {
            name: Some("A B".to_string()),
            email: Some("a@b.io".to_string()),
            city: Some("Kyoto".to_string()),
        };
        assert_eq!(
            update_statement(&patch),
            "UPDATE users SET name = $1, email = $2, city = $3 WHERE uuid = $4"
        );
    }

    #[test]
    fn test_update_statement_skips_empty_strings() {
        let patch = UserPatch {
            name: Some(String::new()),
            email: Some("a@b.io".to_string()),
            city: None,
        };
        assert_eq!(
            update_statement(&patch),
            "UPDATE users SET email = $1 WHERE uuid = $2"
        );
    }
}
