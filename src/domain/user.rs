//! User domain model
//!
//! A user row is created only by ingestion and mutated only through a
//! [`UserPatch`]. There is no delete.

use super::ids::UserUuid;
use serde::{Deserialize, Serialize};

/// A persisted user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Upstream-supplied primary key
    pub uuid: String,

    /// `"<first> <last>"`, derived at ingestion time
    pub name: String,

    /// Email address
    pub email: String,

    /// City of residence
    pub city: String,
}

/// A transformed upstream record, ready for the bulk loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub city: String,
}

impl From<NewUser> for User {
    fn from(user: NewUser) -> Self {
        Self {
            uuid: user.uuid.into_inner(),
            name: user.name,
            email: user.email,
            city: user.city,
        }
    }
}

/// The columns a partial update may touch
///
/// Column names are fixed here and never taken from caller input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserColumn {
    Name,
    Email,
    City,
}

impl UserColumn {
    /// SQL column name
    pub fn as_str(&self) -> &'static str {
        match self {
            UserColumn::Name => "name",
            UserColumn::Email => "email",
            UserColumn::City => "city",
        }
    }
}

/// Partial update request body
///
/// Absent fields and empty strings are both treated as "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub city: Option<String>,
}

impl UserPatch {
    /// Returns the supplied `(column, value)` pairs in column order
    pub fn assignments(&self) -> Vec<(UserColumn, &str)> {
        [
            (UserColumn::Name, &self.name),
            (UserColumn::Email, &self.email),
            (UserColumn::City, &self.city),
        ]
        .into_iter()
        .filter_map(|(column, value)| match value.as_deref() {
            Some(v) if !v.is_empty() => Some((column, v)),
            _ => None,
        })
        .collect()
    }

    /// True when no field was supplied
    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Applies the supplied fields to `user`, leaving the rest untouched
    pub fn apply_to(&self, user: &mut User) {
        for (column, value) in self.assignments() {
            let target = match column {
                UserColumn::Name => &mut user.name,
                UserColumn::Email => &mut user.email,
                UserColumn::City => &mut user.city,
            };
            *target = value.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            uuid: "u-1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            city: "London".to_string(),
        }
    }

    #[test]
    fn test_empty_patch() {
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let patch = UserPatch {
            name: Some(String::new()),
            email: None,
            city: Some(String::new()),
        };
        assert!(patch.is_empty());
    }

    #[test]
    fn test_assignments_keep_column_order() {
        let patch = UserPatch {
            name: None,
            email: Some("new@example.com".to_string()),
            city: Some("Paris".to_string()),
        };
        let columns: Vec<&str> = patch
            .assignments()
            .iter()
            .map(|(column, _)| column.as_str())
            .collect();
        assert_eq!(columns, vec!["email", "city"]);
    }

    #[test]
    fn test_apply_only_touches_supplied_fields() {
        let mut user = sample_user();
        let patch = UserPatch {
            city: Some("Oslo".to_string()),
            ..Default::default()
        };
        patch.apply_to(&mut user);

        assert_eq!(user.city, "Oslo");
        assert_eq!(user.name, "Ada Lovelace");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_patch_deserializes_partial_body() {
        let patch: UserPatch = serde_json::from_str(r#"{"city":"X"}"#).unwrap();
        assert_eq!(patch.city.as_deref(), Some("X"));
        assert!(patch.name.is_none());
        assert!(patch.email.is_none());
    }
}
