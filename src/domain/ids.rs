//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upstream-assigned user identifier
///
/// The upstream API hands out RFC 4122 UUID strings, but the store only
/// requires a non-empty key of at most [`UserUuid::MAX_LEN`] characters, so
/// no stricter format is enforced here.
///
/// # Examples
///
/// ```
/// use roster::domain::ids::UserUuid;
/// use std::str::FromStr;
///
/// let uuid = UserUuid::from_str("2d1c6a38-5f55-4c54-a8d7-3a9a0f0ee0a1").unwrap();
/// assert_eq!(uuid.as_str(), "2d1c6a38-5f55-4c54-a8d7-3a9a0f0ee0a1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserUuid(String);

impl UserUuid {
    /// Width of the `uuid` column.
    pub const MAX_LEN: usize = 36;

    /// Creates a new UserUuid from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User UUID cannot be empty".to_string());
        }
        if id.chars().count() > Self::MAX_LEN {
            return Err(format!(
                "User UUID exceeds {} characters: {}",
                Self::MAX_LEN,
                id
            ));
        }
        Ok(Self(id))
    }

    /// Returns the UUID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UserUuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserUuid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for UserUuid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_uuid_valid() {
        let uuid = UserUuid::new("0b6f9a3c-6d52-4a3e-9e4b-1f0c2d3e4f50").unwrap();
        assert_eq!(uuid.to_string(), "0b6f9a3c-6d52-4a3e-9e4b-1f0c2d3e4f50");
        assert_eq!(uuid.into_inner(), "0b6f9a3c-6d52-4a3e-9e4b-1f0c2d3e4f50");
    }

    #[test]
    fn test_user_uuid_empty() {
        assert!(UserUuid::new("").is_err());
        assert!(UserUuid::new("   ").is_err());
    }

    #[test]
    fn test_user_uuid_too_long() {
        let long = "x".repeat(UserUuid::MAX_LEN + 1);
        let err = UserUuid::new(long).unwrap_err();
        assert!(err.contains("exceeds 36"));
    }

    #[test]
    fn test_user_uuid_length_counts_characters() {
        // 36 two-byte characters fit the column
        let accented = "é".repeat(UserUuid::MAX_LEN);
        assert_eq!(accented.len(), 72);
        assert!(UserUuid::new(accented).is_ok());

        assert!(UserUuid::new("é".repeat(UserUuid::MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_user_uuid_serializes_as_plain_string() {
        let uuid = UserUuid::new("abc").unwrap();
        assert_eq!(serde_json::to_string(&uuid).unwrap(), "\"abc\"");
    }
}
