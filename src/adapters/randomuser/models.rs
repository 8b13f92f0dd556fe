//! Upstream API models
//!
//! Only the fields the pipeline reads are declared; everything else in the
//! upstream payload is ignored. Nested fields are optional so a record with a
//! missing field still deserializes and the transformer can report exactly
//! what is missing.

use serde::{Deserialize, Serialize};

/// One page of the upstream response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageResponse {
    /// Absent or null `results` is read as an empty page
    #[serde(default)]
    pub results: Option<Vec<RawUser>>,
}

impl PageResponse {
    pub fn into_results(self) -> Vec<RawUser> {
        self.results.unwrap_or_default()
    }
}

/// A raw upstream user record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawUser {
    #[serde(default)]
    pub login: Option<RawLogin>,

    #[serde(default)]
    pub name: Option<RawName>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub location: Option<RawLocation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLogin {
    #[serde(default)]
    pub uuid: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawName {
    #[serde(default)]
    pub first: Option<String>,

    #[serde(default)]
    pub last: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLocation {
    #[serde(default)]
    pub city: Option<String>,
}

impl RawUser {
    /// Builds a fully populated record
    pub fn new(uuid: &str, first: &str, last: &str, email: &str, city: &str) -> Self {
        Self {
            login: Some(RawLogin {
                uuid: Some(uuid.to_string()),
            }),
            name: Some(RawName {
                first: Some(first.to_string()),
                last: Some(last.to_string()),
            }),
            email: Some(email.to_string()),
            location: Some(RawLocation {
                city: Some(city.to_string()),
            }),
        }
    }
}
