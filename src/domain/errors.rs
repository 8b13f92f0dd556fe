//! Domain error types
//!
//! This module defines the error hierarchy for Roster.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Roster error type
///
/// This is the primary error type used throughout the application.
/// The HTTP layer maps `Validation` to 400, `NotFound` to 404 and
/// everything else to 500.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream API errors
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A raw upstream record could not be mapped to a user row
    #[error("Transform error: {0}")]
    Transform(String),

    /// Business-rule violations on caller input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised by a single attempt against the upstream user API.
///
/// The page fetcher treats every variant as retryable.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Request could not be sent or the connection dropped
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Server answered with a non-2xx status
    #[error("Unexpected status {status}: {message}")]
    Status { status: u16, message: String },

    /// Body was not the expected JSON shape
    #[error("Malformed response body: {0}")]
    MalformedBody(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),
}

/// Store errors
///
/// These errors don't expose the driver or pool types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to obtain a connection
    #[error("Failed to connect to store: {0}")]
    ConnectionFailed(String),

    /// Failed to create the schema
    #[error("Failed to initialize schema: {0}")]
    SchemaFailed(String),

    /// Bulk insert failed
    #[error("Failed to insert users: {0}")]
    InsertFailed(String),

    /// Update failed
    #[error("Failed to update user: {0}")]
    UpdateFailed(String),

    /// Query failed
    #[error("Failed to query users: {0}")]
    QueryFailed(String),
}

impl From<std::io::Error> for RosterError {
    fn from(err: std::io::Error) -> Self {
        RosterError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RosterError {
    fn from(err: serde_json::Error) -> Self {
        RosterError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for RosterError {
    fn from(err: toml::de::Error) -> Self {
        RosterError::Configuration(format!("TOML parse error: {err}"))
    }
}
