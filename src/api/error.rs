//! HTTP error responses
//!
//! Every failure is rendered as `{"error": "<message>"}`.

use crate::domain::RosterError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Generic message for a failed ingestion run
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch data";

/// Prefix for update bodies whose fields are not all strings
pub const INVALID_BODY_MESSAGE: &str = "Fields name, email and city must be strings";

/// An error ready to be sent to the client
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<RosterError> for ApiError {
    fn from(err: RosterError) -> Self {
        match err {
            RosterError::Validation(message) => Self::new(StatusCode::BAD_REQUEST, message),
            RosterError::NotFound(message) => Self::new(StatusCode::NOT_FOUND, message),
            other => {
                tracing::error!(error = %other, "Request failed");
                Self::internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
