//! Route handlers

use super::error::{ApiError, ApiResult, FETCH_FAILED_MESSAGE, INVALID_BODY_MESSAGE};
use super::AppState;
use crate::domain::{User, UserPatch};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Body returned by a completed ingestion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResponse {
    pub message: String,
    pub fetched_count: usize,
    pub inserted_count: u64,
}

/// Plain `{ "message": ... }` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// `POST /api/users/fetch`
///
/// Blocks until the whole crawl and write have finished.
pub async fn fetch_users(State(state): State<AppState>) -> ApiResult<Json<FetchResponse>> {
    tracing::info!("Fetching users from upstream");

    match state.ingest.run(false).await {
        Ok(summary) => Ok(Json(FetchResponse {
            message: "Fetch complete".to_string(),
            fetched_count: summary.fetched_count,
            inserted_count: summary.inserted_count,
        })),
        Err(e) => {
            tracing::error!(error = %e, "Ingestion run failed");
            Err(ApiError::internal(FETCH_FAILED_MESSAGE))
        }
    }
}

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// `PUT /api/users/:uuid`
///
/// A missing or unparseable body is treated as a patch with no fields. Valid
/// JSON with a non-string field is rejected on its own.
pub async fn update_user(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let patch = match body {
        Ok(Json(patch)) => patch,
        Err(JsonRejection::JsonDataError(e)) => {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                format!("{INVALID_BODY_MESSAGE}: {}", e.body_text()),
            ));
        }
        Err(_) => UserPatch::default(),
    };

    state.users.update(&uuid, &patch).await?;

    Ok(Json(MessageResponse {
        message: "User updated successfully".to_string(),
    }))
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.users.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected"
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Store health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unhealthy",
                    "database": "disconnected"
                })),
            )
                .into_response()
        }
    }
}
