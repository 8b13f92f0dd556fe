//! REST surface
//!
//! | Method | Path                | Handler                       |
//! |--------|---------------------|-------------------------------|
//! | POST   | `/api/users/fetch`  | [`handlers::fetch_users`]     |
//! | GET    | `/api/users`        | [`handlers::list_users`]      |
//! | PUT    | `/api/users/:uuid`  | [`handlers::update_user`]     |
//! | GET    | `/health`           | [`handlers::health_check`]    |

pub mod error;
pub mod handlers;
pub mod middleware;

use crate::config::ServerConfig;
use crate::core::ingest::IngestCoordinator;
use crate::core::users::UserService;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;

pub use error::{ApiError, ApiResult};
pub use handlers::{FetchResponse, MessageResponse};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub users: UserService,
    pub ingest: Arc<IngestCoordinator>,
}

impl AppState {
    pub fn new(users: UserService, ingest: IngestCoordinator) -> Self {
        Self {
            users,
            ingest: Arc::new(ingest),
        }
    }
}

/// User routes, mounted at `/api/users`
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/fetch", post(handlers::fetch_users))
        .route("/api/users/:uuid", put(handlers::update_user))
}

/// Build the application router with all routes and middleware
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(user_routes())
        .with_state(state)
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(config))
}
