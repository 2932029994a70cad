//! Route definitions

use axum::{routing::get, Router};

use crate::handlers::{chat, health};
use crate::state::AppState;

/// Sync endpoint routes
pub fn create_router() -> Router<AppState> {
    Router::new().route("/chat", get(chat::pull).post(chat::push))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}
