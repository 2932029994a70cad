//! Health check handlers
//!
//! Endpoints for liveness and readiness checks.

use axum::{extract::State, Json};
use chat_service::dto::{HealthResponse, ReadinessResponse};
use chat_service::SyncService;

use crate::state::AppState;

/// Basic health check (liveness)
///
/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(SyncService::new(state.service_context()).health())
}

/// Readiness check with store counters
///
/// GET /health/ready
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    Json(SyncService::new(state.service_context()).readiness())
}
