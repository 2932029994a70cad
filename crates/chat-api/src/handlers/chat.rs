//! Sync endpoint handlers
//!
//! Pull incremental updates and push messages or typing state.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chat_service::dto::{PullQuery, PushRequest, PushResponse, SyncResponse};
use chat_service::SyncService;

use crate::extractors::ValidatedJson;
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Pull messages newer than `since`, plus presence and typing snapshots
///
/// GET /chat?username={username}&since={millis}
pub async fn pull(
    State(state): State<AppState>,
    query: Result<Query<PullQuery>, QueryRejection>,
) -> ApiResult<Json<SyncResponse>> {
    let Query(query) = query.map_err(|e| ApiError::invalid_query(e.body_text()))?;

    let service = SyncService::new(state.service_context());
    let response = service.pull(query).await?;
    Ok(Json(response))
}

/// Push a chat message or a typing update
///
/// POST /chat
pub async fn push(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PushRequest>,
) -> ApiResult<Json<PushResponse>> {
    let service = SyncService::new(state.service_context());
    let response = service.push(request).await?;
    Ok(Json(response))
}
