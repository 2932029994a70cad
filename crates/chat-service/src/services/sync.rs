//! Sync service
//!
//! Validates pull and push requests and applies them to the store. The
//! service is stateless; every call is a single store operation.

use chat_core::{normalize_username, Appended, DomainError, Timestamp};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::dto::{
    HealthResponse, MessageResponse, PullQuery, PushPayload, PushRequest, PushResponse,
    ReadinessResponse, SyncResponse, TypingAck,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Sync service
pub struct SyncService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> SyncService<'a> {
    /// Create a new SyncService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Pull everything newer than the caller's cursor
    ///
    /// Registers (or refreshes) the caller's presence. A caller seen for the
    /// first time gets a join entry that is already part of this response.
    #[instrument(skip(self, query), fields(username = query.username.as_deref()))]
    pub async fn pull(&self, query: PullQuery) -> ServiceResult<SyncResponse> {
        let raw = query
            .username
            .ok_or_else(|| ServiceError::invalid_request("username is required"))?;
        let username = normalize_username(&raw, self.ctx.config().max_username_len)
            .map_err(|e| {
                debug!(reason = e.code(), "Pull rejected");
                ServiceError::invalid_request(e.to_string())
            })?;
        let since = parse_since(query.since.as_deref())?;

        let snapshot = self.ctx.store().pull(&username, since);

        if snapshot.joined {
            info!(username = %username, "User joined");
        }
        debug!(
            username = %username,
            since = %since,
            delivered = snapshot.messages.len(),
            cursor = %snapshot.timestamp,
            "Pull served"
        );

        Ok(SyncResponse::from(snapshot))
    }

    /// Apply a chat message or a typing update
    #[instrument(skip(self, request), fields(sender = request.sender.as_deref()))]
    pub async fn push(&self, request: PushRequest) -> ServiceResult<PushResponse> {
        request
            .validate()
            .map_err(|e| ServiceError::malformed(e.to_string()))?;

        let payload = request.into_payload(self.ctx.config()).map_err(|e| {
            debug!(reason = e.code(), "Push rejected");
            ServiceError::malformed(e.to_string())
        })?;

        match payload {
            PushPayload::Typing { sender, is_typing } => {
                let known = self.ctx.store().apply_typing(&sender, is_typing);
                debug!(sender = %sender, is_typing, known, "Typing updated");
                Ok(PushResponse::Typing(TypingAck { success: true }))
            }
            PushPayload::Chat(draft) => {
                let message = match self.ctx.store().post_message(draft) {
                    Appended::New(message) => {
                        info!(
                            message_id = %message.id,
                            sender = %message.sender,
                            timestamp = %message.timestamp,
                            "Message appended"
                        );
                        message
                    }
                    Appended::Existing(message) => {
                        info!(message_id = %message.id, "Duplicate send ignored");
                        message
                    }
                };
                Ok(PushResponse::Message(MessageResponse::from(message)))
            }
        }
    }

    /// Liveness check
    pub fn health(&self) -> HealthResponse {
        HealthResponse::healthy(self.ctx.now().as_millis())
    }

    /// Readiness check with store counters
    pub fn readiness(&self) -> ReadinessResponse {
        ReadinessResponse::ready(
            self.ctx.now().as_millis(),
            self.ctx.store().stats().into(),
        )
    }
}

/// Absent or empty cursors mean "from the beginning"
fn parse_since(raw: Option<&str>) -> ServiceResult<Timestamp> {
    match raw.map(str::trim) {
        None | Some("") => Ok(Timestamp::ZERO),
        Some(text) => text
            .parse::<i64>()
            .map(Timestamp::from_millis)
            .map_err(|_| {
                ServiceError::invalid_request(DomainError::InvalidCursor(text.to_string()).to_string())
            }),
    }
}
