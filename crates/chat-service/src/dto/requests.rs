//! Request DTOs for the sync endpoint
//!
//! Fields are optional at the serde level so that a missing field surfaces
//! as a domain error with a precise message instead of a generic JSON
//! rejection.

use chat_common::SyncConfig;
use chat_core::{normalize_content, normalize_username, DomainError, MessageDraft, MessageId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string of `GET /chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullQuery {
    pub username: Option<String>,
    /// Kept as text so a non-integer cursor can be reported precisely
    pub since: Option<String>,
}

/// Body of `POST /chat`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PushRequest {
    /// `"message"` (default) or `"typing"`
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 128, message = "Message id must be 1-128 characters"))]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_typing: Option<bool>,
}

/// A push body that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushPayload {
    Typing { sender: String, is_typing: bool },
    Chat(MessageDraft),
}

impl PushRequest {
    /// Chat message body with a caller-chosen id
    pub fn chat(id: &MessageId, sender: &str, content: &str) -> Self {
        Self {
            kind: Some("message".to_string()),
            id: Some(id.as_str().to_string()),
            content: Some(content.to_string()),
            sender: Some(sender.to_string()),
            is_typing: None,
        }
    }

    /// Typing indicator body
    pub fn typing(sender: &str, is_typing: bool) -> Self {
        Self {
            kind: Some("typing".to_string()),
            sender: Some(sender.to_string()),
            is_typing: Some(is_typing),
            ..Self::default()
        }
    }

    /// Validate the raw body into a typed payload
    ///
    /// Usernames and content are trimmed and bounded by `limits`.
    pub fn into_payload(self, limits: &SyncConfig) -> Result<PushPayload, DomainError> {
        let sender = self.sender.ok_or(DomainError::MissingField("sender"))?;
        let sender = normalize_username(&sender, limits.max_username_len)?;

        match self.kind.as_deref() {
            Some("typing") => {
                let is_typing = self.is_typing.ok_or(DomainError::MissingField("isTyping"))?;
                Ok(PushPayload::Typing { sender, is_typing })
            }
            None | Some("message") => {
                let content = self.content.ok_or(DomainError::MissingField("content"))?;
                let content = normalize_content(&content, limits.max_message_len)?;
                let id = self
                    .id
                    .map(|raw| {
                        MessageId::parse(&raw).map_err(|e| DomainError::InvalidMessageId(e.to_string()))
                    })
                    .transpose()?;
                Ok(PushPayload::Chat(MessageDraft::chat(id, sender, content)))
            }
            Some(other) => Err(DomainError::UnsupportedKind(other.to_string())),
        }
    }
}
