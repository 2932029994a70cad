//! Entity to DTO mappers
//!
//! `From` conversions from domain entities to response DTOs, and the
//! fallible reverse direction used by the client when decoding.

use chat_core::{
    DomainError, Message, MessageId, PresenceEntry, PullSnapshot, StoreStats, Timestamp,
};

use super::responses::{MessageResponse, PresenceResponse, StoreChecks, SyncResponse};

// ============================================================================
// Message Mappers
// ============================================================================

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.as_str().to_string(),
            content: message.content.clone(),
            sender: message.sender.clone(),
            timestamp: message.timestamp.as_millis(),
            kind: message.kind.as_str().to_string(),
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self {
            id: message.id.into_inner(),
            content: message.content,
            sender: message.sender,
            timestamp: message.timestamp.as_millis(),
            kind: message.kind.as_str().to_string(),
        }
    }
}

impl TryFrom<MessageResponse> for Message {
    type Error = DomainError;

    fn try_from(response: MessageResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MessageId::parse(&response.id)
                .map_err(|e| DomainError::InvalidMessageId(e.to_string()))?,
            kind: response
                .kind
                .parse()
                .map_err(|_| DomainError::UnsupportedKind(response.kind.clone()))?,
            content: response.content,
            sender: response.sender,
            timestamp: Timestamp::from_millis(response.timestamp),
        })
    }
}

// ============================================================================
// Presence Mappers
// ============================================================================

impl From<&PresenceEntry> for PresenceResponse {
    fn from(entry: &PresenceEntry) -> Self {
        Self {
            username: entry.username.clone(),
            joined_at: entry.joined_at.as_millis(),
            last_seen: entry.last_seen.as_millis(),
            is_typing: entry.is_typing,
        }
    }
}

impl From<PresenceResponse> for PresenceEntry {
    fn from(response: PresenceResponse) -> Self {
        Self {
            username: response.username,
            joined_at: Timestamp::from_millis(response.joined_at),
            last_seen: Timestamp::from_millis(response.last_seen),
            is_typing: response.is_typing,
        }
    }
}

// ============================================================================
// Snapshot Mappers
// ============================================================================

impl From<PullSnapshot> for SyncResponse {
    fn from(snapshot: PullSnapshot) -> Self {
        Self {
            messages: snapshot
                .messages
                .into_iter()
                .map(MessageResponse::from)
                .collect(),
            users: snapshot.users.iter().map(PresenceResponse::from).collect(),
            typing_users: snapshot.typing_users,
            timestamp: snapshot.timestamp.as_millis(),
        }
    }
}

impl From<StoreStats> for StoreChecks {
    fn from(stats: StoreStats) -> Self {
        Self {
            messages: stats.messages,
            online_users: stats.online_users,
            typing_users: stats.typing_users,
        }
    }
}
