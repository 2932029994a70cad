//! Response DTOs for the sync endpoint
//!
//! All instants are integer milliseconds since the Unix epoch. The structs
//! also implement `Deserialize` so the client can decode them.

use serde::{Deserialize, Serialize};

// ============================================================================
// Sync Responses
// ============================================================================

/// Log entry as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub id: String,
    pub content: String,
    pub sender: String,
    pub timestamp: i64,
    /// `message`, `join` or `leave`
    #[serde(rename = "type")]
    pub kind: String,
}

/// Presence entry as sent on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceResponse {
    pub username: String,
    pub joined_at: i64,
    pub last_seen: i64,
    pub is_typing: bool,
}

/// Response to `GET /chat`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    /// Entries newer than the request cursor, in log order
    pub messages: Vec<MessageResponse>,
    pub users: Vec<PresenceResponse>,
    pub typing_users: Vec<String>,
    /// The caller's next cursor
    pub timestamp: i64,
}

/// Response to a typing push
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypingAck {
    pub success: bool,
}

/// Response to `POST /chat`: the echoed message or a typing acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PushResponse {
    Message(MessageResponse),
    Typing(TypingAck),
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
}

impl HealthResponse {
    pub fn healthy(timestamp: i64) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp,
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: i64,
    pub checks: StoreChecks,
}

/// Store counters reported by the readiness check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreChecks {
    pub messages: usize,
    pub online_users: usize,
    pub typing_users: usize,
}

impl ReadinessResponse {
    pub fn ready(timestamp: i64, checks: StoreChecks) -> Self {
        Self {
            status: "ready".to_string(),
            timestamp,
            checks,
        }
    }
}
