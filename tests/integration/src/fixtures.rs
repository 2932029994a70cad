//! Test fixtures and data generators
//!
//! Provides reusable request bodies and error shapes for integration tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chat_common::SyncConfig;
use chat_core::MessageId;
use chat_service::dto::PushRequest;
use serde::Deserialize;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Username that fits the default 20 character limit
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}{}", unique_suffix())
}

/// Chat push with a fresh id
pub fn chat_request(sender: &str, content: &str) -> PushRequest {
    PushRequest::chat(&MessageId::generate(), sender, content)
}

/// Chat push with an explicit id
pub fn chat_request_with_id(id: &str, sender: &str, content: &str) -> PushRequest {
    PushRequest {
        id: Some(id.to_string()),
        ..chat_request(sender, content)
    }
}

pub fn typing_request(sender: &str, is_typing: bool) -> PushRequest {
    PushRequest::typing(sender, is_typing)
}

/// Sync timings shortened so client tests finish quickly
pub fn fast_sync_config() -> SyncConfig {
    SyncConfig {
        poll_interval: Duration::from_millis(100),
        typing_idle: Duration::from_millis(300),
        request_timeout: Duration::from_secs(2),
        ..SyncConfig::default()
    }
}

/// `{ "error": { "code", "message", "details"? } }`
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}
