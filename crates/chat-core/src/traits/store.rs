//! Sync store trait (port) - the shared state behind the sync endpoint
//!
//! The domain layer defines what the endpoint and the reaper need; the
//! store crate provides the in-memory implementation. Every method is one
//! critical section: implementations serialize all calls against each other,
//! so composite operations (`pull`, `post_message`, `apply_typing`,
//! `evict_stale`) are atomic with respect to one another.

use std::time::Duration;

use crate::entities::{Message, MessageDraft, PresenceEntry};
use crate::value_objects::Timestamp;

/// Result of `upsert_presence`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceUpsert {
    pub entry: PresenceEntry,
    /// The username was not in the table before this call
    pub joined: bool,
}

/// Result of appending a draft to the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Appended {
    /// The draft was stamped and appended
    New(Message),
    /// A message with the draft's caller-supplied id already exists; nothing was appended
    Existing(Message),
}

impl Appended {
    pub fn message(&self) -> &Message {
        match self {
            Self::New(m) | Self::Existing(m) => m,
        }
    }

    pub fn into_message(self) -> Message {
        match self {
            Self::New(m) | Self::Existing(m) => m,
        }
    }
}

/// Everything a pull returns, captured under one lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullSnapshot {
    /// Log entries with `timestamp > since`, in log order
    pub messages: Vec<Message>,
    pub users: Vec<PresenceEntry>,
    pub typing_users: Vec<String>,
    /// Issued after any appends of this pull; the caller's next cursor
    pub timestamp: Timestamp,
    /// This pull created the caller's presence entry
    pub joined: bool,
}

/// Counters for readiness reporting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub messages: usize,
    pub online_users: usize,
    pub typing_users: usize,
}

pub trait SyncStore: Send + Sync {
    // =========================================================================
    // Primitive operations
    // =========================================================================

    /// Stamp and append a draft. A draft whose caller-supplied id is already
    /// in the log is not appended again.
    fn append_message(&self, draft: MessageDraft) -> Appended;

    /// Create or refresh a presence entry
    fn upsert_presence(&self, username: &str) -> PresenceUpsert;

    /// Update typing set and entry flag together; no-op (false) if unknown
    fn set_typing(&self, username: &str, is_typing: bool) -> bool;

    /// Messages with `timestamp > since`, in log order
    fn messages_since(&self, since: Timestamp) -> Vec<Message>;

    fn snapshot_presence(&self) -> Vec<PresenceEntry>;

    fn snapshot_typing(&self) -> Vec<String>;

    fn stats(&self) -> StoreStats;

    // =========================================================================
    // Composite operations (one critical section each)
    // =========================================================================

    /// Upsert the caller, append its join if new, then assemble the delta
    fn pull(&self, username: &str, since: Timestamp) -> PullSnapshot;

    /// Append a chat message and refresh the sender's presence if known
    fn post_message(&self, draft: MessageDraft) -> Appended;

    /// Set typing state and refresh the sender's presence if known
    fn apply_typing(&self, username: &str, is_typing: bool) -> bool;

    /// Evict entries idle for longer than `timeout`; returns the synthesized leave messages
    fn evict_stale(&self, timeout: Duration) -> Vec<Message>;
}
