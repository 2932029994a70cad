//! Presence entry - who is online, since when, and whether they are typing

use std::time::Duration;

use crate::value_objects::Timestamp;

/// One row of the presence table, keyed by username.
///
/// `joined_at <= last_seen` holds for the lifetime of the entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceEntry {
    pub username: String,
    pub joined_at: Timestamp,
    pub last_seen: Timestamp,
    pub is_typing: bool,
}

impl PresenceEntry {
    pub fn new(username: impl Into<String>, now: Timestamp) -> Self {
        Self {
            username: username.into(),
            joined_at: now,
            last_seen: now,
            is_typing: false,
        }
    }

    /// Record activity. Never moves `last_seen` backwards.
    pub fn touch(&mut self, now: Timestamp) {
        if now > self.last_seen {
            self.last_seen = now;
        }
    }

    /// True once `now - last_seen` exceeds `timeout`
    pub fn is_stale(&self, now: Timestamp, timeout: Duration) -> bool {
        self.last_seen.is_older_than(now, timeout)
    }
}
