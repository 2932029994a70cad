//! What the engine reports to its consumer

use chat_core::{Message, PresenceEntry};

/// Connection lifecycle of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not polling, or waiting to retry after `attempt` consecutive failures
    Disconnected { attempt: u32 },
    /// First pull of a session in flight
    Connecting,
    Connected,
    /// Reconnect attempts exhausted; only a new `connect` resumes polling
    GaveUp,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        Self::Disconnected { attempt: 0 }
    }
}

/// Notification delivered to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    /// A log entry, in server order; each is delivered once per session
    Message(Message),
    /// Fired on transitions into and out of `Connected`
    ConnectionChanged(bool),
    /// Full replacement of the online users view
    UsersChanged(Vec<PresenceEntry>),
    /// Full replacement of the typing users view
    TypingChanged(Vec<String>),
}
