//! Message entity - an entry in the append-only chat log

use std::fmt;

use crate::value_objects::{MessageId, Timestamp};

/// What a log entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    /// A user-authored chat message
    #[default]
    Message,
    /// A user appeared for the first time (or again after eviction)
    Join,
    /// A user timed out and was evicted from presence
    Leave,
}

impl MessageKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Join => "join",
            Self::Leave => "leave",
        }
    }

    /// Join and leave entries are synthesized by the server
    #[inline]
    pub fn is_system(&self) -> bool {
        !matches!(self, Self::Message)
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a message kind
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown message type: {0}")]
pub struct MessageKindParseError(pub String);

impl std::str::FromStr for MessageKind {
    type Err = MessageKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "join" => Ok(Self::Join),
            "leave" => Ok(Self::Leave),
            other => Err(MessageKindParseError(other.to_string())),
        }
    }
}

/// Message entity. Immutable once appended to the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub content: String,
    pub sender: String,
    pub timestamp: Timestamp,
    pub kind: MessageKind,
}

impl Message {
    /// Check if this entry was synthesized by the server
    #[inline]
    pub fn is_system(&self) -> bool {
        self.kind.is_system()
    }
}

/// A message that has not been stamped yet.
///
/// The store assigns the timestamp (and the id, when none was supplied)
/// inside its critical section so log order and timestamp order agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDraft {
    pub id: Option<MessageId>,
    pub content: String,
    pub sender: String,
    pub kind: MessageKind,
}

impl MessageDraft {
    /// A user-authored chat message
    pub fn chat(id: Option<MessageId>, sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            sender: sender.into(),
            kind: MessageKind::Message,
        }
    }

    /// "<username> joined the chat"
    pub fn join(username: &str) -> Self {
        Self {
            id: None,
            content: format!("{username} joined the chat"),
            sender: username.to_string(),
            kind: MessageKind::Join,
        }
    }

    /// "<username> left the chat"
    pub fn leave(username: &str) -> Self {
        Self {
            id: None,
            content: format!("{username} left the chat"),
            sender: username.to_string(),
            kind: MessageKind::Leave,
        }
    }

    /// Stamp the draft, generating an id if none was supplied
    pub fn stamp(self, timestamp: Timestamp) -> Message {
        Message {
            id: self.id.unwrap_or_else(MessageId::generate),
            content: self.content,
            sender: self.sender,
            timestamp,
            kind: self.kind,
        }
    }
}
