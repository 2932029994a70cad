//! Message ID - opaque identifier for a chat message
//!
//! Server-generated ids are UUID v4 strings. Clients may supply their own id
//! when pushing a message so that a retried send can be recognized; any
//! non-blank string up to [`MessageId::MAX_LEN`] characters is accepted.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque, unique message identifier
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(String);

impl MessageId {
    /// Upper bound on caller-supplied ids
    pub const MAX_LEN: usize = 128;

    /// Generate a fresh random id
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Parse a caller-supplied id
    pub fn parse(s: &str) -> Result<Self, MessageIdParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MessageIdParseError::Empty);
        }
        if trimmed.chars().count() > Self::MAX_LEN {
            return Err(MessageIdParseError::TooLong { max: Self::MAX_LEN });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return the inner string
    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Error when parsing a caller-supplied message id
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MessageIdParseError {
    #[error("message id must not be blank")]
    Empty,

    #[error("message id longer than {max} characters")]
    TooLong { max: usize },
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MessageId {
    type Err = MessageIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageId::parse(s)
    }
}

impl AsRef<str> for MessageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for MessageId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        MessageId::parse(&raw).map_err(serde::de::Error::custom)
    }
}
