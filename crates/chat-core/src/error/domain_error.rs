//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
///
/// Every variant is a rejected input; the store itself never fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Username must not be blank")]
    BlankUsername,

    #[error("Username too long: max {max} characters")]
    UsernameTooLong { max: usize },

    #[error("Message content must not be blank")]
    BlankContent,

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    #[error("Invalid message id: {0}")]
    InvalidMessageId(String),

    #[error("Unsupported message type: {0}")]
    UnsupportedKind(String),

    #[error("Invalid cursor: {0}")]
    InvalidCursor(String),
}

impl DomainError {
    /// Stable reason code, recorded when a request is rejected
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::BlankUsername => "BLANK_USERNAME",
            Self::UsernameTooLong { .. } => "USERNAME_TOO_LONG",
            Self::BlankContent => "BLANK_CONTENT",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",
            Self::InvalidMessageId(_) => "INVALID_MESSAGE_ID",
            Self::UnsupportedKind(_) => "UNSUPPORTED_TYPE",
            Self::InvalidCursor(_) => "INVALID_CURSOR",
        }
    }
}
