//! Client error types

use thiserror::Error;

/// Failure of a single request to the sync endpoint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Connection refused, reset, DNS failure, and the like
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status
    #[error("Server returned {status} {code}: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Whether retrying the same request could succeed
    ///
    /// 4xx answers are the caller's fault and are not retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Status { status, .. } => !(400..500).contains(status),
            Self::Transport(_) | Self::Timeout | Self::Decode(_) => true,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
