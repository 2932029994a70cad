//! Service layer error types
//!
//! Provides a unified error type for all service operations.

use thiserror::Error;

/// Service layer error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Pull parameters are missing or malformed
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Push body is missing fields, has an unsupported type, or is out of bounds
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest(_) | Self::MalformedPayload(_) => 400,
            Self::Internal(_) => 500,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::MalformedPayload(_) => "MALFORMED_PAYLOAD",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;
