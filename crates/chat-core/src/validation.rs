//! Input rules shared by the endpoint and the client
//!
//! Usernames are self-asserted; the only checks are that they are not blank
//! and fit the display limit. Lengths count characters, not bytes.

use crate::error::DomainError;

/// Default maximum username length
pub const DEFAULT_MAX_USERNAME_LEN: usize = 20;

/// Default maximum chat message length
pub const DEFAULT_MAX_CONTENT_LEN: usize = 500;

/// Trim and check a username
pub fn normalize_username(raw: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::BlankUsername);
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::UsernameTooLong { max });
    }
    Ok(trimmed.to_string())
}

/// Trim and check chat message content
pub fn normalize_content(raw: &str, max: usize) -> Result<String, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::BlankContent);
    }
    if trimmed.chars().count() > max {
        return Err(DomainError::ContentTooLong { max });
    }
    Ok(trimmed.to_string())
}
