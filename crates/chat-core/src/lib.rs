//! # chat-core
//!
//! Domain layer containing entities, value objects, clocks and the store trait.
//! This crate has zero dependencies on infrastructure (HTTP, async runtime, etc.).

pub mod entities;
pub mod error;
pub mod time;
pub mod traits;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Message, MessageDraft, MessageKind, MessageKindParseError, PresenceEntry};
pub use error::DomainError;
pub use time::{Clock, ManualClock, MonotonicClock, SharedClock, SystemClock};
pub use traits::{Appended, PresenceUpsert, PullSnapshot, StoreStats, SyncStore};
pub use validation::{
    normalize_content, normalize_username, DEFAULT_MAX_CONTENT_LEN, DEFAULT_MAX_USERNAME_LEN,
};
pub use value_objects::{MessageId, MessageIdParseError, Timestamp};
