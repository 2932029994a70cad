//! # chat-store
//!
//! Volatile, process-local implementation of [`chat_core::SyncStore`].
//!
//! ## Example
//!
//! ```ignore
//! use chat_core::{MessageDraft, SystemClock, SyncStore, Timestamp};
//! use chat_store::MemoryStore;
//!
//! let store = MemoryStore::new(SystemClock::shared());
//! let snapshot = store.pull("alice", Timestamp::ZERO);
//! store.post_message(MessageDraft::chat(None, "alice", "hi"));
//! ```

mod memory;

pub use memory::MemoryStore;
