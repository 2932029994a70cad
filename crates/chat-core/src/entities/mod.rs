//! Domain entities - core business objects

mod message;
mod presence;

pub use message::{Message, MessageDraft, MessageKind, MessageKindParseError};
pub use presence::PresenceEntry;
