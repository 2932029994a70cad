//! Value objects - immutable types that represent domain concepts

mod message_id;
mod timestamp;

pub use message_id::{MessageId, MessageIdParseError};
pub use timestamp::Timestamp;
