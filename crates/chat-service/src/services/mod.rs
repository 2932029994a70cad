//! Business logic services
//!
//! The sync service validates and applies pull/push requests against the
//! store; the reaper evicts idle presence entries in the background.

pub mod context;
pub mod error;
pub mod reaper;
pub mod sync;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use reaper::PresenceReaper;
pub use sync::SyncService;
