//! Traits (ports) implemented by the infrastructure layer

mod store;

pub use store::{Appended, PresenceUpsert, PullSnapshot, StoreStats, SyncStore};
