//! Data transfer objects for the sync endpoint
//!
//! This module provides:
//! - Request DTOs for pull queries and push bodies
//! - Response DTOs with the camelCase wire shapes
//! - Mappers between domain entities and DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{PullQuery, PushPayload, PushRequest};

pub use responses::{
    HealthResponse, MessageResponse, PresenceResponse, PushResponse, ReadinessResponse,
    StoreChecks, SyncResponse, TypingAck,
};
