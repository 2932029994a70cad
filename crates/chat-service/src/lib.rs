//! # chat-service
//!
//! Application layer containing the sync use cases, the presence reaper, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    PresenceReaper, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SyncService,
};
