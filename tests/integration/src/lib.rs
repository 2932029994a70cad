//! Integration test utilities for the chat server
//!
//! This crate provides helpers for running end-to-end tests against
//! the sync endpoint, both over raw HTTP and through the client engine.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
