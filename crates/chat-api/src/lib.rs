//! # chat-api
//!
//! HTTP surface of the chat sync service built with Axum: `GET /chat`,
//! `POST /chat`, and health checks.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, create_app_state_with_clock, run, run_server};
pub use state::AppState;
