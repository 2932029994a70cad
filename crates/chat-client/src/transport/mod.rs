//! Transport abstraction between the engine and the sync endpoint

mod http;

use async_trait::async_trait;
use chat_core::Timestamp;
use chat_service::dto::{PushRequest, PushResponse, SyncResponse};

use crate::error::ClientError;

pub use http::HttpTransport;

/// One request/response exchange with the sync endpoint
#[async_trait]
pub trait Transport: Send + Sync {
    /// `GET /chat?username=..&since=..`
    async fn pull(&self, username: &str, since: Timestamp) -> Result<SyncResponse, ClientError>;

    /// `POST /chat`
    async fn push(&self, request: PushRequest) -> Result<PushResponse, ClientError>;
}
