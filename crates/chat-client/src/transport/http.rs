//! HTTP transport over reqwest

use std::time::Duration;

use async_trait::async_trait;
use chat_common::SyncConfig;
use chat_core::Timestamp;
use chat_service::dto::{PushRequest, PushResponse, SyncResponse};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::Transport;
use crate::error::ClientError;

/// Talks to a chat server at `base_url` (e.g. `http://127.0.0.1:3000`)
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

/// `{ "error": { "code", "message" } }`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorPayload,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    code: String,
    message: String,
}

impl HttpTransport {
    /// Every request gets `timeout` as its deadline
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(base_url: &str, config: &SyncConfig) -> Result<Self, ClientError> {
        Self::new(base_url, config.request_timeout)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ClientError::Decode(e.to_string()));
        }

        let (code, message) = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => (envelope.error.code, envelope.error.message),
            Err(_) => (
                status.canonical_reason().unwrap_or("UNKNOWN").to_string(),
                String::new(),
            ),
        };
        Err(ClientError::Status {
            status: status.as_u16(),
            code,
            message,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn pull(&self, username: &str, since: Timestamp) -> Result<SyncResponse, ClientError> {
        let since = since.as_millis().to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("username", username), ("since", since.as_str())])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn push(&self, request: PushRequest) -> Result<PushResponse, ClientError> {
        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        Self::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_normalization() {
        let transport = HttpTransport::new("http://localhost:3000/", Duration::from_millis(900)).unwrap();
        assert_eq!(transport.endpoint, "http://localhost:3000/chat");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transient() {
        // Port 9 (discard) is closed on test machines.
        let transport = HttpTransport::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = transport.pull("alice", Timestamp::ZERO).await.unwrap_err();
        assert!(err.is_transient());
    }
}
