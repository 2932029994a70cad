//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use chat_api::{create_app, create_app_state, create_app_state_with_clock, run_server, AppState};
use chat_client::ClientEvent;
use chat_common::AppConfig;
use chat_core::{ManualClock, SharedClock, Timestamp};
use chat_service::dto::SyncResponse;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Test server instance that manages lifecycle
///
/// The server shuts down gracefully when this is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    pub state: AppState,
    shutdown: Option<oneshot::Sender<()>>,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a new test server on the system clock
    pub async fn start() -> Result<Self> {
        let config = AppConfig::default();
        let state = create_app_state(config)?;
        Self::serve(state).await
    }

    /// Start a test server whose store reads time from `clock`
    pub async fn start_with_clock(clock: SharedClock) -> Result<Self> {
        let state = create_app_state_with_clock(AppConfig::default(), clock)?;
        Self::serve(state).await
    }

    async fn serve(state: AppState) -> Result<Self> {
        let app = create_app(state.clone());

        // Port 0 lets the OS pick a free port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let shutdown = async {
                shutdown_rx.await.ok();
            };
            run_server(listener, app, shutdown).await.ok();
        });

        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            addr,
            client,
            state,
            shutdown: Some(shutdown_tx),
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.get(&url).send().await?)
    }

    /// Make a POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self.client.post(&url).json(body).send().await?)
    }

    /// Make a POST request with a raw body
    pub async fn post_raw(&self, path: &str, body: &str) -> Result<Response> {
        let url = format!("{}{}", self.base_url(), path);
        Ok(self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .body(body.to_string())
            .send()
            .await?)
    }

    /// Pull as `username` from `since` and decode the snapshot
    pub async fn pull(&self, username: &str, since: i64) -> Result<SyncResponse> {
        let response = self
            .get(&format!("/chat?username={username}&since={since}"))
            .await?;
        assert_json(response, StatusCode::OK).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
    }
}

/// Manual clock starting at a fixed instant, for presence timeout tests
pub fn manual_clock() -> std::sync::Arc<ManualClock> {
    ManualClock::shared(Timestamp::from_millis(1_700_000_000_000))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}

/// Wait for the first event matching `predicate`, skipping the others
pub async fn wait_for_event<F>(
    events: &mut mpsc::UnboundedReceiver<ClientEvent>,
    timeout: Duration,
    mut predicate: F,
) -> Result<ClientEvent>
where
    F: FnMut(&ClientEvent) -> bool,
{
    let search = async {
        while let Some(event) = events.recv().await {
            if predicate(&event) {
                return Some(event);
            }
        }
        None
    };

    match tokio::time::timeout(timeout, search).await {
        Ok(Some(event)) => Ok(event),
        Ok(None) => anyhow::bail!("Event stream closed"),
        Err(_) => anyhow::bail!("No matching event within {timeout:?}"),
    }
}
