//! # chat-client
//!
//! Client side of the polling sync protocol. A [`SyncClient`] owns one
//! background engine task that polls the server, keeps the delivery cursor,
//! reconnects with linear backoff, and debounces local typing state.
//!
//! ## Example
//!
//! ```ignore
//! use chat_client::{HttpTransport, SyncClient};
//! use chat_common::SyncConfig;
//!
//! let config = SyncConfig::default();
//! let transport = HttpTransport::new("http://127.0.0.1:3000", config.request_timeout)?;
//! let (client, mut events) = SyncClient::new(std::sync::Arc::new(transport), config);
//!
//! client.connect("alice");
//! let pending = client.send_message("hello", "alice");
//! while let Some(event) = events.recv().await {
//!     println!("{event:?}");
//! }
//! ```

mod engine;
mod error;
mod events;
mod handle;
mod pending;
pub mod transport;

pub use error::ClientError;
pub use events::{ClientEvent, ConnectionState};
pub use handle::SyncClient;
pub use pending::{DeliveryStatus, PendingSend};
pub use transport::{HttpTransport, Transport};
