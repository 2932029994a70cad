//! Public handle to the sync engine

use std::sync::Arc;

use chat_common::SyncConfig;
use chat_core::{MessageId, SharedClock, SystemClock};
use chat_service::dto::{PushRequest, PushResponse};
use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument, warn};

use crate::engine::{with_deadline, Command, Engine};
use crate::events::{ClientEvent, ConnectionState};
use crate::pending::{DeliveryStatus, PendingSend};
use crate::transport::Transport;

/// Handle to a running sync engine
///
/// Every method returns immediately; effects show up on the event stream
/// returned by [`SyncClient::new`]. Dropping the handle stops the engine.
pub struct SyncClient {
    commands: mpsc::UnboundedSender<Command>,
    state: watch::Receiver<ConnectionState>,
    transport: Arc<dyn Transport>,
    config: SyncConfig,
}

impl SyncClient {
    /// Start an engine; must be called inside a Tokio runtime
    pub fn new(
        transport: Arc<dyn Transport>,
        config: SyncConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        Self::with_clock(transport, config, SystemClock::shared())
    }

    /// Like [`SyncClient::new`], reading the initial cursor from `clock`
    pub fn with_clock(
        transport: Arc<dyn Transport>,
        config: SyncConfig,
        clock: SharedClock,
    ) -> (Self, mpsc::UnboundedReceiver<ClientEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(ConnectionState::default());

        let commands = Engine::spawn(
            Arc::clone(&transport),
            config.clone(),
            clock,
            event_tx,
            state_tx,
        );

        let client = Self {
            commands,
            state: state_rx,
            transport,
            config,
        };
        (client, event_rx)
    }

    /// Start a session: cursor at "now", one immediate pull, then one per interval
    ///
    /// Calling it again restarts the session.
    pub fn connect(&self, username: &str) {
        self.send(Command::Connect {
            username: username.to_string(),
        });
    }

    /// Push a chat message without waiting for the server
    ///
    /// The message reaches the local view through a later pull, like any
    /// other participant's.
    #[instrument(skip(self, content))]
    pub fn send_message(&self, content: &str, sender: &str) -> PendingSend {
        let id = MessageId::generate();
        let (pending, status) = PendingSend::new(id.clone());

        let request = PushRequest::chat(&id, sender, content);
        let transport = Arc::clone(&self.transport);
        let timeout = self.config.request_timeout;

        tokio::spawn(async move {
            let outcome = match with_deadline(timeout, transport.push(request)).await {
                Ok(PushResponse::Message(message)) => {
                    debug!(id = %message.id, timestamp = message.timestamp, "Message accepted");
                    DeliveryStatus::Sent
                }
                Ok(PushResponse::Typing(_)) => {
                    warn!(id = %id, "Server acknowledged a chat push as typing");
                    DeliveryStatus::Failed
                }
                Err(e) => {
                    warn!(id = %id, error = %e, "Failed to send message");
                    DeliveryStatus::Failed
                }
            };
            status.send_replace(outcome);
        });

        pending
    }

    /// Mark `username` as typing; the server hears about it once per burst
    pub fn start_typing(&self, username: &str) {
        self.send(Command::StartTyping {
            username: username.to_string(),
        });
    }

    /// Clear the typing flag if it is set
    pub fn stop_typing(&self, username: &str) {
        self.send(Command::StopTyping {
            username: username.to_string(),
        });
    }

    /// End the session; results of pulls still in flight are discarded
    pub fn disconnect(&self, username: &str) {
        self.send(Command::Disconnect {
            username: username.to_string(),
        });
    }

    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }

    /// Receiver that observes every state transition
    pub fn watch_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.clone()
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Sync engine is gone, command dropped");
        }
    }
}
