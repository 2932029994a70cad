//! Sync engine actor
//!
//! One task owns the cursor, the connection state, and the local typing
//! flag. Commands from the handle, pull results, the poll timer, and the
//! typing idle timer are all multiplexed here, so none of that state needs
//! a lock. Requests run in their own tasks and report back over a channel.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chat_common::SyncConfig;
use chat_core::{Message, PresenceEntry, SharedClock, Timestamp};
use chat_service::dto::{PushRequest, SyncResponse};
use tokio::sync::{mpsc, watch};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::events::{ClientEvent, ConnectionState};
use crate::transport::Transport;

pub(crate) enum Command {
    Connect { username: String },
    StartTyping { username: String },
    StopTyping { username: String },
    Disconnect { username: String },
}

struct PullOutcome {
    /// Session the pull was issued for
    epoch: u64,
    result: Result<SyncResponse, ClientError>,
}

struct Session {
    username: String,
    /// Last delivered instant; never decreases
    cursor: Timestamp,
}

#[derive(Default)]
struct TypingState {
    active: bool,
    username: String,
    deadline: Option<Instant>,
}

enum Wake {
    Command(Option<Command>),
    Pulled(PullOutcome),
    PollDue,
    TypingIdle,
}

pub(crate) struct Engine {
    transport: Arc<dyn Transport>,
    config: SyncConfig,
    clock: SharedClock,
    events: mpsc::UnboundedSender<ClientEvent>,
    state: watch::Sender<ConnectionState>,
    results: mpsc::UnboundedSender<PullOutcome>,
    session: Option<Session>,
    /// Bumped on every connect and disconnect; older pull results are dropped
    epoch: u64,
    in_flight: bool,
    /// Consecutive pull failures
    failures: u32,
    next_pull: Option<Instant>,
    typing: TypingState,
    users: Option<Vec<PresenceEntry>>,
    typing_users: Option<Vec<String>>,
}

impl Engine {
    /// Spawn the actor; it exits when the returned sender is dropped
    pub(crate) fn spawn(
        transport: Arc<dyn Transport>,
        config: SyncConfig,
        clock: SharedClock,
        events: mpsc::UnboundedSender<ClientEvent>,
        state: watch::Sender<ConnectionState>,
    ) -> mpsc::UnboundedSender<Command> {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (result_tx, result_rx) = mpsc::unbounded_channel();

        let engine = Self {
            transport,
            config,
            clock,
            events,
            state,
            results: result_tx,
            session: None,
            epoch: 0,
            in_flight: false,
            failures: 0,
            next_pull: None,
            typing: TypingState::default(),
            users: None,
            typing_users: None,
        };
        tokio::spawn(engine.run(command_rx, result_rx));

        command_tx
    }

    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut results: mpsc::UnboundedReceiver<PullOutcome>,
    ) {
        loop {
            let wake = tokio::select! {
                command = commands.recv() => Wake::Command(command),
                Some(outcome) = results.recv() => Wake::Pulled(outcome),
                () = sleep_until_opt(self.next_pull) => Wake::PollDue,
                () = sleep_until_opt(self.typing.deadline) => Wake::TypingIdle,
            };

            match wake {
                Wake::Command(None) => break,
                Wake::Command(Some(command)) => self.handle_command(command),
                Wake::Pulled(outcome) => self.on_pull_result(outcome),
                Wake::PollDue => self.on_poll_due(),
                Wake::TypingIdle => self.on_typing_idle(),
            }
        }
        debug!("Sync engine stopped");
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Connect { username } => self.connect(username),
            Command::StartTyping { username } => self.start_typing(username),
            Command::StopTyping { username } => self.stop_typing(&username),
            Command::Disconnect { username } => self.disconnect(&username),
        }
    }

    // =========================================================================
    // Polling
    // =========================================================================

    fn connect(&mut self, username: String) {
        info!(username = %username, "Connecting");
        self.epoch += 1;
        self.in_flight = false;
        self.failures = 0;
        self.users = None;
        self.typing_users = None;
        self.session = Some(Session {
            username,
            cursor: self.clock.now(),
        });

        self.set_state(ConnectionState::Connecting);
        self.start_pull();
        self.next_pull = Some(Instant::now() + self.config.poll_interval);
    }

    fn disconnect(&mut self, username: &str) {
        info!(username, "Disconnecting");
        self.epoch += 1;
        self.in_flight = false;
        self.failures = 0;
        self.session = None;
        self.next_pull = None;

        self.set_state(ConnectionState::Disconnected { attempt: 0 });
        self.stop_typing(username);
    }

    fn on_poll_due(&mut self) {
        self.next_pull = None;
        if self.session.is_none() {
            return;
        }

        let state = *self.state.borrow();
        match state {
            ConnectionState::Connecting | ConnectionState::Connected => {
                self.next_pull = Some(Instant::now() + self.config.poll_interval);
            }
            // Reconnect attempt; the next one is scheduled by its result.
            ConnectionState::Disconnected { .. } => {}
            ConnectionState::GaveUp => return,
        }

        if self.in_flight {
            debug!("Pull still in flight, skipping tick");
            return;
        }
        self.start_pull();
    }

    fn start_pull(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        self.in_flight = true;

        let transport = Arc::clone(&self.transport);
        let results = self.results.clone();
        let timeout = self.config.request_timeout;
        let username = session.username.clone();
        let since = session.cursor;
        let epoch = self.epoch;

        tokio::spawn(async move {
            let result = with_deadline(timeout, transport.pull(&username, since)).await;
            results.send(PullOutcome { epoch, result }).ok();
        });
    }

    fn on_pull_result(&mut self, outcome: PullOutcome) {
        if outcome.epoch != self.epoch {
            debug!(epoch = outcome.epoch, "Ignoring pull result from an old session");
            return;
        }
        self.in_flight = false;

        match outcome.result {
            Ok(response) => self.on_pull_success(response),
            Err(error) => self.on_pull_failure(&error),
        }
    }

    fn on_pull_success(&mut self, response: SyncResponse) {
        self.failures = 0;
        if !self.state.borrow().is_connected() {
            self.set_state(ConnectionState::Connected);
            if self.next_pull.is_none() {
                self.next_pull = Some(Instant::now() + self.config.poll_interval);
            }
        }

        for entry in response.messages {
            match Message::try_from(entry) {
                Ok(message) => self.emit(ClientEvent::Message(message)),
                Err(e) => warn!(error = %e, "Dropping undecodable message"),
            }
        }

        let users: Vec<PresenceEntry> = response.users.into_iter().map(Into::into).collect();
        if self.users.as_ref() != Some(&users) {
            self.users = Some(users.clone());
            self.emit(ClientEvent::UsersChanged(users));
        }

        if self.typing_users.as_ref() != Some(&response.typing_users) {
            self.typing_users = Some(response.typing_users.clone());
            self.emit(ClientEvent::TypingChanged(response.typing_users));
        }

        if let Some(session) = self.session.as_mut() {
            let returned = Timestamp::from_millis(response.timestamp);
            if returned > session.cursor {
                session.cursor = returned;
            }
        }
    }

    fn on_pull_failure(&mut self, error: &ClientError) {
        self.failures += 1;
        self.next_pull = None;

        if !error.is_transient() || self.failures >= self.config.max_reconnect_attempts {
            warn!(error = %error, attempts = self.failures, "Giving up on the server");
            self.set_state(ConnectionState::GaveUp);
            return;
        }

        let delay = self.config.backoff_for(self.failures);
        warn!(
            error = %error,
            attempt = self.failures,
            max_attempts = self.config.max_reconnect_attempts,
            retry_in_ms = delay.as_millis() as u64,
            "Pull failed, scheduling reconnect"
        );
        self.set_state(ConnectionState::Disconnected {
            attempt: self.failures,
        });
        self.next_pull = Some(Instant::now() + delay);
    }

    // =========================================================================
    // Typing
    // =========================================================================

    fn start_typing(&mut self, username: String) {
        if !self.typing.active {
            self.typing.active = true;
            self.push_typing(&username, true);
        }
        self.typing.username = username;
        self.typing.deadline = Some(Instant::now() + self.config.typing_idle);
    }

    fn stop_typing(&mut self, username: &str) {
        if self.typing.active {
            self.typing.active = false;
            self.push_typing(username, false);
        }
        self.typing.deadline = None;
    }

    fn on_typing_idle(&mut self) {
        let username = std::mem::take(&mut self.typing.username);
        self.stop_typing(&username);
    }

    fn push_typing(&self, username: &str, is_typing: bool) {
        let transport = Arc::clone(&self.transport);
        let timeout = self.config.request_timeout;
        let request = PushRequest::typing(username, is_typing);

        tokio::spawn(async move {
            if let Err(e) = with_deadline(timeout, transport.push(request)).await {
                warn!(error = %e, is_typing, "Failed to send typing indicator");
            }
        });
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    fn set_state(&self, next: ConnectionState) {
        let previous = self.state.send_replace(next);
        if previous.is_connected() != next.is_connected() {
            info!(connected = next.is_connected(), "Connection changed");
            self.emit(ClientEvent::ConnectionChanged(next.is_connected()));
        }
    }

    fn emit(&self, event: ClientEvent) {
        // No receiver just means nobody is listening.
        self.events.send(event).ok();
    }
}

/// Bound any request future by `timeout`
pub(crate) async fn with_deadline<T, F>(timeout: Duration, request: F) -> Result<T, ClientError>
where
    F: Future<Output = Result<T, ClientError>>,
{
    tokio::time::timeout(timeout, request)
        .await
        .unwrap_or(Err(ClientError::Timeout))
}

async fn sleep_until_opt(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
