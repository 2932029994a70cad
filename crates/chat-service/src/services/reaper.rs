//! Presence reaper
//!
//! Background task that periodically evicts presence entries whose owners
//! stopped polling, appending a leave entry for each. It runs regardless of
//! request traffic and stops on server shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chat_common::SyncConfig;
use chat_core::{Message, SyncStore};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub struct PresenceReaper {
    store: Arc<dyn SyncStore>,
    /// Idle time after which an entry is evicted
    timeout: Duration,
    /// Sweep period
    period: Duration,
    running: AtomicBool,
    shutdown: Notify,
}

impl PresenceReaper {
    pub fn new(store: Arc<dyn SyncStore>, config: &SyncConfig) -> Self {
        Self {
            store,
            timeout: config.presence_timeout,
            period: config.reaper_interval,
            running: AtomicBool::new(false),
            shutdown: Notify::new(),
        }
    }

    /// Start sweeping in a background task
    ///
    /// Returns `None` if the reaper is already running.
    pub fn start(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.running.swap(true, Ordering::SeqCst) {
            tracing::warn!("Presence reaper is already running");
            return None;
        }

        let reaper = Arc::clone(&self);
        let handle = tokio::spawn(async move {
            reaper.run().await;
        });

        tracing::info!(
            period_secs = self.period.as_secs(),
            timeout_secs = self.timeout.as_secs(),
            "Presence reaper started"
        );
        Some(handle)
    }

    /// Stop the background task after its current sweep
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.shutdown.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Evict stale entries once; returns the leave entries appended
    pub fn sweep(&self) -> Vec<Message> {
        let left = self.store.evict_stale(self.timeout);
        for message in &left {
            tracing::info!(username = %message.sender, "User timed out");
        }
        if !left.is_empty() {
            tracing::debug!(evicted = left.len(), "Presence sweep finished");
        }
        left
    }

    async fn run(&self) {
        // First sweep one full period after start.
        let mut ticker = interval_at(Instant::now() + self.period, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while self.running.load(Ordering::SeqCst) {
            tokio::select! {
                _ = ticker.tick() => {
                    self.sweep();
                }
                () = self.shutdown.notified() => {
                    break;
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        tracing::info!("Presence reaper stopped");
    }
}

impl std::fmt::Debug for PresenceReaper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceReaper")
            .field("timeout", &self.timeout)
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}
