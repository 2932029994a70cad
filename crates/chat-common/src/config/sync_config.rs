//! Synchronization timing and limits
//!
//! Shared by the server (presence timeout, reaper period, input limits) and
//! the client engine (poll cadence, backoff, typing debounce).

use std::time::Duration;

use chat_core::{DEFAULT_MAX_CONTENT_LEN, DEFAULT_MAX_USERNAME_LEN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Delay between pulls while connected
    pub poll_interval: Duration,
    /// Inactivity after which a presence entry is evicted
    pub presence_timeout: Duration,
    /// Period of the presence reaper sweep
    pub reaper_interval: Duration,
    /// Idle time after the last keystroke before typing=false is pushed
    pub typing_idle: Duration,
    /// Consecutive pull failures before the client gives up
    pub max_reconnect_attempts: u32,
    /// Per-request timeout for pulls and pushes
    pub request_timeout: Duration,
    pub max_message_len: usize,
    pub max_username_len: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(1_000),
            presence_timeout: Duration::from_secs(60),
            reaper_interval: Duration::from_secs(60),
            typing_idle: Duration::from_millis(3_000),
            max_reconnect_attempts: 5,
            request_timeout: Duration::from_millis(900),
            max_message_len: DEFAULT_MAX_CONTENT_LEN,
            max_username_len: DEFAULT_MAX_USERNAME_LEN,
        }
    }
}

impl SyncConfig {
    /// Reconnect delay after the given number of consecutive failures
    /// (linear: `poll_interval × attempt`)
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.poll_interval.saturating_mul(attempt.max(1))
    }
}
