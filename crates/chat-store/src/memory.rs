//! Mutex-guarded in-memory store
//!
//! All three collections live behind a single lock together with the
//! monotonic clock, so stamping a message and appending it happen in the
//! same critical section and log order always equals timestamp order.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::time::Duration;

use chat_core::{
    Appended, Message, MessageDraft, MessageId, MonotonicClock, PresenceEntry, PresenceUpsert,
    PullSnapshot, SharedClock, StoreStats, SyncStore, Timestamp,
};
use parking_lot::Mutex;
use tracing::debug;

pub struct MemoryStore {
    state: Mutex<StoreState>,
}

struct StoreState {
    clock: MonotonicClock,
    messages: Vec<Message>,
    /// Position of each message in `messages`
    index: HashMap<MessageId, usize>,
    presence: HashMap<String, PresenceEntry>,
    typing: BTreeSet<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(clock: SharedClock) -> Self {
        Self {
            state: Mutex::new(StoreState {
                clock: MonotonicClock::new(clock),
                messages: Vec::new(),
                index: HashMap::new(),
                presence: HashMap::new(),
                typing: BTreeSet::new(),
            }),
        }
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("stats", &self.stats())
            .finish()
    }
}

impl StoreState {
    fn append(&mut self, draft: MessageDraft) -> Appended {
        if let Some(existing) = draft
            .id
            .as_ref()
            .and_then(|id| self.index.get(id))
            .and_then(|&pos| self.messages.get(pos))
        {
            return Appended::Existing(existing.clone());
        }

        let message = draft.stamp(self.clock.issue());
        self.index.insert(message.id.clone(), self.messages.len());
        self.messages.push(message.clone());
        Appended::New(message)
    }

    fn upsert(&mut self, username: &str) -> PresenceUpsert {
        let now = self.clock.now();
        match self.presence.get_mut(username) {
            Some(entry) => {
                entry.touch(now);
                PresenceUpsert {
                    entry: entry.clone(),
                    joined: false,
                }
            }
            None => {
                let entry = PresenceEntry::new(username, now);
                self.presence.insert(username.to_string(), entry.clone());
                PresenceUpsert {
                    entry,
                    joined: true,
                }
            }
        }
    }

    fn refresh(&mut self, username: &str) -> bool {
        let now = self.clock.now();
        match self.presence.get_mut(username) {
            Some(entry) => {
                entry.touch(now);
                true
            }
            None => false,
        }
    }

    fn set_typing(&mut self, username: &str, is_typing: bool) -> bool {
        let Some(entry) = self.presence.get_mut(username) else {
            return false;
        };
        entry.is_typing = is_typing;
        if is_typing {
            self.typing.insert(username.to_string());
        } else {
            self.typing.remove(username);
        }
        true
    }

    fn messages_since(&self, since: Timestamp) -> Vec<Message> {
        // Log order equals timestamp order, so the delta is a suffix.
        let start = self.messages.partition_point(|m| m.timestamp <= since);
        self.messages[start..].to_vec()
    }

    fn presence_snapshot(&self) -> Vec<PresenceEntry> {
        let mut users: Vec<PresenceEntry> = self.presence.values().cloned().collect();
        users.sort_by(|a, b| {
            a.joined_at
                .cmp(&b.joined_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        users
    }

    fn typing_snapshot(&self) -> Vec<String> {
        self.typing.iter().cloned().collect()
    }
}

impl SyncStore for MemoryStore {
    fn append_message(&self, draft: MessageDraft) -> Appended {
        self.state.lock().append(draft)
    }

    fn upsert_presence(&self, username: &str) -> PresenceUpsert {
        self.state.lock().upsert(username)
    }

    fn set_typing(&self, username: &str, is_typing: bool) -> bool {
        self.state.lock().set_typing(username, is_typing)
    }

    fn messages_since(&self, since: Timestamp) -> Vec<Message> {
        self.state.lock().messages_since(since)
    }

    fn snapshot_presence(&self) -> Vec<PresenceEntry> {
        self.state.lock().presence_snapshot()
    }

    fn snapshot_typing(&self) -> Vec<String> {
        self.state.lock().typing_snapshot()
    }

    fn stats(&self) -> StoreStats {
        let state = self.state.lock();
        StoreStats {
            messages: state.messages.len(),
            online_users: state.presence.len(),
            typing_users: state.typing.len(),
        }
    }

    fn pull(&self, username: &str, since: Timestamp) -> PullSnapshot {
        let mut state = self.state.lock();

        let upsert = state.upsert(username);
        if upsert.joined {
            let join = state.append(MessageDraft::join(username));
            debug!(username, id = %join.message().id, "user joined");
        }

        let messages = state.messages_since(since);
        let users = state.presence_snapshot();
        let typing_users = state.typing_snapshot();
        let timestamp = state.clock.issue();

        PullSnapshot {
            messages,
            users,
            typing_users,
            timestamp,
            joined: upsert.joined,
        }
    }

    fn post_message(&self, draft: MessageDraft) -> Appended {
        let mut state = self.state.lock();
        let sender = draft.sender.clone();
        let appended = state.append(draft);
        state.refresh(&sender);
        appended
    }

    fn apply_typing(&self, username: &str, is_typing: bool) -> bool {
        let mut state = self.state.lock();
        state.refresh(username);
        state.set_typing(username, is_typing)
    }

    fn evict_stale(&self, timeout: Duration) -> Vec<Message> {
        let mut state = self.state.lock();
        let now = state.clock.now();

        let mut stale: Vec<String> = state
            .presence
            .values()
            .filter(|entry| entry.is_stale(now, timeout))
            .map(|entry| entry.username.clone())
            .collect();
        stale.sort();

        stale
            .into_iter()
            .map(|username| {
                state.presence.remove(&username);
                state.typing.remove(&username);
                state
                    .append(MessageDraft::leave(&username))
                    .into_message()
            })
            .collect()
    }
}
