//! Monotonic instant issuance
//!
//! The store stamps every message, and every pull response, with an instant
//! from this clock. Issued instants are strictly increasing even when the
//! wall clock stalls or steps backwards, which is what makes the strict
//! `timestamp > since` delta query gap-free and duplicate-free.

use crate::value_objects::Timestamp;

use super::clock::SharedClock;

#[derive(Debug)]
pub struct MonotonicClock {
    source: SharedClock,
    last: Timestamp,
}

impl MonotonicClock {
    #[must_use]
    pub fn new(source: SharedClock) -> Self {
        Self {
            source,
            last: Timestamp::ZERO,
        }
    }

    /// Current wall-clock reading, not issued
    pub fn now(&self) -> Timestamp {
        self.source.now()
    }

    /// Issue a fresh instant, strictly after every previously issued one
    pub fn issue(&mut self) -> Timestamp {
        let now = self.source.now();
        let issued = if now > self.last { now } else { self.last.next() };
        self.last = issued;
        issued
    }
}
