//! Timestamp - an instant in integer milliseconds since the Unix epoch
//!
//! This is the unit used on the wire for message timestamps, presence
//! instants and the client's delivery cursor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Milliseconds since the Unix epoch
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch
    pub const ZERO: Self = Self(0);

    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[inline]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// The next representable instant
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Milliseconds elapsed from `earlier` to `self`, clamped at zero
    pub fn millis_since(self, earlier: Self) -> i64 {
        self.0.saturating_sub(earlier.0).max(0)
    }

    /// True when more than `timeout` separates `self` from `now`
    pub fn is_older_than(self, now: Self, timeout: Duration) -> bool {
        now.millis_since(self) > duration_millis(timeout)
    }
}

fn duration_millis(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}
