//! Clocks - the time sources used by the store, the reaper and the client

mod clock;
mod monotonic;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use monotonic::MonotonicClock;
