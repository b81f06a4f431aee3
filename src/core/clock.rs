//! Wall-clock access for time-windowed queries.

use chrono::{NaiveDateTime, SubsecRound, Utc};

/// Source of "now" for the tracker.
///
/// Timestamps carry no timezone, so the clock reports naive UTC time
/// truncated to whole seconds.
pub trait Clock {
    /// The current time.
    fn now(&self) -> NaiveDateTime;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc().trunc_subsecs(0)
    }
}

/// A clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
