//! Core abstractions for the tracker.
//!
//! This module provides shared time utilities used across the crate.

mod clock;
mod timestamp;

pub use clock::{Clock, FixedClock, SystemClock};
pub use timestamp::{format_timestamp, parse_timestamp, TIMESTAMP_FORMAT};
