//! Command implementations for the tracker.
//!
//! Each command is a direct pass-through to one service call plus
//! formatting.

mod contacts;
mod correspondence;
mod reminders;

pub use contacts::{active, add_contact, list_contacts};
pub use correspondence::{history, log, set_status};
pub use reminders::{insights, reminders};
