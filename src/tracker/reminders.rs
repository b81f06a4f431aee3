//! Follow-up reminders.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::model::{Contact, Correspondence};

/// A pending follow-up resolved to its contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub contact: Contact,
    pub correspondence: Correspondence,
    /// When the follow-up is due.
    pub due: NaiveDateTime,
}

impl Reminder {
    /// Whether the follow-up is past due at `now`.
    #[must_use]
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.due < now
    }
}
