//! Tracker service: contact and correspondence operations.
//!
//! Every method runs its statements through the [`Database`] primitives,
//! so each write is its own transaction. Nothing here spans calls.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};
use rusqlite::{params, params_from_iter};
use tracing::debug;

use crate::config::TrackerConfig;
use crate::core::{Clock, SystemClock};
use crate::error::TrackerError;
use crate::storage::Database;

use super::insights::{InsightSummary, Insights};
use super::model::{
    Contact, ContactId, Correspondence, CorrespondenceId, NewContact, NewCorrespondence,
    PENDING_STATUS,
};
use super::reminders::Reminder;
use super::rows::{
    contact_from_row, correspondence_from_row, join_tags, timestamp_param, CONTACT_COLUMNS,
    CORRESPONDENCE_COLUMNS,
};

/// Tunable heuristics for the tracker service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSettings {
    /// Window used for the active-contacts report. Default 30 days.
    pub active_window_days: u32,
    /// Offset added to the last interaction to suggest a follow-up. Default 14 days.
    pub follow_up_offset_days: u32,
    /// Status recorded when a correspondence is added without one. Default `"pending"`.
    pub default_response_status: String,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            active_window_days: 30,
            follow_up_offset_days: 14,
            default_response_status: PENDING_STATUS.to_string(),
        }
    }
}

impl From<&TrackerConfig> for TrackerSettings {
    fn from(config: &TrackerConfig) -> Self {
        Self {
            active_window_days: config.active_window_days,
            follow_up_offset_days: config.follow_up_offset_days,
            default_response_status: config.default_response_status.clone(),
        }
    }
}

/// High-level API for working with tracker data.
pub struct TrackerService {
    db: Database,
    settings: TrackerSettings,
    clock: Box<dyn Clock>,
}

impl TrackerService {
    /// Create a service over `db` with default settings and the system clock.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self {
            db,
            settings: TrackerSettings::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// Replace the heuristic settings.
    #[must_use]
    pub fn with_settings(mut self, settings: TrackerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the clock used for "now".
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub const fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Current time according to the service clock.
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Close the underlying database handle. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails to close.
    pub fn close(&mut self) -> Result<(), TrackerError> {
        self.db.close()
    }

    // ==================== Contacts ====================

    /// Insert a contact and return its id.
    ///
    /// # Errors
    ///
    /// An empty name is stored as NULL and rejected by the `NOT NULL`
    /// constraint; the store error is returned unchanged.
    pub fn add_contact(&self, contact: &NewContact) -> Result<ContactId, TrackerError> {
        let executed = self.db.execute(
            "INSERT INTO contacts (name, email, phone, preferred_channel, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                non_empty(&contact.name),
                contact.email,
                contact.phone,
                contact.preferred_channel,
                contact.notes,
            ],
        )?;

        debug!(contact_id = executed.last_insert_id, "contact added");
        Ok(executed.last_insert_id)
    }

    /// Insert several contacts in one transaction.
    ///
    /// # Errors
    ///
    /// Returns the first store error; no contact is stored in that case.
    pub fn add_contacts(&self, contacts: &[NewContact]) -> Result<usize, TrackerError> {
        let inserted = self.db.execute_many(
            "INSERT INTO contacts (name, email, phone, preferred_channel, notes)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            contacts.iter().map(|c| {
                params_from_iter([
                    non_empty(&c.name),
                    c.email.as_deref(),
                    c.phone.as_deref(),
                    c.preferred_channel.as_deref(),
                    c.notes.as_deref(),
                ])
            }),
        )?;

        debug!(count = inserted, "contacts imported");
        Ok(inserted)
    }

    /// All contacts, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_contacts(&self) -> Result<Vec<Contact>, TrackerError> {
        self.db.query(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY name, id"),
            [],
            contact_from_row,
        )
    }

    /// The contact with `id`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails. A missing id is not an error.
    pub fn get_contact(&self, id: ContactId) -> Result<Option<Contact>, TrackerError> {
        let mut rows = self.db.query(
            &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
            [id],
            contact_from_row,
        )?;
        Ok(rows.pop())
    }

    // ==================== Correspondence ====================

    /// Insert a correspondence and return its id.
    ///
    /// # Errors
    ///
    /// Store constraint failures (such as a direction rejected by the
    /// `CHECK` constraint) are returned unchanged.
    pub fn add_correspondence(
        &self,
        item: &NewCorrespondence,
    ) -> Result<CorrespondenceId, TrackerError> {
        let status = item
            .response_status
            .as_deref()
            .and_then(non_empty)
            .unwrap_or(self.settings.default_response_status.as_str());

        let tags = join_tags(&item.tags)?;

        let executed = self.db.execute(
            "INSERT INTO correspondences (
                contact_id, direction, medium, subject, body, attachment_path,
                sentiment, tags, related_topic, sent_at, follow_up_date, response_status
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                item.contact_id,
                item.direction.as_str(),
                item.medium,
                item.subject,
                item.body,
                item.attachment_path,
                item.sentiment,
                tags,
                item.related_topic,
                timestamp_param(&item.sent_at),
                item.follow_up_date.as_ref().map(timestamp_param),
                status,
            ],
        )?;

        debug!(
            correspondence_id = executed.last_insert_id,
            contact_id = item.contact_id,
            direction = %item.direction,
            "correspondence logged"
        );
        Ok(executed.last_insert_id)
    }

    /// Correspondence, most recent first, optionally for one contact.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_correspondences(
        &self,
        contact_id: Option<ContactId>,
    ) -> Result<Vec<Correspondence>, TrackerError> {
        match contact_id {
            None => self.db.query(
                &format!(
                    "SELECT {CORRESPONDENCE_COLUMNS} FROM correspondences
                     ORDER BY sent_at DESC, id DESC"
                ),
                [],
                correspondence_from_row,
            ),
            Some(id) => self.db.query(
                &format!(
                    "SELECT {CORRESPONDENCE_COLUMNS} FROM correspondences
                     WHERE contact_id = ?1
                     ORDER BY sent_at DESC, id DESC"
                ),
                [id],
                correspondence_from_row,
            ),
        }
    }

    /// Overwrite the response status of a correspondence.
    ///
    /// Returns the number of rows changed. An unknown id changes nothing
    /// and is not an error; callers that care can check for `0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_response_status(
        &self,
        id: CorrespondenceId,
        status: &str,
    ) -> Result<usize, TrackerError> {
        let executed = self.db.execute(
            "UPDATE correspondences SET response_status = ?1 WHERE id = ?2",
            params![status, id],
        )?;

        debug!(
            correspondence_id = id,
            rows = executed.rows_affected,
            "response status updated"
        );
        Ok(executed.rows_affected)
    }

    // ==================== Heuristics ====================

    /// Contacts with at least one message sent in the last `within_days`
    /// days, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_contacts(&self, within_days: u32) -> Result<Vec<Contact>, TrackerError> {
        let now = self.clock.now();
        // A window reaching past the earliest representable time covers everything.
        let cutoff = now
            .checked_sub_signed(Duration::days(i64::from(within_days)))
            .unwrap_or(NaiveDateTime::MIN);

        self.db.query(
            "SELECT DISTINCT c.id AS id, c.name AS name, c.email AS email, c.phone AS phone,
                    c.preferred_channel AS preferred_channel, c.notes AS notes
             FROM contacts c
             JOIN correspondences co ON c.id = co.contact_id
             WHERE co.sent_at >= ?1
             ORDER BY c.name, c.id",
            [timestamp_param(&cutoff)],
            contact_from_row,
        )
    }

    /// Contacts active within the configured window.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_contacts_default(&self) -> Result<Vec<Contact>, TrackerError> {
        self.active_contacts(self.settings.active_window_days)
    }

    /// Pending correspondence whose follow-up date has arrived, soonest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn pending_follow_ups(&self) -> Result<Vec<Correspondence>, TrackerError> {
        self.pending_follow_ups_at(self.clock.now())
    }

    fn pending_follow_ups_at(
        &self,
        now: NaiveDateTime,
    ) -> Result<Vec<Correspondence>, TrackerError> {
        self.db.query(
            &format!(
                "SELECT {CORRESPONDENCE_COLUMNS} FROM correspondences
                 WHERE response_status = ?1
                   AND follow_up_date IS NOT NULL
                   AND follow_up_date <= ?2
                 ORDER BY follow_up_date, id"
            ),
            params![PENDING_STATUS, timestamp_param(&now)],
            correspondence_from_row,
        )
    }

    /// Suggested follow-up time after `last_interaction`.
    ///
    /// A fixed offset (14 days unless configured otherwise).
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::Config` if the offset moves past the latest
    /// representable time.
    pub fn suggest_follow_up_date(
        &self,
        last_interaction: NaiveDateTime,
    ) -> Result<NaiveDateTime, TrackerError> {
        let offset = self.settings.follow_up_offset_days;
        last_interaction
            .checked_add_signed(Duration::days(i64::from(offset)))
            .ok_or_else(|| {
                TrackerError::Config(format!(
                    "follow_up_offset_days {offset} is out of range for {}",
                    timestamp_param(&last_interaction)
                ))
            })
    }

    /// Pending follow-ups resolved to their contacts.
    ///
    /// Follow-ups whose contact no longer exists are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn reminder_summary(&self) -> Result<Vec<Reminder>, TrackerError> {
        let now = self.clock.now();
        let pending = self.pending_follow_ups_at(now)?;

        let mut contacts: HashMap<ContactId, Option<Contact>> = HashMap::new();
        let mut reminders = Vec::with_capacity(pending.len());

        for item in pending {
            let contact = match contacts.get(&item.contact_id) {
                Some(cached) => cached.clone(),
                None => {
                    let found = self.get_contact(item.contact_id)?;
                    contacts.insert(item.contact_id, found.clone());
                    found
                }
            };

            let Some(contact) = contact else {
                debug!(
                    correspondence_id = item.id,
                    contact_id = item.contact_id,
                    "skipping reminder for missing contact"
                );
                continue;
            };

            // pending_follow_ups only returns rows with a follow-up date
            let due = item.follow_up_date.unwrap_or(now);
            reminders.push(Reminder {
                contact,
                correspondence: item,
                due,
            });
        }

        Ok(reminders)
    }

    /// Summarize a contact's correspondence.
    ///
    /// Returns [`Insights::NoData`] when the contact has none.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn basic_insights(&self, contact_id: ContactId) -> Result<Insights, TrackerError> {
        let history = self.list_correspondences(Some(contact_id))?;
        let Some(latest) = history.first() else {
            return Ok(Insights::no_data());
        };
        let suggested = self.suggest_follow_up_date(latest.sent_at)?;

        Ok(InsightSummary::from_history(&history, suggested)
            .map_or_else(Insights::no_data, Insights::Summary))
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
