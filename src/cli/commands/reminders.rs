//! Reminder and insight command implementations.

use crate::cli::args::OutputFormat;
use crate::error::TrackerError;
use crate::output::{format_insights, format_reminders};
use crate::tracker::{ContactId, TrackerService};

/// Show due follow-ups.
///
/// # Errors
///
/// Returns an error if the query or formatting fails.
pub fn reminders(
    service: &TrackerService,
    overdue_only: bool,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    let now = service.now();
    let mut reminders = service.reminder_summary()?;

    if overdue_only {
        reminders.retain(|r| r.is_overdue(now));
    }

    format_reminders(&reminders, now, format)
}

/// Summarize one contact.
///
/// # Errors
///
/// Returns `TrackerError::NotFound` if the contact does not exist.
pub fn insights(
    service: &TrackerService,
    contact_id: ContactId,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    let contact = service
        .get_contact(contact_id)?
        .ok_or_else(|| TrackerError::NotFound(format!("Contact {contact_id}")))?;
    let insights = service.basic_insights(contact_id)?;

    format_insights(&contact, &insights, format)
}
