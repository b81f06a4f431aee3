//! Contact command implementations.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{AddContactArgs, OutputFormat};
use crate::error::TrackerError;
use crate::output::{format_contacts, to_json};
use crate::tracker::{NewContact, TrackerService};

/// Create a contact.
///
/// # Errors
///
/// Returns the store error if the contact cannot be inserted.
pub fn add_contact(
    service: &TrackerService,
    args: AddContactArgs,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    let contact = NewContact {
        name: args.name,
        email: args.email,
        phone: args.phone,
        preferred_channel: args.preferred_channel,
        notes: args.notes,
    };
    let id = service.add_contact(&contact)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "name": contact.name })),
        OutputFormat::Pretty => Ok(format!("Contact created with id {}", id.to_string().green())),
    }
}

/// List all contacts.
///
/// # Errors
///
/// Returns an error if the query or formatting fails.
pub fn list_contacts(service: &TrackerService, format: OutputFormat) -> Result<String, TrackerError> {
    let contacts = service.list_contacts()?;
    format_contacts(&contacts, "Contacts", format)
}

/// List contacts with correspondence in the last `days` days.
///
/// # Errors
///
/// Returns an error if the query or formatting fails.
pub fn active(
    service: &TrackerService,
    days: Option<u32>,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    let days = days.unwrap_or(service.settings().active_window_days);
    let contacts = service.active_contacts(days)?;

    if contacts.is_empty() && format == OutputFormat::Pretty {
        return Ok("No active correspondents in the selected window.".to_string());
    }

    format_contacts(&contacts, &format!("Active contacts (last {days} days)"), format)
}
