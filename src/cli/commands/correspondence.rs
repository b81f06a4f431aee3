//! Correspondence command implementations.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{LogArgs, OutputFormat};
use crate::error::TrackerError;
use crate::output::{format_history, to_json};
use crate::tracker::{parse_tag_list, ContactId, CorrespondenceId, NewCorrespondence, TrackerService};

/// Log a correspondence.
///
/// # Errors
///
/// Returns the store error if the correspondence cannot be inserted.
pub fn log(service: &TrackerService, args: LogArgs, format: OutputFormat) -> Result<String, TrackerError> {
    let item = NewCorrespondence {
        contact_id: args.contact_id,
        direction: args.direction,
        sent_at: args.sent_at,
        medium: args.medium,
        subject: args.subject,
        body: args.body,
        attachment_path: args.attachment,
        sentiment: args.sentiment,
        tags: args.tags.as_deref().map(parse_tag_list).unwrap_or_default(),
        related_topic: args.topic,
        follow_up_date: args.follow_up,
        response_status: args.status,
    };
    let id = service.add_correspondence(&item)?;

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "contact_id": item.contact_id })),
        OutputFormat::Pretty => Ok(format!(
            "Correspondence logged with id {}",
            id.to_string().green()
        )),
    }
}

/// Show correspondence history.
///
/// # Errors
///
/// Returns an error if the query or formatting fails.
pub fn history(
    service: &TrackerService,
    contact_id: Option<ContactId>,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    let items = service.list_correspondences(contact_id)?;
    format_history(&items, format)
}

/// Update the response status of a correspondence.
///
/// # Errors
///
/// Returns `TrackerError::NotFound` when no correspondence has the id.
pub fn set_status(
    service: &TrackerService,
    id: CorrespondenceId,
    status: &str,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    if service.update_response_status(id, status)? == 0 {
        return Err(TrackerError::NotFound(format!("Correspondence {id}")));
    }

    match format {
        OutputFormat::Json => to_json(&json!({ "id": id, "response_status": status })),
        OutputFormat::Pretty => Ok(format!("Correspondence #{id} marked {}", status.bold())),
    }
}
