//! Output formatting for the tracker.
//!
//! This module provides formatters for displaying tracker data in various formats.

mod json;
mod pretty;

use chrono::NaiveDateTime;

use crate::cli::args::OutputFormat;
use crate::error::TrackerError;
use crate::tracker::{Contact, Correspondence, Insights, Reminder};

pub use json::*;
pub use pretty::*;

/// Format contacts based on output format
///
/// # Errors
///
/// Returns `TrackerError::Json` if JSON serialization fails.
pub fn format_contacts(
    contacts: &[Contact],
    title: &str,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    match format {
        OutputFormat::Pretty => Ok(format_contacts_pretty(contacts, title)),
        OutputFormat::Json => format_contacts_json(contacts, title),
    }
}

/// Format correspondence history based on output format
///
/// # Errors
///
/// Returns `TrackerError::Json` if JSON serialization fails.
pub fn format_history(items: &[Correspondence], format: OutputFormat) -> Result<String, TrackerError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(items)),
        OutputFormat::Json => format_history_json(items),
    }
}

/// Format reminders based on output format
///
/// # Errors
///
/// Returns `TrackerError::Json` if JSON serialization fails.
pub fn format_reminders(
    reminders: &[Reminder],
    now: NaiveDateTime,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    match format {
        OutputFormat::Pretty => Ok(format_reminders_pretty(reminders, now)),
        OutputFormat::Json => format_reminders_json(reminders, now),
    }
}

/// Format insights based on output format
///
/// # Errors
///
/// Returns `TrackerError::Json` if JSON serialization fails.
pub fn format_insights(
    contact: &Contact,
    insights: &Insights,
    format: OutputFormat,
) -> Result<String, TrackerError> {
    match format {
        OutputFormat::Pretty => Ok(format_insights_pretty(contact, insights)),
        OutputFormat::Json => format_insights_json(contact, insights),
    }
}
