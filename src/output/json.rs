//! JSON output formatting for the tracker.

use serde::Serialize;
use serde_json::json;

use crate::error::TrackerError;
use crate::tracker::{Contact, Correspondence, Insights, Reminder};

/// Format contacts as JSON
///
/// # Errors
///
/// Returns `TrackerError::Json` if serialization fails.
pub fn format_contacts_json(contacts: &[Contact], title: &str) -> Result<String, TrackerError> {
    let output = json!({
        "list": title,
        "count": contacts.len(),
        "items": contacts
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format correspondence history as JSON
///
/// # Errors
///
/// Returns `TrackerError::Json` if serialization fails.
pub fn format_history_json(items: &[Correspondence]) -> Result<String, TrackerError> {
    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format reminders as JSON, flagging the overdue ones
///
/// # Errors
///
/// Returns `TrackerError::Json` if serialization fails.
pub fn format_reminders_json(
    reminders: &[Reminder],
    now: chrono::NaiveDateTime,
) -> Result<String, TrackerError> {
    let items: Vec<_> = reminders
        .iter()
        .map(|r| {
            json!({
                "overdue": r.is_overdue(now),
                "due": r.due,
                "contact": r.contact,
                "correspondence": r.correspondence,
            })
        })
        .collect();

    let output = json!({
        "count": items.len(),
        "items": items
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format contact insights as JSON
///
/// # Errors
///
/// Returns `TrackerError::Json` if serialization fails.
pub fn format_insights_json(contact: &Contact, insights: &Insights) -> Result<String, TrackerError> {
    let output = json!({
        "contact": contact,
        "insights": insights
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `TrackerError::Json` if serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, TrackerError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_contact(name: &str) -> Contact {
        Contact {
            id: 1,
            name: name.to_string(),
            email: None,
            phone: None,
            preferred_channel: Some("signal".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_format_contacts_json_empty_list() {
        let result = format_contacts_json(&[], "Contacts").unwrap();

        assert!(result.contains("\"list\": \"Contacts\""));
        assert!(result.contains("\"count\": 0"));
        assert!(result.contains("\"items\": []"));
    }

    #[test]
    fn test_format_contacts_json() {
        let result = format_contacts_json(&[make_contact("Ada")], "Contacts").unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["name"], "Ada");
        assert_eq!(value["items"][0]["preferred_channel"], "signal");
    }

    #[test]
    fn test_format_insights_json_no_data() {
        let result = format_insights_json(&make_contact("Ada"), &Insights::no_data()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&result).unwrap();

        assert_eq!(value["insights"]["message"], "No correspondence recorded yet.");
        assert!(value["insights"].get("total_messages").is_none());
    }
}
