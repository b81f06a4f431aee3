//! Conversion between stored rows and domain records.
//!
//! This is the only place that reads columns by name, joins or splits
//! tags, or converts timestamps to and from their stored text.

use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::Row;

use crate::core::{format_timestamp, parse_timestamp};
use crate::error::TrackerError;

use super::model::{Contact, Correspondence, Direction};

pub(super) const CONTACT_COLUMNS: &str = "id, name, email, phone, preferred_channel, notes";

pub(super) const CORRESPONDENCE_COLUMNS: &str = "id, contact_id, direction, medium, subject, \
     body, attachment_path, sentiment, tags, related_topic, sent_at, follow_up_date, \
     response_status";

/// Map a `contacts` row.
pub(super) fn contact_from_row(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        preferred_channel: row.get("preferred_channel")?,
        notes: row.get("notes")?,
    })
}

/// Map a `correspondences` row.
pub(super) fn correspondence_from_row(row: &Row<'_>) -> rusqlite::Result<Correspondence> {
    let direction: String = row.get("direction")?;
    let direction = direction
        .parse::<Direction>()
        .map_err(|e| conversion_error(row, "direction", e))?;

    let tags: Option<String> = row.get("tags")?;

    Ok(Correspondence {
        id: row.get("id")?,
        contact_id: row.get("contact_id")?,
        direction,
        medium: row.get("medium")?,
        subject: row.get("subject")?,
        body: row.get("body")?,
        attachment_path: row.get("attachment_path")?,
        sentiment: row.get("sentiment")?,
        tags: split_tags(tags.as_deref()),
        related_topic: row.get("related_topic")?,
        sent_at: timestamp_column(row, "sent_at")?,
        follow_up_date: optional_timestamp_column(row, "follow_up_date")?,
        response_status: row.get("response_status")?,
    })
}

/// Join tags for storage. An empty list is stored as NULL.
///
/// Tags are stored comma-joined, so a tag that is empty or contains a
/// comma could not be read back as written and is rejected.
pub(super) fn join_tags(tags: &[String]) -> Result<Option<String>, TrackerError> {
    if let Some(bad) = tags.iter().find(|t| t.is_empty() || t.contains(',')) {
        return Err(TrackerError::Parse(format!(
            "Invalid tag '{bad}': tags must be non-empty and must not contain ','"
        )));
    }

    if tags.is_empty() {
        Ok(None)
    } else {
        Ok(Some(tags.join(",")))
    }
}

/// Exact inverse of [`join_tags`].
pub(super) fn split_tags(raw: Option<&str>) -> Vec<String> {
    match raw {
        None | Some("") => Vec::new(),
        Some(joined) => joined.split(',').map(ToString::to_string).collect(),
    }
}

pub(super) fn timestamp_param(ts: &NaiveDateTime) -> String {
    format_timestamp(ts)
}

fn timestamp_column(row: &Row<'_>, name: &str) -> rusqlite::Result<NaiveDateTime> {
    let raw: String = row.get(name)?;
    parse_timestamp(&raw).map_err(|e| conversion_error(row, name, e))
}

fn optional_timestamp_column(row: &Row<'_>, name: &str) -> rusqlite::Result<Option<NaiveDateTime>> {
    let raw: Option<String> = row.get(name)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_timestamp(text)
            .map(Some)
            .map_err(|e| conversion_error(row, name, e)),
    }
}

fn conversion_error<E>(row: &Row<'_>, name: &str, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    match row.as_ref().column_index(name) {
        Ok(idx) => rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)),
        Err(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_join_tags() {
        assert_eq!(join_tags(&[]).unwrap(), None);
        assert_eq!(
            join_tags(&tags(&["work", "urgent"])).unwrap().as_deref(),
            Some("work,urgent")
        );
    }

    #[test]
    fn test_join_tags_rejects_unstorable_tags() {
        assert!(matches!(
            join_tags(&tags(&["a,b"])),
            Err(TrackerError::Parse(_))
        ));
        assert!(matches!(
            join_tags(&tags(&["work", ""])),
            Err(TrackerError::Parse(_))
        ));
    }

    #[test]
    fn test_split_tags() {
        assert!(split_tags(None).is_empty());
        assert!(split_tags(Some("")).is_empty());
        assert_eq!(split_tags(Some("work,urgent")), vec!["work", "urgent"]);
        assert_eq!(split_tags(Some("a, b ")), vec!["a", " b "]);
    }

    #[test]
    fn test_tags_survive_storage_exactly() {
        let original = tags(&[" padded ", "work", "x y"]);
        let stored = join_tags(&original).unwrap();
        assert_eq!(split_tags(stored.as_deref()), original);
    }
}
