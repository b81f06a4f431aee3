//! Domain types for contacts and correspondence.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::TrackerError;

/// Storage-assigned contact identifier.
pub type ContactId = i64;

/// Storage-assigned correspondence identifier.
pub type CorrespondenceId = i64;

/// Response status meaning a follow-up is still owed.
pub const PENDING_STATUS: &str = "pending";

/// A person or organization one corresponds with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_channel: Option<String>,
    pub notes: Option<String>,
}

/// Fields for a contact that has not been stored yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewContact {
    /// Required. An empty name is rejected by the store.
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub preferred_channel: Option<String>,
    pub notes: Option<String>,
}

impl NewContact {
    /// Create a contact with only a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn preferred_channel(mut self, channel: impl Into<String>) -> Self {
        self.preferred_channel = Some(channel.into());
        self
    }

    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Which way a message travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Received from the contact.
    Incoming,
    /// Sent to the contact.
    Outgoing,
}

impl Direction {
    /// The stored text form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Incoming => "incoming",
            Self::Outgoing => "outgoing",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "incoming" => Ok(Self::Incoming),
            "outgoing" => Ok(Self::Outgoing),
            other => Err(TrackerError::Parse(format!(
                "Invalid direction '{other}': expected incoming or outgoing"
            ))),
        }
    }
}

/// One logged message exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    pub id: CorrespondenceId,
    pub contact_id: ContactId,
    pub direction: Direction,
    pub medium: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub attachment_path: Option<String>,
    pub sentiment: Option<String>,
    pub tags: Vec<String>,
    pub related_topic: Option<String>,
    pub sent_at: NaiveDateTime,
    pub follow_up_date: Option<NaiveDateTime>,
    /// `None` only for rows written without a status by other tools.
    pub response_status: Option<String>,
}

impl Correspondence {
    /// Whether a follow-up is still owed for this message.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.response_status.as_deref() == Some(PENDING_STATUS)
    }
}

/// Fields for a correspondence that has not been stored yet.
///
/// Everything except the contact, direction and send time is optional.
/// A missing response status is recorded as the service's default
/// (`"pending"` unless configured otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct NewCorrespondence {
    pub contact_id: ContactId,
    pub direction: Direction,
    pub sent_at: NaiveDateTime,
    pub medium: Option<String>,
    pub subject: Option<String>,
    pub body: Option<String>,
    pub attachment_path: Option<String>,
    pub sentiment: Option<String>,
    pub tags: Vec<String>,
    pub related_topic: Option<String>,
    pub follow_up_date: Option<NaiveDateTime>,
    pub response_status: Option<String>,
}

impl NewCorrespondence {
    /// Create a correspondence with only the required fields.
    #[must_use]
    pub const fn new(contact_id: ContactId, direction: Direction, sent_at: NaiveDateTime) -> Self {
        Self {
            contact_id,
            direction,
            sent_at,
            medium: None,
            subject: None,
            body: None,
            attachment_path: None,
            sentiment: None,
            tags: Vec::new(),
            related_topic: None,
            follow_up_date: None,
            response_status: None,
        }
    }

    #[must_use]
    pub fn medium(mut self, medium: impl Into<String>) -> Self {
        self.medium = Some(medium.into());
        self
    }

    #[must_use]
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn attachment_path(mut self, path: impl Into<String>) -> Self {
        self.attachment_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn sentiment(mut self, sentiment: impl Into<String>) -> Self {
        self.sentiment = Some(sentiment.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn related_topic(mut self, topic: impl Into<String>) -> Self {
        self.related_topic = Some(topic.into());
        self
    }

    #[must_use]
    pub const fn follow_up_date(mut self, due: NaiveDateTime) -> Self {
        self.follow_up_date = Some(due);
        self
    }

    #[must_use]
    pub fn response_status(mut self, status: impl Into<String>) -> Self {
        self.response_status = Some(status.into());
        self
    }
}

/// Split comma-separated tag input into trimmed, non-empty tags.
#[must_use]
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse() {
        assert_eq!("incoming".parse::<Direction>().unwrap(), Direction::Incoming);
        assert_eq!(" Outgoing ".parse::<Direction>().unwrap(), Direction::Outgoing);
        assert!(matches!(
            "sideways".parse::<Direction>(),
            Err(TrackerError::Parse(_))
        ));
    }

    #[test]
    fn test_direction_display_matches_storage() {
        assert_eq!(Direction::Incoming.to_string(), "incoming");
        assert_eq!(Direction::Outgoing.as_str(), "outgoing");
    }

    #[test]
    fn test_parse_tag_list() {
        assert_eq!(
            parse_tag_list(" work, ,family ,urgent,"),
            vec!["work", "family", "urgent"]
        );
        assert!(parse_tag_list("").is_empty());
    }

    #[test]
    fn test_new_contact_builder() {
        let contact = NewContact::new("Ada").email("ada@example.com").notes("met at conf");

        assert_eq!(contact.name, "Ada");
        assert_eq!(contact.email.as_deref(), Some("ada@example.com"));
        assert!(contact.phone.is_none());
        assert_eq!(contact.notes.as_deref(), Some("met at conf"));
    }
}
