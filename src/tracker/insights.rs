//! Per-contact relationship summaries.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::model::{Correspondence, Direction};

/// Message shown when a contact has no correspondence.
pub const NO_DATA_MESSAGE: &str = "No correspondence recorded yet.";

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Result of summarizing one contact's correspondence.
///
/// The two shapes are distinct: callers must check for [`Insights::NoData`]
/// before reading summary fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Insights {
    /// The contact has no correspondence.
    NoData { message: String },
    /// Aggregates over at least one correspondence.
    Summary(InsightSummary),
}

impl Insights {
    /// The no-data marker.
    #[must_use]
    pub fn no_data() -> Self {
        Self::NoData {
            message: NO_DATA_MESSAGE.to_string(),
        }
    }

    /// The summary, if there is one.
    #[must_use]
    pub const fn summary(&self) -> Option<&InsightSummary> {
        match self {
            Self::Summary(summary) => Some(summary),
            Self::NoData { .. } => None,
        }
    }
}

/// Aggregates over a contact's correspondence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightSummary {
    pub total_messages: usize,
    pub incoming: usize,
    pub outgoing: usize,
    pub last_interaction: NaiveDateTime,
    /// Most recent non-empty sentiment tag.
    pub latest_sentiment: Option<String>,
    /// Mean gap between consecutive messages, in days, rounded to two
    /// decimals. `None` with fewer than two messages.
    pub average_gap_days: Option<f64>,
    pub suggested_follow_up: NaiveDateTime,
}

impl InsightSummary {
    /// Summarize correspondence ordered most recent first.
    ///
    /// Returns `None` for an empty slice.
    pub(super) fn from_history(
        history: &[Correspondence],
        suggested_follow_up: NaiveDateTime,
    ) -> Option<Self> {
        let last_interaction = history.first()?.sent_at;

        let total_messages = history.len();
        let incoming = history
            .iter()
            .filter(|c| c.direction == Direction::Incoming)
            .count();

        let latest_sentiment = history
            .iter()
            .filter_map(|c| c.sentiment.as_deref())
            .find(|s| !s.is_empty())
            .map(ToString::to_string);

        Some(Self {
            total_messages,
            incoming,
            outgoing: total_messages - incoming,
            last_interaction,
            latest_sentiment,
            average_gap_days: average_gap_days(history),
            suggested_follow_up,
        })
    }
}

/// Mean gap in days between consecutive messages ordered most recent first.
///
/// Returns `None` with fewer than two messages.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_gap_days(history: &[Correspondence]) -> Option<f64> {
    if history.len() < 2 {
        return None;
    }

    let gaps: Vec<f64> = history
        .windows(2)
        .map(|pair| {
            let delta = pair[0].sent_at - pair[1].sent_at;
            delta.num_seconds() as f64 / SECONDS_PER_DAY
        })
        .collect();

    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    Some(round_to_hundredths(mean))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(days_ago: i64, direction: Direction, sentiment: Option<&str>) -> Correspondence {
        let base = NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        Correspondence {
            id: days_ago,
            contact_id: 1,
            direction,
            medium: None,
            subject: None,
            body: None,
            attachment_path: None,
            sentiment: sentiment.map(ToString::to_string),
            tags: Vec::new(),
            related_topic: None,
            sent_at: base - Duration::days(days_ago),
            follow_up_date: None,
            response_status: Some("pending".to_string()),
        }
    }

    #[test]
    fn test_average_gap_days() {
        let history = vec![
            at(0, Direction::Incoming, None),
            at(1, Direction::Outgoing, None),
            at(3, Direction::Incoming, None),
        ];
        assert_eq!(average_gap_days(&history), Some(1.5));
    }

    #[test]
    fn test_average_gap_needs_two_messages() {
        assert_eq!(average_gap_days(&[]), None);
        assert_eq!(average_gap_days(&[at(0, Direction::Incoming, None)]), None);
    }

    #[test]
    fn test_average_gap_rounds_to_two_decimals() {
        let mut history = vec![at(0, Direction::Incoming, None), at(0, Direction::Incoming, None)];
        history[1].sent_at -= Duration::hours(8);
        // 8 hours = 0.3333... days
        assert_eq!(average_gap_days(&history), Some(0.33));
    }

    #[test]
    fn test_summary_from_history() {
        let history = vec![
            at(0, Direction::Incoming, Some("")),
            at(2, Direction::Outgoing, Some("warm")),
            at(4, Direction::Incoming, Some("tense")),
        ];

        let summary =
            InsightSummary::from_history(&history, history[0].sent_at + Duration::days(14))
                .unwrap();

        assert_eq!(summary.total_messages, 3);
        assert_eq!(summary.incoming, 2);
        assert_eq!(summary.outgoing, 1);
        assert_eq!(summary.latest_sentiment.as_deref(), Some("warm"));
        assert_eq!(summary.last_interaction, history[0].sent_at);
        assert_eq!(
            summary.suggested_follow_up,
            history[0].sent_at + Duration::days(14)
        );
        assert_eq!(summary.average_gap_days, Some(2.0));
    }

    #[test]
    fn test_whitespace_sentiment_counts_as_latest() {
        let history = vec![
            at(0, Direction::Incoming, None),
            at(1, Direction::Incoming, Some(" ")),
            at(2, Direction::Incoming, Some("warm")),
        ];

        let summary = InsightSummary::from_history(&history, history[0].sent_at).unwrap();
        assert_eq!(summary.latest_sentiment.as_deref(), Some(" "));
    }

    #[test]
    fn test_summary_empty_history() {
        assert!(InsightSummary::from_history(&[], NaiveDateTime::MIN).is_none());
    }

    #[test]
    fn test_no_data_serializes_as_message() {
        let json = serde_json::to_value(Insights::no_data()).unwrap();
        assert_eq!(json["message"], NO_DATA_MESSAGE);
    }
}
