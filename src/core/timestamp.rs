//! Timestamp formatting and parsing.
//!
//! Timestamps are stored as text in the exact form `YYYY-MM-DDTHH:MM:SS`
//! with no sub-second or timezone component. The store compares these
//! strings directly, so every value written must go through
//! [`format_timestamp`].

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::TrackerError;

/// Storage format for all timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Alternate input formats accepted from users.
const INPUT_FORMATS: &[&str] = &[TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M:%S"];

/// Format a timestamp in the storage representation.
#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp from user or storage input.
///
/// Accepts `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS`, and a bare
/// `YYYY-MM-DD` (midnight). Sub-second parts and offsets are rejected.
///
/// # Errors
///
/// Returns `TrackerError::Parse` if the input matches none of the formats.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, TrackerError> {
    let input = input.trim();

    for format in INPUT_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(ts);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts);
        }
    }

    Err(TrackerError::Parse(format!(
        "Invalid timestamp '{input}': expected YYYY-MM-DDTHH:MM:SS"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_format_is_exact_seconds() {
        assert_eq!(
            format_timestamp(&ts(2024, 3, 5, 7, 8, 9)),
            "2024-03-05T07:08:09"
        );
    }

    #[test]
    fn test_parse_iso() {
        assert_eq!(
            parse_timestamp("2024-03-05T07:08:09").unwrap(),
            ts(2024, 3, 5, 7, 8, 9)
        );
    }

    #[test]
    fn test_parse_space_separated() {
        assert_eq!(
            parse_timestamp(" 2024-03-05 07:08:09 ").unwrap(),
            ts(2024, 3, 5, 7, 8, 9)
        );
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        assert_eq!(parse_timestamp("2024-03-05").unwrap(), ts(2024, 3, 5, 0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "yesterday", "2024-13-01T00:00:00", "2024-03-05T07:08:09Z", "2024-03-05T07:08"] {
            assert!(
                matches!(parse_timestamp(bad), Err(TrackerError::Parse(_))),
                "expected parse failure for {bad:?}"
            );
        }
    }

    #[test]
    fn test_text_order_matches_time_order() {
        let earlier = format_timestamp(&ts(2024, 1, 9, 23, 59, 59));
        let later = format_timestamp(&ts(2024, 1, 10, 0, 0, 0));
        assert!(earlier < later);
    }
}
