//! Error types for the correspondence tracker.

use thiserror::Error;

/// Errors that can occur while tracking correspondence.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A failure reported by the embedded store.
    ///
    /// The original `rusqlite` error is kept as-is so callers can inspect
    /// constraint violations and similar conditions directly.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// The database could not be prepared for use.
    #[error("Database error: {0}")]
    Database(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be resolved, read, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input could not be parsed (timestamps, directions, ...).
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested record does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    /// Returns the underlying store error, if this is one.
    #[must_use]
    pub const fn as_sqlite(&self) -> Option<&rusqlite::Error> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }

    /// Whether this error is a store constraint violation (NOT NULL, CHECK, ...).
    #[must_use]
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self.as_sqlite(),
            Some(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = TrackerError::Parse("bad timestamp".to_string());
        assert_eq!(err.to_string(), "Parse error: bad timestamp");
    }

    #[test]
    fn test_sqlite_error_is_transparent() {
        let inner = rusqlite::Error::QueryReturnedNoRows;
        let expected = inner.to_string();
        let err = TrackerError::from(inner);

        assert_eq!(err.to_string(), expected);
        assert!(err.as_sqlite().is_some());
        assert!(!err.is_constraint_violation());
    }
}
