//! `SQLite` database connection and transactional primitives.
//!
//! The database is stored at `~/.correspondence_tracker/tracker.db` by
//! default and contains the `metadata`, `contacts` and `correspondences`
//! tables.
//!
//! A [`Database`] is a handle with an explicit lifecycle: the connection
//! is opened (and migrated) on first use, reused for every later call,
//! and released by [`Database::close`] or when the handle is dropped.

use std::path::{Path, PathBuf};

use once_cell::unsync::OnceCell;
use rusqlite::{Connection, Params, Row, Transaction};
use tracing::{debug, warn};

use crate::error::TrackerError;

use super::migrations;

/// Outcome of a mutating statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Executed {
    /// Number of rows changed by the statement.
    pub rows_affected: usize,
    /// Row id of the most recent successful insert on this connection.
    pub last_insert_id: i64,
}

/// Lazily opened database handle.
pub struct Database {
    /// `None` means an in-memory database.
    path: Option<PathBuf>,
    conn: OnceCell<Connection>,
}

impl Database {
    /// Create a handle for the database file at `path`.
    ///
    /// Nothing is opened until the first statement runs.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            conn: OnceCell::new(),
        }
    }

    /// Create a handle for an in-memory database (useful for testing).
    ///
    /// Data does not survive [`Database::close`].
    #[must_use]
    pub const fn in_memory() -> Self {
        Self {
            path: None,
            conn: OnceCell::new(),
        }
    }

    /// Path of the database file, or `None` for an in-memory database.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Whether the underlying connection is currently open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.conn.get().is_some()
    }

    /// Get the open connection, opening and migrating it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened, or if
    /// migrations fail.
    pub fn connection(&self) -> Result<&Connection, TrackerError> {
        self.conn.get_or_try_init(|| self.open_connection())
    }

    fn open_connection(&self) -> Result<Connection, TrackerError> {
        let mut conn = match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Connection::open(path).map_err(|e| {
                    TrackerError::Database(format!(
                        "Failed to open database {}: {e}",
                        path.display()
                    ))
                })?
            }
            None => Connection::open_in_memory().map_err(|e| {
                TrackerError::Database(format!("Failed to open in-memory database: {e}"))
            })?,
        };

        // Foreign keys stay off: correspondence rows may outlive their contact.
        migrations::run(&mut conn)?;

        debug!(path = ?self.path, "database opened");
        Ok(conn)
    }

    /// Close the connection.
    ///
    /// Closing a handle that is not open is a no-op. The next statement
    /// reopens the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if `SQLite` fails to close the connection.
    pub fn close(&mut self) -> Result<(), TrackerError> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, e)| TrackerError::Sqlite(e))?;
            debug!(path = ?self.path, "database closed");
        }
        Ok(())
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, TrackerError> {
        migrations::get_version(self.connection()?)
    }

    /// Run `f` inside a transaction.
    ///
    /// Commits when `f` succeeds. On failure the transaction is rolled back
    /// and the original error is returned unchanged.
    fn with_transaction<T, F>(&self, f: F) -> Result<T, TrackerError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, TrackerError>,
    {
        let conn = self.connection()?;
        let tx = conn.unchecked_transaction()?;

        match f(&tx) {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            Err(err) => {
                warn!(error = %err, "transaction rolled back");
                if let Err(rollback_err) = tx.rollback() {
                    warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }

    /// Execute a mutating statement in its own transaction.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged if the statement fails; nothing
    /// is persisted in that case.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<Executed, TrackerError> {
        self.with_transaction(|tx| {
            let rows_affected = tx.execute(sql, params)?;
            Ok(Executed {
                rows_affected,
                last_insert_id: tx.last_insert_rowid(),
            })
        })
    }

    /// Execute the same statement once per parameter set, atomically.
    ///
    /// Returns the total number of rows changed.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered; none of the parameter
    /// sets are persisted in that case.
    pub fn execute_many<P, I>(&self, sql: &str, param_sets: I) -> Result<usize, TrackerError>
    where
        P: Params,
        I: IntoIterator<Item = P>,
    {
        self.with_transaction(|tx| {
            let mut stmt = tx.prepare(sql)?;
            let mut total = 0;
            for params in param_sets {
                total += stmt.execute(params)?;
            }
            Ok(total)
        })
    }

    /// Run a read statement and map every row with `map`.
    ///
    /// Rows are returned in the order the statement produces them.
    ///
    /// # Errors
    ///
    /// Returns the store error unchanged if the statement or a row
    /// conversion fails.
    pub fn query<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>, TrackerError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.with_transaction(|tx| {
            let mut stmt = tx.prepare(sql)?;
            let rows = stmt.query_map(params, map)?;
            let items = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("path", &self.path)
            .field("open", &self.is_open())
            .finish()
    }
}
