//! Database migrations for the tracker.
//!
//! The applied schema generation is recorded under the `schema_version`
//! key of the `metadata` table. Migrations run once per connection, when
//! the connection is first opened, inside a single transaction: either
//! every DDL statement and the version bump persist together or nothing
//! does.

use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::error::TrackerError;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;

const VERSION_KEY: &str = "schema_version";

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
///
/// # Errors
///
/// Returns an error if the metadata table is missing or holds a
/// non-numeric version.
pub fn get_version(conn: &Connection) -> Result<i32, TrackerError> {
    let value: Option<String> = conn
        .query_row(
            "SELECT value FROM metadata WHERE key = ?1",
            [VERSION_KEY],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        None => Ok(0),
        Some(raw) => raw.trim().parse().map_err(|_| {
            TrackerError::Database(format!("Invalid schema version in metadata: '{raw}'"))
        }),
    }
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), TrackerError> {
    conn.execute(
        "REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        params![VERSION_KEY, version.to_string()],
    )?;
    Ok(())
}

/// Run all pending migrations atomically.
///
/// # Errors
///
/// Returns an error if any statement fails (nothing is persisted in that
/// case) or if the database was written by a newer schema version.
pub fn run(conn: &mut Connection) -> Result<(), TrackerError> {
    let tx = conn.transaction()?;

    tx.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS metadata (
            key TEXT PRIMARY KEY,
            value TEXT
        );
        ",
    )?;

    let current = get_version(&tx)?;

    if current > CURRENT_VERSION {
        return Err(TrackerError::Database(format!(
            "Database schema version {current} is newer than supported {CURRENT_VERSION}"
        )));
    }

    if current == CURRENT_VERSION {
        debug!(version = current, "schema up to date");
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(&tx, version)?;
        set_version(&tx, version)?;
    }

    tx.commit()?;
    info!(from = current, to = CURRENT_VERSION, "schema migrated");

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), TrackerError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(TrackerError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: Initial schema.
///
/// Creates tables for:
/// - `contacts`: People and organizations
/// - `correspondences`: Logged messages, one contact each
fn migrate_v1(conn: &Connection) -> Result<(), TrackerError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            phone TEXT,
            preferred_channel TEXT,
            notes TEXT
        );

        CREATE TABLE IF NOT EXISTS correspondences (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            contact_id INTEGER NOT NULL,
            direction TEXT NOT NULL CHECK(direction IN ('incoming', 'outgoing')),
            medium TEXT,
            subject TEXT,
            body TEXT,
            attachment_path TEXT,
            sentiment TEXT,
            tags TEXT,
            related_topic TEXT,
            sent_at TEXT NOT NULL,
            follow_up_date TEXT,
            response_status TEXT DEFAULT 'pending',
            FOREIGN KEY(contact_id) REFERENCES contacts(id)
        );

        CREATE INDEX IF NOT EXISTS idx_correspondences_contact
        ON correspondences(contact_id);

        CREATE INDEX IF NOT EXISTS idx_correspondences_follow_up
        ON correspondences(follow_up_date);
        ",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            > 0
    }

    #[test]
    fn test_migration_v1() {
        let mut conn = Connection::open_in_memory().unwrap();

        run(&mut conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);

        conn.execute("INSERT INTO contacts (name) VALUES ('Ada')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO correspondences (contact_id, direction, sent_at)
             VALUES (1, 'incoming', '2024-01-01T10:00:00')",
            [],
        )
        .unwrap();

        let status: String = conn
            .query_row("SELECT response_status FROM correspondences", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(status, "pending");
    }

    #[test]
    fn test_direction_check_constraint() {
        let mut conn = Connection::open_in_memory().unwrap();
        run(&mut conn).unwrap();

        let result = conn.execute(
            "INSERT INTO correspondences (contact_id, direction, sent_at)
             VALUES (1, 'sideways', '2024-01-01T10:00:00')",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_migration_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();

        run(&mut conn).unwrap();
        conn.execute("INSERT INTO contacts (name) VALUES ('Ada')", [])
            .unwrap();
        run(&mut conn).unwrap();

        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_get_version_new_database() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT);")
            .unwrap();

        assert_eq!(get_version(&conn).unwrap(), 0);

        // Sanity: running afterwards still works on a pre-created metadata table
        run(&mut conn).unwrap();
        assert_eq!(get_version(&conn).unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_newer_version_rejected() {
        let mut conn = Connection::open_in_memory().unwrap();
        run(&mut conn).unwrap();
        set_version(&conn, CURRENT_VERSION + 1).unwrap();

        let err = run(&mut conn).unwrap_err();
        assert!(matches!(err, TrackerError::Database(_)));
    }

    #[test]
    fn test_failed_migration_leaves_nothing_behind() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE metadata (key TEXT PRIMARY KEY, value TEXT);
             INSERT INTO metadata (key, value) VALUES ('schema_version', 'garbage');",
        )
        .unwrap();

        assert!(run(&mut conn).is_err());
        assert!(!table_exists(&conn, "contacts"));
        assert!(!table_exists(&conn, "correspondences"));
    }
}
