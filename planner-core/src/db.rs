//! SQLite persistence for users and events.

use crate::error::PlannerResult;
use chrono::{DateTime, Utc};
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Handle to the single-file SQLite store.
///
/// Holds only the database path. Every logical operation opens its own
/// scoped [`Connection`] via [`Database::connection`] and releases it when
/// the handle drops, on every exit path. No pooling, no in-process caching.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    /// Open the store at `path`, creating the schema if absent.
    ///
    /// Idempotent and safe to call on every startup. Uniqueness of
    /// username/email and the owner foreign key live in the schema itself,
    /// so the constraints hold regardless of what application code does.
    pub fn open(path: impl AsRef<Path>) -> PlannerResult<Self> {
        let db = Database {
            path: path.as_ref().to_path_buf(),
        };
        let conn = db.connection()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT NOT NULL UNIQUE,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                title TEXT NOT NULL,
                description TEXT,
                location TEXT,
                due_date TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_events_owner_due
                ON events(user_id, due_date);
            "#,
        )?;
        Ok(db)
    }

    /// Open a fresh connection with foreign-key enforcement enabled.
    ///
    /// SQLite leaves `foreign_keys` off per connection, so the cascade on
    /// user removal only works if every handle turns it on.
    pub fn connection(&self) -> PlannerResult<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }
}

/// Parse an RFC 3339 TEXT column into a `DateTime<Utc>`.
pub(crate) fn timestamp_from_column(
    idx: usize,
    value: String,
) -> rusqlite::Result<DateTime<Utc>> {
    value.parse().map_err(|e: chrono::ParseError| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
