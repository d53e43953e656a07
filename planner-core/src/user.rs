//! Account records and registration/login storage.

use crate::db::{timestamp_from_column, Database};
use crate::error::{PlannerError, PlannerResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

/// A registered account as stored in the users table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// Unique, matched case-sensitively as stored.
    pub username: String,
    /// Unique across all accounts.
    pub email: String,
    /// Argon2 encoded hash; the plaintext never reaches this struct.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Input for registration.
///
/// `password_hash` is the already-encoded output of
/// [`crate::credentials::hash`]; hashing stays in the credential module.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Insert a new account.
///
/// Uniqueness of username and email is enforced solely by the UNIQUE
/// constraints; a violation comes back as [`PlannerError::Conflict`] with
/// no row written. There is no check-then-insert here, so concurrent
/// duplicate registrations cannot race past each other.
pub fn create_user(db: &Database, new_user: &NewUser) -> PlannerResult<User> {
    let conn = db.connection()?;
    let created_at = Utc::now();
    conn.execute(
        "INSERT INTO users (username, email, password_hash, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            new_user.username,
            new_user.email,
            new_user.password_hash,
            created_at.to_rfc3339(),
        ],
    )
    .map_err(|e| {
        if is_unique_violation(&e) {
            PlannerError::Conflict("username or email already exists".to_string())
        } else {
            e.into()
        }
    })?;

    Ok(User {
        id: conn.last_insert_rowid(),
        username: new_user.username.clone(),
        email: new_user.email.clone(),
        password_hash: new_user.password_hash.clone(),
        created_at,
    })
}

/// Look up an account by its exact username.
pub fn find_by_username(db: &Database, username: &str) -> PlannerResult<Option<User>> {
    let conn = db.connection()?;
    let mut stmt = conn.prepare(
        "SELECT id, username, email, password_hash, created_at
         FROM users WHERE username = ?1",
    )?;
    let mut rows = stmt.query_map(params![username], user_from_row)?;
    rows.next().transpose().map_err(Into::into)
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    let created_at: String = row.get(4)?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: timestamp_from_column(4, created_at)?,
    })
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}
