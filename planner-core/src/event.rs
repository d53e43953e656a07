//! Owner-scoped event records and access layer.
//!
//! Every operation here takes the owner's user id and bakes it into the
//! query. An event owned by someone else behaves exactly like an event
//! that does not exist.

use crate::db::{timestamp_from_column, Database};
use crate::error::{PlannerError, PlannerResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

/// Status applied when a draft leaves the field blank.
pub const DEFAULT_STATUS: &str = "pending";

const EVENT_COLUMNS: &str =
    "id, user_id, title, description, location, due_date, status, created_at, updated_at";

/// A calendar event as stored in the events table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    /// The owning account; removed together with it via cascade.
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    /// ISO-8601 text, e.g. `2024-01-02` or `2024-01-02T10:00`. Lexicographic
    /// order of this shape matches chronological order, which is what the
    /// dashboard sort relies on.
    pub due_date: String,
    /// Free text, defaults to [`DEFAULT_STATUS`].
    pub status: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation.
    pub updated_at: DateTime<Utc>,
}

/// The mutable fields of an event, as submitted by the user.
#[derive(Debug, Clone, Default)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub due_date: String,
    pub status: String,
}

impl EventDraft {
    /// Check the required fields: title and due date must be non-blank.
    pub fn validate(&self) -> PlannerResult<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::Validation("title is required".to_string()));
        }
        if self.due_date.trim().is_empty() {
            return Err(PlannerError::Validation("due date is required".to_string()));
        }
        Ok(())
    }

    fn status_or_default(&self) -> &str {
        if self.status.trim().is_empty() {
            DEFAULT_STATUS
        } else {
            &self.status
        }
    }
}

/// List all events owned by `user_id`, earliest due date first.
///
/// Zero events is an empty vec, never an error.
pub fn list_events(db: &Database, user_id: i64) -> PlannerResult<Vec<Event>> {
    let conn = db.connection()?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE user_id = ?1 ORDER BY due_date ASC"
    ))?;
    let events = stmt
        .query_map(params![user_id], event_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(events)
}

/// Insert a new event owned by `user_id`.
pub fn create_event(db: &Database, user_id: i64, draft: &EventDraft) -> PlannerResult<Event> {
    draft.validate()?;
    let conn = db.connection()?;
    let now = Utc::now();
    conn.execute(
        "INSERT INTO events (user_id, title, description, location, due_date, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            user_id,
            draft.title,
            draft.description,
            draft.location,
            draft.due_date,
            draft.status_or_default(),
            now.to_rfc3339(),
            now.to_rfc3339(),
        ],
    )?;

    Ok(Event {
        id: conn.last_insert_rowid(),
        user_id,
        title: draft.title.clone(),
        description: draft.description.clone(),
        location: draft.location.clone(),
        due_date: draft.due_date.clone(),
        status: draft.status_or_default().to_string(),
        created_at: now,
        updated_at: now,
    })
}

/// Fetch one event scoped to its owner.
///
/// Absent and not-owned report the same [`PlannerError::NotFound`], so the
/// existence of other users' events never leaks.
pub fn get_event(db: &Database, event_id: i64, user_id: i64) -> PlannerResult<Event> {
    let conn = db.connection()?;
    fetch_event(&conn, event_id, user_id)?
        .ok_or_else(|| PlannerError::NotFound(format!("no event with id {event_id}")))
}

/// Replace the mutable fields of an owned event and bump `updated_at`.
///
/// Reports [`PlannerError::NotFound`] when the `(id, owner)` pair matches
/// nothing; the owner id itself is never writable.
pub fn update_event(
    db: &Database,
    event_id: i64,
    user_id: i64,
    draft: &EventDraft,
) -> PlannerResult<Event> {
    draft.validate()?;
    let conn = db.connection()?;
    let updated_at = Utc::now();
    let changed = conn.execute(
        "UPDATE events
         SET title = ?1, description = ?2, location = ?3, due_date = ?4, status = ?5, updated_at = ?6
         WHERE id = ?7 AND user_id = ?8",
        params![
            draft.title,
            draft.description,
            draft.location,
            draft.due_date,
            draft.status_or_default(),
            updated_at.to_rfc3339(),
            event_id,
            user_id,
        ],
    )?;
    if changed == 0 {
        return Err(PlannerError::NotFound(format!("no event with id {event_id}")));
    }

    fetch_event(&conn, event_id, user_id)?
        .ok_or_else(|| PlannerError::NotFound(format!("no event with id {event_id}")))
}

/// Delete an owned event.
///
/// Returns whether a row was removed. A non-owned or non-existent id is a
/// harmless no-op, not an error.
pub fn delete_event(db: &Database, event_id: i64, user_id: i64) -> PlannerResult<bool> {
    let conn = db.connection()?;
    let deleted = conn.execute(
        "DELETE FROM events WHERE id = ?1 AND user_id = ?2",
        params![event_id, user_id],
    )?;
    Ok(deleted > 0)
}

fn fetch_event(conn: &Connection, event_id: i64, user_id: i64) -> PlannerResult<Option<Event>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1 AND user_id = ?2"
    ))?;
    let mut rows = stmt.query_map(params![event_id, user_id], event_from_row)?;
    rows.next().transpose().map_err(Into::into)
}

fn event_from_row(row: &Row) -> rusqlite::Result<Event> {
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;
    Ok(Event {
        id: row.get(0)?,
        user_id: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        location: row.get(4)?,
        due_date: row.get(5)?,
        status: row.get(6)?,
        created_at: timestamp_from_column(7, created_at)?,
        updated_at: timestamp_from_column(8, updated_at)?,
    })
}
