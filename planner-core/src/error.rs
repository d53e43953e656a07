//! Error types for the planner crates.

use thiserror::Error;

/// Errors that can occur in planner operations.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A required field is missing or blank.
    #[error("validation error: {0}")]
    Validation(String),

    /// A unique constraint was violated (duplicate username or email).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The record does not exist, or is not owned by the caller. The two
    /// cases are deliberately indistinguishable.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("password hashing failed: {0}")]
    Hash(String),
}

/// Result type alias for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;
