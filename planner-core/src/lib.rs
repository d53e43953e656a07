//! Core types and data access for the planner event app.
//!
//! This crate owns everything below the HTTP layer:
//! - [`Database`] — the single-file SQLite store and its schema
//! - [`credentials`] — one-way password hashing and verification
//! - [`User`] / [`user`] — account records and registration/login lookups
//! - [`Event`] / [`event`] — owner-scoped event CRUD
//!
//! Every event operation is filtered by the owning user's id; there is no
//! access path that crosses user boundaries.

pub mod credentials;
pub mod db;
pub mod error;
pub mod event;
pub mod user;

pub use db::Database;
pub use error::{PlannerError, PlannerResult};
pub use event::{Event, EventDraft};
pub use user::{NewUser, User};
