//! HTTP server for the planner event app.
//!
//! Thin orchestration over `planner-core`: each handler resolves the
//! session identity, validates its typed form input once at the boundary,
//! and calls the owner-scoped access layer.

pub mod render;
pub mod routes;
pub mod session;
pub mod state;

use axum::Router;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::state::AppState;

/// Build the full application router with a fresh in-memory session store.
pub fn app(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default()).with_secure(false);

    Router::new()
        .merge(routes::pages::router())
        .merge(routes::auth::router())
        .merge(routes::events::router())
        .with_state(state)
        .layer(session_layer)
}
