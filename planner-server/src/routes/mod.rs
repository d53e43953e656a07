pub mod auth;
pub mod events;
pub mod pages;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use planner_core::PlannerError;

use crate::render;

/// How handler failures turn into responses.
///
/// Handlers deal with the recoverable cases themselves when they want a
/// flash message; this is the fallback mapping for everything propagated
/// with `?`.
#[derive(Debug)]
pub enum AppError {
    /// Missing or blank required form input.
    Validation(String),
    /// Unique-constraint conflict (duplicate username/email).
    Conflict(String),
    /// No session identity; the client belongs on the login page.
    Unauthenticated,
    /// Missing or not-owned resource; back to the dashboard, no details.
    NotFound,
    /// Anything else renders as a generic server error.
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render::message_page("Validation error", &msg)),
            )
                .into_response(),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                Html(render::message_page("Conflict", &msg)),
            )
                .into_response(),
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::NotFound => Redirect::to("/dashboard").into_response(),
            AppError::Internal(err) => {
                log::error!("request failed: {err:#}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(render::message_page("Server error", "Something went wrong.")),
                )
                    .into_response()
            }
        }
    }
}

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::Validation(msg) => AppError::Validation(msg),
            PlannerError::Conflict(msg) => AppError::Conflict(msg),
            PlannerError::NotFound(_) => AppError::NotFound,
            other => AppError::Internal(other.into()),
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(err.into())
    }
}
