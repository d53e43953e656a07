//! Dashboard and event CRUD.
//!
//! Every handler here opens with [`require_user`]; the access layer then
//! scopes every query to that user's id.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;
use tower_sessions::Session;

use planner_core::{event, EventDraft, PlannerError};

use crate::render::{self, EventFormValues};
use crate::routes::AppError;
use crate::session::{self, require_user, Flash, FlashKind};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/event/create", get(create_form).post(create))
        .route("/event/{id}/edit", get(edit_form).post(edit))
        .route("/event/{id}/delete", post(delete))
}

/// GET /dashboard - the user's events, earliest due date first
async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, AppError> {
    let user = require_user(&session).await?;
    let events = event::list_events(&state.db, user.id)?;
    let flash = session::take_flash(&session).await?;
    Ok(Html(render::dashboard_page(&user.username, &events, flash.as_ref())).into_response())
}

/// Event form input, shared by create and edit. Optional fields collapse
/// to `None` when blank.
#[derive(Debug, Deserialize)]
struct EventForm {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    due_date: String,
    #[serde(default)]
    status: String,
}

impl EventForm {
    fn into_draft(self) -> EventDraft {
        EventDraft {
            title: self.title.trim().to_string(),
            description: none_if_blank(self.description),
            location: none_if_blank(self.location),
            due_date: self.due_date.trim().to_string(),
            status: self.status.trim().to_string(),
        }
    }
}

fn none_if_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

async fn create_form(session: Session) -> Result<Response, AppError> {
    require_user(&session).await?;
    let flash = session::take_flash(&session).await?;
    Ok(Html(render::event_form_page(
        "New event",
        "/event/create",
        &EventFormValues::default(),
        flash.as_ref(),
    ))
    .into_response())
}

/// POST /event/create
async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<EventForm>,
) -> Result<Response, AppError> {
    let user = require_user(&session).await?;
    let draft = form.into_draft();

    match event::create_event(&state.db, user.id, &draft) {
        Ok(_) => {
            session::set_flash(&session, FlashKind::Success, "Event created.").await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(PlannerError::Validation(msg)) => {
            Ok(form_error("New event", "/event/create", &draft, &msg))
        }
        Err(err) => Err(err.into()),
    }
}

/// GET /event/{id}/edit - fetch for edit, owner-scoped
async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let user = require_user(&session).await?;

    match event::get_event(&state.db, id, user.id) {
        Ok(ev) => {
            let flash = session::take_flash(&session).await?;
            Ok(Html(render::event_form_page(
                "Edit event",
                &format!("/event/{}/edit", ev.id),
                &(&ev).into(),
                flash.as_ref(),
            ))
            .into_response())
        }
        // Not-owned looks identical to missing: generic message, no detail.
        Err(PlannerError::NotFound(_)) => {
            session::set_flash(&session, FlashKind::Error, "Event not found.").await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /event/{id}/edit - full replace of the mutable fields
async fn edit(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
    Form(form): Form<EventForm>,
) -> Result<Response, AppError> {
    let user = require_user(&session).await?;
    let draft = form.into_draft();

    match event::update_event(&state.db, id, user.id, &draft) {
        Ok(_) => {
            session::set_flash(&session, FlashKind::Success, "Event updated.").await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(PlannerError::Validation(msg)) => Ok(form_error(
            "Edit event",
            &format!("/event/{id}/edit"),
            &draft,
            &msg,
        )),
        Err(PlannerError::NotFound(_)) => {
            session::set_flash(&session, FlashKind::Error, "Event not found.").await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(err) => Err(err.into()),
    }
}

/// POST /event/{id}/delete - always back to the dashboard, owned or not
async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let user = require_user(&session).await?;

    if event::delete_event(&state.db, id, user.id)? {
        session::set_flash(&session, FlashKind::Success, "Event deleted.").await?;
    }
    Ok(Redirect::to("/dashboard").into_response())
}

fn form_error(title: &str, action: &str, draft: &EventDraft, message: &str) -> Response {
    Html(render::event_form_page(
        title,
        action,
        &draft.into(),
        Some(&Flash::error(message)),
    ))
    .into_response()
}
