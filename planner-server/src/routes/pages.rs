//! Landing page.

use axum::{
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower_sessions::Session;

use crate::render;
use crate::routes::AppError;
use crate::session::{self, current_user};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// GET / - dashboard for signed-in users, landing page otherwise
async fn index(session: Session) -> Result<Response, AppError> {
    if current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/dashboard").into_response());
    }
    let flash = session::take_flash(&session).await?;
    Ok(Html(render::landing_page(flash.as_ref())).into_response())
}
