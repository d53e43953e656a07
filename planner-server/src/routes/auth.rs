//! Registration, login, and logout.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tower_sessions::Session;

use planner_core::{credentials, user, NewUser, PlannerError};

use crate::render;
use crate::routes::AppError;
use crate::session::{self, CurrentUser, Flash, FlashKind};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", get(register_form).post(register))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
}

/// Registration input, validated once at the boundary. Missing fields
/// deserialize as empty strings and fail the blank checks below.
#[derive(Debug, Deserialize)]
struct RegisterForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    confirm_password: String,
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

async fn register_form(session: Session) -> Result<Html<String>, AppError> {
    let flash = session::take_flash(&session).await?;
    Ok(Html(render::register_page(flash.as_ref())))
}

/// POST /register - create the account, or redisplay the form with a message
async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AppError> {
    if form.username.trim().is_empty() || form.email.trim().is_empty() || form.password.is_empty() {
        return Ok(register_error("All fields are required."));
    }
    if form.password != form.confirm_password {
        return Ok(register_error("Passwords do not match."));
    }

    let password_hash = credentials::hash(&form.password)?;
    let new_user = NewUser {
        username: form.username.trim().to_string(),
        email: form.email.trim().to_string(),
        password_hash,
    };

    match user::create_user(&state.db, &new_user) {
        Ok(_) => {
            session::set_flash(
                &session,
                FlashKind::Success,
                "Registration successful. Please log in.",
            )
            .await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(PlannerError::Conflict(_)) => {
            log::warn!("registration conflict for username {:?}", new_user.username);
            Ok(register_error("Username or email already exists."))
        }
        Err(err) => Err(err.into()),
    }
}

async fn login_form(session: Session) -> Result<Html<String>, AppError> {
    let flash = session::take_flash(&session).await?;
    Ok(Html(render::login_page(flash.as_ref())))
}

/// POST /login - authenticate and bind the session
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if form.username.trim().is_empty() || form.password.is_empty() {
        return Ok(login_error("Username and password are required."));
    }

    let account = user::find_by_username(&state.db, form.username.trim())?;
    let verified = account
        .as_ref()
        .map(|u| credentials::verify(&u.password_hash, &form.password))
        .unwrap_or(false);

    match account {
        Some(account) if verified => {
            session::sign_in(
                &session,
                CurrentUser {
                    id: account.id,
                    username: account.username.clone(),
                },
            )
            .await?;
            session::set_flash(
                &session,
                FlashKind::Success,
                format!("Welcome back, {}!", account.username),
            )
            .await?;
            Ok(Redirect::to("/dashboard").into_response())
        }
        _ => {
            log::warn!("failed login for username {:?}", form.username.trim());
            // One message for unknown user and wrong password alike.
            Ok(login_error("Invalid username or password."))
        }
    }
}

/// GET /logout - clear the session and go home
async fn logout(session: Session) -> Result<Response, AppError> {
    session::sign_out(&session).await?;
    session::set_flash(&session, FlashKind::Info, "You have been logged out.").await?;
    Ok(Redirect::to("/").into_response())
}

fn register_error(message: &str) -> Response {
    Html(render::register_page(Some(&Flash::error(message)))).into_response()
}

fn login_error(message: &str) -> Response {
    Html(render::login_page(Some(&Flash::error(message)))).into_response()
}
