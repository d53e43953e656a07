//! Session identity and flash messages.
//!
//! The session carries at most the authenticated user's id and username.
//! Protected handlers call [`require_user`] explicitly at the top instead
//! of relying on wrapping middleware, so the gate is visible at every
//! call site.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::routes::AppError;

const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flash";

/// The authenticated identity carried by a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
}

/// A one-shot message surfaced on the next rendered page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Flash {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// Read the signed-in user, if any.
pub async fn current_user(session: &Session) -> Result<Option<CurrentUser>, AppError> {
    Ok(session.get::<CurrentUser>(USER_KEY).await?)
}

/// The signed-in user, or `Unauthenticated` (rendered as a redirect to
/// the login page).
pub async fn require_user(session: &Session) -> Result<CurrentUser, AppError> {
    current_user(session).await?.ok_or(AppError::Unauthenticated)
}

/// Bind the session to a freshly authenticated user.
pub async fn sign_in(session: &Session, user: CurrentUser) -> Result<(), AppError> {
    session.insert(USER_KEY, user).await?;
    Ok(())
}

/// Clear the session entirely, identity and any pending flash included.
pub async fn sign_out(session: &Session) -> Result<(), AppError> {
    session.flush().await?;
    Ok(())
}

/// Queue a flash message for the next rendered page.
pub async fn set_flash(
    session: &Session,
    kind: FlashKind,
    message: impl Into<String>,
) -> Result<(), AppError> {
    session
        .insert(
            FLASH_KEY,
            Flash {
                kind,
                message: message.into(),
            },
        )
        .await?;
    Ok(())
}

/// Take the pending flash message, removing it from the session.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>, AppError> {
    Ok(session.remove::<Flash>(FLASH_KEY).await?)
}
