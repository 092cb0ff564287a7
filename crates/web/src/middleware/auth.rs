//! Authentication extractors and session helpers.
//!
//! The session carries a single entry, [`SessionState::KEY`], holding the
//! identifier of the logged-in user.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use connexion_core::SessionState;

/// Extractor that requires a logged-in user.
///
/// Redirects to the login page when the session has no identifier.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.identifier())
/// }
/// ```
pub struct RequireAuth(pub SessionState);

/// Error returned when authentication is required but nobody is logged in.
pub enum AuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// No session layer is installed.
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let user = current_user(session)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection::RedirectToLogin)?;

        Ok(Self(user))
    }
}

/// Read the logged-in user from the session.
///
/// # Errors
///
/// Returns an error if the session store cannot be read.
pub async fn current_user(
    session: &Session,
) -> Result<Option<SessionState>, tower_sessions::session::Error> {
    session.get::<SessionState>(SessionState::KEY).await
}

/// Establish the session state returned by a successful login.
///
/// The session id is cycled first so an id issued before authentication
/// does not carry over, and the record is saved immediately so a store
/// failure surfaces here rather than after the response is built.
///
/// # Errors
///
/// Returns an error if the session store cannot be written.
pub async fn set_current_user(
    session: &Session,
    state: &SessionState,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(SessionState::KEY, state).await?;
    session.save().await
}

/// Clear the logged-in user and destroy the session (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<SessionState>(SessionState::KEY).await?;
    session.flush().await
}
