//! Authentication route handlers.
//!
//! The login form posts back to itself; the verification outcome is rendered
//! into the same page as a status message.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use connexion_core::{CredentialSubmission, LoginOutcome};

use crate::error::{clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
///
/// `login` marks the submission as a login attempt; without it nothing is
/// verified. The French field names of older form markup are accepted as
/// aliases.
#[derive(Default)]
pub struct LoginForm {
    pub login: Option<String>,
    pub identifier: Option<String>,
    pub secret: Option<String>,
}

impl LoginForm {
    /// Collect the known fields from decoded form pairs.
    ///
    /// A field given more than once, under its name or its alias, keeps the
    /// last value. Unknown fields are ignored.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut form = Self::default();

        for (name, value) in pairs {
            match name.as_str() {
                "login" | "connexion" => form.login = Some(value),
                "identifier" | "pseudo" => form.identifier = Some(value),
                "secret" | "mdp" => form.secret = Some(value),
                _ => {}
            }
        }

        form
    }
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    /// Status message of the last attempt, if there was one.
    pub message: Option<&'static str>,
    /// Whether the last attempt succeeded.
    pub success: bool,
}

impl LoginTemplate {
    const fn blank() -> Self {
        Self {
            message: None,
            success: false,
        }
    }

    const fn for_outcome(outcome: LoginOutcome) -> Self {
        Self {
            message: Some(outcome.message()),
            success: outcome.is_success(),
        }
    }
}

/// HTTP status used when rendering a login outcome.
#[must_use]
pub const fn outcome_status(outcome: LoginOutcome) -> StatusCode {
    match outcome {
        LoginOutcome::MissingField => StatusCode::BAD_REQUEST,
        LoginOutcome::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        LoginOutcome::InvalidCredentials => StatusCode::UNAUTHORIZED,
        LoginOutcome::Success => StatusCode::OK,
    }
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate::blank()
}

/// Handle login form submission.
///
/// Verifies the submitted credentials and, on success, stores the matched
/// identifier in a freshly cycled session. Every branch renders the login
/// page: an undecodable body gets the blank form, and a session store that
/// cannot record the login is reported like an unreachable user store.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(pairs)) => LoginForm::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unreadable login form");
            return (StatusCode::BAD_REQUEST, LoginTemplate::blank()).into_response();
        }
    };

    if form.login.is_none() {
        return LoginTemplate::blank().into_response();
    }

    let submission =
        CredentialSubmission::from_fields(form.identifier.as_deref(), form.secret.as_deref());

    let (mut outcome, established) = state.verifier().login(&submission).await;

    if let Some(user) = established {
        match set_current_user(&session, &user).await {
            Ok(()) => set_sentry_user(user.identifier()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to record login in session store");
                outcome = LoginOutcome::StoreUnavailable;
            }
        }
    }

    (outcome_status(outcome), LoginTemplate::for_outcome(outcome)).into_response()
}

// =============================================================================
// Logout Route
// =============================================================================

/// Handle logout.
///
/// Destroys the session and returns to the login page.
pub async fn logout(session: Session) -> Response {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {}", e);
    }
    clear_sentry_user();

    Redirect::to("/auth/login").into_response()
}
