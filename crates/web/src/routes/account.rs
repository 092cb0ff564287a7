//! Account route handlers.
//!
//! These routes require a logged-in session.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::RequireAuth;

/// Account page template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    /// Session identifier. Already HTML-escaped when it was matched.
    pub identifier: String,
}

/// Display the logged-in identifier.
pub async fn index(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    AccountTemplate {
        identifier: user.identifier().to_owned(),
    }
}
