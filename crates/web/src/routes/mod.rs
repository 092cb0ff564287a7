//! HTTP route handlers for the login server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the login page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (user store ping)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action
//! POST /auth/logout            - Logout action
//!
//! # Account (requires login)
//! GET  /account                - Logged-in identifier
//! ```

pub mod account;
pub mod auth;
pub mod health;

use axum::{
    Router,
    http::Uri,
    response::Redirect,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the login server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/auth/login") }))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/account", get(account::index))
        .nest("/auth", auth_routes())
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_owned())
}
