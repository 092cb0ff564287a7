//! Health check handlers.

use axum::extract::State;

use crate::error::Result;
use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the user store is reachable.
///
/// # Errors
///
/// Returns `AppError::Database` (503 when unreachable) if the ping fails.
pub async fn readiness(State(state): State<AppState>) -> Result<&'static str> {
    state.users().ping().await?;
    Ok("ready")
}
