//! Database access for the login server.
//!
//! # Database: `connexion`
//!
//! ## Tables
//!
//! - `connexion.user` - Stored identifier/secret pairs checked at login
//! - `tower_sessions.session` - Tower-sessions storage
//!
//! # Connections
//!
//! Login lookups open one connection per verification and close it
//! afterwards (see [`users::PgUserStore`]). Only the session store keeps a
//! pool, created by [`create_pool`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p connexion-cli -- migrate
//! ```

pub mod users;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use users::{PgUserStore, UserStore};

/// Errors from user-store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The database could not be reached.
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),

    /// A query failed after the connection was established.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate identifier).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool for the session store.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
