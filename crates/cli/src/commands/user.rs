//! User record management commands.
//!
//! # Usage
//!
//! ```bash
//! # Create a user
//! connexion user create -i alice -s secret1
//!
//! # List users
//! connexion user list
//!
//! # Delete a user
//! connexion user delete -i alice
//! ```
//!
//! Values are trimmed and HTML-escaped before they are stored, exactly as a
//! login submission is, so a user created here can log in with the raw
//! values they typed.

use connexion_core::{CredentialError, CredentialSubmission, escape_html};
use connexion_web::db::{PgUserStore, RepositoryError};
use connexion_web::models::user::UserRecord;
use thiserror::Error;

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The database URL could not be parsed.
    #[error("Invalid database URL")]
    InvalidDatabaseUrl(#[source] sqlx::Error),

    /// Identifier or secret is empty.
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(#[from] CredentialError),

    /// A user with this identifier already exists.
    #[error("User already exists: {0}")]
    UserExists(String),

    /// No user has this identifier.
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

fn store() -> Result<PgUserStore, UserError> {
    let database_url =
        super::database_url().ok_or(UserError::MissingEnvVar("CONNEXION_DATABASE_URL"))?;
    PgUserStore::from_url(&database_url).map_err(UserError::InvalidDatabaseUrl)
}

/// Create a user record.
///
/// # Returns
///
/// The created record, with the identifier as stored.
///
/// # Errors
///
/// Returns `UserError::InvalidCredentials` if either value is empty after
/// trimming, `UserError::UserExists` if the escaped identifier is taken.
pub async fn create(identifier: &str, secret: &str) -> Result<UserRecord, UserError> {
    let credentials = CredentialSubmission::new(identifier, secret).sanitize()?;
    let store = store()?;

    tracing::info!("Creating user: {}", credentials.identifier());

    let record = store
        .create(credentials.identifier(), credentials.secret())
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => UserError::UserExists(credentials.identifier().to_owned()),
            other => UserError::Database(other),
        })?;

    tracing::info!(
        "User created successfully! ID: {}, Identifier: {}",
        record.id,
        record.identifier
    );

    Ok(record)
}

/// List all user records.
///
/// # Errors
///
/// Returns `UserError::Database` if the store cannot be read.
pub async fn list() -> Result<Vec<UserRecord>, UserError> {
    Ok(store()?.list().await?)
}

/// Delete the user with the given raw identifier.
///
/// # Errors
///
/// Returns `UserError::UserNotFound` if no stored identifier matches.
pub async fn delete(identifier: &str) -> Result<(), UserError> {
    let escaped = escape_html(identifier.trim());

    store()?.delete(&escaped).await.map_err(|e| match e {
        RepositoryError::NotFound => UserError::UserNotFound(escaped.clone()),
        other => UserError::Database(other),
    })?;

    tracing::info!("User deleted: {}", escaped);
    Ok(())
}

/// Render records as an aligned table.
#[must_use]
pub fn format_records(records: &[UserRecord]) -> String {
    if records.is_empty() {
        return "No users.".to_owned();
    }

    let mut out = format!("{:>6}  {:<32}  {}\n", "ID", "IDENTIFIER", "CREATED");
    for record in records {
        out.push_str(&format!(
            "{:>6}  {:<32}  {}\n",
            record.id,
            record.identifier,
            record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
    }
    out
}
