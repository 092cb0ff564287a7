//! Authentication error types.

use thiserror::Error;

use connexion_core::{CredentialError, LoginOutcome};

use crate::db::RepositoryError;

/// Errors that can occur while verifying a login submission.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Identifier or secret was empty.
    #[error("missing field: {0}")]
    MissingField(#[from] CredentialError),

    /// No stored record matches (unknown identifier or wrong secret).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The user store could not be reached or could not answer.
    #[error("user store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
}

impl AuthError {
    /// The login outcome this error is reported as.
    #[must_use]
    pub const fn outcome(&self) -> LoginOutcome {
        match self {
            Self::MissingField(_) => LoginOutcome::MissingField,
            Self::InvalidCredentials => LoginOutcome::InvalidCredentials,
            Self::StoreUnavailable(_) => LoginOutcome::StoreUnavailable,
        }
    }
}
