//! Authentication service.
//!
//! Checks a submitted identifier and secret against the user store.

mod error;

pub use error::AuthError;

use connexion_core::{CredentialSubmission, LoginOutcome, SessionState};

use crate::db::UserStore;

/// Credential verifier.
///
/// Performs one presence check, one escape and at most one store lookup per
/// call. It never writes to the store and never touches the session itself:
/// the session state to establish is returned to the caller.
pub struct CredentialVerifier<'a> {
    users: &'a dyn UserStore,
}

impl<'a> CredentialVerifier<'a> {
    /// Create a new verifier over a user store.
    #[must_use]
    pub const fn new(users: &'a dyn UserStore) -> Self {
        Self { users }
    }

    /// Verify a submission.
    ///
    /// Returns the session state to establish on success. The identifier in
    /// it is the escaped form that matched the stored record.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if either field is empty; the store
    /// is not contacted in that case.
    /// Returns `AuthError::StoreUnavailable` if the store cannot answer.
    /// Returns `AuthError::InvalidCredentials` if no record matches.
    pub async fn verify(&self, submission: &CredentialSubmission) -> Result<SessionState, AuthError> {
        let credentials = submission.sanitize()?;

        let matches = self
            .users
            .count_matching(credentials.identifier(), credentials.secret())
            .await?;

        if matches == 0 {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(SessionState::new(credentials.into_identifier()))
    }

    /// Verify a submission and reduce the result to its outcome.
    ///
    /// Failures are logged here; the returned session state is `Some` only
    /// for [`LoginOutcome::Success`].
    pub async fn login(
        &self,
        submission: &CredentialSubmission,
    ) -> (LoginOutcome, Option<SessionState>) {
        match self.verify(submission).await {
            Ok(state) => {
                tracing::info!(identifier = %state.identifier(), "Login succeeded");
                (LoginOutcome::Success, Some(state))
            }
            Err(e) => {
                match &e {
                    AuthError::StoreUnavailable(source) => {
                        tracing::warn!(error = %source, "Login failed: user store unavailable");
                    }
                    AuthError::InvalidCredentials => {
                        tracing::info!(
                            identifier = %submission.identifier(),
                            "Login failed: invalid credentials"
                        );
                    }
                    AuthError::MissingField(reason) => {
                        tracing::debug!(%reason, "Login rejected: missing field");
                    }
                }
                (e.outcome(), None)
            }
        }
    }
}
