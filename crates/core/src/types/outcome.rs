//! Result of a login attempt.

use core::fmt;

use serde::{Deserialize, Serialize};

/// The four ways a login attempt can end.
///
/// Each outcome maps to a single fixed status message meant to be shown to
/// the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginOutcome {
    /// The identifier or the secret was empty. The store was not contacted.
    MissingField,
    /// The user store could not be reached or could not answer.
    StoreUnavailable,
    /// No stored record matches both identifier and secret.
    ///
    /// Unknown identifiers and wrong secrets are deliberately reported the
    /// same way.
    InvalidCredentials,
    /// A stored record matched and the session now carries the identifier.
    Success,
}

impl LoginOutcome {
    /// All outcomes, in decision order.
    pub const ALL: [Self; 4] = [
        Self::MissingField,
        Self::StoreUnavailable,
        Self::InvalidCredentials,
        Self::Success,
    ];

    /// The user-facing status message for this outcome.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MissingField => "One of the fields is empty.",
            Self::StoreUnavailable => "Could not connect to the database.",
            Self::InvalidCredentials => "The username or password is incorrect.",
            Self::Success => "You are logged in.",
        }
    }

    /// Returns `true` for [`LoginOutcome::Success`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for LoginOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
