//! Session state established by a successful login.

use serde::{Deserialize, Serialize};

/// Identity written to the session after a successful login.
///
/// Serializes as a bare string so the session entry holds nothing but the
/// (escaped) identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionState {
    identifier: String,
}

impl SessionState {
    /// Session key under which the identifier is stored.
    pub const KEY: &'static str = "pseudo";

    /// Create session state for an identifier.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }

    /// The identifier of the logged-in user, as it was matched in the store.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}
