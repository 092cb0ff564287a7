//! Submitted login credentials.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

use super::escape::escape_html;

/// Errors that can occur when preparing a [`CredentialSubmission`] for lookup.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    /// The identifier is empty after trimming.
    #[error("identifier cannot be empty")]
    EmptyIdentifier,
    /// The secret is empty after trimming.
    #[error("secret cannot be empty")]
    EmptySecret,
}

/// An identifier and secret as submitted through the login form.
///
/// Surrounding whitespace is trimmed on construction. The secret is kept in
/// a [`SecretString`] so it is redacted from `Debug` output.
///
/// ## Examples
///
/// ```
/// use connexion_core::{CredentialError, CredentialSubmission};
///
/// let submission = CredentialSubmission::new("  alice ", "secret1");
/// assert_eq!(submission.identifier(), "alice");
///
/// let empty = CredentialSubmission::new("", "secret1");
/// assert_eq!(empty.sanitize().unwrap_err(), CredentialError::EmptyIdentifier);
/// ```
pub struct CredentialSubmission {
    identifier: String,
    secret: SecretString,
}

impl CredentialSubmission {
    /// Create a submission from raw form values.
    #[must_use]
    pub fn new(identifier: &str, secret: &str) -> Self {
        Self {
            identifier: identifier.trim().to_owned(),
            secret: SecretString::from(secret.trim().to_owned()),
        }
    }

    /// Create a submission from optional form fields.
    ///
    /// An absent field is treated exactly like an empty one.
    #[must_use]
    pub fn from_fields(identifier: Option<&str>, secret: Option<&str>) -> Self {
        Self::new(identifier.unwrap_or_default(), secret.unwrap_or_default())
    }

    /// The trimmed, unescaped identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Check presence of both fields and escape them for lookup.
    ///
    /// # Errors
    ///
    /// Returns `CredentialError::EmptyIdentifier` if the identifier is empty,
    /// otherwise `CredentialError::EmptySecret` if the secret is empty.
    pub fn sanitize(&self) -> Result<SanitizedCredentials, CredentialError> {
        if self.identifier.is_empty() {
            return Err(CredentialError::EmptyIdentifier);
        }

        if self.secret.expose_secret().is_empty() {
            return Err(CredentialError::EmptySecret);
        }

        Ok(SanitizedCredentials {
            identifier: escape_html(&self.identifier),
            secret: SecretString::from(escape_html(self.secret.expose_secret())),
        })
    }
}

impl fmt::Debug for CredentialSubmission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSubmission")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Credentials that passed the presence check and were HTML-escaped.
///
/// These are the exact values compared against the stored user record.
pub struct SanitizedCredentials {
    identifier: String,
    secret: SecretString,
}

impl SanitizedCredentials {
    /// The escaped identifier.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The escaped secret.
    #[must_use]
    pub const fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Consume the credentials, keeping only the escaped identifier.
    #[must_use]
    pub fn into_identifier(self) -> String {
        self.identifier
    }
}

impl fmt::Debug for SanitizedCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizedCredentials")
            .field("identifier", &self.identifier)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_valid() {
        let creds = CredentialSubmission::new("alice", "secret1")
            .sanitize()
            .unwrap();
        assert_eq!(creds.identifier(), "alice");
        assert_eq!(creds.secret().expose_secret(), "secret1");
    }

    #[test]
    fn test_sanitize_empty_identifier() {
        let result = CredentialSubmission::new("", "secret1").sanitize();
        assert!(matches!(result, Err(CredentialError::EmptyIdentifier)));
    }

    #[test]
    fn test_sanitize_empty_secret() {
        let result = CredentialSubmission::new("alice", "").sanitize();
        assert!(matches!(result, Err(CredentialError::EmptySecret)));
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let result = CredentialSubmission::new("   ", "secret1").sanitize();
        assert!(matches!(result, Err(CredentialError::EmptyIdentifier)));

        let result = CredentialSubmission::new("alice", "\t\n").sanitize();
        assert!(matches!(result, Err(CredentialError::EmptySecret)));
    }

    #[test]
    fn test_zero_is_not_empty() {
        assert!(CredentialSubmission::new("0", "0").sanitize().is_ok());
    }

    #[test]
    fn test_absent_fields_are_empty() {
        let result = CredentialSubmission::from_fields(None, Some("secret1")).sanitize();
        assert!(matches!(result, Err(CredentialError::EmptyIdentifier)));

        let result = CredentialSubmission::from_fields(Some("alice"), None).sanitize();
        assert!(matches!(result, Err(CredentialError::EmptySecret)));
    }

    #[test]
    fn test_sanitize_escapes_both_fields() {
        let creds = CredentialSubmission::new("<alice>", "a&b").sanitize().unwrap();
        assert_eq!(creds.identifier(), "&lt;alice&gt;");
        assert_eq!(creds.secret().expose_secret(), "a&amp;b");
    }

    #[test]
    fn test_case_preserved() {
        let creds = CredentialSubmission::new("Alice", "Secret1").sanitize().unwrap();
        assert_eq!(creds.identifier(), "Alice");
        assert_eq!(creds.secret().expose_secret(), "Secret1");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let submission = CredentialSubmission::new("alice", "hunter2-very-secret");
        let debug_output = format!("{submission:?}");
        assert!(debug_output.contains("alice"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2-very-secret"));

        let creds = submission.sanitize().unwrap();
        assert!(!format!("{creds:?}").contains("hunter2-very-secret"));
    }
}
