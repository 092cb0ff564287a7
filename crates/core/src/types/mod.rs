//! Core types for Connexion.
//!
//! This module provides type-safe wrappers for the login domain.

pub mod credential;
pub mod escape;
pub mod id;
pub mod outcome;
pub mod session;

pub use credential::{CredentialError, CredentialSubmission, SanitizedCredentials};
pub use escape::escape_html;
pub use id::*;
pub use outcome::LoginOutcome;
pub use session::SessionState;
