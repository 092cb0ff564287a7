//! Business logic services for the login server.
//!
//! # Services
//!
//! - `auth` - Credential verification against the user store

pub mod auth;
