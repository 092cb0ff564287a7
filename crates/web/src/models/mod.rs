//! Domain models for the login server.
//!
//! Session state lives in `connexion_core::SessionState`; this module only
//! holds the stored-record view used by management tooling.

pub mod user;

pub use user::UserRecord;
