//! Connexion Core - Shared types library.
//!
//! This crate provides the types used across all Connexion components:
//! - `web` - Login form server
//! - `cli` - Command-line tools for migrations and user records
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP. The credential checks that need a store live in
//! the web crate; everything they decide on is defined here.
//!
//! # Modules
//!
//! - [`types`] - Credential submissions, the HTML sanitizer, login outcomes,
//!   session state and type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
