//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::WebConfig;
use crate::db::UserStore;
use crate::services::auth::CredentialVerifier;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the user store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: WebConfig,
    users: Box<dyn UserStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Server configuration
    /// * `users` - User store consulted at login
    #[must_use]
    pub fn new(config: WebConfig, users: impl UserStore + 'static) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                users: Box::new(users),
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &WebConfig {
        &self.inner.config
    }

    /// Get a reference to the user store.
    #[must_use]
    pub fn users(&self) -> &dyn UserStore {
        self.inner.users.as_ref()
    }

    /// Get a credential verifier over the user store.
    #[must_use]
    pub fn verifier(&self) -> CredentialVerifier<'_> {
        CredentialVerifier::new(self.users())
    }
}
