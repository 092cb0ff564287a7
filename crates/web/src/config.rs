//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CONNEXION_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `CONNEXION_BASE_URL` - Public URL of the login server
//!
//! ## Optional
//! - `CONNEXION_HOST` - Bind address (default: 127.0.0.1)
//! - `CONNEXION_PORT` - Listen port (default: 3000)
//! - `CONNEXION_SESSION_TTL_SECONDS` - Session inactivity expiry (default: 7 days)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;
use url::Url;

/// Default session inactivity expiry (7 days).
const DEFAULT_SESSION_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Login server configuration.
///
/// Implements `Debug` manually to redact the database URL.
#[derive(Clone)]
pub struct WebConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL of the server
    pub base_url: String,
    /// Session inactivity expiry in seconds
    pub session_ttl_seconds: i64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for WebConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebConfig")
            .field("database_url", &"[REDACTED]")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_url", &self.base_url)
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("CONNEXION_DATABASE_URL")?;
        validate_database_url(&database_url, "CONNEXION_DATABASE_URL")?;

        let host = get_env_or_default("CONNEXION_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONNEXION_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("CONNEXION_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("CONNEXION_PORT".to_string(), e.to_string()))?;

        let base_url = get_required_env("CONNEXION_BASE_URL")?;
        validate_base_url(&base_url, "CONNEXION_BASE_URL")?;

        let session_ttl_seconds = parse_session_ttl(
            get_optional_env("CONNEXION_SESSION_TTL_SECONDS").as_deref(),
            "CONNEXION_SESSION_TTL_SECONDS",
        )?;

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_ttl_seconds,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over HTTPS (enables secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Check that the database URL parses as `PostgreSQL` connect options.
///
/// The parse error is not echoed, since it may quote the password.
fn validate_database_url(url: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    PgConnectOptions::from_str(url.expose_secret())
        .map(|_| ())
        .map_err(|_| {
            ConfigError::InvalidEnvVar(
                var_name.to_string(),
                "not a valid PostgreSQL connection URL".to_string(),
            )
        })
}

/// Check that the base URL is an absolute http(s) URL.
fn validate_base_url(base_url: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{other}' (expected http or https)"),
        )),
    }
}

/// Parse the session TTL, falling back to the default when unset.
fn parse_session_ttl(value: Option<&str>, var_name: &str) -> Result<i64, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_SESSION_TTL_SECONDS);
    };

    let seconds = value
        .parse::<i64>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if seconds <= 0 {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must be a positive number of seconds".to_string(),
        ));
    }

    Ok(seconds)
}
