//! User store for credential lookups.
//!
//! [`UserStore`] is the seam the credential verifier depends on;
//! [`PgUserStore`] is its `PostgreSQL` implementation. All queries bind their
//! values as parameters.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, FromRow, PgConnection};

use connexion_core::UserId;

use super::RepositoryError;
use crate::models::user::UserRecord;

/// Read access to stored user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Count records whose identifier and secret both equal the given values.
    ///
    /// Comparison is exact: no case-folding, no normalization.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if the store cannot be reached,
    /// `RepositoryError::Database` if the lookup itself fails.
    async fn count_matching(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<i64, RepositoryError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Unavailable` if the store cannot be reached.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

#[derive(FromRow)]
struct UserRow {
    id: UserId,
    identifier: String,
    created_at: DateTime<Utc>,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            identifier: row.identifier,
            created_at: row.created_at,
        }
    }
}

/// `PostgreSQL`-backed user store.
///
/// Holds connection options only. Each operation opens its own connection
/// and closes it before returning, so nothing is pooled between requests.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    options: PgConnectOptions,
}

impl PgUserStore {
    /// Create a store from parsed connection options.
    #[must_use]
    pub const fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    /// Create a store from a connection URL.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Configuration` if the URL cannot be parsed.
    pub fn from_url(database_url: &SecretString) -> Result<Self, sqlx::Error> {
        let options = PgConnectOptions::from_str(database_url.expose_secret())?;
        Ok(Self::new(options))
    }

    async fn connect(&self) -> Result<PgConnection, RepositoryError> {
        PgConnection::connect_with(&self.options)
            .await
            .map_err(RepositoryError::Unavailable)
    }

    /// Insert a user record.
    ///
    /// Values are stored as given; callers escape them the same way login
    /// submissions are escaped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the identifier already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<UserRecord, RepositoryError> {
        let mut conn = self.connect().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r"
            INSERT INTO connexion.user (identifier, secret)
            VALUES ($1, $2)
            RETURNING id, identifier, created_at
            ",
        )
        .bind(identifier)
        .bind(secret.expose_secret())
        .fetch_one(&mut conn)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("identifier already exists".to_owned());
            }
            RepositoryError::Database(e)
        });

        close(conn).await;
        row.map(UserRecord::from)
    }

    /// List all user records, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let mut conn = self.connect().await?;

        let rows = sqlx::query_as::<_, UserRow>(
            r"
            SELECT id, identifier, created_at
            FROM connexion.user
            ORDER BY id
            ",
        )
        .fetch_all(&mut conn)
        .await;

        close(conn).await;
        Ok(rows?.into_iter().map(UserRecord::from).collect())
    }

    /// Delete the record with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no record has that identifier.
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn delete(&self, identifier: &str) -> Result<(), RepositoryError> {
        let mut conn = self.connect().await?;

        let result = sqlx::query("DELETE FROM connexion.user WHERE identifier = $1")
            .bind(identifier)
            .execute(&mut conn)
            .await;

        close(conn).await;

        if result?.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn count_matching(
        &self,
        identifier: &str,
        secret: &SecretString,
    ) -> Result<i64, RepositoryError> {
        let mut conn = self.connect().await?;

        let count = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*)
            FROM connexion.user
            WHERE identifier = $1 AND secret = $2
            ",
        )
        .bind(identifier)
        .bind(secret.expose_secret())
        .fetch_one(&mut conn)
        .await;

        close(conn).await;
        Ok(count?)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        let mut conn = self.connect().await?;
        let result = conn.ping().await.map_err(RepositoryError::Unavailable);
        close(conn).await;
        result
    }
}

/// Close a connection, logging rather than failing if the goodbye is lost.
async fn close(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "Failed to close user store connection cleanly");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Options pointing at a port nothing listens on.
    fn unreachable_store() -> PgUserStore {
        PgUserStore::new(
            PgConnectOptions::new()
                .host("127.0.0.1")
                .port(1)
                .username("connexion")
                .database("connexion"),
        )
    }

    #[tokio::test]
    async fn test_count_matching_unreachable_is_unavailable() {
        let store = unreachable_store();
        let result = store
            .count_matching("alice", &SecretString::from("secret1"))
            .await;
        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_ping_unreachable_is_unavailable() {
        let result = unreachable_store().ping().await;
        assert!(matches!(result, Err(RepositoryError::Unavailable(_))));
    }

    #[test]
    fn test_from_url_rejects_garbage() {
        let result = PgUserStore::from_url(&SecretString::from("definitely not a url"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_url_accepts_postgres_url() {
        let result = PgUserStore::from_url(&SecretString::from(
            "postgres://connexion:pw@localhost:5432/connexion",
        ));
        assert!(result.is_ok());
    }
}
