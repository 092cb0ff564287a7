//! User record domain type.

use chrono::{DateTime, Utc};

use connexion_core::UserId;

/// A stored user record, without its secret.
///
/// The secret column is only ever compared inside the database; it is not
/// read back into the application.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// Database ID.
    pub id: UserId,
    /// Stored (escaped) identifier.
    pub identifier: String,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}
