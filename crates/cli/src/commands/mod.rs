//! CLI subcommand implementations.

use secrecy::SecretString;

pub mod migrate;
pub mod user;

/// Read the database URL from `CONNEXION_DATABASE_URL`, then `DATABASE_URL`.
fn database_url() -> Option<SecretString> {
    dotenvy::dotenv().ok();

    std::env::var("CONNEXION_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
