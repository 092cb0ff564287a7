//! Connexion CLI - Database migrations and user management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! connexion migrate
//!
//! # Create a user
//! connexion user create -i alice -s secret1
//!
//! # List users
//! connexion user list
//!
//! # Delete a user
//! connexion user delete -i alice
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "connexion")]
#[command(author, version, about = "Connexion CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage user records
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login identifier
        #[arg(short, long)]
        identifier: String,

        /// Login secret
        #[arg(short, long)]
        secret: String,
    },
    /// List all users
    List,
    /// Delete a user
    Delete {
        /// Login identifier
        #[arg(short, long)]
        identifier: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::User { action } => match action {
            UserAction::Create { identifier, secret } => {
                commands::user::create(&identifier, &secret).await?;
            }
            UserAction::List => {
                let records = commands::user::list().await?;
                #[allow(clippy::print_stdout)]
                {
                    println!("{}", commands::user::format_records(&records));
                }
            }
            UserAction::Delete { identifier } => {
                commands::user::delete(&identifier).await?;
            }
        },
    }
    Ok(())
}
