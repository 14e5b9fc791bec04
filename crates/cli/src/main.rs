//! Driftwood CLI - seeding and staff management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the document store with the demo catalog and blog
//! dw-cli seed
//!
//! # Grant a role to an existing user
//! dw-cli admin grant -e staff@example.com -r manager
//! ```
//!
//! # Commands
//!
//! - `seed` - Upsert the demo catalog, blog posts, and settings
//! - `admin grant` - Change a user's role

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dw-cli")]
#[command(author, version, about = "Driftwood CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the document store with demo data
    Seed,
    /// Manage staff roles
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant a role to an existing user
    Grant {
        /// User email address
        #[arg(short, long)]
        email: String,

        /// Role to grant (`customer`, `manager`, `admin`)
        #[arg(short, long, default_value = "manager")]
        role: String,
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
        Commands::Seed => commands::seed::run().await?,
        Commands::Admin { action } => match action {
            AdminAction::Grant { email, role } => {
                commands::admin::grant_role(&email, &role).await?;
            }
        },
    }
    Ok(())
}
