//! Souk CLI - database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Create the backend tables and the admin session store
//! souk-cli migrate
//!
//! # Upsert shipping zones from a YAML file
//! souk-cli seed shipping-zones -f zones.yaml
//!
//! # Create a category
//! souk-cli category create -n "إلكترونيات" -s electronics
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run SQL migrations against `DATABASE_URL`
//! - `seed shipping-zones` - Upsert delivery prices per wilaya
//! - `category create` - Insert a category through the backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "souk-cli")]
#[command(author, version, about = "Souk CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed reference data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Upsert shipping zones from a YAML file
    ShippingZones {
        /// Path to the YAML file
        #[arg(short, long)]
        file: String,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Create a new category
    Create {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// URL slug (must be unique)
        #[arg(short, long)]
        slug: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::ShippingZones { file } => {
                commands::seed::shipping_zones(&file).await?;
            }
        },
        Commands::Category { action } => match action {
            CategoryAction::Create { name, slug } => {
                commands::category::create(&name, &slug).await?;
            }
        },
    }
    Ok(())
}
