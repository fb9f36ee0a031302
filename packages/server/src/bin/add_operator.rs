//! Provision a reviewer and print their API key.
//!
//! The key is shown exactly once; only its hash is stored.

use anyhow::{Context, Result};
use clap::Parser;
use review_core::domains::operators::{provision_operator, PermissionLevel};
use review_core::kernel::PostgresStore;
use review_core::Config;
use sqlx::postgres::PgPoolOptions;

#[derive(Parser)]
#[command(name = "add_operator")]
#[command(about = "Create an operator and print their API key")]
struct Cli {
    /// Display name
    #[arg(long)]
    name: String,

    /// How to reach the operator (chat handle, phone)
    #[arg(long, default_value = "")]
    contact: String,

    /// Grant access to the admin routes
    #[arg(long)]
    moderator: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let level = if cli.moderator {
        PermissionLevel::Moderate
    } else {
        PermissionLevel::Submit
    };

    let store = PostgresStore::new(pool);
    let (operator, api_key) = provision_operator(&cli.name, &cli.contact, level, &store)
        .await
        .context("Failed to provision operator")?;

    println!("Operator:   {} ({})", operator.name, operator.id);
    println!("Permission: {:?}", operator.permission_level);
    println!("API key:    {}", api_key);
    println!();
    println!("Store this key now. It cannot be recovered.");

    Ok(())
}
