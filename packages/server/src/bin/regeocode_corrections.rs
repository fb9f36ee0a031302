//! Recompute coordinates of corrected decisions from their stored map links.

use anyhow::{Context, Result};
use clap::Parser;
use review_core::domains::resolutions::{regeocode_corrections, DEFAULT_MAINTENANCE_BATCH_SIZE};
use review_core::kernel::ServerDeps;
use review_core::Config;
use sqlx::postgres::PgPoolOptions;

#[derive(Parser)]
#[command(name = "regeocode_corrections")]
#[command(about = "Re-resolve corrected map links and update stored coordinates")]
struct Cli {
    /// Records processed concurrently
    #[arg(long, default_value_t = DEFAULT_MAINTENANCE_BATCH_SIZE)]
    batch_size: usize,

    /// Report what would change without writing
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    let deps = ServerDeps::from_config(&config, pool)?;
    let report = regeocode_corrections(&deps, cli.batch_size, cli.dry_run)
        .await
        .context("Re-geocoding failed")?;

    tracing::info!(
        scanned = report.scanned,
        updated = report.updated,
        skipped = report.skipped,
        dry_run = cli.dry_run,
        "Re-geocoding finished"
    );
    Ok(())
}
