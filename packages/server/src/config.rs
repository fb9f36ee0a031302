use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Default upstream for the location feed.
pub const DEFAULT_FEED_BASE_URL: &str = "https://apigo.afetharita.com";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub feed_base_url: String,
    pub feed_snapshot_ttl_secs: u64,
    /// Empty means any origin is allowed.
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let feed_base_url =
            env::var("FEED_BASE_URL").unwrap_or_else(|_| DEFAULT_FEED_BASE_URL.to_string());
        url::Url::parse(&feed_base_url).context("FEED_BASE_URL must be a valid URL")?;

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            feed_base_url,
            feed_snapshot_ttl_secs: env::var("FEED_SNAPSHOT_TTL_SECS")
                .unwrap_or_else(|_| "900".to_string())
                .parse()
                .context("FEED_SNAPSHOT_TTL_SECS must be a number of seconds")?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|origins| parse_origins(&origins))
                .unwrap_or_default(),
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
