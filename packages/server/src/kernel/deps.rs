//! Server dependencies (using traits for testability)
//!
//! Every collaborator the engine talks to sits behind a trait so tests can
//! swap in the mocks from `test_dependencies`.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::PgPool;

use crate::config::Config;
use crate::kernel::{
    BaseFeedClient, BaseOperatorStore, BaseResolutionStore, BaseUrlResolver, FeedClient,
    HttpUrlResolver, PostgresStore,
};

/// Shared dependencies, constructed once at startup and cloned per request
#[derive(Clone)]
pub struct ServerDeps {
    /// Feed client; owns the snapshot and detail caches
    pub feed: Arc<dyn BaseFeedClient>,
    pub resolutions: Arc<dyn BaseResolutionStore>,
    pub operators: Arc<dyn BaseOperatorStore>,
    pub url_resolver: Arc<dyn BaseUrlResolver>,
}

impl ServerDeps {
    pub fn new(
        feed: Arc<dyn BaseFeedClient>,
        resolutions: Arc<dyn BaseResolutionStore>,
        operators: Arc<dyn BaseOperatorStore>,
        url_resolver: Arc<dyn BaseUrlResolver>,
    ) -> Self {
        Self {
            feed,
            resolutions,
            operators,
            url_resolver,
        }
    }

    /// Production wiring: Postgres stores, HTTP feed client and link resolver
    pub fn from_config(config: &Config, pool: PgPool) -> Result<Self> {
        let store = Arc::new(PostgresStore::new(pool));
        let feed = FeedClient::new(
            config.feed_base_url.clone(),
            Duration::from_secs(config.feed_snapshot_ttl_secs),
        )
        .context("Failed to create feed client")?;
        let url_resolver = HttpUrlResolver::new().context("Failed to create URL resolver")?;

        Ok(Self::new(
            Arc::new(feed),
            store.clone(),
            store,
            Arc::new(url_resolver),
        ))
    }
}
