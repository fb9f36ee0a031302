use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tracing::{debug, instrument};

use super::{BaseFeedClient, TtlCache};
use crate::domains::locations::models::{CandidateDetail, CandidateLocation, FeedSnapshot};

/// Single cache slot holding the whole feed snapshot
pub const SNAPSHOT_CACHE_KEY: &str = "all locations";

/// Default snapshot lifetime (15 minutes)
pub const DEFAULT_SNAPSHOT_TTL: Duration = Duration::from_secs(15 * 60);

// Region covering the earthquake zone; the feed is always queried with it.
const AREA_QUERY: &str = "ne_lat=39.91618777305531&ne_lng=47.85149904303703&sw_lat=36.07272886939253&sw_lng=23.872389299415502";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

/// HTTP client for the location feed.
///
/// The snapshot is cached under a single key with a TTL; entry details are
/// cached for the life of the process. Retries are left to callers.
pub struct FeedClient {
    base_url: String,
    client: reqwest::Client,
    snapshot_ttl: Duration,
    snapshots: TtlCache<&'static str, Vec<CandidateLocation>>,
    details: TtlCache<i64, CandidateDetail>,
}

impl FeedClient {
    pub fn new(base_url: impl Into<String>, snapshot_ttl: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
            snapshot_ttl,
            snapshots: TtlCache::new(),
            details: TtlCache::new(),
        })
    }

    fn snapshot_url(&self) -> String {
        format!("{}/feeds/areas?{}", self.base_url, AREA_QUERY)
    }

    fn detail_url(&self, entry_id: i64) -> String {
        format!("{}/feeds/{}", self.base_url, entry_id)
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .with_context(|| format!("Feed request to {} failed", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Feed API error {}: {}", status, body);
        }

        response
            .text()
            .await
            .context("Failed to read feed response body")
    }
}

#[async_trait]
impl BaseFeedClient for FeedClient {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> Result<Vec<CandidateLocation>> {
        if let Some(cached) = self.snapshots.get(&SNAPSHOT_CACHE_KEY).await {
            debug!(count = cached.len(), "Feed snapshot served from cache");
            return Ok(cached);
        }

        let body = self.get_text(&self.snapshot_url()).await?;
        let snapshot: FeedSnapshot =
            serde_json::from_str(&body).context("Failed to parse feed snapshot")?;

        debug!(count = snapshot.results.len(), "Fetched feed snapshot");
        self.snapshots
            .set_with_ttl(SNAPSHOT_CACHE_KEY, snapshot.results.clone(), self.snapshot_ttl)
            .await;

        Ok(snapshot.results)
    }

    #[instrument(skip(self))]
    async fn fetch_detail(&self, entry_id: i64) -> Result<CandidateDetail> {
        if let Some(cached) = self.details.get(&entry_id).await {
            return Ok(cached);
        }

        let body = self.get_text(&self.detail_url(entry_id)).await?;
        let detail: CandidateDetail = serde_json::from_str(&body)
            .with_context(|| format!("Failed to parse feed entry {}", entry_id))?;

        self.details.set(entry_id, detail.clone()).await;
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let client = FeedClient::new("https://feed.example/", DEFAULT_SNAPSHOT_TTL).unwrap();
        assert_eq!(
            client.snapshot_url(),
            format!("https://feed.example/feeds/areas?{}", AREA_QUERY)
        );
        assert_eq!(client.detail_url(1234), "https://feed.example/feeds/1234");
    }

    #[tokio::test]
    async fn test_cached_snapshot_skips_network() {
        // Unroutable base URL: any network call would fail
        let client = FeedClient::new("http://127.0.0.1:9", DEFAULT_SNAPSHOT_TTL).unwrap();
        let cached = vec![CandidateLocation::new(
            1,
            crate::domains::locations::models::Coordinates::new(36.0, 36.0),
            0,
        )];
        client
            .snapshots
            .set_with_ttl(SNAPSHOT_CACHE_KEY, cached.clone(), DEFAULT_SNAPSHOT_TTL)
            .await;
        client
            .details
            .set(1, CandidateDetail {
                message_text: "cached".to_string(),
                formatted_address: String::new(),
            })
            .await;

        assert_eq!(client.fetch_all().await.unwrap(), cached);
        assert_eq!(client.fetch_detail(1).await.unwrap().message_text, "cached");
        assert!(client.fetch_detail(2).await.is_err());
    }
}
