// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use uuid::Uuid;

use super::{BaseFeedClient, BaseOperatorStore, BaseResolutionStore, BaseUrlResolver, ServerDeps};
use crate::domains::locations::models::{CandidateDetail, CandidateLocation, Coordinates};
use crate::domains::operators::models::Operator;
use crate::domains::resolutions::models::ResolvedLocation;

// =============================================================================
// Mock Feed Client
// =============================================================================

pub struct MockFeedClient {
    locations: Mutex<Vec<CandidateLocation>>,
    details: Mutex<HashMap<i64, CandidateDetail>>,
    detail_calls: Mutex<Vec<i64>>,
    fetch_all_calls: Mutex<usize>,
    failing: bool,
}

impl MockFeedClient {
    pub fn new() -> Self {
        Self {
            locations: Mutex::new(Vec::new()),
            details: Mutex::new(HashMap::new()),
            detail_calls: Mutex::new(Vec::new()),
            fetch_all_calls: Mutex::new(0),
            failing: false,
        }
    }

    /// Add a feed entry with its message text
    pub fn with_entry(self, entry_id: i64, lat: f64, lng: f64, epoch: i64, text: &str) -> Self {
        self.locations
            .lock()
            .unwrap()
            .push(CandidateLocation::new(entry_id, Coordinates::new(lat, lng), epoch));
        self.details.lock().unwrap().insert(
            entry_id,
            CandidateDetail {
                message_text: text.to_string(),
                formatted_address: String::new(),
            },
        );
        self
    }

    /// Drop the detail for `entry_id` so fetching it fails
    pub fn without_detail(self, entry_id: i64) -> Self {
        self.details.lock().unwrap().remove(&entry_id);
        self
    }

    /// Every call returns a retrieval error
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// Entry ids whose detail was requested, in call order
    pub fn detail_calls(&self) -> Vec<i64> {
        self.detail_calls.lock().unwrap().clone()
    }

    pub fn fetch_all_calls(&self) -> usize {
        *self.fetch_all_calls.lock().unwrap()
    }
}

#[async_trait]
impl BaseFeedClient for MockFeedClient {
    async fn fetch_all(&self) -> Result<Vec<CandidateLocation>> {
        *self.fetch_all_calls.lock().unwrap() += 1;
        if self.failing {
            return Err(anyhow!("mock feed unavailable"));
        }
        Ok(self.locations.lock().unwrap().clone())
    }

    async fn fetch_detail(&self, entry_id: i64) -> Result<CandidateDetail> {
        self.detail_calls.lock().unwrap().push(entry_id);
        if self.failing {
            return Err(anyhow!("mock feed unavailable"));
        }
        self.details
            .lock()
            .unwrap()
            .get(&entry_id)
            .cloned()
            .ok_or_else(|| anyhow!("no detail for entry {}", entry_id))
    }
}

impl Default for MockFeedClient {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Mock URL Resolver
// =============================================================================

pub struct MockUrlResolver {
    targets: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl MockUrlResolver {
    pub fn new() -> Self {
        Self {
            targets: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Resolve `short_url` to `long_url`
    pub fn with_redirect(self, short_url: &str, long_url: &str) -> Self {
        self.targets
            .lock()
            .unwrap()
            .insert(short_url.to_string(), long_url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseUrlResolver for MockUrlResolver {
    async fn resolve(&self, short_url: &str) -> Result<String> {
        self.calls.lock().unwrap().push(short_url.to_string());
        self.targets
            .lock()
            .unwrap()
            .get(short_url)
            .cloned()
            .ok_or_else(|| anyhow!("unreachable link {}", short_url))
    }
}

impl Default for MockUrlResolver {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// Resolution and operator store kept in memory
pub struct MemoryStore {
    resolved: Mutex<Vec<ResolvedLocation>>,
    operators: Mutex<Vec<Operator>>,
    failing: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            resolved: Mutex::new(Vec::new()),
            operators: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// Every call returns a storage error
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn with_resolved(self, record: ResolvedLocation) -> Self {
        self.resolved.lock().unwrap().push(record);
        self
    }

    pub fn with_operator(self, operator: Operator) -> Self {
        self.operators.lock().unwrap().push(operator);
        self
    }

    pub fn resolved(&self) -> Vec<ResolvedLocation> {
        self.resolved.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        if self.failing {
            return Err(anyhow!("mock store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseResolutionStore for MemoryStore {
    async fn list_resolved(&self) -> Result<Vec<ResolvedLocation>> {
        self.check()?;
        Ok(self.resolved())
    }

    async fn insert_resolved(&self, record: &ResolvedLocation) -> Result<()> {
        self.check()?;
        self.resolved.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn exists_by_entry_id(&self, entry_id: i64) -> Result<bool> {
        self.check()?;
        Ok(self
            .resolved
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.entry_id == entry_id))
    }

    async fn exists_by_message_text(&self, message_text: &str) -> Result<bool> {
        self.check()?;
        Ok(self
            .resolved
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.message_text == message_text))
    }

    async fn resolved_entry_ids(&self) -> Result<HashSet<i64>> {
        self.check()?;
        Ok(self
            .resolved
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.entry_id)
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        self.check()
    }

    async fn list_missing_message_text(&self) -> Result<Vec<ResolvedLocation>> {
        self.check()?;
        Ok(self
            .resolved()
            .into_iter()
            .filter(|r| r.message_text.is_empty())
            .collect())
    }

    async fn update_message_text(&self, id: Uuid, message_text: &str) -> Result<()> {
        self.check()?;
        let mut resolved = self.resolved.lock().unwrap();
        let record = resolved
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow!("no record {}", id))?;
        record.message_text = message_text.to_string();
        Ok(())
    }

    async fn list_with_corrected_address(&self) -> Result<Vec<ResolvedLocation>> {
        self.check()?;
        Ok(self
            .resolved()
            .into_iter()
            .filter(|r| !r.corrected_address.is_empty())
            .collect())
    }

    async fn update_coordinates(&self, id: Uuid, coordinates: Coordinates) -> Result<()> {
        self.check()?;
        let mut resolved = self.resolved.lock().unwrap();
        let record = resolved
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| anyhow!("no record {}", id))?;
        record.coordinates = coordinates;
        Ok(())
    }
}

#[async_trait]
impl BaseOperatorStore for MemoryStore {
    async fn find_by_key_hash(&self, auth_key_hash: u32) -> Result<Option<Operator>> {
        self.check()?;
        Ok(self
            .operators
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.auth_key_hash == i64::from(auth_key_hash))
            .cloned())
    }

    async fn insert_operator(&self, operator: &Operator) -> Result<()> {
        self.check()?;
        self.operators.lock().unwrap().push(operator.clone());
        Ok(())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub feed: Arc<MockFeedClient>,
    pub store: Arc<MemoryStore>,
    pub url_resolver: Arc<MockUrlResolver>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            feed: Arc::new(MockFeedClient::new()),
            store: Arc::new(MemoryStore::new()),
            url_resolver: Arc::new(MockUrlResolver::new()),
        }
    }

    /// Set a mock feed
    pub fn mock_feed(mut self, feed: MockFeedClient) -> Self {
        self.feed = Arc::new(feed);
        self
    }

    /// Set the backing store (resolutions and operators)
    pub fn mock_store(mut self, store: MemoryStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Set a mock URL resolver
    pub fn mock_url_resolver(mut self, resolver: MockUrlResolver) -> Self {
        self.url_resolver = Arc::new(resolver);
        self
    }

    /// Build ServerDeps sharing these mocks
    pub fn into_server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.feed.clone(),
            self.store.clone(),
            self.store.clone(),
            self.url_resolver.clone(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
