// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Selection, reconciliation and the submission pipeline are domain functions
// that take these traits.
//
// Naming convention: Base* for trait names (e.g., BaseFeedClient, BaseResolutionStore)

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domains::locations::models::{CandidateDetail, CandidateLocation, Coordinates};
use crate::domains::operators::models::Operator;
use crate::domains::resolutions::models::ResolvedLocation;

// =============================================================================
// Remote Feed (Infrastructure - third-party location feed)
// =============================================================================

#[async_trait]
pub trait BaseFeedClient: Send + Sync {
    /// Full candidate snapshot for the served region
    async fn fetch_all(&self) -> Result<Vec<CandidateLocation>>;

    /// Message text and address for one entry
    async fn fetch_detail(&self, entry_id: i64) -> Result<CandidateDetail>;
}

// =============================================================================
// Resolution Store (Infrastructure - system of record for decisions)
// =============================================================================

#[async_trait]
pub trait BaseResolutionStore: Send + Sync {
    async fn list_resolved(&self) -> Result<Vec<ResolvedLocation>>;

    /// Append a decision. Never updates an existing record.
    async fn insert_resolved(&self, record: &ResolvedLocation) -> Result<()>;

    async fn exists_by_entry_id(&self, entry_id: i64) -> Result<bool>;

    /// Duplicate check keyed on message text, not entry id
    async fn exists_by_message_text(&self, message_text: &str) -> Result<bool>;

    /// Distinct entry ids of every resolved record
    async fn resolved_entry_ids(&self) -> Result<HashSet<i64>>;

    /// Cheap liveness check for the health endpoint
    async fn health_check(&self) -> Result<()>;

    // Maintenance only. The request paths never modify a stored record.

    /// Records stored without message text
    async fn list_missing_message_text(&self) -> Result<Vec<ResolvedLocation>>;

    async fn update_message_text(&self, id: Uuid, message_text: &str) -> Result<()>;

    /// Records whose operator supplied a corrected map link
    async fn list_with_corrected_address(&self) -> Result<Vec<ResolvedLocation>>;

    async fn update_coordinates(&self, id: Uuid, coordinates: Coordinates) -> Result<()>;
}

// =============================================================================
// Operator Store (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseOperatorStore: Send + Sync {
    async fn find_by_key_hash(&self, auth_key_hash: u32) -> Result<Option<Operator>>;

    async fn insert_operator(&self, operator: &Operator) -> Result<()>;
}

// =============================================================================
// URL Resolver (Infrastructure - shortened map links)
// =============================================================================

#[async_trait]
pub trait BaseUrlResolver: Send + Sync {
    /// Follow redirects from `short_url` and return the final URL
    async fn resolve(&self, short_url: &str) -> Result<String>;
}
