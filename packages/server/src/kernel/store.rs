//! Postgres-backed stores (sqlx).

use std::collections::HashSet;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{BaseOperatorStore, BaseResolutionStore};
use crate::domains::locations::models::Coordinates;
use crate::domains::operators::models::Operator;
use crate::domains::resolutions::models::ResolvedLocation;

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BaseResolutionStore for PostgresStore {
    async fn list_resolved(&self) -> Result<Vec<ResolvedLocation>> {
        ResolvedLocation::find_all(&self.pool).await
    }

    async fn insert_resolved(&self, record: &ResolvedLocation) -> Result<()> {
        record.insert(&self.pool).await
    }

    async fn exists_by_entry_id(&self, entry_id: i64) -> Result<bool> {
        ResolvedLocation::exists_for_entry(entry_id, &self.pool).await
    }

    async fn exists_by_message_text(&self, message_text: &str) -> Result<bool> {
        ResolvedLocation::exists_with_message(message_text, &self.pool).await
    }

    async fn resolved_entry_ids(&self) -> Result<HashSet<i64>> {
        Ok(ResolvedLocation::entry_ids(&self.pool)
            .await?
            .into_iter()
            .collect())
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_missing_message_text(&self) -> Result<Vec<ResolvedLocation>> {
        ResolvedLocation::find_missing_message_text(&self.pool).await
    }

    async fn update_message_text(&self, id: Uuid, message_text: &str) -> Result<()> {
        ResolvedLocation::set_message_text(id, message_text, &self.pool).await
    }

    async fn list_with_corrected_address(&self) -> Result<Vec<ResolvedLocation>> {
        ResolvedLocation::find_with_corrected_address(&self.pool).await
    }

    async fn update_coordinates(&self, id: Uuid, coordinates: Coordinates) -> Result<()> {
        ResolvedLocation::set_coordinates(id, coordinates, &self.pool).await
    }
}

#[async_trait]
impl BaseOperatorStore for PostgresStore {
    async fn find_by_key_hash(&self, auth_key_hash: u32) -> Result<Option<Operator>> {
        Operator::find_by_key_hash(auth_key_hash, &self.pool).await
    }

    async fn insert_operator(&self, operator: &Operator) -> Result<()> {
        operator.insert(&self.pool).await
    }
}
