use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use typed_builder::TypedBuilder;
use uuid::Uuid;

use crate::domains::locations::models::Coordinates;
use crate::domains::operators::models::OperatorRef;

/// What the report is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
#[serde(try_from = "i32", into = "i32")]
pub enum LocationType {
    Wreckage = 1,
    SupplyHelp = 2,
}

impl TryFrom<i32> for LocationType {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Wreckage),
            2 => Ok(Self::SupplyHelp),
            other => Err(format!("unknown location type {}", other)),
        }
    }
}

impl From<LocationType> for i32 {
    fn from(t: LocationType) -> Self {
        t as i32
    }
}

/// A moderation decision for one feed entry.
///
/// Append-only: a later decision for the same entry is a new row.
#[derive(FromRow, Debug, Clone, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct ResolvedLocation {
    #[builder(default = Uuid::now_v7())]
    pub id: Uuid,
    pub entry_id: i64,
    #[builder(default)]
    pub submitter: Option<Json<OperatorRef>>,
    #[sqlx(flatten)]
    #[serde(rename = "location")]
    pub coordinates: Coordinates,
    #[builder(default)]
    pub corrected: bool,
    #[builder(default)]
    pub verified: bool,
    #[builder(default)]
    pub original_address: String,
    #[builder(default)]
    pub corrected_address: String,
    #[builder(default)]
    pub open_address: String,
    #[builder(default)]
    pub apartment: String,
    #[serde(rename = "type")]
    pub location_type: LocationType,
    #[builder(default)]
    pub reason: String,
    #[serde(rename = "tweet_contents")]
    #[builder(default)]
    pub message_text: String,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

impl ResolvedLocation {
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, Self>(
            "SELECT * FROM resolved_locations ORDER BY created_at ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO resolved_locations (
                id, entry_id, submitter, latitude, longitude, corrected, verified,
                original_address, corrected_address, open_address, apartment,
                location_type, reason, message_text, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(self.id)
        .bind(self.entry_id)
        .bind(&self.submitter)
        .bind(self.coordinates.lat)
        .bind(self.coordinates.lng)
        .bind(self.corrected)
        .bind(self.verified)
        .bind(&self.original_address)
        .bind(&self.corrected_address)
        .bind(&self.open_address)
        .bind(&self.apartment)
        .bind(self.location_type)
        .bind(&self.reason)
        .bind(&self.message_text)
        .bind(self.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }

    pub async fn exists_for_entry(entry_id: i64, pool: &PgPool) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM resolved_locations WHERE entry_id = $1)",
        )
        .bind(entry_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    pub async fn exists_with_message(message_text: &str, pool: &PgPool) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM resolved_locations WHERE message_text = $1)",
        )
        .bind(message_text)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    pub async fn find_missing_message_text(pool: &PgPool) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, Self>(
            "SELECT * FROM resolved_locations WHERE message_text = '' ORDER BY created_at ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn find_with_corrected_address(pool: &PgPool) -> Result<Vec<Self>> {
        let records = sqlx::query_as::<_, Self>(
            "SELECT * FROM resolved_locations WHERE corrected_address <> '' ORDER BY created_at ASC",
        )
        .fetch_all(pool)
        .await?;
        Ok(records)
    }

    pub async fn set_message_text(id: Uuid, message_text: &str, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE resolved_locations SET message_text = $2 WHERE id = $1")
            .bind(id)
            .bind(message_text)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn set_coordinates(id: Uuid, coordinates: Coordinates, pool: &PgPool) -> Result<()> {
        sqlx::query("UPDATE resolved_locations SET latitude = $2, longitude = $3 WHERE id = $1")
            .bind(id)
            .bind(coordinates.lat)
            .bind(coordinates.lng)
            .execute(pool)
            .await?;
        Ok(())
    }

    pub async fn entry_ids(pool: &PgPool) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>("SELECT DISTINCT entry_id FROM resolved_locations")
            .fetch_all(pool)
            .await?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let record = ResolvedLocation::builder()
            .entry_id(17_i64)
            .coordinates(Coordinates::new(36.2, 36.1))
            .location_type(LocationType::Wreckage)
            .build();

        assert_eq!(record.entry_id, 17);
        assert!(record.submitter.is_none());
        assert!(!record.corrected);
        assert!(!record.verified);
        assert!(record.message_text.is_empty());
    }

    #[test]
    fn test_wire_names() {
        let record = ResolvedLocation::builder()
            .entry_id(17_i64)
            .coordinates(Coordinates::new(36.2, 36.1))
            .location_type(LocationType::SupplyHelp)
            .message_text("Su ihtiyacı var".to_string())
            .build();

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], 2);
        assert_eq!(json["location"], serde_json::json!([36.2, 36.1]));
        assert_eq!(json["tweet_contents"], "Su ihtiyacı var");
        assert!(json["submitter"].is_null());
    }

    #[test]
    fn test_location_type_rejects_unknown() {
        assert!(serde_json::from_str::<LocationType>("3").is_err());
        assert_eq!(
            serde_json::from_str::<LocationType>("1").unwrap(),
            LocationType::Wreckage
        );
    }
}
