use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Ordered permission levels; `Submit < Moderate`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[repr(i32)]
#[serde(try_from = "i32", into = "i32")]
pub enum PermissionLevel {
    Submit = 1,
    Moderate = 2,
}

impl TryFrom<i32> for PermissionLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Submit),
            2 => Ok(Self::Moderate),
            other => Err(format!("unknown permission level {}", other)),
        }
    }
}

impl From<PermissionLevel> for i32 {
    fn from(level: PermissionLevel) -> Self {
        level as i32
    }
}

/// An authenticated human reviewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Operator {
    pub id: Uuid,
    pub name: String,
    pub contact_handle: String,
    /// FNV-1a hash of the API key, widened for storage
    #[serde(skip)]
    pub auth_key_hash: i64,
    pub permission_level: PermissionLevel,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of the submitting operator embedded in a resolved record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorRef {
    pub id: Uuid,
    pub name: String,
    pub contact_handle: String,
    pub permission_level: PermissionLevel,
}

impl Operator {
    pub fn new(
        name: impl Into<String>,
        contact_handle: impl Into<String>,
        auth_key_hash: u32,
        permission_level: PermissionLevel,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            contact_handle: contact_handle.into(),
            auth_key_hash: i64::from(auth_key_hash),
            permission_level,
            created_at: Utc::now(),
        }
    }

    pub fn is_moderator(&self) -> bool {
        self.permission_level >= PermissionLevel::Moderate
    }

    pub fn to_ref(&self) -> OperatorRef {
        OperatorRef {
            id: self.id,
            name: self.name.clone(),
            contact_handle: self.contact_handle.clone(),
            permission_level: self.permission_level,
        }
    }

    pub async fn find_by_key_hash(auth_key_hash: u32, pool: &PgPool) -> Result<Option<Self>> {
        let operator = sqlx::query_as::<_, Self>(
            "SELECT * FROM operators WHERE auth_key_hash = $1 LIMIT 1",
        )
        .bind(i64::from(auth_key_hash))
        .fetch_optional(pool)
        .await?;
        Ok(operator)
    }

    pub async fn insert(&self, pool: &PgPool) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO operators (id, name, contact_handle, auth_key_hash, permission_level, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(self.id)
        .bind(&self.name)
        .bind(&self.contact_handle)
        .bind(self.auth_key_hash)
        .bind(self.permission_level)
        .bind(self.created_at)
        .execute(pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_ordering() {
        assert!(PermissionLevel::Submit < PermissionLevel::Moderate);

        let submitter = Operator::new("Ayşe", "ayse#1234", 1, PermissionLevel::Submit);
        let moderator = Operator::new("Mehmet", "mehmet#4321", 2, PermissionLevel::Moderate);
        assert!(!submitter.is_moderator());
        assert!(moderator.is_moderator());
    }

    #[test]
    fn test_permission_level_wire_format() {
        assert_eq!(serde_json::to_string(&PermissionLevel::Moderate).unwrap(), "2");
        assert_eq!(
            serde_json::from_str::<PermissionLevel>("1").unwrap(),
            PermissionLevel::Submit
        );
        assert!(serde_json::from_str::<PermissionLevel>("3").is_err());
    }

    #[test]
    fn test_key_hash_is_not_serialized() {
        let operator = Operator::new("Ayşe", "ayse#1234", 0xdead_beef, PermissionLevel::Submit);
        assert_eq!(operator.auth_key_hash, 0xdead_beef_i64);

        let json = serde_json::to_value(&operator).unwrap();
        assert!(json.get("auth_key_hash").is_none());
        assert_eq!(json["permission_level"], 1);
    }
}
