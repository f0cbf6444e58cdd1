use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::hierarchy::HierarchyError;
use crate::models::hierarchy::HierarchyDocument;

/// One hierarchy document per user.
#[async_trait]
pub trait HierarchyStore: Send + Sync {
    /// Inserts or replaces the user's document.
    async fn upsert(&self, user_id: Uuid, doc: &HierarchyDocument) -> Result<(), HierarchyError>;
    async fn fetch(&self, user_id: Uuid) -> Result<Option<HierarchyDocument>, HierarchyError>;
    /// Returns whether a row existed.
    async fn remove(&self, user_id: Uuid) -> Result<bool, HierarchyError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

/// Rows of `hierarchies(user_id uuid primary key, data jsonb, updated_at timestamptz)`.
#[derive(Clone)]
pub struct PgHierarchyStore {
    db: PgPool,
}

impl PgHierarchyStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HierarchyStore for PgHierarchyStore {
    async fn upsert(&self, user_id: Uuid, doc: &HierarchyDocument) -> Result<(), HierarchyError> {
        sqlx::query(
            r#"
            INSERT INTO hierarchies (user_id, data, updated_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(user_id)
        .bind(Json(doc))
        .bind(doc.updated_at)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn fetch(&self, user_id: Uuid) -> Result<Option<HierarchyDocument>, HierarchyError> {
        let row: Option<(Json<HierarchyDocument>,)> =
            sqlx::query_as("SELECT data FROM hierarchies WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.db)
                .await?;
        Ok(row.map(|(Json(doc),)| doc))
    }

    async fn remove(&self, user_id: Uuid) -> Result<bool, HierarchyError> {
        let result = sqlx::query("DELETE FROM hierarchies WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory
// ────────────────────────────────────────────────────────────────────────────

/// Documents are kept serialized so reads go through the same decoding path
/// as the JSON column.
#[derive(Default)]
pub struct MemoryHierarchyStore {
    rows: RwLock<HashMap<Uuid, String>>,
}

impl MemoryHierarchyStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HierarchyStore for MemoryHierarchyStore {
    async fn upsert(&self, user_id: Uuid, doc: &HierarchyDocument) -> Result<(), HierarchyError> {
        let raw = serde_json::to_string(doc)?;
        self.rows.write().await.insert(user_id, raw);
        Ok(())
    }

    async fn fetch(&self, user_id: Uuid) -> Result<Option<HierarchyDocument>, HierarchyError> {
        match self.rows.read().await.get(&user_id) {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    async fn remove(&self, user_id: Uuid) -> Result<bool, HierarchyError> {
        Ok(self.rows.write().await.remove(&user_id).is_some())
    }
}
