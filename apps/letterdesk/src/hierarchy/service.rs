use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use crate::hierarchy::auth::SessionResolver;
use crate::hierarchy::store::HierarchyStore;
use crate::hierarchy::HierarchyError;
use crate::models::hierarchy::{EmployeeMapping, HierarchyDocument, HierarchySnapshot};

/// Saves, loads and deletes the signed-in user's hierarchy.
#[derive(Clone)]
pub struct HierarchyService {
    store: Arc<dyn HierarchyStore>,
    sessions: Arc<dyn SessionResolver>,
}

impl HierarchyService {
    pub fn new(store: Arc<dyn HierarchyStore>, sessions: Arc<dyn SessionResolver>) -> Self {
        Self { store, sessions }
    }

    async fn user_id(&self, token: Option<&str>) -> Result<Option<Uuid>, HierarchyError> {
        match token {
            Some(token) => Ok(self.sessions.resolve(token).await?),
            None => Ok(None),
        }
    }

    /// Stamps the document with the current time and upserts it.
    pub async fn save(
        &self,
        token: Option<&str>,
        hierarchy: Value,
        employees: &EmployeeMapping,
    ) -> Result<DateTime<Utc>, HierarchyError> {
        let user_id = self
            .user_id(token)
            .await?
            .ok_or(HierarchyError::Unauthorized)?;

        let doc = HierarchyDocument::new(hierarchy, employees, Utc::now());
        self.store.upsert(user_id, &doc).await.map_err(|e| {
            error!(%user_id, "Failed to save hierarchy: {e}");
            e
        })?;
        info!(%user_id, employees = employees.len(), "Hierarchy saved");
        Ok(doc.updated_at)
    }

    /// `None` both when nobody is signed in and when nothing was saved yet.
    pub async fn load(
        &self,
        token: Option<&str>,
    ) -> Result<Option<HierarchySnapshot>, HierarchyError> {
        let Some(user_id) = self.user_id(token).await? else {
            return Ok(None);
        };
        let doc = self.store.fetch(user_id).await.map_err(|e| {
            error!(%user_id, "Failed to load hierarchy: {e}");
            e
        })?;
        Ok(doc.map(HierarchySnapshot::from))
    }

    pub async fn delete(&self, token: Option<&str>) -> Result<(), HierarchyError> {
        let user_id = self
            .user_id(token)
            .await?
            .ok_or(HierarchyError::Unauthorized)?;

        let removed = self.store.remove(user_id).await.map_err(|e| {
            error!(%user_id, "Failed to delete hierarchy: {e}");
            e
        })?;
        info!(%user_id, removed, "Hierarchy deleted");
        Ok(())
    }
}
