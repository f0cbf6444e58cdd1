use std::sync::Arc;

use tracing::{debug, warn};

use crate::companies::store::{KeyValueStore, StoreError};
use crate::models::company::CompanyProfile;
use crate::models::letter::LetterType;

/// Ordered list of saved companies under one storage key.
///
/// Every mutation rewrites the whole list. Entries are identified by position,
/// so deleting shifts later entries down.
#[derive(Clone)]
pub struct CompanyRepository {
    store: Arc<dyn KeyValueStore>,
    key: &'static str,
}

impl CompanyRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, key: &'static str) -> Self {
        Self { store, key }
    }

    /// The list used by one letter type's form.
    pub fn for_letter(store: Arc<dyn KeyValueStore>, letter_type: LetterType) -> Self {
        Self::new(store, letter_type.storage_key())
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Saved companies. An absent or unreadable value is an empty list.
    pub async fn list(&self) -> Result<Vec<CompanyProfile>, StoreError> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(companies) => Ok(companies),
            Err(e) => {
                warn!(key = self.key, "Ignoring malformed company list: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Replaces the entry at `index` when it exists, otherwise appends.
    /// Returns the position the profile ended up at.
    pub async fn save(
        &self,
        profile: CompanyProfile,
        index: Option<usize>,
    ) -> Result<usize, StoreError> {
        let mut companies = self.list().await?;
        let position = match index {
            Some(i) if i < companies.len() => {
                companies[i] = profile;
                i
            }
            _ => {
                companies.push(profile);
                companies.len() - 1
            }
        };
        self.write(&companies).await?;
        debug!(key = self.key, position, "Saved company");
        Ok(position)
    }

    /// Removes the entry at `index`. Returns `false` when there was none.
    pub async fn delete(&self, index: usize) -> Result<bool, StoreError> {
        let mut companies = self.list().await?;
        if index >= companies.len() {
            return Ok(false);
        }
        companies.remove(index);
        self.write(&companies).await?;
        debug!(key = self.key, index, "Deleted company");
        Ok(true)
    }

    async fn write(&self, companies: &[CompanyProfile]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(companies)?;
        self.store.set(self.key, raw).await
    }
}
