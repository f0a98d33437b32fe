//! In-memory profile document store.

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;

use rolegate_domain::{ProfileDocument, UserId};

use crate::infrastructure::ports::{ProfileStore, StoreError};

/// Profile documents held as JSON values, one per identity.
#[derive(Default)]
pub struct InMemoryProfileStore {
    documents: DashMap<UserId, Value>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored JSON for `user_id`, exactly as written.
    pub fn raw(&self, user_id: &UserId) -> Option<Value> {
        self.documents.get(user_id).map(|doc| doc.value().clone())
    }

    /// Seed a document without going through serialization.
    pub fn insert_raw(&self, user_id: UserId, document: Value) {
        self.documents.insert(user_id, document);
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<ProfileDocument>, StoreError> {
        let Some(raw) = self.raw(user_id) else {
            return Ok(None);
        };
        serde_json::from_value(raw)
            .map(Some)
            .map_err(StoreError::serialization)
    }

    async fn set(&self, user_id: &UserId, document: &ProfileDocument) -> Result<(), StoreError> {
        let value = serde_json::to_value(document).map_err(StoreError::serialization)?;
        self.documents.insert(user_id.clone(), value);
        Ok(())
    }
}
