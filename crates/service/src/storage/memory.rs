use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use models::Document;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocumentStore, StoredDocument};
use crate::errors::StoreError;

type Collections = HashMap<String, BTreeMap<String, Document>>;

/// Process-local store. Scans return documents ordered by id.
#[derive(Default)]
pub struct MemoryDocumentStore {
    inner: RwLock<Collections>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn add(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let mut map = self.inner.write().await;
        map.entry(collection.to_string()).or_default().insert(id.clone(), doc);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let map = self.inner.read().await;
        Ok(map.get(collection).and_then(|c| c.get(id)).cloned())
    }

    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        map.entry(collection.to_string()).or_default().insert(id.to_string(), doc);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut map = self.inner.write().await;
        if let Some(c) = map.get_mut(collection) {
            c.remove(id);
        }
        Ok(())
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let map = self.inner.read().await;
        Ok(map
            .get(collection)
            .map(|c| c.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default())
    }
}
