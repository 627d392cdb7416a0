use std::{collections::BTreeMap, path::PathBuf, sync::Arc};

use async_trait::async_trait;
use models::Document;
use uuid::Uuid;

use super::json_map_store::JsonMapStore;
use super::{field_equals, DocumentStore, StoredDocument};
use crate::errors::StoreError;

/// All collections persisted in a single JSON file as
/// `{ collection: { id: document } }`.
#[derive(Clone)]
pub struct JsonFileDocumentStore {
    store: Arc<JsonMapStore<String, BTreeMap<String, Document>>>,
}

impl JsonFileDocumentStore {
    /// Open the file, creating it (and parent directories) if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let store = JsonMapStore::new(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl DocumentStore for JsonFileDocumentStore {
    async fn add(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.store
            .update_map(|m| {
                m.entry(collection.to_string()).or_default().insert(id.clone(), doc);
                Ok(())
            })
            .await?;
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        Ok(self.store.read(|m| m.get(collection).and_then(|c| c.get(id)).cloned()).await)
    }

    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        self.store
            .update_map(|m| {
                m.entry(collection.to_string()).or_default().insert(id.to_string(), doc);
                Ok(())
            })
            .await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.store
            .update_map(|m| {
                if let Some(c) = m.get_mut(collection) {
                    c.remove(id);
                }
                Ok(())
            })
            .await
    }

    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self
            .store
            .read(|m| {
                m.get(collection)
                    .map(|c| c.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
                    .unwrap_or_default()
            })
            .await)
    }

    async fn where_equal_to(&self, collection: &str, field: &str, value: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Ok(self
            .store
            .read(|m| {
                m.get(collection)
                    .map(|c| {
                        c.iter()
                            .filter(|(_, d)| field_equals(d, field, value))
                            .map(|(k, v)| (k.clone(), v.clone()))
                            .collect()
                    })
                    .unwrap_or_default()
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn documents_survive_reopen() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("doc_store_{}.json", Uuid::new_v4()));
        let store = JsonFileDocumentStore::open(&tmp).await?;
        let doc = json!({"name": "P1", "projectId": "project-1"}).as_object().cloned().unwrap();
        store.set("vacancies", "vacancy-1", doc.clone()).await?;
        store.set("vacancies", "vacancy-2", doc).await?;
        store.delete("vacancies", "vacancy-2").await?;

        let reopened = JsonFileDocumentStore::open(&tmp).await?;
        let all = reopened.list("vacancies").await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].0, "vacancy-1");
        let hits = reopened.where_equal_to("vacancies", "projectId", "project-1").await?;
        assert_eq!(hits.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
