//! Document store port and its adapters.
//!
//! The services only ever see `DocumentStore`: a minimal async CRUD contract
//! over named collections of flat JSON documents.

pub mod json_map_store;
pub mod memory;
pub mod file;
pub mod firestore;

use std::sync::Arc;

use async_trait::async_trait;
use configs::{StoreBackend, StoreConfig};
use models::Document;
use serde_json::Value;
use tracing::info;

use crate::errors::StoreError;

pub use file::JsonFileDocumentStore;
pub use firestore::FirestoreDocumentStore;
pub use memory::MemoryDocumentStore;

/// `(document id, document)` pair returned by scans and queries.
pub type StoredDocument = (String, Document);

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert with a store-assigned id and return that id.
    async fn add(&self, collection: &str, doc: Document) -> Result<String, StoreError>;

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Full overwrite; creates the document if absent.
    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError>;

    /// Deleting an absent document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;

    /// Full collection scan.
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError>;

    /// Documents whose `field` is the string `value`.
    async fn where_equal_to(&self, collection: &str, field: &str, value: &str) -> Result<Vec<StoredDocument>, StoreError> {
        let all = self.list(collection).await?;
        Ok(all.into_iter().filter(|(_, doc)| field_equals(doc, field, value)).collect())
    }
}

pub(crate) fn field_equals(doc: &Document, field: &str, value: &str) -> bool {
    matches!(doc.get(field), Some(Value::String(s)) if s == value)
}

/// Build the store selected by configuration.
pub async fn connect(cfg: &StoreConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match cfg.backend {
        StoreBackend::Memory => {
            info!(backend = "memory", "document store ready");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreBackend::File => {
            let store = JsonFileDocumentStore::open(&cfg.data_file).await?;
            info!(backend = "file", path = %cfg.data_file, "document store ready");
            Ok(Arc::new(store))
        }
        StoreBackend::Firestore => {
            let store = FirestoreDocumentStore::from_config(&cfg.firestore)?;
            info!(backend = "firestore", project = %cfg.firestore.project_id, "document store ready");
            Ok(Arc::new(store))
        }
    }
}
