#![cfg(test)]
use std::sync::Mutex;

use async_trait::async_trait;
use models::{Document, Project, Vacancy};

use crate::errors::StoreError;
use crate::storage::{DocumentStore, MemoryDocumentStore, StoredDocument};

pub fn sample_project() -> Project {
    Project::new("P1", "IT", "3y")
}

pub fn sample_vacancy() -> Vacancy {
    Vacancy::new("Software Engineer", "IT", "3 years", "2025-12-31", "Great job")
}

/// Store whose every call fails.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn add(&self, _: &str, _: Document) -> Result<String, StoreError> {
        Err(StoreError::Unavailable("add".into()))
    }
    async fn get(&self, _: &str, _: &str) -> Result<Option<Document>, StoreError> {
        Err(StoreError::Unavailable("get".into()))
    }
    async fn set(&self, _: &str, _: &str, _: Document) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("set".into()))
    }
    async fn delete(&self, _: &str, _: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("delete".into()))
    }
    async fn list(&self, _: &str) -> Result<Vec<StoredDocument>, StoreError> {
        Err(StoreError::Unavailable("list".into()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    Add(String),
    Set(String, String),
    Delete(String, String),
}

/// In-memory store that records every mutating call.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryDocumentStore,
    writes: Mutex<Vec<Write>>,
}

impl RecordingStore {
    pub fn new() -> Self { Self::default() }

    pub fn writes(&self) -> Vec<Write> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut w) = self.writes.lock() { w.clear(); }
    }

    fn record(&self, w: Write) {
        if let Ok(mut ws) = self.writes.lock() { ws.push(w); }
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn add(&self, collection: &str, doc: Document) -> Result<String, StoreError> {
        self.record(Write::Add(collection.to_string()));
        self.inner.add(collection, doc).await
    }
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }
    async fn set(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        self.record(Write::Set(collection.to_string(), id.to_string()));
        self.inner.set(collection, id, doc).await
    }
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.record(Write::Delete(collection.to_string(), id.to_string()));
        self.inner.delete(collection, id).await
    }
    async fn list(&self, collection: &str) -> Result<Vec<StoredDocument>, StoreError> {
        self.inner.list(collection).await
    }
    async fn where_equal_to(&self, collection: &str, field: &str, value: &str) -> Result<Vec<StoredDocument>, StoreError> {
        self.inner.where_equal_to(collection, field, value).await
    }
}
