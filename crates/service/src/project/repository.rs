use std::sync::Arc;

use async_trait::async_trait;
use configs::IdStrategy;
use models::Project;

use crate::collection::SequenceCollection;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Project>, ServiceError>;
    /// `Ok(None)` when absent.
    async fn get_by_id(&self, id: &str) -> Result<Option<Project>, ServiceError>;
    /// Returns the assigned id.
    async fn create(&self, project: Project) -> Result<String, ServiceError>;
    async fn update(&self, id: &str, project: Project) -> Result<(), ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

/// Document-store backed repository over the `projects` collection.
pub struct StoreProjectRepository {
    collection: SequenceCollection<Project>,
}

impl StoreProjectRepository {
    pub fn new(store: Arc<dyn DocumentStore>, strategy: IdStrategy) -> Self {
        Self { collection: SequenceCollection::new(store, strategy) }
    }
}

#[async_trait]
impl ProjectRepository for StoreProjectRepository {
    async fn list(&self) -> Result<Vec<Project>, ServiceError> {
        self.collection.list().await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Project>, ServiceError> {
        self.collection.get(id).await
    }

    async fn create(&self, project: Project) -> Result<String, ServiceError> {
        self.collection.create(project).await
    }

    async fn update(&self, id: &str, project: Project) -> Result<(), ServiceError> {
        self.collection.update(id, project).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.collection.delete(id).await
    }
}
