use std::sync::Arc;

use async_trait::async_trait;
use configs::IdStrategy;
use models::vacancy::PROJECT_ID_FIELD;
use models::Vacancy;

use crate::collection::SequenceCollection;
use crate::errors::ServiceError;
use crate::storage::DocumentStore;

#[async_trait]
pub trait VacancyRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Vacancy>, ServiceError>;
    /// Empty when the project has no vacancies (or does not exist).
    async fn list_by_project_id(&self, project_id: &str) -> Result<Vec<Vacancy>, ServiceError>;
    async fn get_by_id(&self, id: &str) -> Result<Option<Vacancy>, ServiceError>;
    async fn create(&self, vacancy: Vacancy) -> Result<String, ServiceError>;
    async fn update(&self, id: &str, vacancy: Vacancy) -> Result<(), ServiceError>;
    async fn delete(&self, id: &str) -> Result<(), ServiceError>;
}

pub struct StoreVacancyRepository {
    collection: SequenceCollection<Vacancy>,
}

impl StoreVacancyRepository {
    pub fn new(store: Arc<dyn DocumentStore>, strategy: IdStrategy) -> Self {
        Self { collection: SequenceCollection::new(store, strategy) }
    }
}

#[async_trait]
impl VacancyRepository for StoreVacancyRepository {
    async fn list(&self) -> Result<Vec<Vacancy>, ServiceError> {
        self.collection.list().await
    }

    async fn list_by_project_id(&self, project_id: &str) -> Result<Vec<Vacancy>, ServiceError> {
        self.collection.list_where(PROJECT_ID_FIELD, project_id).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Vacancy>, ServiceError> {
        self.collection.get(id).await
    }

    async fn create(&self, vacancy: Vacancy) -> Result<String, ServiceError> {
        self.collection.create(vacancy).await
    }

    async fn update(&self, id: &str, vacancy: Vacancy) -> Result<(), ServiceError> {
        self.collection.update(id, vacancy).await
    }

    async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        self.collection.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryDocumentStore;
    use crate::test_support::{sample_vacancy, FailingStore};

    fn repo() -> StoreVacancyRepository {
        StoreVacancyRepository::new(Arc::new(MemoryDocumentStore::new()), IdStrategy::Sequence)
    }

    #[tokio::test]
    async fn create_uses_vacancy_prefix() -> Result<(), anyhow::Error> {
        let repo = repo();
        let v = sample_vacancy().with_project_id(Some("project-1".into()));
        assert_eq!(repo.create(v.clone()).await?, "vacancy-1");
        assert_eq!(repo.create(v).await?, "vacancy-2");
        Ok(())
    }

    #[tokio::test]
    async fn list_by_project_filters_on_project_id() -> Result<(), anyhow::Error> {
        let repo = repo();
        repo.create(sample_vacancy().with_project_id(Some("project-1".into()))).await?;
        repo.create(sample_vacancy().with_project_id(Some("project-2".into()))).await?;
        repo.create(sample_vacancy().with_project_id(Some("project-1".into()))).await?;

        let hits = repo.list_by_project_id("project-1").await?;
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|v| v.project_id.as_deref() == Some("project-1")));
        assert!(repo.list_by_project_id("project-3").await?.is_empty());
        assert_eq!(repo.list().await?.len(), 3);
        Ok(())
    }

    #[tokio::test]
    async fn missing_vacancy_is_none() -> Result<(), anyhow::Error> {
        assert!(repo().get_by_id("non-existent-id").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let repo = StoreVacancyRepository::new(Arc::new(FailingStore), IdStrategy::Sequence);
        assert!(repo.list_by_project_id("123").await.is_err());
        assert!(repo.update("vacancy-1", sample_vacancy()).await.is_err());
        assert!(repo.delete("vacancy-1").await.is_err());
    }
}
