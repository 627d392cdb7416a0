use std::sync::Arc;

use models::Vacancy;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::outcome::{Ack, Outcome};
use crate::project::repository::ProjectRepository;
use crate::project::service::project_not_found;
use crate::vacancy::repository::VacancyRepository;

fn vacancy_not_found(id: &str) -> String {
    format!("Vacancy with ID: {id} not found")
}

/// Application service for vacancies.
///
/// Creation is gated on the parent project existing, then on field rules.
/// A vacancy stays attached to the project it was created under: updates
/// keep the stored `projectId` whatever the caller sends.
pub struct VacancyService<V: VacancyRepository, P: ProjectRepository> {
    vacancies: Arc<V>,
    projects: Arc<P>,
}

impl<V: VacancyRepository, P: ProjectRepository> VacancyService<V, P> {
    pub fn new(vacancies: Arc<V>, projects: Arc<P>) -> Self {
        Self { vacancies, projects }
    }

    /// `NotFound` for a missing project; `Empty` for a project without vacancies.
    #[instrument(skip(self))]
    pub async fn list_by_project(&self, project_id: &str) -> Result<Outcome<Vec<Vacancy>>, ServiceError> {
        if self.projects.get_by_id(project_id).await?.is_none() {
            return Ok(Outcome::NotFound(project_not_found(project_id)));
        }
        let vacancies = self.vacancies.list_by_project_id(project_id).await?;
        if vacancies.is_empty() {
            return Ok(Outcome::Empty(format!("No vacancies found for project ID: {project_id}")));
        }
        Ok(Outcome::Done(vacancies))
    }

    #[instrument(skip(self, vacancy), fields(name = %vacancy.name))]
    pub async fn create(&self, project_id: &str, vacancy: Vacancy) -> Result<Outcome<Ack>, ServiceError> {
        if self.projects.get_by_id(project_id).await?.is_none() {
            return Ok(Outcome::NotFound(project_not_found(project_id)));
        }
        if let Err(errors) = vacancy.validate() {
            warn!(fields = errors.len(), "vacancy rejected by validation");
            return Ok(Outcome::Invalid(errors));
        }
        let vacancy = vacancy.with_project_id(Some(project_id.to_string()));
        let id = self.vacancies.create(vacancy).await?;
        info!(%id, %project_id, "vacancy created");
        Ok(Outcome::Done(Ack::created(format!("Vacancy created successfully with ID: {id}"), id)))
    }

    #[instrument(skip(self, vacancy))]
    pub async fn update(&self, id: &str, vacancy: Vacancy) -> Result<Outcome<Ack>, ServiceError> {
        let Some(existing) = self.vacancies.get_by_id(id).await? else {
            return Ok(Outcome::NotFound(vacancy_not_found(id)));
        };
        let vacancy = vacancy.with_project_id(existing.project_id);
        self.vacancies.update(id, vacancy).await?;
        info!(%id, "vacancy updated");
        Ok(Outcome::Done(Ack::message("Vacancy updated successfully!")))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Outcome<Ack>, ServiceError> {
        if self.vacancies.get_by_id(id).await?.is_none() {
            return Ok(Outcome::NotFound(vacancy_not_found(id)));
        }
        self.vacancies.delete(id).await?;
        info!(%id, "vacancy deleted");
        Ok(Outcome::Done(Ack::message("Vacancy deleted successfully!")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::repository::StoreProjectRepository;
    use crate::test_support::{sample_project, sample_vacancy, RecordingStore, Write};
    use crate::vacancy::repository::StoreVacancyRepository;
    use configs::IdStrategy;

    struct Fixture {
        store: Arc<RecordingStore>,
        projects: Arc<StoreProjectRepository>,
        svc: VacancyService<StoreVacancyRepository, StoreProjectRepository>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(RecordingStore::new());
        let projects = Arc::new(StoreProjectRepository::new(store.clone(), IdStrategy::Sequence));
        let vacancies = Arc::new(StoreVacancyRepository::new(store.clone(), IdStrategy::Sequence));
        let svc = VacancyService::new(vacancies, projects.clone());
        Fixture { store, projects, svc }
    }

    async fn with_project(f: &Fixture) -> Result<String, anyhow::Error> {
        let id = f.projects.create(sample_project()).await?;
        f.store.clear();
        Ok(id)
    }

    #[tokio::test]
    async fn listing_distinguishes_missing_project_from_no_vacancies() -> Result<(), anyhow::Error> {
        let f = fixture();
        assert_eq!(
            f.svc.list_by_project("project-1").await?,
            Outcome::NotFound("Project with ID: project-1 not found".into())
        );
        let pid = with_project(&f).await?;
        let empty = f.svc.list_by_project(&pid).await?;
        assert!(empty.is_success());
        assert_eq!(empty, Outcome::Empty("No vacancies found for project ID: project-1".into()));
        Ok(())
    }

    #[tokio::test]
    async fn create_under_project_stamps_project_id() -> Result<(), anyhow::Error> {
        let f = fixture();
        let pid = with_project(&f).await?;
        let ack = f.svc.create(&pid, sample_vacancy()).await?.done().unwrap();
        assert_eq!(ack.id.as_deref(), Some("vacancy-1"));
        assert_eq!(ack.message, "Vacancy created successfully with ID: vacancy-1");

        let listed = f.svc.list_by_project(&pid).await?.done().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id.as_deref(), Some("vacancy-1"));
        assert_eq!(listed[0].project_id.as_deref(), Some("project-1"));
        Ok(())
    }

    #[tokio::test]
    async fn caller_supplied_project_id_is_replaced_on_create() -> Result<(), anyhow::Error> {
        let f = fixture();
        let pid = with_project(&f).await?;
        let v = sample_vacancy().with_project_id(Some("project-99".into()));
        f.svc.create(&pid, v).await?;
        assert_eq!(f.svc.list_by_project(&pid).await?.done().unwrap().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn create_under_missing_project_is_not_found_without_write() -> Result<(), anyhow::Error> {
        let f = fixture();
        let out = f.svc.create("project-7", sample_vacancy()).await?;
        assert_eq!(out, Outcome::NotFound("Project with ID: project-7 not found".into()));
        assert!(f.store.writes().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn blank_name_is_rejected_without_write() -> Result<(), anyhow::Error> {
        let f = fixture();
        let pid = with_project(&f).await?;
        let v = Vacancy { name: String::new(), ..sample_vacancy() };
        match f.svc.create(&pid, v).await? {
            Outcome::Invalid(errors) => assert!(errors.contains("name")),
            other => panic!("expected Invalid, got {other:?}"),
        }
        assert!(f.store.writes().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn missing_project_wins_over_validation() -> Result<(), anyhow::Error> {
        let f = fixture();
        let v = Vacancy { name: String::new(), ..sample_vacancy() };
        assert!(matches!(f.svc.create("project-1", v).await?, Outcome::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_keeps_original_project_id() -> Result<(), anyhow::Error> {
        let f = fixture();
        let pid = with_project(&f).await?;
        f.svc.create(&pid, sample_vacancy()).await?;

        let moved = Vacancy { name: "Senior Engineer".into(), ..sample_vacancy() }
            .with_project_id(Some("project-2".into()));
        let ack = f.svc.update("vacancy-1", moved).await?.done().unwrap();
        assert_eq!(ack.message, "Vacancy updated successfully!");

        let listed = f.svc.list_by_project(&pid).await?.done().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Senior Engineer");
        assert_eq!(listed[0].project_id.as_deref(), Some("project-1"));
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_vacancy_never_write() -> Result<(), anyhow::Error> {
        let f = fixture();
        assert_eq!(
            f.svc.update("vacancy-3", sample_vacancy()).await?,
            Outcome::NotFound("Vacancy with ID: vacancy-3 not found".into())
        );
        assert!(matches!(f.svc.delete("vacancy-3").await?, Outcome::NotFound(_)));
        assert!(f.store.writes().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn delete_existing_vacancy() -> Result<(), anyhow::Error> {
        let f = fixture();
        let pid = with_project(&f).await?;
        f.svc.create(&pid, sample_vacancy()).await?;
        f.store.clear();
        let ack = f.svc.delete("vacancy-1").await?.done().unwrap();
        assert_eq!(ack.message, "Vacancy deleted successfully!");
        assert_eq!(f.store.writes(), vec![Write::Delete("vacancies".into(), "vacancy-1".into())]);
        assert!(matches!(f.svc.list_by_project(&pid).await?, Outcome::Empty(_)));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_a_project_leaves_its_vacancies() -> Result<(), anyhow::Error> {
        let f = fixture();
        let pid = with_project(&f).await?;
        f.svc.create(&pid, sample_vacancy()).await?;
        f.projects.delete(&pid).await?;
        assert!(matches!(f.svc.list_by_project(&pid).await?, Outcome::NotFound(_)));
        assert!(f.svc.update("vacancy-1", sample_vacancy()).await?.is_success());
        Ok(())
    }
}
