use std::sync::Arc;

use models::Project;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::outcome::{Ack, Outcome};
use crate::project::repository::ProjectRepository;

pub(crate) fn project_not_found(id: &str) -> String {
    format!("Project with ID: {id} not found")
}

/// Application service for projects.
///
/// Update and delete read first and only write when the project exists. The
/// read and the write are separate store calls, so a concurrent delete can
/// land in between; the write then recreates (update) or no-ops (delete).
pub struct ProjectService<R: ProjectRepository> {
    repo: Arc<R>,
}

impl<R: ProjectRepository> ProjectService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// `NoContent` when there are no projects.
    #[instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Outcome<Vec<Project>>, ServiceError> {
        let projects = self.repo.list().await?;
        if projects.is_empty() {
            return Ok(Outcome::NoContent);
        }
        Ok(Outcome::Done(projects))
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<Outcome<Project>, ServiceError> {
        match self.repo.get_by_id(id).await? {
            Some(p) => Ok(Outcome::Done(p)),
            None => Ok(Outcome::NotFound(project_not_found(id))),
        }
    }

    /// Input is expected to have passed `Project::validate` already.
    #[instrument(skip(self, project), fields(name = %project.name))]
    pub async fn create(&self, project: Project) -> Result<Outcome<Ack>, ServiceError> {
        let id = self.repo.create(project).await?;
        info!(%id, "project created");
        Ok(Outcome::Done(Ack::created(format!("Project created successfully with ID: {id}"), id)))
    }

    #[instrument(skip(self, project))]
    pub async fn update(&self, id: &str, project: Project) -> Result<Outcome<Ack>, ServiceError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Ok(Outcome::NotFound(project_not_found(id)));
        }
        self.repo.update(id, project).await?;
        info!(%id, "project updated");
        Ok(Outcome::Done(Ack::message("Project updated successfully!")))
    }

    /// Vacancies of the project are left in place.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Outcome<Ack>, ServiceError> {
        if self.repo.get_by_id(id).await?.is_none() {
            return Ok(Outcome::NotFound(project_not_found(id)));
        }
        self.repo.delete(id).await?;
        info!(%id, "project deleted");
        Ok(Outcome::Done(Ack::message("Project deleted successfully!")))
    }
}
