use std::sync::Arc;

use configs::IdStrategy;

use crate::project::{ProjectService, StoreProjectRepository};
use crate::storage::DocumentStore;
use crate::vacancy::{StoreVacancyRepository, VacancyService};

pub type Projects = ProjectService<StoreProjectRepository>;
pub type Vacancies = VacancyService<StoreVacancyRepository, StoreProjectRepository>;

/// Services wired over one shared document store.
#[derive(Clone)]
pub struct ServiceContext {
    pub projects: Arc<Projects>,
    pub vacancies: Arc<Vacancies>,
}

impl ServiceContext {
    pub fn new(store: Arc<dyn DocumentStore>, strategy: IdStrategy) -> Self {
        let project_repo = Arc::new(StoreProjectRepository::new(Arc::clone(&store), strategy));
        let vacancy_repo = Arc::new(StoreVacancyRepository::new(store, strategy));
        Self {
            projects: Arc::new(ProjectService::new(Arc::clone(&project_repo))),
            vacancies: Arc::new(VacancyService::new(vacancy_repo, project_repo)),
        }
    }
}
