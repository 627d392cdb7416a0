pub mod repository;
pub mod service;

pub use repository::{StoreVacancyRepository, VacancyRepository};
pub use service::VacancyService;
