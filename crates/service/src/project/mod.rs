pub mod repository;
pub mod service;

pub use repository::{ProjectRepository, StoreProjectRepository};
pub use service::ProjectService;
