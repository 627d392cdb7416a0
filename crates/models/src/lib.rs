//! Domain records for the project board.
//! - `Project` and `Vacancy` are flat records with string fields.
//! - Field rules live next to each record and report a `FieldErrors` map.
//! - Each record has a hand-written document codec used by the storage layer.

pub mod errors;
pub mod codec;
pub mod validation;
pub mod project;
pub mod vacancy;

pub use codec::{Document, DocumentCodec};
pub use project::Project;
pub use vacancy::Vacancy;
pub use validation::FieldErrors;
