//! Service layer orchestrating project and vacancy CRUD on top of a document store.
//! - Repositories translate entity operations into document store calls.
//! - Services run existence checks and validation gates before any write.
//! - "Not found" and validation failures are `Outcome` variants, not errors.

pub mod errors;
pub mod outcome;
pub mod storage;
pub mod collection;
pub mod project;
pub mod vacancy;
pub mod context;
pub mod runtime;
#[cfg(test)]
pub mod test_support;

pub use context::ServiceContext;
pub use outcome::{Ack, Outcome};
