//! Core domain logic for the persondb person store.
//! This crate is the single source of truth for storage invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::person::{NewPerson, Person, PersonId, PersonValidationError};
pub use repo::person_repo::{PersonRepository, RepoError, RepoResult, SqlitePersonRepository};
pub use service::person_service::PersonService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
