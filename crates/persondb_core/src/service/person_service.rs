//! Person use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for the fixed CRUD workflow.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::person::{NewPerson, Person, PersonId};
use crate::repo::person_repo::{PersonRepository, RepoResult};

/// Use-case service wrapper for the person store operations.
pub struct PersonService<R: PersonRepository> {
    repo: R,
}

impl<R: PersonRepository> PersonService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts one person, returning the store-assigned id.
    ///
    /// # Contract
    /// - Rejects empty names before any SQL runs.
    pub fn create_person(&self, name: impl Into<String>, age: u32) -> RepoResult<PersonId> {
        let request = NewPerson::new(name, age)?;
        self.repo.insert(&request)
    }

    /// Lists all stored persons as a finite snapshot.
    pub fn list_persons(&self) -> RepoResult<Vec<Person>> {
        self.repo.list_all()
    }

    /// Sets a person's age; returns how many rows matched (0 or 1).
    pub fn update_age(&self, id: PersonId, new_age: u32) -> RepoResult<usize> {
        self.repo.update_age(id, new_age)
    }

    /// Deletes a person; returns how many rows matched (0 or 1).
    pub fn delete_person(&self, id: PersonId) -> RepoResult<usize> {
        self.repo.delete(id)
    }
}
