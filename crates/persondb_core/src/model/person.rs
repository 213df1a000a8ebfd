//! Person domain model.
//!
//! # Responsibility
//! - Define the canonical record stored in the `persons` table.
//! - Validate insert requests before they reach persistence.
//!
//! # Invariants
//! - `id` is assigned by the backing store, is unique across the table
//!   lifetime, and is never reused after deletion.
//! - `name` is non-empty text and immutable once stored.
//! - `age` is non-negative by construction (`u32`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned row identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type PersonId = i64;

/// Canonical person record as persisted in the `persons` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Assigned by the store on insert; immutable afterwards.
    pub id: PersonId,
    /// Non-empty display name.
    pub name: String,
    /// Mutable via the update-age operation only.
    pub age: u32,
}

/// Validated insert request: a person without a store-assigned id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPerson {
    name: String,
    age: u32,
}

impl NewPerson {
    /// Builds an insert request, rejecting empty or whitespace-only names.
    ///
    /// # Contract
    /// - The stored name keeps its original spelling; only emptiness is
    ///   checked, nothing is trimmed before persistence.
    /// - No range validation is applied to `age` beyond the `u32` type.
    pub fn new(name: impl Into<String>, age: u32) -> Result<Self, PersonValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PersonValidationError::EmptyName);
        }
        Ok(Self { name, age })
    }

    /// Name as it will be persisted.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Age as it will be persisted.
    pub fn age(&self) -> u32 {
        self.age
    }
}

/// Validation failures for person insert requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonValidationError {
    /// Name was empty or contained only whitespace.
    EmptyName,
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "person name must be non-empty"),
        }
    }
}

impl Error for PersonValidationError {}
