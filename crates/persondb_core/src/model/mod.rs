//! Domain model for the person store.
//!
//! # Responsibility
//! - Define canonical data structures used by repository and service layers.
//!
//! # Invariants
//! - Every stored record is identified by a store-assigned `PersonId`.
//! - Deletion is a hard delete; this design keeps no tombstones.

pub mod person;
