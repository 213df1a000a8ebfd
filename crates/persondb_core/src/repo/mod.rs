//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for person records.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic outcomes (affected counts) in addition
//!   to transport errors; a missing update/delete target is not an error.

pub mod person_repo;
