//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the member-loading and relationship-loading contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce model validation before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod family_repo;
