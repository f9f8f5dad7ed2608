//! Family domain model shared by classification and event projections.
//!
//! # Responsibility
//! - Define canonical member and relationship records used by core logic.
//! - Own boundary validation so pure computations can assume well-typed input.
//!
//! # Invariants
//! - Every member is identified by a stable, non-empty string id.
//! - Relationship records are symmetric: `(a, b)` and `(b, a)` describe the
//!   same link.

pub mod member;
pub mod relationship;
