//! Family structure projections over members and relationship records.
//!
//! # Responsibility
//! - Classify members into roles relative to an explicit main member.
//! - Summarize family data for overview widgets.
//!
//! # Invariants
//! - The main member is always passed explicitly, never inferred from
//!   position.

pub mod classifier;
pub mod overview;
