//! Core domain logic for the RelationshipGPS family assistant.
//! This crate is the single source of truth for family-data invariants.

pub mod dataset;
pub mod db;
pub mod events;
pub mod family;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use dataset::{DatasetError, FamilyDataset};
pub use events::upcoming::{
    next_anniversary, upcoming_events, EventKind, UpcomingEvent, UpcomingQuery,
    DEFAULT_EVENT_LIMIT, DEFAULT_HORIZON_DAYS,
};
pub use family::classifier::{
    classify, relationship_between, relationship_strength, FamilyGroups, RelationshipLookup,
};
pub use family::overview::{family_overview, FamilyOverview};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::member::{parse_birthday, LoveLanguage, Member, MemberId, MemberValidationError};
pub use model::relationship::{
    RelationshipRecord, RelationshipType, RelationshipValidationError,
    DEFAULT_RELATIONSHIP_STRENGTH,
};
pub use repo::family_repo::{FamilyRepository, RepoError, RepoResult, SqliteFamilyRepository};
pub use service::family_service::{FamilyService, FamilyServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
