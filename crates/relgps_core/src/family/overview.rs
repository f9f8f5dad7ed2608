//! Family summary counters for the overview widget.

use crate::model::member::Member;
use crate::model::relationship::RelationshipRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FamilyOverview {
    pub member_count: usize,
    pub relationship_count: usize,
    /// Members with a known birthday.
    pub birthdays_tracked: usize,
}

pub fn family_overview(members: &[Member], relationships: &[RelationshipRecord]) -> FamilyOverview {
    FamilyOverview {
        member_count: members.len(),
        relationship_count: relationships.len(),
        birthdays_tracked: members
            .iter()
            .filter(|member| member.birthday.is_some())
            .count(),
    }
}
