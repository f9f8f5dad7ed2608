//! Relationship lookup and role classification relative to a main member.
//!
//! # Responsibility
//! - Resolve the relationship type between two members, ignoring field order.
//! - Partition members into spouse/children/grandchildren/others buckets.
//!
//! # Invariants
//! - The main member never appears in any bucket.
//! - At most one member becomes `spouse`; the first in member order wins.
//! - A missing main member puts every member into `others`.
//! - Pure: no mutation of inputs, never fails.

use crate::model::member::Member;
use crate::model::relationship::{
    RelationshipRecord, RelationshipType, DEFAULT_RELATIONSHIP_STRENGTH,
};
use log::debug;
use serde::Serialize;

/// Tag reported when no record links two members.
pub const UNRECORDED_RELATIONSHIP_TAG: &str = "family";

/// Outcome of a symmetric relationship lookup.
///
/// `Unrecorded` is kept distinct from every explicit type so callers can tell
/// a missing record apart from real data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipLookup {
    Recorded(RelationshipType),
    Unrecorded,
}

impl RelationshipLookup {
    /// Display tag; unrecorded links report the neutral `family` tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Recorded(kind) => kind.as_str(),
            Self::Unrecorded => UNRECORDED_RELATIONSHIP_TAG,
        }
    }

    pub fn kind(self) -> Option<RelationshipType> {
        match self {
            Self::Recorded(kind) => Some(kind),
            Self::Unrecorded => None,
        }
    }
}

/// Members grouped by role relative to the main member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FamilyGroups {
    pub spouse: Option<Member>,
    pub children: Vec<Member>,
    pub grandchildren: Vec<Member>,
    pub others: Vec<Member>,
}

/// Finds the first record linking `x` and `y` in either field order.
pub fn relationship_between(
    relationships: &[RelationshipRecord],
    x: &str,
    y: &str,
) -> RelationshipLookup {
    find_record(relationships, x, y)
        .map(|record| RelationshipLookup::Recorded(record.kind))
        .unwrap_or(RelationshipLookup::Unrecorded)
}

/// Strength of the first record linking `x` and `y`.
///
/// Defaults to [`DEFAULT_RELATIONSHIP_STRENGTH`] when there is no record or the
/// record carries no score.
pub fn relationship_strength(relationships: &[RelationshipRecord], x: &str, y: &str) -> u8 {
    find_record(relationships, x, y)
        .and_then(|record| record.strength)
        .unwrap_or(DEFAULT_RELATIONSHIP_STRENGTH)
}

/// Partitions `members` by their relationship to `main_member_id`.
///
/// Precedence: main excluded, then first spouse/partner, then
/// child/step_child, then grandchild, then everyone else. Bucket order follows
/// `members` order.
pub fn classify(
    main_member_id: &str,
    members: &[Member],
    relationships: &[RelationshipRecord],
) -> FamilyGroups {
    let mut groups = FamilyGroups::default();

    if !members.iter().any(|member| member.id == main_member_id) {
        debug!(
            "event=family_classify module=family status=main_missing members={}",
            members.len()
        );
        groups.others = members.to_vec();
        return groups;
    }

    let mut unrecorded = 0usize;
    for member in members {
        if member.id == main_member_id {
            continue;
        }

        let lookup = relationship_between(relationships, main_member_id, &member.id);
        match lookup.kind() {
            Some(RelationshipType::Spouse | RelationshipType::Partner)
                if groups.spouse.is_none() =>
            {
                groups.spouse = Some(member.clone());
            }
            Some(RelationshipType::Child | RelationshipType::StepChild) => {
                groups.children.push(member.clone());
            }
            Some(RelationshipType::Grandchild) => {
                groups.grandchildren.push(member.clone());
            }
            Some(_) => groups.others.push(member.clone()),
            None => {
                unrecorded += 1;
                groups.others.push(member.clone());
            }
        }
    }

    debug!(
        "event=family_classify module=family status=ok members={} spouse={} children={} grandchildren={} others={} unrecorded={}",
        members.len(),
        groups.spouse.is_some(),
        groups.children.len(),
        groups.grandchildren.len(),
        groups.others.len(),
        unrecorded
    );

    groups
}

fn find_record<'a>(
    relationships: &'a [RelationshipRecord],
    x: &str,
    y: &str,
) -> Option<&'a RelationshipRecord> {
    relationships.iter().find(|record| record.links(x, y))
}
