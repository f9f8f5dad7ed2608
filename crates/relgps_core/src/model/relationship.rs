//! Pairwise relationship records.
//!
//! # Responsibility
//! - Define the closed vocabulary of relationship types.
//! - Provide symmetric matching so lookups ignore stored field order.
//!
//! # Invariants
//! - A record never links a member to itself.
//! - `strength`, when present, is within `1..=10`.

use crate::model::member::MemberId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Strength assumed when no record or no explicit score exists.
pub const DEFAULT_RELATIONSHIP_STRENGTH: u8 = 5;
pub const MIN_RELATIONSHIP_STRENGTH: u8 = 1;
pub const MAX_RELATIONSHIP_STRENGTH: u8 = 10;

/// Relationship type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Spouse,
    Partner,
    Parent,
    Child,
    Grandparent,
    Grandchild,
    Sibling,
    StepSibling,
    StepParent,
    StepChild,
    InLaw,
    Extended,
    Friend,
    Colleague,
    Other,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 15] = [
        Self::Spouse,
        Self::Partner,
        Self::Parent,
        Self::Child,
        Self::Grandparent,
        Self::Grandchild,
        Self::Sibling,
        Self::StepSibling,
        Self::StepParent,
        Self::StepChild,
        Self::InLaw,
        Self::Extended,
        Self::Friend,
        Self::Colleague,
        Self::Other,
    ];

    /// Stable snake_case tag used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spouse => "spouse",
            Self::Partner => "partner",
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Grandparent => "grandparent",
            Self::Grandchild => "grandchild",
            Self::Sibling => "sibling",
            Self::StepSibling => "step_sibling",
            Self::StepParent => "step_parent",
            Self::StepChild => "step_child",
            Self::InLaw => "in_law",
            Self::Extended => "extended",
            Self::Friend => "friend",
            Self::Colleague => "colleague",
            Self::Other => "other",
        }
    }

    /// Parses a stored tag. Returns `None` for anything outside the closed set.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }

    /// Display label: `step_child` becomes `Step Child`.
    pub fn label(self) -> String {
        title_case_tag(self.as_str())
    }
}

impl Display for RelationshipType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for relationship records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipValidationError {
    EmptyMemberId,
    SelfLink { member_id: MemberId },
    StrengthOutOfRange { strength: u8 },
}

impl Display for RelationshipValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMemberId => write!(f, "relationship member ids cannot be empty"),
            Self::SelfLink { member_id } => {
                write!(f, "relationship cannot link member `{member_id}` to itself")
            }
            Self::StrengthOutOfRange { strength } => write!(
                f,
                "relationship strength {strength} must be within {MIN_RELATIONSHIP_STRENGTH}..={MAX_RELATIONSHIP_STRENGTH}"
            ),
        }
    }
}

impl Error for RelationshipValidationError {}

/// Unordered link between two members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub a: MemberId,
    pub b: MemberId,
    /// Serialized as `type` to match loader schema naming.
    #[serde(rename = "type")]
    pub kind: RelationshipType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<u8>,
}

impl RelationshipRecord {
    pub fn new(a: impl Into<MemberId>, b: impl Into<MemberId>, kind: RelationshipType) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            kind,
            strength: None,
        }
    }

    pub fn with_strength(mut self, strength: u8) -> Self {
        self.strength = Some(strength);
        self
    }

    /// Returns whether this record links `x` and `y` in either field order.
    pub fn links(&self, x: &str, y: &str) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    pub fn validate(&self) -> Result<(), RelationshipValidationError> {
        if self.a.trim().is_empty() || self.b.trim().is_empty() {
            return Err(RelationshipValidationError::EmptyMemberId);
        }
        if self.a == self.b {
            return Err(RelationshipValidationError::SelfLink {
                member_id: self.a.clone(),
            });
        }
        if let Some(strength) = self.strength {
            if !(MIN_RELATIONSHIP_STRENGTH..=MAX_RELATIONSHIP_STRENGTH).contains(&strength) {
                return Err(RelationshipValidationError::StrengthOutOfRange { strength });
            }
        }
        Ok(())
    }
}

fn title_case_tag(tag: &str) -> String {
    tag.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{title_case_tag, RelationshipType};

    #[test]
    fn title_case_tag_splits_on_underscores() {
        assert_eq!(title_case_tag("step_child"), "Step Child");
        assert_eq!(title_case_tag("spouse"), "Spouse");
        assert_eq!(title_case_tag("words_of_affirmation"), "Words Of Affirmation");
    }

    #[test]
    fn every_tag_parses_back_to_its_type() {
        for kind in RelationshipType::ALL {
            assert_eq!(RelationshipType::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(RelationshipType::parse("family"), None);
    }
}
