//! Static family datasets passed into core as explicit input.
//!
//! # Responsibility
//! - Parse JSON family snapshots (members, relationships, main member).
//! - Provide the bundled demo family for probes and first-run UI.
//! - Import a snapshot through any `FamilyRepository`.
//!
//! # Invariants
//! - Datasets are validated as a whole before use: unique member ids,
//!   valid records, and relationship endpoints that exist in `members`.
//! - The main member is resolved from the explicit id; the first-member
//!   fallback applies only when no id was given.

use crate::model::member::{Member, MemberValidationError};
use crate::model::relationship::{RelationshipRecord, RelationshipValidationError};
use crate::repo::family_repo::{FamilyRepository, RepoError};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SAMPLE_FAMILY_JSON: &str = include_str!("../../data/sample_family.json");

#[derive(Debug)]
pub enum DatasetError {
    Parse(serde_json::Error),
    Member(MemberValidationError),
    Relationship(RelationshipValidationError),
    DuplicateMember(String),
    UnknownMember(String),
    Repo(RepoError),
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "family dataset parse error: {err}"),
            Self::Member(err) => write!(f, "{err}"),
            Self::Relationship(err) => write!(f, "{err}"),
            Self::DuplicateMember(id) => write!(f, "duplicate member id `{id}` in dataset"),
            Self::UnknownMember(id) => {
                write!(f, "relationship references unknown member `{id}`")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Member(err) => Some(err),
            Self::Relationship(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::DuplicateMember(_) | Self::UnknownMember(_) => None,
        }
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<MemberValidationError> for DatasetError {
    fn from(value: MemberValidationError) -> Self {
        Self::Member(value)
    }
}

impl From<RelationshipValidationError> for DatasetError {
    fn from(value: RelationshipValidationError) -> Self {
        Self::Relationship(value)
    }
}

impl From<RepoError> for DatasetError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Snapshot of one household.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyDataset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_member_id: Option<String>,
    pub members: Vec<Member>,
    #[serde(default)]
    pub relationships: Vec<RelationshipRecord>,
}

impl FamilyDataset {
    /// Parses and validates a JSON snapshot.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let dataset: Self = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Bundled demo household.
    pub fn sample() -> Result<Self, DatasetError> {
        Self::from_json_str(SAMPLE_FAMILY_JSON)
    }

    pub fn validate(&self) -> Result<(), DatasetError> {
        let mut seen = HashSet::new();
        for member in &self.members {
            member.validate()?;
            if !seen.insert(member.id.as_str()) {
                return Err(DatasetError::DuplicateMember(member.id.clone()));
            }
        }

        for record in &self.relationships {
            record.validate()?;
            for endpoint in [&record.a, &record.b] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(DatasetError::UnknownMember(endpoint.clone()));
                }
            }
        }

        Ok(())
    }

    /// Resolves the main member.
    ///
    /// An explicit id that matches nobody yields `None`.
    pub fn main_member(&self) -> Option<&Member> {
        match self.main_member_id.as_deref() {
            Some(id) => self.members.iter().find(|member| member.id == id),
            None => self.members.first(),
        }
    }

    /// Persists members then relationships through `repo` as one unit.
    ///
    /// A failing insert (for example an id already stored) leaves the
    /// repository unchanged.
    pub fn import_into<R: FamilyRepository>(&self, repo: &R) -> Result<(), DatasetError> {
        self.validate()?;
        repo.import_family(&self.members, &self.relationships)?;
        info!(
            "event=dataset_import module=dataset status=ok members={} relationships={}",
            self.members.len(),
            self.relationships.len()
        );
        Ok(())
    }
}
