//! Family use-case service.
//!
//! # Responsibility
//! - Load member and relationship collections through a repository.
//! - Feed them to the pure classification and event functions.
//!
//! # Invariants
//! - The service never reads the system clock; callers pass the reference
//!   date.
//! - Service APIs never bypass repository validation.

use crate::events::upcoming::{upcoming_events, UpcomingEvent, UpcomingQuery};
use crate::family::classifier::{classify, FamilyGroups};
use crate::family::overview::{family_overview, FamilyOverview};
use crate::model::member::{Member, MemberId};
use crate::model::relationship::RelationshipRecord;
use crate::repo::family_repo::{FamilyRepository, RepoError, RepoResult};
use chrono::NaiveDate;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum FamilyServiceError {
    /// Main member id does not resolve to an active member.
    MainMemberNotFound(MemberId),
    Repo(RepoError),
}

impl Display for FamilyServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MainMemberNotFound(id) => write!(f, "main member not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FamilyServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::MainMemberNotFound(_) => None,
        }
    }
}

impl From<RepoError> for FamilyServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Family service facade over repository implementations.
pub struct FamilyService<R: FamilyRepository> {
    repo: R,
}

impl<R: FamilyRepository> FamilyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_member(&self, member: &Member) -> RepoResult<MemberId> {
        self.repo.create_member(member)
    }

    pub fn link_members(&self, record: &RelationshipRecord) -> RepoResult<()> {
        self.repo.create_relationship(record)
    }

    /// Soft-removes a member; their links drop out of relationship listings.
    pub fn remove_member(&self, id: &str) -> RepoResult<()> {
        self.repo.deactivate_member(id)
    }

    pub fn members(&self) -> RepoResult<Vec<Member>> {
        self.repo.list_members()
    }

    /// Groups active members by role relative to `main_member_id`.
    ///
    /// Unlike the pure classifier, an unknown main member is reported as an
    /// error here, since it means the caller's session is out of sync.
    pub fn family_groups(&self, main_member_id: &str) -> Result<FamilyGroups, FamilyServiceError> {
        let members = self.repo.list_members()?;
        if !members.iter().any(|member| member.id == main_member_id) {
            warn!("event=family_groups module=service status=error error_code=main_member_not_found");
            return Err(FamilyServiceError::MainMemberNotFound(
                main_member_id.to_string(),
            ));
        }
        let relationships = self.repo.list_relationships()?;
        Ok(classify(main_member_id, &members, &relationships))
    }

    pub fn upcoming_events(
        &self,
        reference_date: NaiveDate,
        query: &UpcomingQuery,
    ) -> RepoResult<Vec<UpcomingEvent>> {
        let members = self.repo.list_members()?;
        Ok(upcoming_events(&members, reference_date, query))
    }

    pub fn overview(&self) -> RepoResult<FamilyOverview> {
        let members = self.repo.list_members()?;
        let relationships = self.repo.list_relationships()?;
        Ok(family_overview(&members, &relationships))
    }
}
