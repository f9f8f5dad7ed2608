//! Member and relationship repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Load ordered member and relationship collections for core computations.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate records before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `list_members` returns active members in insertion order.
//! - `import_family` writes a whole snapshot in one transaction or nothing.
//! - Deactivated members cannot be deactivated again or gain new links.

use crate::db::migrations::ensure_latest;
use crate::db::DbError;
use crate::model::member::{
    format_birthday, parse_birthday, LoveLanguage, Member, MemberId, MemberValidationError,
};
use crate::model::relationship::{
    RelationshipRecord, RelationshipType, RelationshipValidationError,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MEMBER_SELECT_SQL: &str = "SELECT
    member_id,
    name,
    role_label,
    birthday,
    love_languages
FROM members";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for family persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Member(MemberValidationError),
    Relationship(RelationshipValidationError),
    Db(DbError),
    NotFound(MemberId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Member(err) => write!(f, "{err}"),
            Self::Relationship(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "member not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted family data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Member(err) => Some(err),
            Self::Relationship(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<MemberValidationError> for RepoError {
    fn from(value: MemberValidationError) -> Self {
        Self::Member(value)
    }
}

impl From<RelationshipValidationError> for RepoError {
    fn from(value: RelationshipValidationError) -> Self {
        Self::Relationship(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Loader contract for family members and their relationship records.
pub trait FamilyRepository {
    fn create_member(&self, member: &Member) -> RepoResult<MemberId>;
    fn get_member(&self, id: &str) -> RepoResult<Option<Member>>;
    fn list_members(&self) -> RepoResult<Vec<Member>>;
    fn deactivate_member(&self, id: &str) -> RepoResult<()>;
    fn create_relationship(&self, record: &RelationshipRecord) -> RepoResult<()>;
    fn list_relationships(&self) -> RepoResult<Vec<RelationshipRecord>>;
    /// Inserts members then relationships atomically.
    fn import_family(
        &self,
        members: &[Member],
        relationships: &[RelationshipRecord],
    ) -> RepoResult<()>;
}

impl<R: FamilyRepository + ?Sized> FamilyRepository for &R {
    fn create_member(&self, member: &Member) -> RepoResult<MemberId> {
        (**self).create_member(member)
    }

    fn get_member(&self, id: &str) -> RepoResult<Option<Member>> {
        (**self).get_member(id)
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        (**self).list_members()
    }

    fn deactivate_member(&self, id: &str) -> RepoResult<()> {
        (**self).deactivate_member(id)
    }

    fn create_relationship(&self, record: &RelationshipRecord) -> RepoResult<()> {
        (**self).create_relationship(record)
    }

    fn list_relationships(&self) -> RepoResult<Vec<RelationshipRecord>> {
        (**self).list_relationships()
    }

    fn import_family(
        &self,
        members: &[Member],
        relationships: &[RelationshipRecord],
    ) -> RepoResult<()> {
        (**self).import_family(members, relationships)
    }
}

/// SQLite-backed family repository.
pub struct SqliteFamilyRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFamilyRepository<'conn> {
    /// Wraps a connection after checking its schema is fully migrated.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_latest(conn)?;
        Ok(Self { conn })
    }
}

impl FamilyRepository for SqliteFamilyRepository<'_> {
    fn create_member(&self, member: &Member) -> RepoResult<MemberId> {
        insert_member(self.conn, member)?;
        Ok(member.id.clone())
    }

    fn get_member(&self, id: &str) -> RepoResult<Option<Member>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEMBER_SELECT_SQL}
             WHERE member_id = ?1 AND is_active = 1;"
        ))?;

        let mut rows = stmt.query([id])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_member_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_members(&self) -> RepoResult<Vec<Member>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MEMBER_SELECT_SQL}
             WHERE is_active = 1
             ORDER BY rowid ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut members = Vec::new();
        while let Some(row) = rows.next()? {
            members.push(parse_member_row(row)?);
        }

        Ok(members)
    }

    fn deactivate_member(&self, id: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE members
             SET
                is_active = 0,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE member_id = ?1
               AND is_active = 1;",
            [id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }

        Ok(())
    }

    fn create_relationship(&self, record: &RelationshipRecord) -> RepoResult<()> {
        insert_relationship(self.conn, record)
    }

    fn list_relationships(&self) -> RepoResult<Vec<RelationshipRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                r.member_a_id,
                r.member_b_id,
                r.relationship_type,
                r.strength
             FROM relationships r
             JOIN members a ON a.member_id = r.member_a_id AND a.is_active = 1
             JOIN members b ON b.member_id = r.member_b_id AND b.is_active = 1
             WHERE r.status = 'active'
             ORDER BY r.relationship_id ASC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_relationship_row(row)?);
        }

        Ok(records)
    }

    fn import_family(
        &self,
        members: &[Member],
        relationships: &[RelationshipRecord],
    ) -> RepoResult<()> {
        // Borrowed connection: `unchecked_transaction` rolls back on drop.
        let tx = self.conn.unchecked_transaction()?;
        for member in members {
            insert_member(&tx, member)?;
        }
        for record in relationships {
            insert_relationship(&tx, record)?;
        }
        tx.commit()?;
        Ok(())
    }
}

fn insert_member(conn: &Connection, member: &Member) -> RepoResult<()> {
    member.validate()?;

    let love_languages = serde_json::to_string(&member.love_languages)
        .map_err(|err| RepoError::InvalidData(format!("love_languages encode: {err}")))?;

    conn.execute(
        "INSERT INTO members (
            member_id,
            name,
            role_label,
            birthday,
            love_languages
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            member.id.as_str(),
            member.name.as_str(),
            member.role_label.as_str(),
            member.birthday.map(format_birthday),
            love_languages,
        ],
    )?;

    Ok(())
}

fn insert_relationship(conn: &Connection, record: &RelationshipRecord) -> RepoResult<()> {
    record.validate()?;

    for member_id in [&record.a, &record.b] {
        let exists = conn
            .query_row(
                "SELECT 1 FROM members WHERE member_id = ?1 AND is_active = 1;",
                [member_id.as_str()],
                |_| Ok(()),
            )
            .optional()?;
        if exists.is_none() {
            return Err(RepoError::NotFound(member_id.clone()));
        }
    }

    conn.execute(
        "INSERT INTO relationships (
            member_a_id,
            member_b_id,
            relationship_type,
            strength
        ) VALUES (?1, ?2, ?3, ?4);",
        params![
            record.a.as_str(),
            record.b.as_str(),
            record.kind.as_str(),
            record.strength,
        ],
    )?;

    Ok(())
}

fn parse_member_row(row: &Row<'_>) -> RepoResult<Member> {
    let id: String = row.get("member_id")?;

    let birthday = match row.get::<_, Option<String>>("birthday")? {
        Some(text) => parse_birthday(&text).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid birthday `{text}` in members.birthday for `{id}`"
            ))
        })?,
        None => None,
    };

    let love_languages_text: String = row.get("love_languages")?;
    let love_languages = serde_json::from_str::<Vec<LoveLanguage>>(&love_languages_text)
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid love_languages `{love_languages_text}` in members.love_languages for `{id}`"
            ))
        })?;

    let member = Member {
        id,
        name: row.get("name")?,
        role_label: row.get("role_label")?,
        birthday,
        love_languages,
    };
    member.validate()?;
    Ok(member)
}

fn parse_relationship_row(row: &Row<'_>) -> RepoResult<RelationshipRecord> {
    let type_text: String = row.get("relationship_type")?;
    let kind = RelationshipType::parse(&type_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid relationship type `{type_text}` in relationships.relationship_type"
        ))
    })?;

    let strength = match row.get::<_, Option<i64>>("strength")? {
        Some(value) => Some(u8::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid strength `{value}` in relationships.strength"
            ))
        })?),
        None => None,
    };

    let record = RelationshipRecord {
        a: row.get("member_a_id")?,
        b: row.get("member_b_id")?,
        kind,
        strength,
    };
    record.validate()?;
    Ok(record)
}
