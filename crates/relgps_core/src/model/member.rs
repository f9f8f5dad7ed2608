//! Family member domain model.
//!
//! # Responsibility
//! - Define the member record consumed by classification and event logic.
//! - Normalize the birthday wire format, including the `Unknown` sentinel.
//!
//! # Invariants
//! - `id` and `name` are never empty for a validated member.
//! - An unknown birthday is represented as `None`, never as a placeholder date.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a family member.
pub type MemberId = String;

/// Wire format for known birthdays.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

const UNKNOWN_BIRTHDAY_SENTINEL: &str = "unknown";

/// How a person prefers to receive affection.
///
/// Carried as descriptive data for the UI and prompt layers; nothing in core
/// computes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoveLanguage {
    WordsOfAffirmation,
    ActsOfService,
    ReceivingGifts,
    QualityTime,
    PhysicalTouch,
}

impl LoveLanguage {
    /// Human-readable label used by presentation code.
    pub fn label(self) -> &'static str {
        match self {
            Self::WordsOfAffirmation => "Words of Affirmation",
            Self::ActsOfService => "Acts of Service",
            Self::ReceivingGifts => "Receiving Gifts",
            Self::QualityTime => "Quality Time",
            Self::PhysicalTouch => "Physical Touch",
        }
    }
}

/// Validation errors for member records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberValidationError {
    EmptyId,
    EmptyName { id: MemberId },
    InvalidBirthday { value: String },
}

impl Display for MemberValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "member id cannot be empty"),
            Self::EmptyName { id } => write!(f, "member `{id}` has an empty name"),
            Self::InvalidBirthday { value } => write!(
                f,
                "invalid birthday `{value}`; expected YYYY-MM-DD or `Unknown`"
            ),
        }
    }
}

impl Error for MemberValidationError {}

/// Canonical family member record.
///
/// Members are created by data loaders and treated as immutable for the
/// duration of any core computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    /// Display name.
    pub name: String,
    /// Free-text role such as "Wife" or "Granddaughter". Informational only;
    /// classification uses relationship records instead.
    #[serde(rename = "relationship", default)]
    pub role_label: String,
    #[serde(
        default,
        serialize_with = "serialize_birthday",
        deserialize_with = "deserialize_birthday"
    )]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub love_languages: Vec<LoveLanguage>,
}

impl Member {
    /// Creates a member with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Creates a member with a caller-provided id.
    ///
    /// Used by import paths where identity already exists externally. Does not
    /// validate; call [`Member::validate`] before persisting.
    pub fn with_id(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role_label: String::new(),
            birthday: None,
            love_languages: Vec::new(),
        }
    }

    /// Builder-style birthday setter.
    pub fn born_on(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Builder-style role label setter.
    pub fn with_role(mut self, role_label: impl Into<String>) -> Self {
        self.role_label = role_label.into();
        self
    }

    /// Validates identity fields.
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.id.trim().is_empty() {
            return Err(MemberValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName {
                id: self.id.clone(),
            });
        }
        Ok(())
    }

    /// Completed years of age on `date`.
    ///
    /// Returns `None` when the birthday is unknown or `date` precedes it.
    pub fn age_on(&self, date: NaiveDate) -> Option<u32> {
        let birthday = self.birthday?;
        if date < birthday {
            return None;
        }
        let mut years = date.year() - birthday.year();
        if (date.month(), date.day()) < (birthday.month(), birthday.day()) {
            years -= 1;
        }
        u32::try_from(years).ok()
    }
}

/// Parses birthday text from loaders.
///
/// Empty text and the `Unknown` sentinel (any case) yield `Ok(None)`.
pub fn parse_birthday(value: &str) -> Result<Option<NaiveDate>, MemberValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(UNKNOWN_BIRTHDAY_SENTINEL) {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, BIRTHDAY_FORMAT)
        .map(Some)
        .map_err(|_| MemberValidationError::InvalidBirthday {
            value: trimmed.to_string(),
        })
}

/// Formats a birthday for storage and wire output.
pub fn format_birthday(birthday: NaiveDate) -> String {
    birthday.format(BIRTHDAY_FORMAT).to_string()
}

fn serialize_birthday<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(date) => serializer.serialize_str(&format_birthday(*date)),
        None => serializer.serialize_none(),
    }
}

fn deserialize_birthday<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw {
        Some(text) => parse_birthday(&text).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
