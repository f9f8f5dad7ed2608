//! FFI use-case API for the mobile UI shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the clock read for "today" so core stays deterministic.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported through `ok=false` envelopes with a message.

use chrono::{Local, NaiveDate};
use log::warn;
use relgps_core::db::open_db;
use relgps_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_birthday,
    ping as ping_inner, FamilyDataset, FamilyGroups, FamilyService, Member,
    SqliteFamilyRepository, UpcomingEvent, UpcomingQuery, DEFAULT_EVENT_LIMIT,
    DEFAULT_HORIZON_DAYS,
};
use std::path::PathBuf;
use std::sync::OnceLock;

const EVENTS_LIMIT_MAX: u32 = 20;
const FAMILY_DB_FILE_NAME: &str = "relgps_family.sqlite3";
const FAMILY_DB_PATH_ENV: &str = "RELGPS_DB_PATH";
static FAMILY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the family database file for this process.
///
/// Must run before any data call; afterwards only the same path is accepted.
/// Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_family_db(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "family db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = FAMILY_DB_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "family db already configured at `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    String::new()
}

/// Member card data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMemberItem {
    pub member_id: String,
    pub name: String,
    /// Free-text role such as "Wife".
    pub role_label: String,
    /// `YYYY-MM-DD`, absent when unknown.
    pub birthday: Option<String>,
    /// Human-readable love language labels.
    pub love_languages: Vec<String>,
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyActionResponse {
    pub ok: bool,
    pub message: String,
}

/// Grouped family sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyGroupsResponse {
    pub ok: bool,
    pub message: String,
    pub spouse: Option<FamilyMemberItem>,
    pub children: Vec<FamilyMemberItem>,
    pub grandchildren: Vec<FamilyMemberItem>,
    pub others: Vec<FamilyMemberItem>,
}

/// Upcoming events widget row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEventItem {
    pub member_id: String,
    pub member_name: String,
    /// Event kind tag (`birthday`).
    pub kind: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    pub days_until: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEventsResponse {
    pub ok: bool,
    pub message: String,
    pub items: Vec<UpcomingEventItem>,
    /// Effective limit after clamping.
    pub applied_limit: u32,
    /// Reference date used, `YYYY-MM-DD`.
    pub reference_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyOverviewResponse {
    pub ok: bool,
    pub message: String,
    pub member_count: u32,
    pub relationship_count: u32,
    pub birthdays_tracked: u32,
}

/// Imports a JSON family snapshot into the family database.
///
/// The snapshot is validated as a whole, then written in one transaction; a
/// failed import stores nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn import_family_json(json: String) -> FamilyActionResponse {
    let dataset = match FamilyDataset::from_json_str(&json) {
        Ok(dataset) => dataset,
        Err(err) => {
            return FamilyActionResponse::failure(format!("import_family_json failed: {err}"))
        }
    };

    match with_family_repo(|repo| dataset.import_into(repo).map_err(|err| err.to_string())) {
        Ok(()) => FamilyActionResponse {
            ok: true,
            message: format!("Imported {} member(s).", dataset.members.len()),
        },
        Err(err) => FamilyActionResponse::failure(format!("import_family_json failed: {err}")),
    }
}

/// Groups family members around `main_member_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn family_groups(main_member_id: String) -> FamilyGroupsResponse {
    let main_member_id = main_member_id.trim().to_string();
    let result = with_family_repo(|repo| {
        FamilyService::new(repo)
            .family_groups(&main_member_id)
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(groups) => to_groups_response(groups),
        Err(err) => FamilyGroupsResponse {
            ok: false,
            message: format!("family_groups failed: {err}"),
            spouse: None,
            children: Vec::new(),
            grandchildren: Vec::new(),
            others: Vec::new(),
        },
    }
}

/// Ranked upcoming birthdays for the home widget.
///
/// Input semantics:
/// - `reference_date`: `YYYY-MM-DD`; local today when absent.
/// - `horizon_days`: inclusive window, default 90.
/// - `limit`: default 5, clamped to `1..=20`.
#[flutter_rust_bridge::frb(sync)]
pub fn upcoming_events(
    reference_date: Option<String>,
    horizon_days: Option<u32>,
    limit: Option<u32>,
) -> UpcomingEventsResponse {
    let applied_limit = normalize_events_limit(limit);
    let reference = match resolve_reference_date(reference_date.as_deref()) {
        Ok(date) => date,
        Err(err) => {
            return UpcomingEventsResponse {
                ok: false,
                message: format!("upcoming_events failed: {err}"),
                items: Vec::new(),
                applied_limit,
                reference_date: reference_date.unwrap_or_default(),
            }
        }
    };
    let query = UpcomingQuery {
        horizon_days: horizon_days.unwrap_or(DEFAULT_HORIZON_DAYS),
        limit: applied_limit as usize,
    };

    let result = with_family_repo(|repo| {
        FamilyService::new(repo)
            .upcoming_events(reference, &query)
            .map_err(|err| err.to_string())
    });

    match result {
        Ok(events) => {
            let items = events.into_iter().map(to_event_item).collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No upcoming events.".to_string()
            } else {
                format!("Found {} upcoming event(s).", items.len())
            };
            UpcomingEventsResponse {
                ok: true,
                message,
                items,
                applied_limit,
                reference_date: reference.to_string(),
            }
        }
        Err(err) => UpcomingEventsResponse {
            ok: false,
            message: format!("upcoming_events failed: {err}"),
            items: Vec::new(),
            applied_limit,
            reference_date: reference.to_string(),
        },
    }
}

/// Family overview counters.
#[flutter_rust_bridge::frb(sync)]
pub fn family_overview() -> FamilyOverviewResponse {
    match with_family_repo(|repo| {
        FamilyService::new(repo)
            .overview()
            .map_err(|err| err.to_string())
    }) {
        Ok(overview) => FamilyOverviewResponse {
            ok: true,
            message: String::new(),
            member_count: saturating_u32(overview.member_count),
            relationship_count: saturating_u32(overview.relationship_count),
            birthdays_tracked: saturating_u32(overview.birthdays_tracked),
        },
        Err(err) => FamilyOverviewResponse {
            ok: false,
            message: format!("family_overview failed: {err}"),
            member_count: 0,
            relationship_count: 0,
            birthdays_tracked: 0,
        },
    }
}

impl FamilyActionResponse {
    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

fn normalize_events_limit(limit: Option<u32>) -> u32 {
    match limit {
        None | Some(0) => DEFAULT_EVENT_LIMIT as u32,
        Some(value) => value.min(EVENTS_LIMIT_MAX),
    }
}

fn resolve_reference_date(raw: Option<&str>) -> Result<NaiveDate, String> {
    let Some(text) = raw else {
        return Ok(Local::now().date_naive());
    };
    match parse_birthday(text) {
        Ok(Some(date)) => Ok(date),
        Ok(None) | Err(_) => Err(format!(
            "invalid reference_date `{}`; expected YYYY-MM-DD",
            text.trim()
        )),
    }
}

fn resolve_family_db_path() -> PathBuf {
    FAMILY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(FAMILY_DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(FAMILY_DB_FILE_NAME)
        })
        .clone()
}

fn with_family_repo<T>(
    f: impl FnOnce(&SqliteFamilyRepository<'_>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_family_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=family_db_open module=ffi status=error error={err}");
        format!("family DB open failed: {err}")
    })?;
    let repo = SqliteFamilyRepository::try_new(&conn)
        .map_err(|err| format!("family repo init failed: {err}"))?;
    f(&repo)
}

fn to_groups_response(groups: FamilyGroups) -> FamilyGroupsResponse {
    FamilyGroupsResponse {
        ok: true,
        message: String::new(),
        spouse: groups.spouse.map(to_member_item),
        children: groups.children.into_iter().map(to_member_item).collect(),
        grandchildren: groups.grandchildren.into_iter().map(to_member_item).collect(),
        others: groups.others.into_iter().map(to_member_item).collect(),
    }
}

fn to_member_item(member: Member) -> FamilyMemberItem {
    FamilyMemberItem {
        birthday: member.birthday.map(|date| date.to_string()),
        love_languages: member
            .love_languages
            .iter()
            .map(|language| language.label().to_string())
            .collect(),
        member_id: member.id,
        name: member.name,
        role_label: member.role_label,
    }
}

fn to_event_item(event: UpcomingEvent) -> UpcomingEventItem {
    UpcomingEventItem {
        member_id: event.member_id,
        member_name: event.member_name,
        kind: event.kind.as_str().to_string(),
        date: event.date.to_string(),
        days_until: event.days_until,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
