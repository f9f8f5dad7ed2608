//! Upcoming birthday computation.
//!
//! # Responsibility
//! - Project each known birthday to its next anniversary on/after a
//!   reference date.
//! - Filter to a horizon window, rank by proximity and truncate.
//!
//! # Invariants
//! - An anniversary falling on the reference date is upcoming with
//!   `days_until == 0`; only strictly earlier dates roll to next year.
//! - Day counts use calendar days; no time-of-day is involved.
//! - Ties keep input member order.
//! - The reference date is always supplied by the caller.

use crate::model::member::{Member, MemberId};
use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

pub const DEFAULT_HORIZON_DAYS: u32 = 90;
pub const DEFAULT_EVENT_LIMIT: usize = 5;

/// Window and size options for [`upcoming_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingQuery {
    /// Inclusive maximum `days_until`.
    pub horizon_days: u32,
    pub limit: usize,
}

impl Default for UpcomingQuery {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            limit: DEFAULT_EVENT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Birthday,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
        }
    }
}

/// Derived event; produced fresh on every call and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingEvent {
    pub member_id: MemberId,
    pub member_name: String,
    pub kind: EventKind,
    pub date: NaiveDate,
    pub days_until: u32,
}

/// Computes the ranked, bounded list of upcoming birthdays.
///
/// Members without a birthday are skipped. Empty input yields an empty list.
pub fn upcoming_events(
    members: &[Member],
    reference_date: NaiveDate,
    query: &UpcomingQuery,
) -> Vec<UpcomingEvent> {
    let mut events = members
        .iter()
        .filter_map(|member| {
            let birthday = member.birthday?;
            let date = next_anniversary(birthday, reference_date)?;
            let days_until = days_between(reference_date, date)?;
            (days_until <= query.horizon_days).then(|| UpcomingEvent {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                kind: EventKind::Birthday,
                date,
                days_until,
            })
        })
        .collect::<Vec<_>>();

    events.sort_by_key(|event| event.days_until);
    events.truncate(query.limit);
    events
}

/// Next anniversary of `birthday` on or after `reference_date`.
///
/// Day overflow rolls into the following month, so Feb 29 maps to Mar 1 in
/// non-leap years. A passed anniversary advances the already-resolved date by
/// one year rather than the raw birth month/day, so a Feb 29 birthday seen
/// from late in a common year lands on Mar 1 of the next year even when that
/// year is a leap year. Returns `None` only at the edge of the representable
/// range.
pub fn next_anniversary(birthday: NaiveDate, reference_date: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in_year(birthday, reference_date.year())?;
    if this_year < reference_date {
        anniversary_in_year(this_year, reference_date.year() + 1)
    } else {
        Some(this_year)
    }
}

fn anniversary_in_year(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), 1)?
        .checked_add_days(Days::new(u64::from(birthday.day0())))
}

fn days_between(from: NaiveDate, to: NaiveDate) -> Option<u32> {
    u32::try_from(to.signed_duration_since(from).num_days()).ok()
}

#[cfg(test)]
mod tests {
    use super::{anniversary_in_year, days_between};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_day_rolls_to_march_first_in_common_years() {
        let birthday = date(2000, 2, 29);
        assert_eq!(anniversary_in_year(birthday, 2025), Some(date(2025, 3, 1)));
        assert_eq!(anniversary_in_year(birthday, 2028), Some(date(2028, 2, 29)));
    }

    #[test]
    fn days_between_rejects_negative_spans() {
        assert_eq!(days_between(date(2025, 1, 2), date(2025, 1, 1)), None);
        assert_eq!(days_between(date(2024, 12, 31), date(2025, 1, 1)), Some(1));
    }
}
