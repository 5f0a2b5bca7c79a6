use pantryplan_shared::{format_date, parse_date};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};
use time::{Date, Duration, OffsetDateTime};
use time_tz::{ToTimezone, timezones};

/// Number of days a plan covers.
#[derive(
    EnumString,
    VariantArray,
    Display,
    AsRefStr,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum PlanRange {
    #[default]
    Week,
    Fortnight,
    Month,
}

impl PlanRange {
    pub fn days(&self) -> usize {
        match self {
            PlanRange::Week => 7,
            PlanRange::Fortnight => 14,
            PlanRange::Month => 28,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Week {
    pub start: Date,
    pub end: Date,
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: Date) -> Date {
    date - Duration::days(i64::from(date.weekday().number_days_from_monday()))
}

pub fn is_known_timezone(name: &str) -> bool {
    name.eq_ignore_ascii_case("utc") || timezones::get_by_name(name).is_some()
}

/// Current calendar date in the given IANA timezone, UTC when unknown.
pub fn today(tz: impl AsRef<str>) -> Date {
    let mut now = OffsetDateTime::now_utc();

    if let Some(tz) = timezones::get_by_name(tz.as_ref()) {
        now = now.to_timezone(tz);
    }

    now.date()
}

/// `count` consecutive weeks (Monday to Sunday), starting with the week
/// containing `from`.
pub fn upcoming_weeks(from: Date, count: usize) -> Vec<Week> {
    let monday = week_start(from);

    (0..count)
        .map(|i| {
            let start = monday + Duration::weeks(i as i64);
            Week {
                start,
                end: start + Duration::days(6),
            }
        })
        .collect()
}

/// Zero-based day index of `date` within the plan anchored at `anchor`.
///
/// Returns `None` when the date cannot be parsed or falls outside
/// `[0, range.days())`; such dates do not belong to the view.
pub fn day_index_for_date(anchor: Date, date: &str, range: PlanRange) -> Option<usize> {
    let date = parse_date(date)?;
    let offset = (date - anchor).whole_days();

    if offset < 0 {
        return None;
    }

    let index = usize::try_from(offset).ok()?;

    (index < range.days()).then_some(index)
}

/// `YYYY-MM-DD` of the day `index` days after `anchor`.
pub fn date_for_day_index(anchor: Date, index: usize) -> String {
    let days = i64::try_from(index)
        .unwrap_or(i64::MAX)
        .min(i64::from(i32::MAX));

    format_date(anchor.saturating_add(Duration::days(days)))
}
