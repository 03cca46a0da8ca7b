use chrono::{DateTime, Datelike, Local, TimeZone};
use thiserror::Error;

use crate::entry_store::RecurrenceEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Birthday,
    Anniversary,
}

impl EventType {
    pub(crate) fn parse(token: &str) -> Result<Self, ProjectError> {
        match token {
            "Compl" => Ok(Self::Birthday),
            "Anniv" => Ok(Self::Anniversary),
            other => Err(ProjectError::UnknownType(other.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Birthday => "birthday",
            Self::Anniversary => "anniversary",
        }
    }
}

/// A recurrence entry projected onto the current year and confirmed to fall
/// on today's date before its cutoff time.
#[derive(Debug, Clone)]
pub struct DueItem {
    pub name: String,
    pub when: DateTime<Local>,
    pub event_type: EventType,
    pub note: String,
}

/// Per-type due lists. Rebuilt wholesale on every rollover; a bucket is
/// cleared only after a successful dispatch for that type.
#[derive(Debug, Default)]
pub struct DueBuckets {
    pub birthdays: Vec<DueItem>,
    pub anniversaries: Vec<DueItem>,
}

impl DueBuckets {
    pub fn has_items(&self) -> bool {
        !self.birthdays.is_empty() || !self.anniversaries.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("expected month-day format, got {0}")]
    MonthDayFormat(String),
    #[error("month not recognized: {0}")]
    UnknownMonth(String),
    #[error("day not recognized in {0}")]
    BadDay(String),
    #[error("no such local date for {month_day} in year {year}")]
    InvalidDate { month_day: String, year: i32 },
    #[error("event type not recognized: {0}")]
    UnknownType(String),
}

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Gen", "Feb", "Mar", "Apr", "Mag", "Giu", "Lug", "Ago", "Set", "Ott", "Nov", "Dic",
];

pub(crate) fn month_from_abbrev(token: &str) -> Option<u32> {
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbrev| *abbrev == token)
        .map(|index| index as u32 + 1)
}

const CUTOFF_HOUR: u32 = 23;
const CUTOFF_MINUTE: u32 = 59;

/// Resolves a `"Mon-DD"` string to its occurrence in `now`'s year, at the
/// 23:59:00 local cutoff. Out-of-range days are rejected, never clamped.
pub(crate) fn projected_occurrence(
    month_day: &str,
    now: DateTime<Local>,
) -> Result<DateTime<Local>, ProjectError> {
    let (month_token, day_token) = split_month_day(month_day)
        .ok_or_else(|| ProjectError::MonthDayFormat(month_day.to_string()))?;
    let month = month_from_abbrev(month_token)
        .ok_or_else(|| ProjectError::UnknownMonth(month_token.to_string()))?;
    let day: u32 = day_token
        .parse()
        .map_err(|_| ProjectError::BadDay(month_day.to_string()))?;
    Local
        .with_ymd_and_hms(now.year(), month, day, CUTOFF_HOUR, CUTOFF_MINUTE, 0)
        .single()
        .ok_or_else(|| ProjectError::InvalidDate {
            month_day: month_day.to_string(),
            year: now.year(),
        })
}

fn split_month_day(raw: &str) -> Option<(&str, &str)> {
    let mut parts = raw.split('-');
    let month = parts.next()?;
    let day = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    Some((month, day))
}

/// Projects one entry against `now`. Returns a due item only when the
/// occurrence falls on today's date and its cutoff has not yet elapsed.
/// The type token is validated for any strictly-future occurrence; entries
/// already past for this year are skipped without further checks.
pub fn project_entry(
    entry: &RecurrenceEntry,
    now: DateTime<Local>,
) -> Result<Option<DueItem>, ProjectError> {
    let when = projected_occurrence(&entry.month_day, now)?;
    if when <= now {
        return Ok(None);
    }
    let event_type = EventType::parse(&entry.kind)?;
    if when.month() != now.month() || when.day() != now.day() {
        return Ok(None);
    }
    Ok(Some(DueItem {
        name: entry.name.clone(),
        when,
        event_type,
        note: entry.note.clone(),
    }))
}

/// Full re-projection for a rollover: clear-then-append into fresh buckets.
/// One malformed entry rejects the whole load.
pub fn project_all(
    entries: &[RecurrenceEntry],
    now: DateTime<Local>,
) -> Result<DueBuckets, ProjectError> {
    let mut buckets = DueBuckets::default();
    log::info!("projecting {} entries for {}", entries.len(), now);
    for entry in entries {
        if let Some(item) = project_entry(entry, now)? {
            log::info!(
                "candidate for today's alarm: {} ({})",
                item.name,
                item.event_type.label()
            );
            match item.event_type {
                EventType::Birthday => buckets.birthdays.push(item),
                EventType::Anniversary => buckets.anniversaries.push(item),
            }
        }
    }
    if !buckets.has_items() {
        log::info!("nothing found for today {}", now);
    }
    Ok(buckets)
}
