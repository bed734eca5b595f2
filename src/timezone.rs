//! Weekday resolution in named time zones.
//!
//! Banner schedules are defined against the wall clock of a named IANA zone, not
//! the machine running the evaluation. A zone that cannot be resolved must never
//! take the banner down with it, so resolution degrades to the local weekday and
//! leaves a warning in the log instead of returning an error.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Datelike, Local, Utc, Weekday};
use chrono_tz::Tz;

/// Where a resolved weekday came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdaySource {
    /// Computed in the requested zone.
    Zone(Tz),
    /// The zone was not recognized; computed from the local system offset.
    LocalFallback,
}

/// A weekday together with how it was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedWeekday {
    pub weekday: Weekday,
    pub source: WeekdaySource,
}

impl ResolvedWeekday {
    pub fn is_fallback(&self) -> bool {
        self.source == WeekdaySource::LocalFallback
    }
}

/// Parse an IANA zone identifier.
///
/// Exact names are tried first, then a case-insensitive match, so
/// `america/chicago` resolves the same as `America/Chicago`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    let trimmed = name.trim();
    if let Ok(tz) = trimmed.parse::<Tz>() {
        return Ok(tz);
    }
    Tz::from_str_insensitive(trimmed).map_err(|e| anyhow!("Unrecognized time zone '{name}': {e}"))
}

/// Weekday of `at` in the named zone, or an error if the zone is unknown.
///
/// Unlike [`weekday_of`] this never falls back and never logs.
pub fn try_weekday_in(timezone: &str, at: DateTime<Utc>) -> Result<Weekday> {
    let tz = parse_timezone(timezone)?;
    Ok(at.with_timezone(&tz).weekday())
}

/// Resolve the weekday of `at` as observed in `timezone`.
///
/// Falls back to the local system weekday when the zone is not recognized, and
/// logs a warning each time it does.
pub fn resolve_weekday(timezone: &str, at: DateTime<Utc>) -> ResolvedWeekday {
    let parsed = parse_timezone(timezone);
    if let Err(e) = &parsed {
        log_warning!("{e}. Falling back to local time.");
    }
    resolve_in(parsed.ok(), at)
}

/// Same as [`resolve_weekday`] without the fallback warning, for callers that
/// resolve the same zone many times and report a bad zone once themselves.
pub fn resolve_weekday_quietly(timezone: &str, at: DateTime<Utc>) -> ResolvedWeekday {
    resolve_in(parse_timezone(timezone).ok(), at)
}

fn resolve_in(tz: Option<Tz>, at: DateTime<Utc>) -> ResolvedWeekday {
    match tz {
        Some(tz) => ResolvedWeekday {
            weekday: at.with_timezone(&tz).weekday(),
            source: WeekdaySource::Zone(tz),
        },
        None => ResolvedWeekday {
            weekday: local_weekday(at),
            source: WeekdaySource::LocalFallback,
        },
    }
}

pub fn weekday_of(timezone: &str, at: DateTime<Utc>) -> Weekday {
    resolve_weekday(timezone, at).weekday
}

/// Whether it is Monday in `timezone`; `None` means the current time.
pub fn is_monday(timezone: &str, at: Option<DateTime<Utc>>) -> bool {
    let at = at.unwrap_or_else(crate::time_source::now);
    weekday_of(timezone, at) == Weekday::Mon
}

/// Full English weekday name ("Monday").
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn local_weekday(at: DateTime<Utc>) -> Weekday {
    at.with_timezone(&Local).weekday()
}
