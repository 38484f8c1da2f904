//! String-in, struct-out navigation.
//!
//! [`navigate`] takes the same loosely-typed inputs a CLI or an RPC handler
//! receives (an RFC 3339 string, a weekday name, an IANA zone name) and
//! returns a serializable [`NavigatedDatetime`]. All arithmetic is delegated
//! to the time-zone-aware functions in [`crate::navigator`]; this module only
//! parses, dispatches and formats.
//!
//! The caller supplies the anchor instant. Nothing here reads the system
//! clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc, Weekday};
use serde::Serialize;

use crate::boundary::START_OF_DAY;
use crate::error::{NavError, Result};
use crate::navigator::{
    to_end_of_next_tz_day_of_week, to_end_of_previous_tz_day_of_week, to_next_tz_day_of_week,
    to_previous_tz_day_of_week, to_start_of_next_tz_day_of_week,
    to_start_of_previous_tz_day_of_week,
};
use crate::zone::{Zone, ZoneConverter};

// ── Options ─────────────────────────────────────────────────────────────────

/// Which way to move from the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// The nearest occurrence strictly before the reference.
    Previous,
    /// The nearest occurrence strictly after the reference.
    #[default]
    Next,
}

impl FromStr for Direction {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "previous" | "prev" | "last" => Ok(Direction::Previous),
            "next" => Ok(Direction::Next),
            _ => Err(NavError::InvalidOption(format!(
                "unknown direction '{}': expected 'previous' or 'next'",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Previous => f.write_str("previous"),
            Direction::Next => f.write_str("next"),
        }
    }
}

/// What time-of-day the result carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Keep the reference's local time-of-day.
    #[default]
    Preserve,
    /// Local midnight at the start of the found day.
    Start,
    /// The last local instant of the found day (23:59:59.999999999).
    End,
}

impl FromStr for Boundary {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "preserve" | "none" => Ok(Boundary::Preserve),
            "start" => Ok(Boundary::Start),
            "end" => Ok(Boundary::End),
            _ => Err(NavError::InvalidOption(format!(
                "unknown boundary '{}': expected 'preserve', 'start' or 'end'",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::Preserve => f.write_str("preserve"),
            Boundary::Start => f.write_str("start"),
            Boundary::End => f.write_str("end"),
        }
    }
}

/// Options for [`navigate`] and [`navigate_from`].
#[derive(Debug, Clone)]
pub struct NavigateOptions {
    pub direction: Direction,
    pub boundary: Boundary,
    /// IANA zone name or fixed offset the weekday is evaluated in.
    pub timezone: String,
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            boundary: Boundary::default(),
            timezone: "UTC".to_string(),
        }
    }
}

// ── navigate ────────────────────────────────────────────────────────────────

/// The result of navigating to a weekday.
#[derive(Debug, Clone, Serialize)]
pub struct NavigatedDatetime {
    /// The reference instant in UTC (RFC 3339).
    pub reference_utc: String,
    /// The reference instant in the navigation timezone (RFC 3339 with offset).
    pub reference_local: String,
    /// The resolved instant in UTC (RFC 3339).
    pub resolved_utc: String,
    /// The resolved instant in the navigation timezone (RFC 3339 with offset).
    pub resolved_local: String,
    /// The timezone the weekday was evaluated in.
    pub timezone: String,
    pub direction: Direction,
    pub boundary: Boundary,
    /// Full English name of the resolved weekday (e.g., "Friday").
    pub weekday: String,
    /// Local calendar days between reference and result (negative for previous).
    pub days_moved: i64,
}

/// Navigate from a datetime string to the previous or next `weekday`.
///
/// # Arguments
///
/// * `datetime` — RFC 3339 (`"2024-04-15T02:00:00Z"`), or a wall-clock
///   `YYYY-MM-DDTHH:MM[:SS[.fff]]` / `YYYY-MM-DD` read in `options.timezone`
/// * `weekday` — A weekday name, full or abbreviated, any case
/// * `options` — Direction, boundary and timezone
///
/// # Errors
///
/// Returns [`NavError::InvalidTimezone`], [`NavError::InvalidDatetime`] or
/// [`NavError::InvalidWeekday`] for inputs that cannot be parsed.
///
/// # Examples
///
/// ```
/// use weekday_nav::resolve::{navigate, Boundary, Direction, NavigateOptions};
///
/// let options = NavigateOptions {
///     direction: Direction::Previous,
///     boundary: Boundary::End,
///     timezone: "UTC".to_string(),
/// };
/// let result = navigate("2024-04-15", "sunday", &options).unwrap();
/// assert_eq!(result.resolved_utc, "2024-04-14T23:59:59.999999999+00:00");
/// assert_eq!(result.days_moved, -1);
/// ```
pub fn navigate(
    datetime: &str,
    weekday: &str,
    options: &NavigateOptions,
) -> Result<NavigatedDatetime> {
    let zone: Zone = options.timezone.parse()?;
    let anchor = parse_reference(datetime, &zone)?;
    navigate_in_zone(anchor, weekday, options, &zone)
}

/// Navigate from an explicit UTC anchor (typically `Utc::now()`).
///
/// # Errors
///
/// Returns [`NavError::InvalidTimezone`] or [`NavError::InvalidWeekday`].
pub fn navigate_from(
    anchor: DateTime<Utc>,
    weekday: &str,
    options: &NavigateOptions,
) -> Result<NavigatedDatetime> {
    let zone: Zone = options.timezone.parse()?;
    navigate_in_zone(anchor, weekday, options, &zone)
}

fn navigate_in_zone(
    anchor: DateTime<Utc>,
    weekday: &str,
    options: &NavigateOptions,
    zone: &Zone,
) -> Result<NavigatedDatetime> {
    let target = parse_weekday(weekday)?;

    tracing::debug!(
        direction = %options.direction,
        boundary = %options.boundary,
        timezone = %zone,
        anchor = %anchor,
        "navigating to {target}"
    );

    let resolved = match (options.direction, options.boundary) {
        (Direction::Previous, Boundary::Preserve) => {
            to_previous_tz_day_of_week(anchor, target, zone)?
        }
        (Direction::Next, Boundary::Preserve) => to_next_tz_day_of_week(anchor, target, zone)?,
        (Direction::Previous, Boundary::Start) => {
            to_start_of_previous_tz_day_of_week(anchor, target, zone)?
        }
        (Direction::Next, Boundary::Start) => {
            to_start_of_next_tz_day_of_week(anchor, target, zone)?
        }
        (Direction::Previous, Boundary::End) => {
            to_end_of_previous_tz_day_of_week(anchor, target, zone)?
        }
        (Direction::Next, Boundary::End) => to_end_of_next_tz_day_of_week(anchor, target, zone)?,
    };

    let reference_local = zone.localize(anchor);
    let resolved_local = zone.localize(resolved);
    let days_moved = (resolved_local.date_naive() - reference_local.date_naive()).num_days();

    Ok(NavigatedDatetime {
        reference_utc: format_rfc3339(&anchor),
        reference_local: format_rfc3339(&reference_local),
        resolved_utc: format_rfc3339(&resolved),
        resolved_local: format_rfc3339(&resolved_local),
        timezone: zone.to_string(),
        direction: options.direction,
        boundary: options.boundary,
        weekday: resolved_local.format("%A").to_string(),
        days_moved,
    })
}

// ── Parsing helpers ─────────────────────────────────────────────────────────

/// Parse a weekday name (case-insensitive, supports full and abbreviated).
pub fn parse_weekday(s: &str) -> Result<Weekday> {
    match s.trim().to_lowercase().as_str() {
        "monday" | "mon" => Ok(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Ok(Weekday::Tue),
        "wednesday" | "wed" => Ok(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Ok(Weekday::Thu),
        "friday" | "fri" => Ok(Weekday::Fri),
        "saturday" | "sat" => Ok(Weekday::Sat),
        "sunday" | "sun" => Ok(Weekday::Sun),
        _ => Err(NavError::InvalidWeekday(format!("'{}'", s.trim()))),
    }
}

/// Wall-clock formats accepted when the input carries no offset.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse the reference: RFC 3339 as-is, anything offset-free in `zone`.
fn parse_reference(s: &str, zone: &Zone) -> Result<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(START_OF_DAY))
        })
        .ok_or_else(|| {
            NavError::InvalidDatetime(format!(
                "'{}': expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD",
                s
            ))
        })?;

    zone.to_utc(naive)
}

/// RFC 3339 with sub-second digits only when non-zero.
fn format_rfc3339<T>(dt: &DateTime<T>) -> String
where
    T: chrono::TimeZone,
    T::Offset: fmt::Display,
{
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

// ── Tests ───────────────────────────────────────────────────────────────────
