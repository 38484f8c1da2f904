//! Day-of-week navigation.
//!
//! Three layers, each a strict composition of the one before:
//!
//! 1. **Base**: [`to_previous_day_of_week`] / [`to_next_day_of_week`] move a
//!    reference date to the nearest earlier or later occurrence of a weekday,
//!    keeping its time-of-day.
//! 2. **Boundary**: the `to_start_of_*` / `to_end_of_*` functions pipe the
//!    base result through [`start_of_day`] or [`end_of_day`].
//! 3. **Time zone**: the `*_tz_*` functions take a UTC instant, run layer 1
//!    or 2 on the wall-clock time of a zone, and convert the result back to
//!    UTC. An end-of-day that falls in a DST overlap takes the later of its
//!    two instants, so the repeated hour still belongs to the day.
//!
//! # Same-weekday rule
//!
//! A reference that already falls on the target weekday always moves a full
//! week. "Previous Monday" from a Monday is seven days earlier, never the
//! reference itself, so every result is 1 to 7 days away.
//!
//! # Examples
//!
//! ```
//! use chrono::{NaiveDate, Weekday};
//! use weekday_nav::navigator::{to_next_day_of_week, to_previous_day_of_week};
//!
//! let monday = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();
//! assert_eq!(
//!     to_previous_day_of_week(monday, Weekday::Fri),
//!     NaiveDate::from_ymd_opt(2024, 4, 12).unwrap()
//! );
//! assert_eq!(
//!     to_next_day_of_week(monday, Weekday::Mon),
//!     NaiveDate::from_ymd_opt(2024, 4, 22).unwrap()
//! );
//! ```

use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, Utc, Weekday};

use crate::boundary::{end_of_day, start_of_day};
use crate::error::Result;
use crate::zone::ZoneConverter;

// ── Distances ───────────────────────────────────────────────────────────────

/// Days back from `from` to the previous `target`, always in `1..=7`.
pub fn days_to_previous(from: Weekday, target: Weekday) -> i64 {
    let diff =
        (from.num_days_from_sunday() as i64 - target.num_days_from_sunday() as i64 + 7) % 7;
    if diff == 0 {
        7
    } else {
        diff
    }
}

/// Days forward from `from` to the next `target`, always in `1..=7`.
pub fn days_to_next(from: Weekday, target: Weekday) -> i64 {
    let diff =
        (target.num_days_from_sunday() as i64 - from.num_days_from_sunday() as i64 + 7) % 7;
    if diff == 0 {
        7
    } else {
        diff
    }
}

// ── Base navigation ─────────────────────────────────────────────────────────

/// The nearest `target` weekday strictly before `reference`.
///
/// Works for `NaiveDate`, `NaiveDateTime` and `DateTime<Tz>`; the
/// time-of-day is preserved.
///
/// # Panics
///
/// Only if the result falls outside chrono's representable range, like any
/// chrono `- Duration` arithmetic.
pub fn to_previous_day_of_week<D>(reference: D, target: Weekday) -> D
where
    D: Datelike + Sub<Duration, Output = D>,
{
    let days = days_to_previous(reference.weekday(), target);
    reference - Duration::days(days)
}

/// The nearest `target` weekday strictly after `reference`.
///
/// # Panics
///
/// Only if the result falls outside chrono's representable range.
pub fn to_next_day_of_week<D>(reference: D, target: Weekday) -> D
where
    D: Datelike + Add<Duration, Output = D>,
{
    let days = days_to_next(reference.weekday(), target);
    reference + Duration::days(days)
}

// ── Boundary-normalized navigation ──────────────────────────────────────────

/// Midnight at the start of the previous `target` weekday.
pub fn to_start_of_previous_day_of_week(
    reference: NaiveDateTime,
    target: Weekday,
) -> NaiveDateTime {
    start_of_day(to_previous_day_of_week(reference, target))
}

/// Midnight at the start of the next `target` weekday.
pub fn to_start_of_next_day_of_week(
    reference: NaiveDateTime,
    target: Weekday,
) -> NaiveDateTime {
    start_of_day(to_next_day_of_week(reference, target))
}

/// The last instant of the previous `target` weekday.
pub fn to_end_of_previous_day_of_week(
    reference: NaiveDateTime,
    target: Weekday,
) -> NaiveDateTime {
    end_of_day(to_previous_day_of_week(reference, target))
}

/// The last instant of the next `target` weekday.
pub fn to_end_of_next_day_of_week(
    reference: NaiveDateTime,
    target: Weekday,
) -> NaiveDateTime {
    end_of_day(to_next_day_of_week(reference, target))
}

// ── Time-zone-aware navigation ──────────────────────────────────────────────

/// Previous `target` weekday in `zone`'s wall-clock time, keeping the local
/// time-of-day, returned as UTC.
///
/// # Errors
///
/// Propagates the zone's conversion error unchanged (for a `str` descriptor,
/// [`NavError::InvalidTimezone`](crate::NavError::InvalidTimezone)).
pub fn to_previous_tz_day_of_week<Z>(
    utc: DateTime<Utc>,
    target: Weekday,
    zone: &Z,
) -> Result<DateTime<Utc>>
where
    Z: ZoneConverter + ?Sized,
{
    in_local_time(utc, zone, |local| to_previous_day_of_week(local, target))
}

/// Next `target` weekday in `zone`'s wall-clock time, keeping the local
/// time-of-day, returned as UTC.
pub fn to_next_tz_day_of_week<Z>(
    utc: DateTime<Utc>,
    target: Weekday,
    zone: &Z,
) -> Result<DateTime<Utc>>
where
    Z: ZoneConverter + ?Sized,
{
    in_local_time(utc, zone, |local| to_next_day_of_week(local, target))
}

/// Local midnight starting the previous `target` weekday, as UTC.
///
/// ```
/// use chrono::{FixedOffset, TimeZone, Utc, Weekday};
/// use weekday_nav::navigator::to_start_of_previous_tz_day_of_week;
///
/// // 02:00 UTC on Monday is still Sunday evening at UTC-5.
/// let utc = Utc.with_ymd_and_hms(2024, 4, 15, 2, 0, 0).unwrap();
/// let zone = FixedOffset::west_opt(5 * 3600).unwrap();
/// let result = to_start_of_previous_tz_day_of_week(utc, Weekday::Sun, &zone).unwrap();
/// // Previous Sunday from local Sunday 2024-04-14 is 2024-04-07, midnight local.
/// assert_eq!(result, Utc.with_ymd_and_hms(2024, 4, 7, 5, 0, 0).unwrap());
/// ```
pub fn to_start_of_previous_tz_day_of_week<Z>(
    utc: DateTime<Utc>,
    target: Weekday,
    zone: &Z,
) -> Result<DateTime<Utc>>
where
    Z: ZoneConverter + ?Sized,
{
    in_local_time(utc, zone, |local| to_start_of_previous_day_of_week(local, target))
}

/// Local midnight starting the next `target` weekday, as UTC.
pub fn to_start_of_next_tz_day_of_week<Z>(
    utc: DateTime<Utc>,
    target: Weekday,
    zone: &Z,
) -> Result<DateTime<Utc>>
where
    Z: ZoneConverter + ?Sized,
{
    in_local_time(utc, zone, |local| to_start_of_next_day_of_week(local, target))
}

/// The last local instant of the previous `target` weekday, as UTC.
pub fn to_end_of_previous_tz_day_of_week<Z>(
    utc: DateTime<Utc>,
    target: Weekday,
    zone: &Z,
) -> Result<DateTime<Utc>>
where
    Z: ZoneConverter + ?Sized,
{
    let local = zone.to_local(utc)?;
    zone.to_utc_latest(to_end_of_previous_day_of_week(local, target))
}

/// The last local instant of the next `target` weekday, as UTC.
pub fn to_end_of_next_tz_day_of_week<Z>(
    utc: DateTime<Utc>,
    target: Weekday,
    zone: &Z,
) -> Result<DateTime<Utc>>
where
    Z: ZoneConverter + ?Sized,
{
    let local = zone.to_local(utc)?;
    zone.to_utc_latest(to_end_of_next_day_of_week(local, target))
}

/// Run `f` on the wall-clock time of `utc` in `zone` and convert back.
fn in_local_time<Z, F>(utc: DateTime<Utc>, zone: &Z, f: F) -> Result<DateTime<Utc>>
where
    Z: ZoneConverter + ?Sized,
    F: FnOnce(NaiveDateTime) -> NaiveDateTime,
{
    let local = zone.to_local(utc)?;
    zone.to_utc(f(local))
}

// ── Tests ───────────────────────────────────────────────────────────────────
