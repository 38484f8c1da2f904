//! Time-zone descriptors and the UTC ↔ local conversion seam.
//!
//! The navigator never inspects a zone itself; it only asks a
//! [`ZoneConverter`] to move an instant into wall-clock time and back. That
//! keeps offset rules in `chrono-tz` and lets tests inject a fixed offset or
//! plain [`Utc`].
//!
//! # Local → UTC disambiguation
//!
//! - **Ambiguous** wall times (DST fall-back overlap) resolve to the earlier
//!   instant through [`ZoneConverter::to_utc`] and to the later one through
//!   [`ZoneConverter::to_utc_latest`]. End-of-day results use the latter so
//!   the repeated hour still belongs to the day.
//! - **Nonexistent** wall times (DST spring-forward gap) are read with the
//!   offset in effect before the gap, which lands on the same distance past
//!   the transition. This is the RFC 5545 / Temporal "compatible" rule.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{NavError, Result};

/// Converts between UTC instants and wall-clock time in some zone.
pub trait ZoneConverter {
    /// Express `utc` as wall-clock time in this zone.
    fn to_local(&self, utc: DateTime<Utc>) -> Result<NaiveDateTime>;

    /// Resolve the wall-clock time `local` in this zone to a UTC instant.
    /// An ambiguous `local` resolves to the earlier instant.
    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>>;

    /// Like [`to_utc`](Self::to_utc), but an ambiguous `local` resolves to
    /// the later instant. Zones without overlaps can keep the default.
    fn to_utc_latest(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.to_utc(local)
    }
}

impl ZoneConverter for Utc {
    fn to_local(&self, utc: DateTime<Utc>) -> Result<NaiveDateTime> {
        Ok(utc.naive_utc())
    }

    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        Ok(local.and_utc())
    }
}

impl ZoneConverter for FixedOffset {
    fn to_local(&self, utc: DateTime<Utc>) -> Result<NaiveDateTime> {
        Ok(utc.with_timezone(self).naive_local())
    }

    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        Ok(local_to_utc(self, local, Overlap::Earliest))
    }
}

impl ZoneConverter for Tz {
    fn to_local(&self, utc: DateTime<Utc>) -> Result<NaiveDateTime> {
        Ok(utc.with_timezone(self).naive_local())
    }

    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        Ok(local_to_utc(self, local, Overlap::Earliest))
    }

    fn to_utc_latest(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        Ok(local_to_utc(self, local, Overlap::Latest))
    }
}

/// A raw descriptor is parsed on every call; an unknown name is the
/// invalid-timezone error.
impl ZoneConverter for str {
    fn to_local(&self, utc: DateTime<Utc>) -> Result<NaiveDateTime> {
        self.parse::<Zone>()?.to_local(utc)
    }

    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.parse::<Zone>()?.to_utc(local)
    }

    fn to_utc_latest(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        self.parse::<Zone>()?.to_utc_latest(local)
    }
}

// ── Zone ────────────────────────────────────────────────────────────────────

/// A parsed time-zone descriptor: an IANA zone or a fixed UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// An IANA zone such as `America/New_York`.
    Named(Tz),
    /// A fixed offset such as `-05:00`.
    Fixed(FixedOffset),
}

impl Zone {
    /// `utc` as a datetime carrying this zone's offset at that instant.
    pub fn localize(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        match self {
            Zone::Named(tz) => utc.with_timezone(tz).fixed_offset(),
            Zone::Fixed(offset) => utc.with_timezone(offset),
        }
    }
}

impl FromStr for Zone {
    type Err = NavError;

    /// Accepts IANA names (`Europe/Paris`, `UTC`), `Z`, and fixed offsets in
    /// `±HH`, `±HHMM` or `±HH:MM` form.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("z") {
            return Ok(Zone::Named(Tz::UTC));
        }
        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            return parse_fixed_offset(trimmed)
                .map(Zone::Fixed)
                .ok_or_else(|| NavError::InvalidTimezone(format!("'{}'", s)));
        }
        trimmed
            .parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| NavError::InvalidTimezone(format!("'{}'", s)))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl ZoneConverter for Zone {
    fn to_local(&self, utc: DateTime<Utc>) -> Result<NaiveDateTime> {
        match self {
            Zone::Named(tz) => tz.to_local(utc),
            Zone::Fixed(offset) => offset.to_local(utc),
        }
    }

    fn to_utc(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        match self {
            Zone::Named(tz) => tz.to_utc(local),
            Zone::Fixed(offset) => offset.to_utc(local),
        }
    }

    fn to_utc_latest(&self, local: NaiveDateTime) -> Result<DateTime<Utc>> {
        match self {
            Zone::Named(tz) => tz.to_utc_latest(local),
            Zone::Fixed(offset) => offset.to_utc(local),
        }
    }
}

// ── Internal helpers ────────────────────────────────────────────────────────

/// Which instant an ambiguous wall time picks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlap {
    Earliest,
    Latest,
}

fn local_to_utc<T: TimeZone>(tz: &T, local: NaiveDateTime, overlap: Overlap) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, latest) => match overlap {
            Overlap::Earliest => earliest.with_timezone(&Utc),
            Overlap::Latest => latest.with_timezone(&Utc),
        },
        LocalResult::None => {
            // Gaps are far shorter than a day, so the offset a day earlier is
            // the one in effect right before the transition.
            let day_before = local - chrono::Duration::days(1);
            let before = tz.offset_from_utc_datetime(&day_before).fix();
            (local - chrono::Duration::seconds(before.local_minus_utc() as i64)).and_utc()
        }
    }
}

/// Parse `±HH`, `±HHMM` or `±HH:MM` into a fixed offset.
fn parse_fixed_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1, &s[1..]),
        Some(b'-') => (-1, &s[1..]),
        _ => return None,
    };

    if !rest.is_ascii() {
        return None;
    }
    let (hh, mm) = match rest.len() {
        2 => (rest, "00"),
        4 => (&rest[..2], &rest[2..]),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = (hh.parse::<i32>().ok()?, mm.parse::<i32>().ok()?);
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    // ── parsing ─────────────────────────────────────────────────────────

    #[test]
    fn test_parse_iana_name() {
        let zone: Zone = "America/New_York".parse().unwrap();
        assert_eq!(zone, Zone::Named(Tz::America__New_York));
        assert_eq!(zone.to_string(), "America/New_York");
    }

    #[test]
    fn test_parse_utc_aliases() {
        assert_eq!("UTC".parse::<Zone>().unwrap(), Zone::Named(Tz::UTC));
        assert_eq!("Z".parse::<Zone>().unwrap(), Zone::Named(Tz::UTC));
    }

    #[test]
    fn test_parse_fixed_offsets() {
        let expected = FixedOffset::west_opt(5 * 3600).unwrap();
        assert_eq!("-05:00".parse::<Zone>().unwrap(), Zone::Fixed(expected));
        assert_eq!("-0500".parse::<Zone>().unwrap(), Zone::Fixed(expected));
        assert_eq!("-05".parse::<Zone>().unwrap(), Zone::Fixed(expected));

        let india = FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap();
        assert_eq!("+05:30".parse::<Zone>().unwrap(), Zone::Fixed(india));
        assert_eq!(Zone::Fixed(india).to_string(), "+05:30");
    }

    #[test]
    fn test_parse_invalid_zone_returns_error() {
        let err = "Invalid/Zone".parse::<Zone>().unwrap_err();
        assert_eq!(err, NavError::InvalidTimezone("'Invalid/Zone'".to_string()));
        assert!(err.to_string().contains("Invalid timezone"), "got: {err}");
    }

    #[test]
    fn test_parse_malformed_offsets_return_error() {
        let malformed = [
            "+5", "+24:00", "-05:60", "+05:3", "+0:530", "+ab:cd", "-", "+05::30", "+05:30:",
            "+0530:", "+:0530",
        ];
        for bad in malformed {
            assert!(bad.parse::<Zone>().is_err(), "accepted {bad}");
        }
    }

    // ── conversion ──────────────────────────────────────────────────────

    #[test]
    fn test_utc_is_identity() {
        let instant = utc(2024, 4, 15, 2, 0);
        let local = Utc.to_local(instant).unwrap();
        assert_eq!(local, naive(2024, 4, 15, 2, 0));
        assert_eq!(Utc.to_utc(local).unwrap(), instant);
    }

    #[test]
    fn test_fixed_offset_shifts_calendar_date() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let local = minus_five.to_local(utc(2024, 4, 15, 2, 0)).unwrap();
        assert_eq!(local, naive(2024, 4, 14, 21, 0));
        assert_eq!(minus_five.to_utc(local).unwrap(), utc(2024, 4, 15, 2, 0));
    }

    #[test]
    fn test_named_zone_round_trip_in_summer() {
        let tz = Tz::America__New_York;
        // July is EDT (UTC-4)
        let local = tz.to_local(utc(2026, 7, 15, 12, 0)).unwrap();
        assert_eq!(local, naive(2026, 7, 15, 8, 0));
        assert_eq!(tz.to_utc(local).unwrap(), utc(2026, 7, 15, 12, 0));
    }

    #[test]
    fn test_ambiguous_local_time_resolves_to_earlier_instant() {
        // November 1, 2026: New York falls back 2:00 → 1:00, so 1:30 happens twice
        let resolved = Tz::America__New_York.to_utc(naive(2026, 11, 1, 1, 30)).unwrap();
        // First 1:30 is still EDT (UTC-4)
        assert_eq!(resolved, utc(2026, 11, 1, 5, 30));
    }

    #[test]
    fn test_ambiguous_local_time_latest_picks_later_instant() {
        let tz = Tz::America__New_York;
        // Second 1:30 is EST (UTC-5)
        assert_eq!(tz.to_utc_latest(naive(2026, 11, 1, 1, 30)).unwrap(), utc(2026, 11, 1, 6, 30));
        // Unambiguous times are unaffected
        assert_eq!(tz.to_utc_latest(naive(2026, 7, 15, 8, 0)).unwrap(), utc(2026, 7, 15, 12, 0));

        let zone = Zone::Named(Tz::America__Sao_Paulo);
        // February 18, 2018: São Paulo fell back 00:00 → 23:00 on the 17th
        assert_eq!(zone.to_utc(naive(2018, 2, 17, 23, 30)).unwrap(), utc(2018, 2, 18, 1, 30));
        assert_eq!(
            zone.to_utc_latest(naive(2018, 2, 17, 23, 30)).unwrap(),
            utc(2018, 2, 18, 2, 30)
        );
    }

    #[test]
    fn test_nonexistent_local_time_shifts_past_gap() {
        // March 8, 2026: New York springs forward 2:00 → 3:00, 2:30 never happens
        let resolved = Tz::America__New_York.to_utc(naive(2026, 3, 8, 2, 30)).unwrap();
        // Read with the pre-gap EST offset: 2:30-05:00 = 7:30Z = 3:30 EDT
        assert_eq!(resolved, utc(2026, 3, 8, 7, 30));
    }

    #[test]
    fn test_midnight_gap_resolves_to_first_instant_of_day() {
        // November 4, 2018: São Paulo skipped 00:00 → 01:00
        let resolved = Tz::America__Sao_Paulo.to_utc(naive(2018, 11, 4, 0, 0)).unwrap();
        assert_eq!(resolved, utc(2018, 11, 4, 3, 0));
    }

    #[test]
    fn test_str_descriptor_propagates_invalid_timezone() {
        let err = "Mars/Olympus_Mons".to_local(utc(2024, 4, 15, 0, 0)).unwrap_err();
        assert!(matches!(err, NavError::InvalidTimezone(_)));

        let err = "Mars/Olympus_Mons".to_utc(naive(2024, 4, 15, 0, 0)).unwrap_err();
        assert!(matches!(err, NavError::InvalidTimezone(_)));
    }

    #[test]
    fn test_localize_tracks_dst() {
        let zone = Zone::Named(Tz::America__New_York);
        let winter = zone.localize(utc(2026, 1, 15, 12, 0));
        let summer = zone.localize(utc(2026, 7, 15, 12, 0));
        assert_eq!(winter.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(summer.offset().local_minus_utc(), -4 * 3600);
        assert_eq!(summer.naive_local(), naive(2026, 7, 15, 8, 0));
    }
}
