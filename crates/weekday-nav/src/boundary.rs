//! Day-boundary primitives.
//!
//! Both functions work on wall-clock time (`NaiveDateTime`): the calendar
//! date is kept and only the time-of-day is replaced. Time-zone handling is
//! layered on top by [`crate::navigator`], which converts to local time
//! before normalizing.
//!
//! # End-of-day precision
//!
//! The end of a day is `23:59:59.999999999`, the last non-leap instant chrono
//! can represent before the following midnight. Round-trip equality against
//! [`END_OF_DAY`] is therefore exact.

use chrono::{NaiveDateTime, NaiveTime};

/// `00:00:00.000000000`
pub const START_OF_DAY: NaiveTime = NaiveTime::MIN;

/// `23:59:59.999999999`
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999) {
    Some(t) => t,
    None => panic!("23:59:59.999999999 is a valid time"),
};

/// The earliest instant on the calendar date of `dt`.
pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(START_OF_DAY)
}

/// The latest representable instant on the calendar date of `dt`.
pub fn end_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(END_OF_DAY)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Timelike};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_start_of_day_clears_time() {
        let result = start_of_day(at(2024, 4, 15, 17, 42, 9));
        assert_eq!(result, at(2024, 4, 15, 0, 0, 0));
        assert_eq!(result.nanosecond(), 0);
    }

    #[test]
    fn test_start_of_day_is_idempotent() {
        let once = start_of_day(at(2024, 4, 15, 8, 0, 0));
        assert_eq!(start_of_day(once), once);
    }

    #[test]
    fn test_end_of_day_keeps_date() {
        let result = end_of_day(at(2024, 4, 15, 0, 0, 0));
        assert_eq!(result.date(), NaiveDate::from_ymd_opt(2024, 4, 15).unwrap());
        assert_eq!(result.time(), END_OF_DAY);
    }

    #[test]
    fn test_end_of_day_is_one_nanosecond_before_midnight() {
        let end = end_of_day(at(2024, 2, 28, 12, 0, 0));
        assert_eq!(end + Duration::nanoseconds(1), at(2024, 2, 29, 0, 0, 0));
    }

    #[test]
    fn test_end_of_day_precision() {
        assert_eq!(END_OF_DAY.hour(), 23);
        assert_eq!(END_OF_DAY.minute(), 59);
        assert_eq!(END_OF_DAY.second(), 59);
        assert_eq!(END_OF_DAY.nanosecond(), 999_999_999);
    }
}
