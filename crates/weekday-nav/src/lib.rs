//! # weekday-nav
//!
//! Deterministic day-of-week navigation.
//!
//! Finds the nearest previous or next occurrence of a weekday relative to a
//! reference date, optionally snapped to the start or end of that day, and
//! optionally evaluated in a time zone's wall-clock time. Every function is
//! pure: inputs are taken by value and nothing reads the system clock.
//!
//! ## Modules
//!
//! - [`navigator`] — previous/next weekday, start/end-of-day and timezone-aware variants
//! - [`boundary`] — Start-of-day and end-of-day primitives
//! - [`zone`] — Timezone descriptors and the UTC ↔ local conversion trait
//! - [`resolve`] — String inputs → serializable navigation results
//! - [`error`] — Error types

pub mod boundary;
pub mod error;
pub mod navigator;
pub mod resolve;
pub mod zone;

pub use boundary::{end_of_day, start_of_day, END_OF_DAY, START_OF_DAY};
pub use error::NavError;
pub use navigator::{
    days_to_next, days_to_previous, to_end_of_next_day_of_week, to_end_of_next_tz_day_of_week,
    to_end_of_previous_day_of_week, to_end_of_previous_tz_day_of_week, to_next_day_of_week,
    to_next_tz_day_of_week, to_previous_day_of_week, to_previous_tz_day_of_week,
    to_start_of_next_day_of_week, to_start_of_next_tz_day_of_week,
    to_start_of_previous_day_of_week, to_start_of_previous_tz_day_of_week,
};
pub use resolve::{
    navigate, navigate_from, parse_weekday, Boundary, Direction, NavigateOptions,
    NavigatedDatetime,
};
pub use zone::{Zone, ZoneConverter};
