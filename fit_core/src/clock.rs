//! Wall-clock access and the display labels derived from it.
//!
//! The store compares calendar-day labels rather than timestamps, so the
//! label formats here are part of the persisted record format.

use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of "now" for the store and the live session
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Calendar-day label stored as `lastUpdateDate`, e.g. `Mon Jan 01 2024`
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Clock-time label attached to log entries, e.g. `07:45`
pub fn time_label(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Short date label used for weight and media entries, e.g. `Jan 1`
pub fn short_date_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

/// Date label used on workout history, e.g. `Jan 1, 2024`
pub fn history_date_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
