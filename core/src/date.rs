// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Calendar date helpers shared by the store and the front ends.
//!
//! Months are addressed by a 0-based `month_index` (January = 0). Any integer is
//! accepted and rolls over into neighbouring years, so `(2024, 12)` is January 2025
//! and `(2024, -1)` is December 2023.

use chrono::{Datelike, Local, NaiveDate, NaiveTime};

/// NOTE: Used as the key of the event store, so it must be stable across runs.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// NOTE: Used for the stored start / end time of events.
pub const TIME_FORMAT: &str = "%H:%M";

/// Short weekday names, starting from Sunday.
pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Folds an overflowing month index into `(year, month_index)` with `month_index` in `0..12`.
pub fn normalize_month(year: i32, month_index: i32) -> (i32, u32) {
    let year = year.saturating_add(month_index.div_euclid(12));
    (year, month_index.rem_euclid(12) as u32)
}

/// Moves `delta` months forward (or backward when negative) from the given month.
pub fn shift_month(year: i32, month_index: u32, delta: i32) -> (i32, u32) {
    normalize_month(year, (month_index as i32).saturating_add(delta))
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in the month, after normalizing the month index.
pub fn days_in_month(year: i32, month_index: i32) -> u32 {
    let (year, month_index) = normalize_month(year, month_index);
    match month_index {
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        3 | 5 | 8 | 10 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Weekday of the first day of the month, 0 = Sunday through 6 = Saturday.
pub fn first_weekday_of_month(year: i32, month_index: i32) -> u32 {
    let (year, month_index) = normalize_month(year, month_index);
    match NaiveDate::from_ymd_opt(year, month_index + 1, 1) {
        Some(date) => date.weekday().num_days_from_sunday(),
        None => {
            tracing::warn!(year, month_index, "month out of the supported date range");
            0
        }
    }
}

/// Formats a calendar date as the canonical `YYYY-MM-DD` store key.
///
/// The date is taken as-is from its calendar fields, it is never shifted through UTC.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Parses a canonical `YYYY-MM-DD` key back into a date.
///
/// Unpadded input such as `2024-3-5` is rejected, it would never be a store key.
pub fn parse_date(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == key)
}

/// Parses a stored, zero-padded `HH:MM` time.
pub fn parse_time(hhmm: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(hhmm, TIME_FORMAT)
        .ok()
        .filter(|time| time.format(TIME_FORMAT).to_string() == hhmm)
}

/// Human readable form of a stored `HH:MM` time, e.g. `09:00` becomes `9:00 AM`.
///
/// Values that are not valid times are returned unchanged.
pub fn format_time(hhmm: &str) -> String {
    match parse_time(hhmm) {
        Some(time) => time.format("%-I:%M %p").to_string(),
        None => hhmm.to_string(),
    }
}

/// English name of the month, `month_index` is normalized first.
pub fn month_name(month_index: i32) -> &'static str {
    let (_, month_index) = normalize_month(0, month_index);
    MONTH_NAMES[month_index as usize]
}

/// The current date in the local calendar.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
