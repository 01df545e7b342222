// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for dates and ages.

use chrono::{Datelike, Month, NaiveDate, SecondsFormat, Utc};

/// Current UTC time as RFC3339 with a `Z` suffix.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Today's date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parse a month name ("March", "mar", case-insensitive).
pub fn parse_month(name: &str) -> Option<Month> {
    name.trim().parse::<Month>().ok()
}

/// Whole years of age on `today`.
///
/// Only the birth month is known, so the birthday counts as reached once
/// `today` is in or past that month. An unknown month skips the adjustment.
/// Never negative.
pub fn age_in_years(birth_month: Option<Month>, birth_year: i32, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth_year;
    if let Some(month) = birth_month {
        if today.month() < month.number_from_month() {
            age -= 1;
        }
    }
    age.max(0) as u32
}
