// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use crate::error::{Result, SyncError};
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// The day to sync: the calendar day before `today`.
///
/// `None` when `today` is the earliest date chrono can represent.
pub fn previous_day(today: NaiveDate) -> Option<NaiveDate> {
    today.pred_opt()
}

/// Parse a strict "HH:MM:SS" time of day.
pub fn parse_time_of_day(time: &str) -> Result<NaiveTime> {
    let malformed = |reason: &str| SyncError::MalformedSample {
        time: time.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = time.split(':').collect();
    if parts.len() != 3 {
        return Err(malformed("expected HH:MM:SS"));
    }

    let mut hms = [0u32; 3];
    for (slot, part) in hms.iter_mut().zip(&parts) {
        if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed("non-numeric component"));
        }
        *slot = part.parse().map_err(|_| malformed("component too large"))?;
    }

    NaiveTime::from_hms_opt(hms[0], hms[1], hms[2]).ok_or_else(|| malformed("out of range"))
}

/// Combine a calendar date with a sample's time of day, interpreted as UTC.
pub fn sample_timestamp(date: NaiveDate, time: &str) -> Result<DateTime<Utc>> {
    let time = parse_time_of_day(time)?;
    Ok(date.and_time(time).and_utc())
}
