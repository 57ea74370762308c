//! Monthly trip-count time series.
//!
//! Trips are bucketed by the UTC calendar month of their request date. The
//! series runs from the earliest month to the latest month with one entry per
//! month, so months without trips appear with a count of zero.

use std::collections::BTreeMap;
use time::{Date, Month, OffsetDateTime, UtcOffset};
use crate::models::{MonthlyTripCount, Trip};

/// Builds the gap-free monthly series for `trips`.
///
/// An empty input yields a single zero entry for the current UTC month.
pub fn monthly_series(trips: &[Trip]) -> Vec<MonthlyTripCount> {
    monthly_series_at(trips, OffsetDateTime::now_utc())
}

/// Same as [`monthly_series`] with an explicit clock for the empty case.
pub fn monthly_series_at(trips: &[Trip], now: OffsetDateTime) -> Vec<MonthlyTripCount> {
    let mut counts: BTreeMap<Date, usize> = BTreeMap::new();
    for trip in trips {
        let month = month_start(trip.request_date.to_offset(UtcOffset::UTC).date());
        *counts.entry(month).or_insert(0) += 1;
    }

    let current = month_start(now.to_offset(UtcOffset::UTC).date());
    let first = counts.keys().next().copied().unwrap_or(current);
    let last = counts.keys().next_back().copied().unwrap_or(current);

    let mut series = Vec::new();
    let mut cursor = first;
    while cursor <= last {
        series.push(MonthlyTripCount {
            date: cursor.midnight().assume_utc(),
            value: counts.get(&cursor).copied().unwrap_or(0),
        });

        let next = next_month(cursor);
        if next <= cursor {
            break;
        }
        cursor = next;
    }

    series
}

// Day 1 exists in every month, so the fallback is never taken
fn month_start(date: Date) -> Date {
    date.replace_day(1).unwrap_or(date)
}

// Returns `start` unchanged past the last representable year
fn next_month(start: Date) -> Date {
    let month = start.month().next();
    let year = if month == Month::January {
        start.year() + 1
    } else {
        start.year()
    };
    Date::from_calendar_date(year, month, 1).unwrap_or(start)
}
