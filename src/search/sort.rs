//! Sort policy resolution.
//!
//! Sorting is stable: trips with equal keys keep their store order in both
//! directions, so repeated searches page through the same sequence.

use std::cmp::Ordering;
use crate::models::Trip;

/// Field a search can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    Distance,
    Duration,
    Fare,
    #[default]
    RequestDate,
}

impl SortKey {
    /// Resolves a client-supplied key, case-insensitively. Anything
    /// unrecognised orders by request date.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "distance" => SortKey::Distance,
            "duration" => SortKey::Duration,
            "fare" => SortKey::Fare,
            "requestdate" => SortKey::RequestDate,
            other => {
                log::debug!("Unrecognised sort key {:?}, ordering by request date", other);
                SortKey::RequestDate
            }
        }
    }
}

/// A resolved ordering over trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPolicy {
    pub key: SortKey,
    pub descending: bool,
}

impl SortPolicy {
    pub fn new(sort_by: &str, descending: bool) -> Self {
        Self {
            key: SortKey::parse(sort_by),
            descending,
        }
    }

    /// Compares two trips under this policy.
    pub fn compare(&self, a: &Trip, b: &Trip) -> Ordering {
        let ordering = match self.key {
            SortKey::Distance => a.distance_km.total_cmp(&b.distance_km),
            SortKey::Duration => a.duration_minutes.cmp(&b.duration_minutes),
            SortKey::Fare => a.fare.cmp(&b.fare),
            SortKey::RequestDate => a.request_date.cmp(&b.request_date),
        };
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Sorts trips in place. Equal keys keep their relative order.
    pub fn apply(&self, trips: &mut [Trip]) {
        trips.sort_by(|a, b| self.compare(a, b));
    }
}

impl Default for SortPolicy {
    fn default() -> Self {
        Self {
            key: SortKey::RequestDate,
            descending: true,
        }
    }
}
