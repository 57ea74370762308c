//! Filter predicate built from a [`SearchRequest`].
//!
//! Each optional clause is resolved once up front; a trip passes when it
//! satisfies every clause that is present.

use crate::models::{DistanceRange, DurationRange, SearchRequest, StatusFilter, Trip, TripStatus};

/// Compiled filter clauses for one search.
#[derive(Debug, Clone, PartialEq)]
pub struct TripFilter {
    status: StatusFilter,
    /// Lowercased, trimmed keyword. `None` when the query is blank.
    keyword: Option<String>,
    distance: Option<DistanceRange>,
    duration: Option<DurationRange>,
}

impl TripFilter {
    pub fn from_request(request: &SearchRequest) -> Self {
        let keyword = request.q.trim();
        Self {
            status: request.status_filter(),
            keyword: (!keyword.is_empty()).then(|| keyword.to_lowercase()),
            distance: request.distance,
            duration: request.duration,
        }
    }

    /// Returns true when the trip satisfies every clause of this filter.
    pub fn matches(&self, trip: &Trip) -> bool {
        self.matches_status(trip)
            && self.matches_keyword(trip)
            && self.matches_distance(trip)
            && self.matches_duration(trip)
    }

    /// Consumes the filter and returns it as a plain predicate.
    pub fn into_predicate(self) -> impl Fn(&Trip) -> bool {
        move |trip| self.matches(trip)
    }

    fn matches_status(&self, trip: &Trip) -> bool {
        match self.status {
            StatusFilter::All => true,
            StatusFilter::Completed => trip.status == TripStatus::Completed,
            StatusFilter::Cancelled => trip.status == TripStatus::Cancelled,
        }
    }

    fn matches_keyword(&self, trip: &Trip) -> bool {
        let Some(term) = self.keyword.as_deref() else {
            return true;
        };

        let driver = trip.driver.as_ref();
        let car = trip.car.as_ref();
        let fields = [
            trip.pickup_location.as_deref(),
            trip.dropoff_location.as_deref(),
            Some(trip.trip_type.display_name()),
            driver.and_then(|d| d.name.as_deref()),
            car.and_then(|c| c.number.as_deref()),
            car.and_then(|c| c.make.as_deref()),
            car.and_then(|c| c.model.as_deref()),
        ];

        fields
            .iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(term))
    }

    fn matches_distance(&self, trip: &Trip) -> bool {
        let km = trip.distance_km;
        match self.distance {
            None => true,
            Some(DistanceRange::Short) => km <= 5.0,
            Some(DistanceRange::Medium) => km > 5.0 && km <= 15.0,
            Some(DistanceRange::Long) => km > 15.0 && km <= 30.0,
            Some(DistanceRange::VeryLong) => km > 30.0,
        }
    }

    fn matches_duration(&self, trip: &Trip) -> bool {
        let minutes = trip.duration_minutes;
        match self.duration {
            None => true,
            Some(DurationRange::Quick) => minutes <= 15,
            Some(DurationRange::Medium) => minutes > 15 && minutes <= 30,
            Some(DurationRange::Long) => minutes > 30 && minutes <= 60,
            Some(DurationRange::VeryLong) => minutes > 60,
        }
    }
}
