#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use time::macros::datetime;
use time::OffsetDateTime;
use trip_finder::models::{Car, DestinationCount, Driver, Location, Trip, TripStatus, TripType};
use trip_finder::service::TripService;
use trip_finder::store::{MemoryTripStore, StoreError, TripStore};

/// Create a completed Basic trip with a driver and car attached
pub fn test_trip(id: i64, request_date: OffsetDateTime) -> Trip {
    Trip {
        id,
        status: TripStatus::Completed,
        trip_type: TripType::Basic,
        request_date,
        pickup_date: request_date + time::Duration::minutes(5),
        dropoff_date: Some(request_date + time::Duration::minutes(30)),
        pickup_location: Some("Westlands".to_string()),
        pickup: Location { lat: -1.2676, lng: 36.8108 },
        dropoff_location: Some("Kilimani".to_string()),
        dropoff: Location { lat: -1.2921, lng: 36.7856 },
        distance_km: 4.5,
        duration_minutes: 25,
        fare: 500,
        driver: Some(Driver {
            id: 1,
            name: Some("Ann Wanjiru".to_string()),
            rating: 4.7,
            picture_url: None,
        }),
        car: Some(Car {
            id: 1,
            number: Some("KDA 123A".to_string()),
            make: Some("Toyota".to_string()),
            model: Some("Vitz".to_string()),
            year: 2018,
            picture_url: None,
            driver_id: Some(1),
        }),
    }
}

/// A small, varied data set: 8 completed, 3 cancelled, 1 in progress
pub fn sample_trips() -> Vec<Trip> {
    let base = datetime!(2025-01-10 08:00 UTC);
    let mut trips = Vec::new();

    for i in 0..12i64 {
        let mut trip = test_trip(i + 1, base + time::Duration::days(i * 9));
        trip.distance_km = 2.0 + (i as f64) * 3.5;
        trip.duration_minutes = 10 + (i as u32) * 7;
        trip.fare = 300 + (i % 4) * 250;
        trips.push(trip);
    }

    trips[2].status = TripStatus::Cancelled;
    trips[5].status = TripStatus::Cancelled;
    trips[9].status = TripStatus::Cancelled;
    trips[11].status = TripStatus::InProgress;

    trips[3].trip_type = TripType::HavaXL;
    trips[4].pickup_location = Some("Karen".to_string());
    trips[6].pickup_location = Some("Karen".to_string());
    trips[7].pickup_location = Some("Upper Hill".to_string());

    if let Some(car) = trips[8].car.as_mut() {
        car.make = Some("Mazda".to_string());
        car.model = Some("Demio".to_string());
    }
    if let Some(driver) = trips[10].driver.as_mut() {
        driver.name = Some("Brian Otieno".to_string());
    }

    trips
}

pub fn memory_service(trips: Vec<Trip>) -> TripService {
    TripService::new(Arc::new(MemoryTripStore::new(trips)), None)
}

/// Store whose every read fails
pub struct FailingStore;

#[async_trait::async_trait]
impl TripStore for FailingStore {
    async fn fetch_all(&self) -> Result<Vec<Trip>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn fetch_newest(&self, _count: usize) -> Result<Vec<Trip>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn fetch_destination_counts(&self, _top: usize) -> Result<Vec<DestinationCount>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn fetch_by_id(&self, _id: i64) -> Result<Option<Trip>, StoreError> {
        Err(StoreError::Corrupt("bad row".to_string()))
    }

    fn size(&self) -> usize {
        0
    }
}

/// Store that answers after a fixed delay
pub struct SlowStore {
    pub inner: MemoryTripStore,
    pub delay: Duration,
}

#[async_trait::async_trait]
impl TripStore for SlowStore {
    async fn fetch_all(&self) -> Result<Vec<Trip>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_all().await
    }

    async fn fetch_newest(&self, count: usize) -> Result<Vec<Trip>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_newest(count).await
    }

    async fn fetch_destination_counts(&self, top: usize) -> Result<Vec<DestinationCount>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_destination_counts(top).await
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Trip>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch_by_id(id).await
    }

    fn size(&self) -> usize {
        self.inner.size()
    }
}
