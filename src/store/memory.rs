use std::collections::HashMap;
use std::sync::Arc;
use crate::models::{DestinationCount, Trip};
use crate::store::types::{StoreError, TripStore};

/// In-memory implementation of TripStore.
/// Trips are kept in a Vec protected by a RwLock, in the order they were loaded.
///
/// This implementation has the following characteristics:
/// - Thread-safe using Arc<RwLock<Vec>> to share state between clones
/// - Reads clone a snapshot out of the lock, so no lock is held across an await
/// - The whole data set can be swapped atomically with `replace_all`
pub struct MemoryTripStore {
    /// Thread-safe shared storage for trips
    trips: Arc<parking_lot::RwLock<Vec<Trip>>>,
}

impl Clone for MemoryTripStore {
    fn clone(&self) -> Self {
        // Clone just shares the Arc, so all clones see the same data
        Self {
            trips: self.trips.clone(),
        }
    }
}

impl MemoryTripStore {
    pub fn new(trips: Vec<Trip>) -> Self {
        log::info!("Creating MemoryTripStore with {} trips", trips.len());
        Self {
            trips: Arc::new(parking_lot::RwLock::new(trips)),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Replaces the stored trips with a new snapshot.
    pub fn replace_all(&self, trips: Vec<Trip>) {
        let mut stored = self.trips.write();
        log::info!("Replacing {} stored trips with {}", stored.len(), trips.len());
        *stored = trips;
    }

    pub fn len(&self) -> usize {
        self.trips.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.read().is_empty()
    }
}

impl Default for MemoryTripStore {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait::async_trait]
impl TripStore for MemoryTripStore {
    async fn fetch_all(&self) -> Result<Vec<Trip>, StoreError> {
        Ok(self.trips.read().clone())
    }

    async fn fetch_newest(&self, count: usize) -> Result<Vec<Trip>, StoreError> {
        let mut trips = self.trips.read().clone();
        trips.sort_by(|a, b| b.request_date.cmp(&a.request_date));
        trips.truncate(count);
        Ok(trips)
    }

    async fn fetch_destination_counts(&self, top: usize) -> Result<Vec<DestinationCount>, StoreError> {
        let trips = self.trips.read();

        // Groups keep first-appearance order so equal counts rank deterministically
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<DestinationCount> = Vec::new();
        for name in trips.iter().filter_map(|t| t.pickup_location.as_deref()) {
            match index.get(name) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(name, counts.len());
                    counts.push(DestinationCount {
                        destination: name.to_string(),
                        count: 1,
                    });
                }
            }
        }

        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(top);
        Ok(counts)
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<Trip>, StoreError> {
        Ok(self.trips.read().iter().find(|t| t.id == id).cloned())
    }

    fn size(&self) -> usize {
        self.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, TripStatus, TripType};
    use time::macros::datetime;
    use time::OffsetDateTime;

    fn trip(id: i64, pickup: Option<&str>, request_date: OffsetDateTime) -> Trip {
        Trip {
            id,
            status: TripStatus::Completed,
            trip_type: TripType::Basic,
            request_date,
            pickup_date: request_date,
            dropoff_date: None,
            pickup_location: pickup.map(str::to_string),
            pickup: Location::default(),
            dropoff_location: Some("Kisumu".to_string()),
            dropoff: Location::default(),
            distance_km: 10.0,
            duration_minutes: 20,
            fare: 500,
            driver: None,
            car: None,
        }
    }

    fn seeded() -> MemoryTripStore {
        MemoryTripStore::new(vec![
            trip(1, Some("Nairobi"), datetime!(2025-01-01 08:00 UTC)),
            trip(2, Some("Mombasa"), datetime!(2025-01-02 08:00 UTC)),
            trip(3, Some("Nairobi"), datetime!(2025-01-03 08:00 UTC)),
            trip(4, None, datetime!(2025-01-04 08:00 UTC)),
            trip(5, Some("Kisumu"), datetime!(2025-01-02 08:00 UTC)),
        ])
    }

    #[tokio::test]
    async fn test_fetch_all_returns_store_order() {
        let store = seeded();
        let ids: Vec<i64> = store.fetch_all().await.unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(store.size(), 5);
    }

    #[tokio::test]
    async fn test_fetch_newest_orders_descending_and_limits() {
        let store = seeded();
        let newest = store.fetch_newest(3).await.unwrap();
        let ids: Vec<i64> = newest.iter().map(|t| t.id).collect();
        // Trips 2 and 5 share a request date and keep store order
        assert_eq!(ids, vec![4, 3, 2]);

        let all = store.fetch_newest(100).await.unwrap();
        assert_eq!(all.len(), 5);
    }

    #[tokio::test]
    async fn test_destination_counts_rank_by_count_then_first_seen() {
        let store = seeded();
        let counts = store.fetch_destination_counts(2).await.unwrap();
        assert_eq!(
            counts,
            vec![
                DestinationCount { destination: "Nairobi".to_string(), count: 2 },
                DestinationCount { destination: "Mombasa".to_string(), count: 1 },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_by_id() {
        let store = seeded();
        assert_eq!(store.fetch_by_id(3).await.unwrap().map(|t| t.id), Some(3));
        assert!(store.fetch_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_replaced_snapshot() {
        let store = seeded();
        let handle = store.clone();
        store.replace_all(vec![trip(42, Some("Thika"), datetime!(2025-02-01 00:00 UTC))]);
        assert_eq!(handle.size(), 1);
        assert_eq!(handle.fetch_all().await.unwrap()[0].id, 42);
    }
}
