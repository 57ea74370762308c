use thiserror::Error;
use crate::models::{DestinationCount, Trip};

/// Failure raised by a trip store. These never reach clients directly; the
/// service logs them and answers with a generic error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Trip store unavailable: {0}")]
    Unavailable(String),

    #[error("Trip data is corrupt: {0}")]
    Corrupt(String),
}

/// Trait defining the read interface over persisted trip data.
/// This abstraction allows for different store implementations (memory, SQL, etc.)
/// while the search and reporting logic stays the same.
///
/// All implementations must be thread-safe and support concurrent reads.
#[async_trait::async_trait]
pub trait TripStore: Send + Sync + 'static {
    /// Full snapshot of every trip, in store order
    async fn fetch_all(&self) -> Result<Vec<Trip>, StoreError>;

    /// The `count` most recently requested trips, newest first
    async fn fetch_newest(&self, count: usize) -> Result<Vec<Trip>, StoreError>;

    /// Pickup locations ranked by number of trips, truncated to `top`
    async fn fetch_destination_counts(&self, top: usize) -> Result<Vec<DestinationCount>, StoreError>;

    /// Look up a single trip
    async fn fetch_by_id(&self, id: i64) -> Result<Option<Trip>, StoreError>;

    /// Number of trips currently held
    fn size(&self) -> usize;
}
