use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;
use crate::config::TripFinderConfig;
use crate::error::TripFinderError;
use crate::models::{DestinationCount, HealthStatus, MonthlyTripCount, PaginatedResponse, SearchRequest, TripDto};
use crate::search::{self, SortPolicy, TripFilter};
use crate::store::TripStore;
use crate::timeseries;

#[derive(Clone)]
/// Service answering trip listings, rankings, time series and searches.
/// Holds no mutable state of its own; every call reads a fresh snapshot from
/// the store, so calls may run concurrently.
pub struct TripService {
    /// Read interface over the trip data
    store: Arc<dyn TripStore>,
    /// Defaults applied when requests carry missing or invalid values
    config: TripFinderConfig,
}

impl TripService {
    pub fn new(store: Arc<dyn TripStore>, config: Option<TripFinderConfig>) -> Self {
        Self {
            store,
            config: config.unwrap_or_default(),
        }
    }

    /// Returns the most recently requested trips, newest first.
    ///
    /// A count of zero or less falls back to the configured default.
    pub async fn latest_trips(&self, count: i64) -> Result<Vec<TripDto>, TripFinderError> {
        let count = positive_or(count, self.config.default_latest_count);
        log::info!("Retrieving {} latest trips", count);

        match self.store.fetch_newest(count).await {
            Ok(trips) => Ok(trips.iter().map(TripDto::from).collect()),
            Err(e) => {
                let call_id = Uuid::new_v4();
                log::error!("[{}] Error retrieving {} latest trips: {}", call_id, count, e);
                Err(TripFinderError::Internal(format!(
                    "Failed to retrieve latest trips (ref {})",
                    call_id
                )))
            }
        }
    }

    /// Ranks pickup locations by trip count.
    ///
    /// A limit of zero or less falls back to the configured default.
    pub async fn top_destinations(&self, top: i64) -> Result<Vec<DestinationCount>, TripFinderError> {
        let top = positive_or(top, self.config.default_top_destinations);
        log::info!("Retrieving top {} destinations", top);

        self.store.fetch_destination_counts(top).await.map_err(|e| {
            let call_id = Uuid::new_v4();
            log::error!("[{}] Error retrieving top {} destinations: {}", call_id, top, e);
            TripFinderError::Internal(format!("Failed to retrieve top destinations (ref {})", call_id))
        })
    }

    /// Monthly trip counts over the whole store, gaps filled with zero.
    ///
    /// # Returns
    /// - Ok(series) with one entry per month from the first to the last trip
    /// - Err(TripFinderError::Cancelled) if `cancel` fires during the store read
    /// - Err(TripFinderError::Internal) if the store read fails
    pub async fn trips_over_time(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<MonthlyTripCount>, TripFinderError> {
        log::info!("Retrieving trips over time");

        let trips = match with_cancellation(cancel, self.store.fetch_all()).await {
            None => {
                log::info!("Trips over time cancelled while reading the store");
                return Err(TripFinderError::Cancelled);
            }
            Some(Err(e)) => {
                let call_id = Uuid::new_v4();
                log::error!("[{}] Error retrieving trips over time: {}", call_id, e);
                return Err(TripFinderError::Internal(format!(
                    "Failed to retrieve trips over time (ref {})",
                    call_id
                )));
            }
            Some(Ok(trips)) => trips,
        };

        Ok(timeseries::monthly_series(&trips))
    }

    /// Search trips with filters, sorting and pagination.
    ///
    /// The search process follows these steps:
    /// 1. Reject an absent request
    /// 2. Normalise page and page size (invalid values become defaults)
    /// 3. Read a snapshot from the store
    /// 4. Filter, sort and paginate the snapshot
    ///
    /// # Returns
    /// - Ok(PaginatedResponse) with the requested page
    /// - Err(TripFinderError::ValidationError) if no request was given
    /// - Err(TripFinderError::Cancelled) if `cancel` fires during the store read
    /// - Err(TripFinderError::SearchFailed) if the store read fails
    pub async fn search_trips(
        &self,
        request: Option<SearchRequest>,
        cancel: &CancellationToken,
    ) -> Result<PaginatedResponse<TripDto>, TripFinderError> {
        let call_id = Uuid::new_v4();

        let Some(request) = request else {
            log::warn!("[{}] Search request is missing", call_id);
            return Err(TripFinderError::ValidationError(
                "Search request is required".to_string(),
            ));
        };
        log::info!("[{}] Searching trips with parameters: {:?}", call_id, request);

        let (page, page_size) = self.normalize_paging(&request);
        let filter = TripFilter::from_request(&request);
        let policy = SortPolicy::new(&request.sort_by, request.sort_descending);

        let trips = match with_cancellation(cancel, self.store.fetch_all()).await {
            None => {
                log::info!("[{}] Search cancelled while reading the store", call_id);
                return Err(TripFinderError::Cancelled);
            }
            Some(Err(e)) => {
                log::error!(
                    "[{}] Error searching trips with parameters {:?}: {}",
                    call_id, request, e
                );
                return Err(TripFinderError::SearchFailed);
            }
            Some(Ok(trips)) => trips,
        };

        let result = search::execute(trips, filter.into_predicate(), policy, page, page_size);
        log::info!(
            "[{}] Search matched {} trips, returning page {} of {}",
            call_id, result.total_count, result.page, result.total_pages
        );

        Ok(result.map(|trip| TripDto::from(&trip)))
    }

    /// Look up a single trip. A missing id is `Ok(None)`, not an error.
    pub async fn trip_by_id(
        &self,
        id: i64,
        cancel: &CancellationToken,
    ) -> Result<Option<TripDto>, TripFinderError> {
        log::info!("Fetching trip details for ID {}", id);

        match with_cancellation(cancel, self.store.fetch_by_id(id)).await {
            None => Err(TripFinderError::Cancelled),
            Some(Ok(Some(trip))) => Ok(Some(TripDto::from(&trip))),
            Some(Ok(None)) => {
                log::warn!("Trip with ID {} not found", id);
                Ok(None)
            }
            Some(Err(e)) => {
                let call_id = Uuid::new_v4();
                log::error!("[{}] Error retrieving trip details for ID {}: {}", call_id, id, e);
                Err(TripFinderError::Internal(format!(
                    "Failed to retrieve trip {} (ref {})",
                    id, call_id
                )))
            }
        }
    }

    /// Get health status information for the service
    pub fn get_health_status(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            trip_count: self.store.size(),
        }
    }

    /// Page numbers below 1 become 1. Page sizes below 1 or above the
    /// configured maximum become the default page size, not the maximum.
    fn normalize_paging(&self, request: &SearchRequest) -> (usize, usize) {
        let page = usize::try_from(request.page)
            .ok()
            .filter(|page| *page >= 1)
            .unwrap_or(1);
        let page_size = usize::try_from(request.page_size)
            .ok()
            .filter(|size| (1..=self.config.max_page_size).contains(size))
            .unwrap_or(self.config.default_page_size);

        if page as i64 != request.page || page_size as i64 != request.page_size {
            log::debug!(
                "Normalised paging from page={} pageSize={} to page={} pageSize={}",
                request.page, request.page_size, page, page_size
            );
        }
        (page, page_size)
    }
}

fn positive_or(value: i64, default: usize) -> usize {
    usize::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

/// Runs a store read unless `cancel` fires first. `None` means cancelled.
async fn with_cancellation<F: Future>(cancel: &CancellationToken, fetch: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        result = fetch => Some(result),
    }
}
