//! Query engine behind trip search.
//!
//! A search runs in three steps over a store snapshot: filter with
//! [`TripFilter`], order with [`SortPolicy`], then slice with [`paginate`].

pub mod filter;
pub mod paginate;
pub mod sort;

pub use filter::TripFilter;
pub use paginate::paginate;
pub use sort::{SortKey, SortPolicy};

use crate::models::{PaginatedResponse, Trip};

/// Runs filter, sort and pagination over `trips`.
///
/// `predicate` is usually [`TripFilter::into_predicate`]. `page` and
/// `page_size` must already be normalised.
pub fn execute<P>(
    trips: Vec<Trip>,
    predicate: P,
    policy: SortPolicy,
    page: usize,
    page_size: usize,
) -> PaginatedResponse<Trip>
where
    P: Fn(&Trip) -> bool,
{
    let mut matching: Vec<Trip> = trips.into_iter().filter(|t| predicate(t)).collect();
    policy.apply(&mut matching);
    paginate(matching, page, page_size)
}
