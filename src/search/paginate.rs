//! Pagination over an ordered, filtered sequence.
//!
//! Callers pass an already-normalised page (>= 1) and page size (>= 1).

use crate::models::PaginatedResponse;

/// Slices `items` to the requested page and reports paging metadata.
///
/// `total_count` is the length of `items` before slicing. A page past the end
/// yields no items but still reports the correct totals.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> PaginatedResponse<T> {
    debug_assert!(page >= 1 && page_size >= 1, "page and page size must be normalised");

    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size);
    let offset = (page - 1).saturating_mul(page_size);

    let items: Vec<T> = items.into_iter().skip(offset).take(page_size).collect();

    PaginatedResponse {
        page,
        page_size,
        total_count,
        total_pages,
        has_previous: page > 1,
        has_next: page < total_pages,
        items,
    }
}
