//! Pagination of the filtered sample view
//!
//! The dashboard renders the filtered list in fixed-size pages so the
//! interface stays responsive on large datasets.

/// Pagination metadata calculated from the filtered result count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages
    pub total_pages: usize,
    /// Offset of the first row on this page
    pub offset: usize,
}

/// Calculate pagination metadata from the filtered result count and the
/// requested page, clamping the page into [1, total_pages].
pub fn calculate_pagination(total_results: usize, requested_page: usize, page_size: usize) -> Pagination {
    let page_size = page_size.max(1);
    let total_pages = (total_results + page_size - 1) / page_size;
    let page = requested_page.max(1).min(total_pages.max(1));
    let offset = (page - 1) * page_size;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Slice one page out of the filtered view
pub fn page_slice<'a, T>(filtered: &'a [T], pagination: &Pagination, page_size: usize) -> &'a [T] {
    let start = pagination.offset.min(filtered.len());
    let end = (start + page_size.max(1)).min(filtered.len());
    &filtered[start..end]
}
