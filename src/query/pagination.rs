//! Pagination windows over a result set

use serde::Serialize;

/// Default posts per page
pub const DEFAULT_PAGE_SIZE: usize = 9;

/// One page of results plus the metadata listing consumers need
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 1-based page number
    pub page: usize,

    /// More results exist beyond this page
    pub has_more: bool,

    /// Results shown up to and including this page
    pub shown: usize,

    /// Results in the whole set
    pub total: usize,
}

/// Slice `[(page-1)*size, page*size)` out of `items`
///
/// Page 0 is treated as page 1. A page past the end is empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let total = items.len();
    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = page.saturating_mul(page_size).min(total);

    Page {
        items: items[start..end].to_vec(),
        page,
        has_more: page.saturating_mul(page_size) < total,
        shown: end,
        total,
    }
}

/// Everything from the first page through `page`, as a "load more" list shows it
pub fn window<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let total = items.len();
    let end = page.saturating_mul(page_size).min(total);

    Page {
        items: items[..end].to_vec(),
        page,
        has_more: end < total,
        shown: end,
        total,
    }
}
