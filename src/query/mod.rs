//! Query engine
//!
//! Pure, synchronous views over the loaded post set: category filter,
//! free-text search, their composition, pagination and category counts.
//! Nothing here reorders posts; results keep the ingestion order.

mod filter;
mod pagination;

pub use filter::{
    apply, category_counts, filter_by_category, matches_query, normalize_query, search,
    CategoryFilter,
};
pub use pagination::{paginate, window, Page, DEFAULT_PAGE_SIZE};
