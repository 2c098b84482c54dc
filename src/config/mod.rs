//! Configuration system
//!
//! Loads ~/.config/ipfo-blog/config.yaml with support for:
//! - The published spreadsheet URL and request timeout
//! - Session cache TTL, key and storage backend
//! - Listing page size, search debounce and related-post count
//! - Default values backfilled into incomplete rows

mod blog_config;
pub mod validation;

pub use blog_config::{
    BlogConfig, CacheSettings, DefaultsConfig, ListingConfig, SourceConfig, StorageKind,
    DEFAULT_CACHE_KEY, DEFAULT_SOURCE_URL,
};
pub use validation::{validate_config, validate_config_result, ValidationError};
