//! IPFO Blog - content pipeline for a spreadsheet-published blog
//!
//! Turns a remotely published spreadsheet of articles into a searchable,
//! filterable, paginated listing and individual article views, with a
//! short-lived session cache keeping repeat visits fast.
//!
//! # Architecture
//!
//! - **cache**: TTL-bounded post cache over session-scoped storage
//! - **ingest**: Fetch, parse and normalize the sheet export
//! - **query**: Category filter, search, pagination, category counts
//! - **article**: Single-article lookup, related posts, read time
//! - **session**: Per-visitor state (`BlogSession`) and search debouncing
//! - **render**: Terminal and JSON adapters over plain records
//! - **config**: ~/.config/ipfo-blog/config.yaml

// Core modules
pub mod config;
pub mod error;
pub mod logging;
pub mod post;

// Pipeline
pub mod article;
pub mod cache;
pub mod ingest;
pub mod query;
pub mod session;

// Presentation
pub mod render;
pub mod style;

// Re-exports
pub use error::{BlogError, Result};
