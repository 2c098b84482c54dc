//! Error types for the blog pipeline
//!
//! Defines the error enum covering every failure mode of the pipeline.
//! Uses thiserror for ergonomic error handling.

use thiserror::Error;

/// Result type alias for blog operations
pub type Result<T> = std::result::Result<T, BlogError>;

/// Error type for blog pipeline operations
#[derive(Error, Debug)]
pub enum BlogError {
    /// The remote spreadsheet could not be fetched or parsed
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// A stored cache entry failed to deserialize
    #[error("Cache entry corrupt: {0}")]
    CacheCorrupt(String),

    /// Requested article is absent, or no id was supplied
    #[error("Article not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// SQLite database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CSV decoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),

    /// Anyhow errors (for more context)
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

impl BlogError {
    /// Whether this error should render as the listing's empty state
    /// rather than a hard failure
    pub fn is_empty_state(&self) -> bool {
        matches!(self, BlogError::SourceUnavailable(_))
    }

    /// Whether this error should render as the detail page's not-found state
    pub fn is_not_found(&self) -> bool {
        matches!(self, BlogError::NotFound(_))
    }
}
