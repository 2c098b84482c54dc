//! Configuration validation
//!
//! Validates blog configuration for correctness:
//! - Source URL is an http(s) URL
//! - Cache TTL and key are usable
//! - Listing sizes are non-zero

use super::blog_config::BlogConfig;
use crate::BlogError;

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate a blog configuration
pub fn validate_config(config: &BlogConfig) -> ValidationResult {
    let mut errors = Vec::new();

    let url = config.source.url.trim();
    if url.is_empty() {
        errors.push(ValidationError::new("source.url", "URL cannot be empty"));
    } else if !url.starts_with("http://") && !url.starts_with("https://") {
        errors.push(ValidationError::new(
            "source.url",
            format!("Invalid URL format: {}", url),
        ));
    }

    if config.source.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "source.timeout_secs",
            "Timeout must be greater than 0",
        ));
    }

    if config.cache.ttl_secs == 0 {
        errors.push(ValidationError::new(
            "cache.ttl_secs",
            "TTL must be greater than 0",
        ));
    }

    if config.cache.key.trim().is_empty() {
        errors.push(ValidationError::new("cache.key", "Cache key cannot be empty"));
    }

    if config.listing.page_size == 0 {
        errors.push(ValidationError::new(
            "listing.page_size",
            "Page size must be greater than 0",
        ));
    }

    if config.defaults.article_base.trim().is_empty() {
        errors.push(ValidationError::new(
            "defaults.article_base",
            "Article base cannot be empty",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate and convert to a crate error
pub fn validate_config_result(config: &BlogConfig) -> crate::Result<()> {
    validate_config(config).map_err(|errors| {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        BlogError::Config(format!(
            "Configuration validation failed:\n  - {}",
            messages.join("\n  - ")
        ))
    })
}
