//! Blog pipeline configuration file handling
//!
//! Loads and manages the ~/.config/ipfo-blog/config.yaml file.

use crate::post::{PostDefaults, DEFAULT_ARTICLE_BASE, DEFAULT_AUTHOR, DEFAULT_CATEGORY, DEFAULT_IMAGE};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Published spreadsheet (CSV export) the posts come from
pub const DEFAULT_SOURCE_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vTjaqBX7gq1Mg0lxaLyw5rO2Bo1jbaxMveEopOadoSUxHFIlJii__6pMTaWTnDkUDeLoTivvmP_dE31/pub?gid=0&single=true&output=csv";

/// Session storage key holding the cached post list
pub const DEFAULT_CACHE_KEY: &str = "ipfo_blog_posts";

/// Remote source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL returning the spreadsheet as CSV
    #[serde(default = "default_source_url")]
    pub url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_source_url() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SourceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where session storage lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    /// In-process only; the session ends with the process
    Memory,
    /// SQLite file shared by every invocation within one session id
    Sqlite,
}

/// Session cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Time-to-live of a cached post list in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Storage key for the cache entry
    #[serde(default = "default_cache_key")]
    pub key: String,

    #[serde(default = "default_storage_kind")]
    pub storage: StorageKind,

    /// Path of the SQLite session database
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

fn default_ttl_secs() -> u64 {
    300 // 5 minutes
}

fn default_cache_key() -> String {
    DEFAULT_CACHE_KEY.to_string()
}

fn default_storage_kind() -> StorageKind {
    StorageKind::Sqlite
}

fn default_storage_path() -> PathBuf {
    let mut path = config_dir();
    path.push("session.db");
    path
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            key: default_cache_key(),
            storage: default_storage_kind(),
            path: default_storage_path(),
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Listing behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Posts per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Quiet period before search input is applied, in milliseconds
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Related posts shown under an article
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
}

fn default_page_size() -> usize {
    9
}

fn default_search_debounce_ms() -> u64 {
    300
}

fn default_related_limit() -> usize {
    3
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce_ms: default_search_debounce_ms(),
            related_limit: default_related_limit(),
        }
    }
}

impl ListingConfig {
    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Values backfilled into rows with empty cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_author")]
    pub author: String,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default = "default_image")]
    pub image: String,

    /// Detail page used to build article links
    #[serde(default = "default_article_base")]
    pub article_base: String,
}

fn default_author() -> String {
    DEFAULT_AUTHOR.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_image() -> String {
    DEFAULT_IMAGE.to_string()
}

fn default_article_base() -> String {
    DEFAULT_ARTICLE_BASE.to_string()
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            author: default_author(),
            category: default_category(),
            image: default_image(),
            article_base: default_article_base(),
        }
    }
}

impl From<&DefaultsConfig> for PostDefaults {
    fn from(config: &DefaultsConfig) -> Self {
        Self {
            author: config.author.clone(),
            category: config.category.clone(),
            image: config.image.clone(),
            article_base: config.article_base.clone(),
        }
    }
}

/// Blog pipeline configuration
///
/// Represents the complete ~/.config/ipfo-blog/config.yaml file. Every
/// section is optional; missing values fall back to the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogConfig {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub cache: CacheSettings,

    #[serde(default)]
    pub listing: ListingConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

fn config_dir() -> PathBuf {
    // Always use ~/.config for consistency across platforms (macOS, Linux)
    let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("ipfo-blog");
    path
}

impl BlogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from the default path (~/.config/ipfo-blog/config.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Self::default_path();
        Self::load(&path)
    }

    /// Load configuration, falling back to defaults when the file is missing
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::default_path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    /// Load configuration from a specific path
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(crate::BlogError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading blog configuration");

        let content = fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;

        tracing::debug!(
            source = %config.source.url,
            ttl_secs = config.cache.ttl_secs,
            page_size = config.listing.page_size,
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Save configuration to a specific path
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %path.display(), "Saving blog configuration");

        let yaml = serde_yaml::to_string(self)?;
        fs::write(path, yaml)?;

        Ok(())
    }

    /// Get the default config path (~/.config/ipfo-blog/config.yaml)
    pub fn default_path() -> PathBuf {
        let mut path = config_dir();
        path.push("config.yaml");
        path
    }

    /// Row defaults in the shape the normalizer consumes
    pub fn post_defaults(&self) -> PostDefaults {
        PostDefaults::from(&self.defaults)
    }
}
