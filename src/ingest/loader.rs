//! Cache-backed post loading
//!
//! `load()` serves from the session cache when it can. On a miss it fetches
//! the sheet once, normalizes it, writes the cache and returns the posts.
//! Concurrent misses share a single in-flight fetch.

use super::normalize::normalize_rows;
use super::parser::parse_sheet;
use super::source::PostSource;
use crate::cache::{CacheLookup, SessionCache, SessionStorage};
use crate::config::BlogConfig;
use crate::post::{Post, PostDefaults};
use crate::{BlogError, Result};
use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

type SharedIngest = Shared<BoxFuture<'static, std::result::Result<Arc<[Post]>, String>>>;

/// Where a load was served from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Cache,
    Source,
}

/// Loads the full post set through the session cache
pub struct PostLoader {
    source: Arc<dyn PostSource>,
    cache: SessionCache,
    key: String,
    defaults: PostDefaults,
    in_flight: Mutex<Option<SharedIngest>>,
}

impl PostLoader {
    pub fn new(
        source: Arc<dyn PostSource>,
        cache: SessionCache,
        key: impl Into<String>,
        defaults: PostDefaults,
    ) -> Self {
        Self {
            source,
            cache,
            key: key.into(),
            defaults,
            in_flight: Mutex::new(None),
        }
    }

    /// Loader wired from configuration: cache TTL and key, row defaults
    pub fn from_config(
        config: &BlogConfig,
        source: Arc<dyn PostSource>,
        storage: Arc<dyn SessionStorage>,
    ) -> Self {
        Self::new(
            source,
            SessionCache::new(storage, config.cache.ttl()),
            config.cache.key.clone(),
            config.post_defaults(),
        )
    }

    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }

    pub fn cache_key(&self) -> &str {
        &self.key
    }

    /// All posts, newest first
    pub async fn load(&self) -> Result<Arc<[Post]>> {
        self.load_with_origin().await.map(|(posts, _)| posts)
    }

    /// All posts plus whether they came from the cache or the source
    pub async fn load_with_origin(&self) -> Result<(Arc<[Post]>, LoadOrigin)> {
        match self.cache.lookup(&self.key) {
            CacheLookup::Hit(posts) => {
                info!(posts = posts.len(), "Loading blog posts from cache");
                return Ok((posts.into(), LoadOrigin::Cache));
            }
            CacheLookup::Miss => debug!("Cache miss"),
            CacheLookup::Expired { age } => {
                debug!(age_secs = age.as_secs(), "Cache expired")
            }
            CacheLookup::Corrupt(reason) => debug!(%reason, "Cache unreadable"),
        }

        let posts = self.ingest().await?;
        Ok((posts, LoadOrigin::Source))
    }

    /// Re-fetch from the source regardless of the cache
    pub async fn refresh(&self) -> Result<Arc<[Post]>> {
        self.ingest().await
    }

    async fn ingest(&self) -> Result<Arc<[Post]>> {
        let pending = {
            let mut slot = self
                .in_flight
                .lock()
                .map_err(|e| BlogError::Other(format!("In-flight lock poisoned: {}", e)))?;

            match slot.as_ref() {
                Some(pending) => {
                    debug!("Joining in-flight fetch");
                    pending.clone()
                }
                None => {
                    let pending = fetch_and_store(
                        self.source.clone(),
                        self.cache.clone(),
                        self.key.clone(),
                        self.defaults.clone(),
                    )
                    .boxed()
                    .shared();
                    *slot = Some(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        if let Ok(mut slot) = self.in_flight.lock() {
            if slot.as_ref().is_some_and(|current| current.ptr_eq(&pending)) {
                *slot = None;
            }
        }

        result.map_err(BlogError::SourceUnavailable)
    }
}

/// Fetch, parse, normalize and cache; errors are flattened to a message so
/// the outcome can be shared between waiters
async fn fetch_and_store(
    source: Arc<dyn PostSource>,
    cache: SessionCache,
    key: String,
    defaults: PostDefaults,
) -> std::result::Result<Arc<[Post]>, String> {
    let text = source.fetch_csv().await.map_err(|e| match e {
        BlogError::SourceUnavailable(reason) => reason,
        other => other.to_string(),
    })?;

    let rows = parse_sheet(&text).map_err(|e| match e {
        BlogError::SourceUnavailable(reason) => reason,
        other => format!("unparseable sheet: {}", other),
    })?;

    let today = chrono::Local::now().date_naive();
    let (posts, report) = normalize_rows(rows, &defaults, today);

    if report.dropped > 0 {
        debug!(dropped = report.dropped, "Dropped rows without an ID");
    }
    info!(
        source = %source.describe(),
        rows = report.rows,
        kept = report.kept,
        dropped = report.dropped,
        dated_today = report.dated_today,
        "Ingested blog posts"
    );

    // Persistence is best-effort; the in-memory result is still returned
    if let Err(e) = cache.put(&key, &posts) {
        warn!(error = %e, "Cache write error");
    }

    Ok(posts.into())
}
