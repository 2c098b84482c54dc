//! TTL-bounded post cache over session storage
//!
//! Stores `{data, timestamp}` JSON under a single key. Reads never fail:
//! an expired, missing or undecodable entry is a miss, and [`CacheLookup`]
//! records which one it was.

use super::storage::SessionStorage;
use crate::post::Post;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default cache time-to-live
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Serialized cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub data: Vec<Post>,

    /// Write time in Unix epoch milliseconds
    pub timestamp: i64,
}

#[derive(Serialize)]
struct CacheEntryRef<'a> {
    data: &'a [Post],
    timestamp: i64,
}

/// Outcome of a cache read
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Entry present and within its TTL
    Hit(Vec<Post>),
    /// No entry stored
    Miss,
    /// Entry present but older than the TTL
    Expired { age: Duration },
    /// Entry present but unreadable
    Corrupt(String),
}

impl CacheLookup {
    /// The cached posts, if this was a hit
    pub fn into_posts(self) -> Option<Vec<Post>> {
        match self {
            CacheLookup::Hit(posts) => Some(posts),
            _ => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, CacheLookup::Hit(_))
    }
}

/// Post cache with a fixed time-to-live
#[derive(Clone)]
pub struct SessionCache {
    storage: Arc<dyn SessionStorage>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(storage: Arc<dyn SessionStorage>, ttl: Duration) -> Self {
        Self { storage, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Read the entry under `key` and classify it
    pub fn lookup(&self, key: &str) -> CacheLookup {
        let raw = match self.storage.get_item(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return CacheLookup::Miss,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cache read error");
                return CacheLookup::Corrupt(e.to_string());
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(key, error = %e, "Cache entry corrupt, treating as miss");
                return CacheLookup::Corrupt(e.to_string());
            }
        };

        let now = chrono::Utc::now().timestamp_millis();
        let age = Duration::from_millis(now.saturating_sub(entry.timestamp).max(0) as u64);

        if age > self.ttl {
            tracing::debug!(key, age_ms = age.as_millis() as u64, "Cache entry expired");
            CacheLookup::Expired { age }
        } else {
            CacheLookup::Hit(entry.data)
        }
    }

    /// Cached posts under `key` if present and fresh
    pub fn get(&self, key: &str) -> Option<Vec<Post>> {
        self.lookup(key).into_posts()
    }

    /// Store `data` under `key`, stamped with the current time
    pub fn put(&self, key: &str, data: &[Post]) -> Result<()> {
        let entry = CacheEntryRef {
            data,
            timestamp: chrono::Utc::now().timestamp_millis(),
        };
        let json = serde_json::to_string(&entry)?;
        self.storage.set_item(key, &json)?;

        tracing::debug!(key, posts = data.len(), "Cache entry written");
        Ok(())
    }

    /// Remove the entry under `key`
    pub fn clear(&self, key: &str) -> Result<()> {
        tracing::info!(key, "Clearing cache");
        self.storage.remove_item(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStorage;
    use crate::BlogError;

    const KEY: &str = "ipfo_blog_posts";

    fn sample_posts() -> Vec<Post> {
        vec![
            Post::new("2", "Second").with_date("2024-06-01").with_category("News"),
            Post::new("1", "First").with_date("2024-01-01").with_author("Ana"),
        ]
    }

    fn cache_with(storage: Arc<dyn SessionStorage>) -> SessionCache {
        SessionCache::new(storage, DEFAULT_TTL)
    }

    fn write_entry(storage: &dyn SessionStorage, data: Vec<Post>, timestamp: i64) {
        let json = serde_json::to_string(&CacheEntry { data, timestamp }).unwrap();
        storage.set_item(KEY, &json).unwrap();
    }

    #[test]
    fn test_put_then_get_roundtrip() {
        let cache = cache_with(Arc::new(MemoryStorage::new()));
        let posts = sample_posts();

        cache.put(KEY, &posts).unwrap();
        assert_eq!(cache.get(KEY), Some(posts));
    }

    #[test]
    fn test_missing_entry_is_miss() {
        let cache = cache_with(Arc::new(MemoryStorage::new()));
        assert_eq!(cache.lookup(KEY), CacheLookup::Miss);
        assert_eq!(cache.get(KEY), None);
    }

    #[test]
    fn test_entry_past_ttl_is_absent() {
        let storage = Arc::new(MemoryStorage::new());
        let cache = cache_with(storage.clone());

        let ttl_ms = DEFAULT_TTL.as_millis() as i64;
        let stale = chrono::Utc::now().timestamp_millis() - ttl_ms - 1;
        write_entry(storage.as_ref(), sample_posts(), stale);

        assert!(matches!(cache.lookup(KEY), CacheLookup::Expired { .. }));
        assert_eq!(cache.get(KEY), None);
    }

    #[test]
    fn test_entry_within_ttl_is_hit() {
        let storage = Arc::new(MemoryStorage::new());
        let cache = cache_with(storage.clone());

        let recent = chrono::Utc::now().timestamp_millis() - 60_000;
        write_entry(storage.as_ref(), sample_posts(), recent);

        assert!(cache.lookup(KEY).is_hit());
    }

    #[test]
    fn test_corrupt_entry_is_miss() {
        let storage = Arc::new(MemoryStorage::new());
        let cache = cache_with(storage.clone());

        storage.set_item(KEY, "{not json").unwrap();
        assert!(matches!(cache.lookup(KEY), CacheLookup::Corrupt(_)));
        assert_eq!(cache.get(KEY), None);

        // Valid JSON with the wrong shape is corrupt too
        storage.set_item(KEY, r#"{"data": 5, "timestamp": "x"}"#).unwrap();
        assert!(matches!(cache.lookup(KEY), CacheLookup::Corrupt(_)));
    }

    #[test]
    fn test_put_failure_is_reported() {
        let cache = cache_with(Arc::new(MemoryStorage::with_quota(16)));
        let result = cache.put(KEY, &sample_posts());
        assert!(matches!(result, Err(BlogError::Storage(_))));
        assert_eq!(cache.get(KEY), None);
    }

    #[test]
    fn test_clear() {
        let cache = cache_with(Arc::new(MemoryStorage::new()));
        cache.put(KEY, &sample_posts()).unwrap();
        cache.clear(KEY).unwrap();
        assert_eq!(cache.lookup(KEY), CacheLookup::Miss);
    }

    #[test]
    fn test_short_ttl_expires() {
        let cache = SessionCache::new(Arc::new(MemoryStorage::new()), Duration::from_millis(50));
        cache.put(KEY, &sample_posts()).unwrap();
        assert!(cache.get(KEY).is_some());

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get(KEY), None);
    }
}
