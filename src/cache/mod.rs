//! Session cache for ingested posts
//!
//! Provides a TTL-bounded cache of the normalized post list on top of
//! session-scoped storage (in-memory or SQLite).

mod session;
mod sqlite;
mod storage;

pub use session::{CacheEntry, CacheLookup, SessionCache, DEFAULT_TTL};
pub use sqlite::{SqliteStorage, SqliteStorageConfig};
pub use storage::{open_storage, MemoryStorage, SessionStorage};
