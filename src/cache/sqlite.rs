//! SQLite session storage
//!
//! Lets separate CLI invocations in the same terminal session share one
//! cache entry. Rows are tagged with a session id, so concurrent sessions
//! never see each other's entries. A session that has not written for
//! longer than `max_age` is considered ended; its rows are purged when the
//! database is next opened.

use super::session::DEFAULT_TTL;
use super::storage::SessionStorage;
use crate::{BlogError, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// SQLite storage configuration
#[derive(Debug, Clone)]
pub struct SqliteStorageConfig {
    /// Path to SQLite database file
    pub path: PathBuf,

    /// Identifier of the current session
    pub session_id: String,

    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,

    /// Rows not written for this long belong to an ended session
    pub max_age: Duration,
}

impl SqliteStorageConfig {
    pub fn new(path: impl Into<PathBuf>, session_id: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            session_id: session_id.into(),
            wal_mode: true,
            max_age: DEFAULT_TTL,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }
}

/// Session storage backed by a SQLite table
pub struct SqliteStorage {
    conn: Mutex<Connection>,
    config: SqliteStorageConfig,
}

impl SqliteStorage {
    /// Open or create the storage database
    pub fn open(config: SqliteStorageConfig) -> Result<Self> {
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(
            path = %config.path.display(),
            session = %config.session_id,
            "Opening session storage"
        );

        let conn = Connection::open(&config.path)?;

        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }

        let storage = Self {
            conn: Mutex::new(conn),
            config,
        };

        storage.init_schema()?;
        storage.purge_stale_rows()?;

        Ok(storage)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| BlogError::Storage(format!("Session storage lock poisoned: {}", e)))
    }

    fn init_schema(&self) -> Result<()> {
        self.lock()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS session_storage (
                session_id TEXT NOT NULL,
                key TEXT NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (session_id, key)
            );
            "#,
        )?;

        Ok(())
    }

    /// Drop rows older than `max_age`, whichever session wrote them
    ///
    /// Such rows can only be expired cache entries; fresh rows of other
    /// live sessions are kept.
    fn purge_stale_rows(&self) -> Result<()> {
        let max_age_ms = i64::try_from(self.config.max_age.as_millis()).unwrap_or(i64::MAX);
        let cutoff = chrono::Utc::now()
            .timestamp_millis()
            .saturating_sub(max_age_ms);

        let removed = self.lock()?.execute(
            "DELETE FROM session_storage WHERE updated_at < ?",
            params![cutoff],
        )?;

        if removed > 0 {
            tracing::debug!(removed, "Purged entries from ended sessions");
        }

        Ok(())
    }

    /// Get the database path
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn session_id(&self) -> &str {
        &self.config.session_id
    }
}

impl SessionStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .lock()?
            .query_row(
                "SELECT value FROM session_storage WHERE session_id = ? AND key = ?",
                params![self.config.session_id, key],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let now = chrono::Utc::now().timestamp_millis();

        self.lock()?.execute(
            "INSERT OR REPLACE INTO session_storage (session_id, key, value, updated_at) VALUES (?, ?, ?, ?)",
            params![self.config.session_id, key, value, now],
        )?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.lock()?.execute(
            "DELETE FROM session_storage WHERE session_id = ? AND key = ?",
            params![self.config.session_id, key],
        )?;

        Ok(())
    }
}
