//! Storage layer for the schedule viewer.
//!
//! Persists the user's favorites and two small viewer preferences (last
//! active day, favorites-view toggle) using `rusqlite`, so they survive
//! restarts on the same machine. Last local write wins; there is no
//! cross-device sync and no server component.
//!
//! # Thread Safety
//!
//! [`Database`] wraps a `rusqlite::Connection`, which is `Send` but not
//! `Sync`. The viewer is single-threaded, so the handle is simply passed
//! down to whatever needs it; rendering code reads through the handle and
//! never through ambient state.

use std::collections::BTreeMap;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use konf_core::SessionKey;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Preference key for the last active day index.
const PREF_ACTIVE_DAY: &str = "active_day";
/// Preference key for the favorites-view toggle.
const PREF_FAVORITES_VIEW: &str = "favorites_view";

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection
    /// closes.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the schema. Idempotent.
    fn init(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "
            -- Favorites: session identity is the (title, start) pair,
            -- stored in its display form 'title-start'.
            CREATE TABLE IF NOT EXISTS favorites (
                session_key TEXT PRIMARY KEY,
                day_index INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Marks a session as a favorite. Idempotent; re-adding updates the
    /// day index.
    pub fn add_favorite(&self, key: &SessionKey, day_index: usize) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO favorites (session_key, day_index) VALUES (?, ?)
             ON CONFLICT(session_key) DO UPDATE SET day_index = excluded.day_index",
            params![key.to_string(), i64::try_from(day_index).unwrap_or(0)],
        )?;
        Ok(())
    }

    /// Removes a favorite. A missing key is a no-op.
    pub fn remove_favorite(&self, key: &SessionKey) -> Result<(), StoreError> {
        self.conn.execute(
            "DELETE FROM favorites WHERE session_key = ?",
            params![key.to_string()],
        )?;
        Ok(())
    }

    pub fn is_favorite(&self, key: &SessionKey) -> Result<bool, StoreError> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM favorites WHERE session_key = ?",
                params![key.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// All favorites as a map from session key (display form) to day index.
    pub fn favorites(&self) -> Result<BTreeMap<String, usize>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT session_key, day_index FROM favorites")?;
        let rows = stmt.query_map([], |row| {
            let key: String = row.get(0)?;
            let day_index: i64 = row.get(1)?;
            Ok((key, day_index))
        })?;
        let mut favorites = BTreeMap::new();
        for row in rows {
            let (key, day_index) = row?;
            favorites.insert(key, usize::try_from(day_index).unwrap_or(0));
        }
        Ok(favorites)
    }

    /// Applies one favorite action to every session of a connected group.
    ///
    /// Runs in a single transaction so a group toggle never leaves partial
    /// state.
    pub fn set_group(
        &mut self,
        keys: &[SessionKey],
        day_index: usize,
        favored: bool,
    ) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        for key in keys {
            if favored {
                tx.execute(
                    "INSERT INTO favorites (session_key, day_index) VALUES (?, ?)
                     ON CONFLICT(session_key) DO UPDATE SET day_index = excluded.day_index",
                    params![key.to_string(), i64::try_from(day_index).unwrap_or(0)],
                )?;
            } else {
                tx.execute(
                    "DELETE FROM favorites WHERE session_key = ?",
                    params![key.to_string()],
                )?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// The persisted active day index. Defaults to 0.
    pub fn active_day(&self) -> Result<usize, StoreError> {
        Ok(self
            .pref(PREF_ACTIVE_DAY)?
            .and_then(|value| match value.parse() {
                Ok(day) => Some(day),
                Err(_) => {
                    tracing::warn!(value, "invalid stored active day, using default");
                    None
                }
            })
            .unwrap_or(0))
    }

    pub fn set_active_day(&self, day_index: usize) -> Result<(), StoreError> {
        self.set_pref(PREF_ACTIVE_DAY, &day_index.to_string())
    }

    /// Whether the favorites view replaces the day schedule. Defaults to
    /// false.
    pub fn favorites_view(&self) -> Result<bool, StoreError> {
        Ok(self
            .pref(PREF_FAVORITES_VIEW)?
            .is_some_and(|value| value == "true"))
    }

    pub fn set_favorites_view(&self, enabled: bool) -> Result<(), StoreError> {
        self.set_pref(PREF_FAVORITES_VIEW, if enabled { "true" } else { "false" })
    }

    fn pref(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .conn
            .query_row(
                "SELECT value FROM prefs WHERE key = ?",
                params![key],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn set_pref(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
