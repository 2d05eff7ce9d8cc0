//! Durable game storage.
//!
//! RULE: Only GameStore writes game data to storage.
//! The controller hands it whole GameBooks; nothing else touches the keys.
//!
//! Stored data is trusted only if the version marker matches the current
//! schema version. On mismatch the games are dropped, never migrated.

use crate::{
    config::PostleConfig,
    error::{PostleError, PostleResult},
    game::GameState,
    types::{parse_date_key, DateKey},
};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A string key/value store, the shape of browser local storage.
pub trait Storage {
    fn get_item(&self, key: &str) -> PostleResult<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> PostleResult<()>;
    fn remove_item(&mut self, key: &str) -> PostleResult<()>;
}

// ── SQLite ─────────────────────────────────────────────────────

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Open (or create) the storage database at `path`.
    pub fn open(path: &str) -> PostleResult<Self> {
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        log::debug!("opened {path} with journal_mode={mode}");
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PostleResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> PostleResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_storage.sql"))?;
        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> PostleResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> PostleResult<()> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> PostleResult<()> {
        self.conn
            .execute("DELETE FROM storage WHERE key = ?1", params![key])?;
        Ok(())
    }
}

// ── In-memory ──────────────────────────────────────────────────

/// HashMap-backed storage for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> PostleResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> PostleResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> PostleResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

// ── Game book ──────────────────────────────────────────────────

/// Every game the player has started, keyed by puzzle date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameBook {
    games: BTreeMap<DateKey, GameState>,
}

impl GameBook {
    /// Parse a stored blob. Each game is validated on the way in and
    /// every key must be an ISO date.
    pub fn from_json(json: &str) -> PostleResult<Self> {
        let book: GameBook = serde_json::from_str(json)?;
        if let Some(key) = book.games.keys().find(|k| parse_date_key(k).is_none()) {
            return Err(PostleError::InvalidDate { key: key.clone() });
        }
        Ok(book)
    }

    pub fn get(&self, date: &str) -> Option<&GameState> {
        self.games.get(date)
    }

    pub fn insert(&mut self, date: impl Into<DateKey>, state: GameState) {
        self.games.insert(date.into(), state);
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.games.keys().map(String::as_str)
    }
}

// ── Game store ─────────────────────────────────────────────────

pub struct GameStore<S: Storage> {
    storage:     S,
    version:     String,
    games_key:   String,
    version_key: String,
}

impl<S: Storage> GameStore<S> {
    pub fn new(storage: S, config: &PostleConfig) -> Self {
        Self {
            storage,
            version:     config.storage_version.clone(),
            games_key:   config.games_key.clone(),
            version_key: config.version_key.clone(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read all stored games, discarding them if the schema version changed.
    pub fn load(&mut self) -> PostleResult<GameBook> {
        let stored_version = self.storage.get_item(&self.version_key)?;
        if stored_version.as_deref() != Some(self.version.as_str()) {
            log::info!(
                "storage version {:?} does not match {:?}, discarding stored games",
                stored_version,
                self.version
            );
            self.storage.remove_item(&self.games_key)?;
        }
        self.storage.set_item(&self.version_key, &self.version)?;

        match self.storage.get_item(&self.games_key)? {
            None => {
                let book = GameBook::default();
                self.storage
                    .set_item(&self.games_key, &serde_json::to_string(&book)?)?;
                Ok(book)
            }
            Some(blob) => {
                let book = GameBook::from_json(&blob)?;
                log::debug!("loaded {} stored games", book.len());
                Ok(book)
            }
        }
    }

    /// Overwrite the stored games with `book`. Last write wins.
    pub fn save(&mut self, book: &GameBook) -> PostleResult<()> {
        let blob = serde_json::to_string(book)?;
        self.storage.set_item(&self.games_key, &blob)?;
        log::debug!("saved {} games", book.len());
        Ok(())
    }
}
