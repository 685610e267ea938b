use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::PathBuf;

use super::KeyValueStore;
use crate::paths;

/// Durable key-value store in a single `SQLite` table.
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens the store at `$XDG_DATA_HOME/maildraft/store.db`, creating it if needed.
    pub fn new() -> Result<Self> {
        let data_dir = paths::data_dir()?;

        std::fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory: {}", data_dir.display())
        })?;

        Self::open(data_dir.join("store.db"))
    }

    pub fn open(db_path: PathBuf) -> Result<Self> {
        let store = Self { db_path };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )
        .context("Failed to create kv table")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open store database: {}", self.db_path.display()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connect()?;

        conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()
            .with_context(|| format!("Failed to read '{key}' from store"))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at)
             VALUES (?1, ?2, CURRENT_TIMESTAMP)",
            [key, value],
        )
        .with_context(|| format!("Failed to write '{key}' to store"))?;

        Ok(())
    }
}
