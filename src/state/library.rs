use rusqlite::{Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use super::data::OrderSnapshot;

/// Storage key holding the JSON of the last placed order
pub const LAST_ORDER_KEY: &str = "lastOrder";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Could not determine user data directory")]
    NoDataDir,

    #[error("Failed to create data directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Stored order is corrupted: {0}")]
    Corrupted(#[from] serde_json::Error),
}

/// The OrderStore is the storefront's local storage.
/// It is a small key/value table in SQLite; the only key in use is
/// [`LAST_ORDER_KEY`], which is overwritten on every checkout.
pub struct OrderStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl OrderStore {
    /// Open the store in the user's data directory:
    /// - Linux: ~/.local/share/foodie-express/foodie.db
    /// - macOS: ~/Library/Application Support/foodie-express/foodie.db
    /// - Windows: %APPDATA%\foodie-express\foodie.db
    pub fn new() -> Result<Self, StorageError> {
        let db_path = Self::default_db_path()?;
        Self::open(&db_path)
    }

    /// Open or create the store at a specific path
    pub fn open(db_path: &Path) -> Result<Self, StorageError> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        info!("Order storage opened at {}", db_path.display());

        let store = OrderStore {
            conn,
            db_path: Some(db_path.to_path_buf()),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Store that lives only as long as the process
    pub fn in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()?;
        let store = OrderStore { conn, db_path: None };
        store.init_schema()?;
        Ok(store)
    }

    fn default_db_path() -> Result<PathBuf, StorageError> {
        let mut path = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or(StorageError::NoDataDir)?;

        path.push("foodie-express");
        path.push("foodie.db");
        Ok(path)
    }

    fn init_schema(&self) -> Result<(), StorageError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS storage (
                key     TEXT PRIMARY KEY,
                value   TEXT NOT NULL
            )",
            [],
        )?;

        debug!("Storage schema initialized");
        Ok(())
    }

    /// Path of the database file, `None` for an in-memory store
    pub fn path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key = ?1",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }

    /// Persist the snapshot, replacing whatever was stored before
    pub fn save_last_order(&self, snapshot: &OrderSnapshot) -> Result<(), StorageError> {
        let json = snapshot.to_json()?;
        self.set(LAST_ORDER_KEY, &json)?;
        debug!("Saved last order ({} lines)", snapshot.items.len());
        Ok(())
    }

    /// Load the last placed order, if any
    pub fn load_last_order(&self) -> Result<Option<OrderSnapshot>, StorageError> {
        match self.get(LAST_ORDER_KEY)? {
            Some(json) => Ok(Some(OrderSnapshot::from_json(&json)?)),
            None => Ok(None),
        }
    }

    /// Number of stored keys
    #[cfg(test)]
    fn key_count(&self) -> i64 {
        self.conn
            .query_row("SELECT COUNT(*) FROM storage", [], |row| row.get(0))
            .unwrap()
    }
}

// Implement Debug for better error messages
impl std::fmt::Debug for OrderStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{CartItem, Category};
    use chrono::Utc;

    fn snapshot(name: &str, tip: u32) -> OrderSnapshot {
        OrderSnapshot {
            name: name.to_string(),
            room_number: "Hostel 4, Room 112".to_string(),
            tip,
            items: vec![CartItem {
                id: "9".to_string(),
                name: "Masala Chai".to_string(),
                price: 20,
                category: Category::Beverages,
                description: String::new(),
                quantity: 3,
            }],
            date: Utc::now(),
        }
    }

    #[test]
    fn test_empty_store_has_no_order() {
        let store = OrderStore::in_memory().unwrap();
        assert!(store.load_last_order().unwrap().is_none());
        assert!(store.path().is_none());
    }

    #[test]
    fn test_save_overwrites_previous_order() {
        let store = OrderStore::in_memory().unwrap();
        store.save_last_order(&snapshot("Ravi", 10)).unwrap();
        store.save_last_order(&snapshot("Meera", 30)).unwrap();

        let loaded = store.load_last_order().unwrap().unwrap();
        assert_eq!(loaded.name, "Meera");
        assert_eq!(loaded.tip, 30);
        assert_eq!(store.key_count(), 1);
    }

    #[test]
    fn test_order_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("foodie.db");

        let saved = snapshot("Kiran", 0);
        {
            let store = OrderStore::open(&path).unwrap();
            store.save_last_order(&saved).unwrap();
        }

        let store = OrderStore::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
        assert_eq!(store.load_last_order().unwrap(), Some(saved));
    }

    #[test]
    fn test_corrupted_order_is_reported() {
        let store = OrderStore::in_memory().unwrap();
        store.set(LAST_ORDER_KEY, "{not json").unwrap();
        assert!(matches!(
            store.load_last_order(),
            Err(StorageError::Corrupted(_))
        ));
    }
}
