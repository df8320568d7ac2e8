use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde_json::Value;
use tracing::info;

use super::catalog::Catalog;
use crate::error::{CatalogError, Result};

/// Entry under which the catalog snapshot is saved
pub const SNAPSHOT_KEY: &str = "itemsData";

/// Saved descriptions, keyed like the catalog
pub type Overlay = HashMap<String, String>;

/// Extract the saved descriptions from a snapshot.
///
/// The snapshot must be a JSON object; entries without a string
/// `description` are skipped.
pub fn parse_overlay(raw: &str) -> Result<Overlay> {
    let snapshot: Value =
        serde_json::from_str(raw).map_err(|e| CatalogError::CorruptOverlay(e.to_string()))?;

    let entries = snapshot
        .as_object()
        .ok_or_else(|| CatalogError::CorruptOverlay("snapshot is not a JSON object".to_string()))?;

    Ok(entries
        .iter()
        .filter_map(|(key, entry)| {
            entry
                .get("description")
                .and_then(Value::as_str)
                .map(|description| (key.clone(), description.to_string()))
        })
        .collect())
}

/// Merge saved descriptions into a freshly loaded catalog.
/// Empty saved values never blank out a description. Returns how many were applied.
pub fn apply_overlay(catalog: &mut Catalog, overlay: &Overlay) -> usize {
    let mut applied = 0;
    for (key, description) in overlay {
        if !description.is_empty() && catalog.set_description(key, description) {
            applied += 1;
        }
    }
    applied
}

/// The OverlayStore keeps the saved catalog snapshot in a small SQLite
/// key-value table.
pub struct OverlayStore {
    conn: Connection,
    db_path: Option<PathBuf>,
}

impl OverlayStore {
    /// Open (or create) the store at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CatalogError::Storage(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let conn = Connection::open(path)?;
        let store = OverlayStore {
            conn,
            db_path: Some(path.to_path_buf()),
        };
        store.init_schema()?;

        info!("📁 Description store at: {}", path.display());
        Ok(store)
    }

    /// A store that lives only as long as the process
    pub fn open_in_memory() -> Result<Self> {
        let store = OverlayStore {
            conn: Connection::open_in_memory()?,
            db_path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Where the store lives by default:
    /// - Linux: ~/.local/share/vitrine/vitrine.db
    /// - macOS: ~/Library/Application Support/vitrine/vitrine.db
    /// - Windows: %APPDATA%\vitrine\vitrine.db
    pub fn default_path() -> Option<PathBuf> {
        let mut path = dirs::data_dir().or_else(dirs::home_dir)?;
        path.push("vitrine");
        path.push("vitrine.db");
        Some(path)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv_store (
                key             TEXT PRIMARY KEY,
                value           TEXT NOT NULL,
                updated_at      INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub(super) fn read(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub(super) fn write(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            rusqlite::params![key, value, Utc::now().timestamp()],
        )?;
        Ok(())
    }

    /// Read the saved descriptions. No snapshot yet means an empty overlay.
    pub fn load_overlay(&self) -> Result<Overlay> {
        match self.read(SNAPSHOT_KEY)? {
            Some(raw) => parse_overlay(&raw),
            None => Ok(Overlay::new()),
        }
    }

    /// Save the whole catalog, replacing the previous snapshot
    pub fn persist(&self, catalog: &Catalog) -> Result<()> {
        let snapshot = catalog
            .to_json()
            .map_err(|e| CatalogError::Storage(e.to_string()))?;
        self.write(SNAPSHOT_KEY, &snapshot)
    }

    /// When the current snapshot was written
    pub fn saved_at(&self) -> Result<Option<DateTime<Utc>>> {
        let timestamp: Option<i64> = self
            .conn
            .query_row(
                "SELECT updated_at FROM kv_store WHERE key = ?1",
                [SNAPSHOT_KEY],
                |row| row.get(0),
            )
            .optional()?;
        Ok(timestamp.and_then(|secs| DateTime::from_timestamp(secs, 0)))
    }
}

impl std::fmt::Debug for OverlayStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayStore")
            .field("db_path", &self.db_path)
            .finish()
    }
}
