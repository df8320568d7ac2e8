/// Error types for catalog loading and description persistence
///
/// None of these are fatal: the UI recovers from every variant and stays
/// interactive. Variants carry rendered messages so they can travel inside
/// iced messages, which must be `Clone`.
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// The catalog document could not be read or parsed
    #[error("failed to load catalog {path}: {reason}")]
    DataLoad { path: String, reason: String },

    /// The saved description snapshot is not valid
    #[error("saved descriptions are corrupt: {0}")]
    CorruptOverlay(String),

    /// The SQLite key-value store failed
    #[error("description store error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn data_load(path: &Path, reason: impl ToString) -> Self {
        CatalogError::DataLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
