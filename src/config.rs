use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::state::overlay::OverlayStore;

/// Application configuration loaded from environment variables.
///
/// All fields have defaults suitable for running next to an
/// `items_data.json` file. A `.env` file is read first if present.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Catalog document to read at startup
    pub data_path: PathBuf,
    /// SQLite file holding saved descriptions, `None` keeps them in memory only
    pub store_path: Option<PathBuf>,
    /// Directory relative image references are resolved against
    pub image_root: PathBuf,
    /// How long the save button shows its confirmation
    pub save_feedback: Duration,
}

const DEFAULT_DATA_PATH: &str = "items_data.json";
const DEFAULT_SAVE_FEEDBACK_SECS: u64 = 2;

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                          |
    /// |------------------------------|----------------------------------|
    /// | `VITRINE_DATA`               | `items_data.json`                |
    /// | `VITRINE_STORE`              | `<data dir>/vitrine/vitrine.db`  |
    /// | `VITRINE_IMAGE_ROOT`         | directory of `VITRINE_DATA`      |
    /// | `VITRINE_SAVE_FEEDBACK_SECS` | `2`                              |
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("VITRINE_DATA")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let store_path = lookup("VITRINE_STORE")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .or_else(OverlayStore::default_path);

        let image_root = lookup("VITRINE_IMAGE_ROOT")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| document_dir(&data_path));

        let save_feedback_secs = match lookup("VITRINE_SAVE_FEEDBACK_SECS") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(
                    "VITRINE_SAVE_FEEDBACK_SECS={:?} is not a number, using {}",
                    raw, DEFAULT_SAVE_FEEDBACK_SECS
                );
                DEFAULT_SAVE_FEEDBACK_SECS
            }),
            None => DEFAULT_SAVE_FEEDBACK_SECS,
        };

        Self {
            data_path,
            store_path,
            image_root,
            save_feedback: Duration::from_secs(save_feedback_secs),
        }
    }

    /// Point the app at another catalog document.
    /// Images follow the document unless a root was configured explicitly.
    pub fn with_data_path(&self, data_path: PathBuf) -> Self {
        let image_root = if self.image_root == document_dir(&self.data_path) {
            document_dir(&data_path)
        } else {
            self.image_root.clone()
        };

        Self {
            data_path,
            image_root,
            ..self.clone()
        }
    }
}

fn document_dir(data_path: &Path) -> PathBuf {
    data_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
