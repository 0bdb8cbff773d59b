//! Engine configuration
//!
//! Defaults need no environment at all. A host may override the storage
//! location with `LEVELUP_STORAGE_PATH` and `LEVELUP_STORAGE_KEY`.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Key the player record is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "@player";

const STORAGE_PATH_VAR: &str = "LEVELUP_STORAGE_PATH";
const STORAGE_KEY_VAR: &str = "LEVELUP_STORAGE_KEY";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// JSON file backing the key-value store
    pub storage_path: PathBuf,
    /// Key the player record is stored under
    pub storage_key: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl EngineConfig {
    /// Defaults, overridden by any storage variables present in the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            storage_path: non_blank(STORAGE_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            storage_key: non_blank(STORAGE_KEY_VAR).unwrap_or(defaults.storage_key),
        }
    }
}

/// Platform config directory, or the working directory if there is none.
fn default_storage_path() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("io", "levelup", "player") {
        dirs.config_dir().join("storage.json")
    } else {
        PathBuf::from("levelup_storage.json")
    }
}
