//! File-backed key-value storage
//!
//! Stores key-value pairs in a single JSON object on disk, e.g.:
//! - Linux: ~/.config/levelup/player/storage.json
//! - macOS: ~/Library/Application Support/io.levelup.player/storage.json
//! - Windows: C:\Users\<User>\AppData\Roaming\levelup\player\storage.json

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::infrastructure::ports::{KeyValueStore, StorageError};

/// Key-value storage persisted as one JSON file.
///
/// The file is read lazily on first access and cached. Writes are serialized
/// through the cache lock and replace the file atomically (temp file + rename),
/// so the file always holds the result of the last completed write.
pub struct FileKeyValueStore {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory copy of the file, `None` until first loaded
    cache: Mutex<Option<HashMap<String, String>>>,
}

impl FileKeyValueStore {
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: storage_path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    async fn read_file(&self) -> Result<HashMap<String, String>, StorageError> {
        let data = match tokio::fs::read_to_string(&self.storage_path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(StorageError::io("read", e)),
        };
        serde_json::from_str(&data).map_err(StorageError::corrupt)
    }

    async fn write_file(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::io("create_dir", e))?;
            }
        }

        let data = serde_json::to_string_pretty(map).map_err(|e| StorageError::io("encode", e))?;
        let tmp_path = self.storage_path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, data)
            .await
            .map_err(|e| StorageError::io("write", e))?;
        tokio::fs::rename(&tmp_path, &self.storage_path)
            .await
            .map_err(|e| StorageError::io("rename", e))?;
        Ok(())
    }

    /// Loaded map for a write. An unreadable file is replaced rather than
    /// blocking every future write.
    async fn map_for_write(
        &self,
        cached: &Option<HashMap<String, String>>,
    ) -> Result<HashMap<String, String>, StorageError> {
        if let Some(map) = cached {
            return Ok(map.clone());
        }
        match self.read_file().await {
            Ok(map) => Ok(map),
            Err(StorageError::Corrupt(reason)) => {
                tracing::warn!(
                    path = ?self.storage_path,
                    %reason,
                    "Storage file is unreadable, it will be overwritten"
                );
                Ok(HashMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut cache = self.cache.lock().await;
        if cache.is_none() {
            let map = self.read_file().await?;
            tracing::debug!(path = ?self.storage_path, entries = map.len(), "Storage file loaded");
            *cache = Some(map);
        }
        Ok(cache.as_ref().and_then(|map| map.get(key).cloned()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut cache = self.cache.lock().await;
        let mut map = self.map_for_write(&cache).await?;
        map.insert(key.to_string(), value.to_string());
        self.write_file(&map).await?;
        *cache = Some(map);
        Ok(())
    }
}
