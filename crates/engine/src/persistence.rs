//! Persistence gateway - loads and stores the player record under one key.
//!
//! The gateway knows nothing about progression: it seeds the starter record
//! when storage is empty and otherwise moves JSON in and out of the store.
//! How a failed load is recovered from is decided in [`LoadOutcome`].

use std::sync::Arc;

use levelup_domain::{starter_record, PlayerRecord};

use crate::infrastructure::config::DEFAULT_STORAGE_KEY;
use crate::infrastructure::ports::{ClockPort, KeyValueStore, StorageError};

/// Failures surfaced by [`PersistenceGateway`]. Both are recoverable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersistenceError {
    /// The stored payload exists but cannot be decoded.
    #[error("Stored player record is unreadable: {0}")]
    CorruptState(String),

    /// The storage medium could not be reached.
    #[error("Persistence unavailable during {operation}: {message}")]
    PersistenceUnavailable {
        operation: &'static str,
        message: String,
    },
}

impl PersistenceError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptState(_))
    }
}

impl From<StorageError> for PersistenceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Corrupt(reason) => Self::CorruptState(reason),
            StorageError::Io { operation, message } => {
                Self::PersistenceUnavailable { operation, message }
            }
        }
    }
}

/// Result of [`PersistenceGateway::load_or_default`]: always a usable record,
/// plus what storage said about it.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// The record read from storage.
    Stored(PlayerRecord),
    /// Nothing was stored; the starter record should be written.
    Seeded(PlayerRecord),
    /// The stored payload was unreadable. The starter record replaces it and
    /// the unreadable payload is lost on the next save.
    Replaced {
        record: PlayerRecord,
        error: PersistenceError,
    },
    /// Storage could not be read. The starter record stands in, but whatever
    /// is stored must not be overwritten until a load succeeds.
    Unavailable {
        record: PlayerRecord,
        error: PersistenceError,
    },
}

impl LoadOutcome {
    pub fn record(&self) -> &PlayerRecord {
        match self {
            Self::Stored(record) | Self::Seeded(record) => record,
            Self::Replaced { record, .. } | Self::Unavailable { record, .. } => record,
        }
    }

    pub fn into_record(self) -> PlayerRecord {
        match self {
            Self::Stored(record) | Self::Seeded(record) => record,
            Self::Replaced { record, .. } | Self::Unavailable { record, .. } => record,
        }
    }
}

/// Loads and saves the [`PlayerRecord`] as JSON under a fixed key.
#[derive(Clone)]
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn ClockPort>,
    key: String,
}

impl PersistenceGateway {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn ClockPort>) -> Self {
        Self::with_key(store, clock, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            clock,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored record, or the starter record if nothing is stored yet.
    ///
    /// # Errors
    ///
    /// - `CorruptState` if the stored payload cannot be decoded
    /// - `PersistenceUnavailable` if the store cannot be read
    pub async fn load(&self) -> Result<PlayerRecord, PersistenceError> {
        match self.load_stored().await? {
            Some(record) => Ok(record),
            None => {
                tracing::info!(key = %self.key, "No stored player record, seeding starter record");
                Ok(self.starter())
            }
        }
    }

    /// The stored record, or `None` if nothing is stored under the key.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub async fn load_stored(&self) -> Result<Option<PlayerRecord>, PersistenceError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| PersistenceError::CorruptState(e.to_string()))
    }

    /// A fresh starter record stamped with the current time.
    pub fn starter(&self) -> PlayerRecord {
        starter_record(self.clock.now())
    }

    /// Like [`load`](Self::load), but never fails: every failure is
    /// classified into a [`LoadOutcome`] carrying the starter record.
    pub async fn load_or_default(&self) -> LoadOutcome {
        match self.load_stored().await {
            Ok(Some(record)) => LoadOutcome::Stored(record),
            Ok(None) => {
                tracing::info!(key = %self.key, "No stored player record, seeding starter record");
                LoadOutcome::Seeded(self.starter())
            }
            Err(error @ PersistenceError::CorruptState(_)) => {
                tracing::warn!(
                    key = %self.key,
                    error = %error,
                    "Stored player record is unreadable, replacing it with the starter record"
                );
                LoadOutcome::Replaced {
                    record: self.starter(),
                    error,
                }
            }
            Err(error @ PersistenceError::PersistenceUnavailable { .. }) => {
                tracing::warn!(
                    key = %self.key,
                    error = %error,
                    "Player record could not be read, holding writes until it can"
                );
                LoadOutcome::Unavailable {
                    record: self.starter(),
                    error,
                }
            }
        }
    }

    /// Serializes `record` and stores it, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceUnavailable` if the store rejects the write.
    pub async fn save(&self, record: &PlayerRecord) -> Result<(), PersistenceError> {
        let payload = serde_json::to_string(record).map_err(|e| {
            PersistenceError::PersistenceUnavailable {
                operation: "encode",
                message: e.to_string(),
            }
        })?;
        self.store.set(&self.key, &payload).await?;
        Ok(())
    }
}
