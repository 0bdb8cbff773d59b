//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    config::EngineConfig,
    ports::{ClockPort, KeyValueStore, QuestIdGenerator},
    storage::FileKeyValueStore,
    system::{SystemClock, UuidQuestIds},
};
use crate::persistence::PersistenceGateway;
use crate::session::PlayerSession;

/// Main application state.
///
/// Wires the storage, clock and quest-id ports into the persistence gateway
/// and hands out the player session.
pub struct App {
    pub gateway: PersistenceGateway,
    pub quest_ids: Arc<dyn QuestIdGenerator>,
}

impl App {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn ClockPort>,
        quest_ids: Arc<dyn QuestIdGenerator>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            gateway: PersistenceGateway::with_key(store, clock, storage_key),
            quest_ids,
        }
    }

    /// File-backed storage, the system clock and UUID quest ids.
    pub fn from_config(config: &EngineConfig) -> Self {
        tracing::info!(path = ?config.storage_path, key = %config.storage_key, "Using file storage");
        Self::new(
            Arc::new(FileKeyValueStore::new(&config.storage_path)),
            Arc::new(SystemClock),
            Arc::new(UuidQuestIds),
            config.storage_key.clone(),
        )
    }

    /// Loads the player record and returns the session that owns it.
    pub async fn open_session(&self) -> PlayerSession {
        PlayerSession::open(self.gateway.clone(), Arc::clone(&self.quest_ids)).await
    }
}
