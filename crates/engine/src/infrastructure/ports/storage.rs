//! Storage port for durable key-value persistence.

use async_trait::async_trait;

use super::error::StorageError;

/// String key-value storage, the shape of on-device app storage.
///
/// `set` overwrites any prior value for the key.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
