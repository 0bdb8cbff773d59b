//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Durable storage (could swap the JSON file for platform app storage)
//! - Clock and quest ids (for testing)

mod environment;
mod error;
mod storage;

pub use environment::{ClockPort, QuestIdGenerator};
pub use error::StorageError;
pub use storage::KeyValueStore;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use storage::MockKeyValueStore;

#[cfg(test)]
pub use environment::{MockClockPort, MockQuestIdGenerator};
