//! Ports for the ambient inputs of the engine: wall-clock time and fresh ids.

use chrono::{DateTime, Utc};
use levelup_domain::QuestId;

/// Source of the creation time stamped on seeded records.
#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Source of candidate ids for user-added quests.
///
/// Candidates need not be unique; the progression engine suffixes any that
/// collide with an existing quest.
#[cfg_attr(test, mockall::automock)]
pub trait QuestIdGenerator: Send + Sync {
    fn next_quest_id(&self) -> QuestId;
}
