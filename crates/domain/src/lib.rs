//! LevelUp domain: the player record and the pure progression engine.
//!
//! Nothing in this crate performs I/O. Callers apply a transition from
//! [`progression`] and hand the returned record to whatever persists it.

pub mod aggregates;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod ids;
pub mod progression;
pub mod value_objects;

pub use aggregates::PlayerRecord;
pub use catalog::{starter_quests, starter_record, QuestSeed, DEFAULT_SKILL_TABLE, STARTER_QUESTS};
pub use entities::{Quest, Skill, SkillUnlock, SkillUnlockTable, DEFAULT_QUEST_REWARD};
pub use error::DomainError;
pub use ids::{QuestId, SkillId};
pub use progression::{
    add_quest, allocate, allocate_stat, complete_quest, grant_experience, grant_skill,
    reset_daily_quests, threshold_for, unlock_eligible_skills, POINTS_PER_LEVEL,
};
pub use value_objects::{Level, QuestTitle, Stat, StatBlock};
