//! Static configuration data consumed by the progression engine
//!
//! The starter quest seeds and the level -> skill unlock table are built once
//! and never mutated.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

use crate::aggregates::PlayerRecord;
use crate::entities::{Quest, Skill, SkillUnlock, SkillUnlockTable};
use crate::ids::QuestId;
use crate::value_objects::{Level, QuestTitle};

/// Seed data for a quest present on every new record.
///
/// Seeds are built in const context, so a blank or untrimmed title fails
/// the build instead of surfacing at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestSeed {
    id: &'static str,
    title: &'static str,
    experience_reward: u64,
}

impl QuestSeed {
    /// A daily quest seed.
    ///
    /// # Panics
    ///
    /// If `title` is blank or has surrounding whitespace. In a `const` item
    /// this is a compile error.
    pub const fn daily(id: &'static str, title: &'static str, experience_reward: u64) -> Self {
        assert!(is_trimmed_non_blank(title), "quest seed title must be trimmed and non-blank");
        Self {
            id,
            title,
            experience_reward,
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Materializes the seed as a fresh, not-done daily quest.
    pub fn to_quest(&self) -> Quest {
        Quest::daily(
            QuestId::new(self.id),
            QuestTitle::from_static(self.title),
            self.experience_reward,
        )
    }
}

const fn is_trimmed_non_blank(title: &str) -> bool {
    let bytes = title.as_bytes();
    !bytes.is_empty()
        && !bytes[0].is_ascii_whitespace()
        && !bytes[bytes.len() - 1].is_ascii_whitespace()
}

pub const STARTER_QUESTS: [QuestSeed; 3] = [
    QuestSeed::daily("q1", "Walk 5000 steps", 40),
    QuestSeed::daily("q2", "Complete push workout", 70),
    QuestSeed::daily("q3", "Read 30 minutes", 30),
];

/// The default unlock table: Power Strike at level 2, Quickstep at level 4.
pub static DEFAULT_SKILL_TABLE: Lazy<SkillUnlockTable> = Lazy::new(|| {
    SkillUnlockTable::new([
        SkillUnlock {
            level: Level::clamped(2),
            skills: vec![
                Skill::new("s1", "Power Strike").with_description("A small strike for bonus damage")
            ],
        },
        SkillUnlock {
            level: Level::clamped(4),
            skills: vec![
                Skill::new("s2", "Quickstep").with_description("Briefly increases movement speed")
            ],
        },
    ])
});

/// Quests materialized from [`STARTER_QUESTS`].
pub fn starter_quests() -> Vec<Quest> {
    STARTER_QUESTS.iter().map(QuestSeed::to_quest).collect()
}

/// The record handed out when nothing has been persisted yet.
pub fn starter_record(created_at: DateTime<Utc>) -> PlayerRecord {
    PlayerRecord {
        quests: starter_quests(),
        ..PlayerRecord::new(created_at)
    }
}
