//! PlayerRecord aggregate - the complete progression state for one user
//!
//! # Design
//!
//! - **Read-only outside the crate**: fields are only changed by the
//!   transition functions in [`crate::progression`], each of which returns a
//!   new record and leaves its input untouched.
//! - **Newtypes**: `Level` (>= 1), `StatBlock` (exhaustive stats),
//!   `QuestTitle` (non-blank) keep the invariants in the types.
//! - **Persisted as-is**: the serde layout is the on-disk JSON layout.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Quest, Skill};
use crate::ids::{QuestId, SkillId};
use crate::progression::threshold_for;
use crate::value_objects::{Level, Stat, StatBlock};

/// The sole persisted entity.
///
/// # Invariants
///
/// - `experience < threshold_for(level)` after any progression operation
/// - `skills` holds each skill id at most once and never shrinks
/// - `created_at` is set once at creation, at millisecond precision (the
///   precision it is persisted with)
///
/// # Example
///
/// ```
/// use chrono::Utc;
/// use levelup_domain::aggregates::PlayerRecord;
/// use levelup_domain::progression::grant_experience;
///
/// let record = PlayerRecord::new(Utc::now());
/// let record = grant_experience(&record, 250);
///
/// assert_eq!(record.level().get(), 2);
/// assert_eq!(record.experience(), 150);
/// assert_eq!(record.allocatable_points(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub(crate) level: Level,
    #[serde(alias = "xp")]
    pub(crate) experience: u64,
    #[serde(alias = "allocPoints")]
    pub(crate) allocatable_points: u32,
    pub(crate) stats: StatBlock,
    #[serde(default)]
    pub(crate) skills: Vec<Skill>,
    #[serde(default)]
    pub(crate) quests: Vec<Quest>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub(crate) created_at: DateTime<Utc>,
}

impl PlayerRecord {
    // =========================================================================
    // Constructor
    // =========================================================================

    /// A fresh level-1 record with starting stats and no quests or skills.
    ///
    /// `created_at` is truncated to whole milliseconds.
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            level: Level::FIRST,
            experience: 0,
            allocatable_points: 0,
            stats: StatBlock::default(),
            skills: Vec::new(),
            quests: Vec::new(),
            created_at: created_at.trunc_subsecs(3),
        }
    }

    // =========================================================================
    // Accessors (read-only)
    // =========================================================================

    #[inline]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Experience accumulated towards the next level.
    #[inline]
    pub fn experience(&self) -> u64 {
        self.experience
    }

    #[inline]
    pub fn allocatable_points(&self) -> u32 {
        self.allocatable_points
    }

    #[inline]
    pub fn stats(&self) -> &StatBlock {
        &self.stats
    }

    #[inline]
    pub fn stat(&self, stat: Stat) -> u32 {
        self.stats.get(stat)
    }

    /// Unlocked skills, in the order they were unlocked.
    #[inline]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    #[inline]
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    #[inline]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn quest(&self, id: &QuestId) -> Option<&Quest> {
        self.quests.iter().find(|q| &q.id == id)
    }

    pub fn has_skill(&self, id: &SkillId) -> bool {
        self.skills.iter().any(|s| &s.id == id)
    }

    /// Experience needed to advance from the current level.
    pub fn experience_to_next(&self) -> u64 {
        threshold_for(self.level)
    }

    /// Fraction of the current level completed, clamped to `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let threshold = self.experience_to_next();
        if threshold == 0 {
            return 1.0;
        }
        (self.experience as f64 / threshold as f64).min(1.0)
    }
}
