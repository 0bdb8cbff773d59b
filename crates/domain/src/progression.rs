//! Progression engine - pure transitions over a [`PlayerRecord`]
//!
//! Every function takes the current record by reference and returns the next
//! one. Inputs are never modified, so a failed transition leaves the caller
//! holding exactly the record it started with.
//!
//! Experience amounts are `u64`: negative grants are not representable.

use std::str::FromStr;

use crate::aggregates::PlayerRecord;
use crate::entities::{Quest, Skill, SkillUnlockTable};
use crate::error::DomainError;
use crate::ids::QuestId;
use crate::value_objects::{Level, QuestTitle, Stat};

/// Allocatable points awarded for each level gained.
pub const POINTS_PER_LEVEL: u32 = 3;

/// Experience required to advance from `level` to the next level.
///
/// `floor(100 * level^1.2)`: 100 at level 1, 229 at level 2.
pub fn threshold_for(level: Level) -> u64 {
    (100.0 * f64::from(level.get()).powf(1.2)).floor() as u64
}

/// Adds `amount` experience, rolling over as many level-ups as it pays for.
///
/// Each level gained awards [`POINTS_PER_LEVEL`] allocatable points. Skills,
/// quests, stats and identity are untouched. Granting 0 to a normalized
/// record returns an equal record; granting 0 to a record persisted with
/// excess experience normalizes it.
///
/// Runs one step per level gained. Thresholds grow as `level^1.2`, so even
/// `u64::MAX` experience tops out near 10^8 levels; ordinary quest rewards
/// cost a handful of steps.
pub fn grant_experience(record: &PlayerRecord, amount: u64) -> PlayerRecord {
    let mut level = record.level;
    let mut experience = record.experience.saturating_add(amount);
    let mut points = record.allocatable_points;

    loop {
        let threshold = threshold_for(level);
        let next = level.next();
        if experience < threshold || next == level {
            break;
        }
        experience -= threshold;
        level = next;
        points = points.saturating_add(POINTS_PER_LEVEL);
    }

    PlayerRecord {
        level,
        experience,
        allocatable_points: points,
        ..record.clone()
    }
}

/// Unlocks every skill in `table` the record's level qualifies for.
///
/// New skills are appended by ascending required level, then definition
/// order. Already-held skills are skipped, so applying this twice changes
/// nothing the second time.
pub fn unlock_eligible_skills(record: &PlayerRecord, table: &SkillUnlockTable) -> PlayerRecord {
    let mut next = record.clone();
    for skill in table.eligible_at(record.level) {
        if !next.has_skill(&skill.id) {
            next.skills.push(skill.clone());
        }
    }
    next
}

/// Grants a skill outside the unlock table. Idempotent by skill id.
pub fn grant_skill(record: &PlayerRecord, skill: Skill) -> PlayerRecord {
    let mut next = record.clone();
    if !next.has_skill(&skill.id) {
        next.skills.push(skill);
    }
    next
}

/// Spends one allocatable point on the stat named `stat_name`.
///
/// # Errors
///
/// - `DomainError::InvalidStat` if `stat_name` is not a stat key
/// - `DomainError::InsufficientPoints` if no points are left
pub fn allocate_stat(record: &PlayerRecord, stat_name: &str) -> Result<PlayerRecord, DomainError> {
    let stat = Stat::from_str(stat_name)?;
    allocate(record, stat)
}

/// Spends one allocatable point on `stat`.
///
/// # Errors
///
/// Returns `DomainError::InsufficientPoints` if no points are left.
pub fn allocate(record: &PlayerRecord, stat: Stat) -> Result<PlayerRecord, DomainError> {
    if record.allocatable_points == 0 {
        return Err(DomainError::InsufficientPoints);
    }
    Ok(PlayerRecord {
        stats: record.stats.incremented(stat),
        allocatable_points: record.allocatable_points - 1,
        ..record.clone()
    })
}

/// Completes a quest: marks it done, grants its reward, then unlocks skills.
///
/// Unknown ids and already-done quests leave the record unchanged. The
/// result is built in one go, so no intermediate state is ever returned.
pub fn complete_quest(
    record: &PlayerRecord,
    quest_id: &QuestId,
    table: &SkillUnlockTable,
) -> PlayerRecord {
    let Some(reward) = record
        .quest(quest_id)
        .filter(|q| !q.is_done)
        .map(|q| q.experience_reward)
    else {
        return record.clone();
    };

    let mut marked = record.clone();
    for quest in marked.quests.iter_mut().filter(|q| &q.id == quest_id) {
        quest.is_done = true;
    }
    let leveled = grant_experience(&marked, reward);
    unlock_eligible_skills(&leveled, table)
}

/// Appends a new one-time quest.
///
/// `next_id` supplies candidate ids. A candidate that collides with an
/// existing quest gets a numeric suffix until it is unique.
///
/// # Errors
///
/// Returns `DomainError::InvalidQuestTitle` for blank titles.
pub fn add_quest(
    record: &PlayerRecord,
    title: &str,
    experience_reward: u64,
    mut next_id: impl FnMut() -> QuestId,
) -> Result<PlayerRecord, DomainError> {
    let title = QuestTitle::new(title)?;

    let candidate = next_id();
    let mut id = candidate.clone();
    let mut suffix = 1u32;
    while record.quest(&id).is_some() {
        id = QuestId::new(format!("{}-{}", candidate, suffix));
        suffix += 1;
    }

    let mut next = record.clone();
    next.quests.push(Quest::new(id, title, experience_reward));
    Ok(next)
}

/// Clears completion on every daily quest; one-time quests keep theirs.
pub fn reset_daily_quests(record: &PlayerRecord) -> PlayerRecord {
    let mut next = record.clone();
    for quest in next.quests.iter_mut().filter(|q| q.is_daily) {
        quest.is_done = false;
    }
    next
}
