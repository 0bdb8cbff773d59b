//! Domain entities - objects with identity tracked on the player record

mod quest;
mod skill;

pub use quest::{Quest, DEFAULT_QUEST_REWARD};
pub use skill::{Skill, SkillUnlock, SkillUnlockTable};
