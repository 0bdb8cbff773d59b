//! Quest entity - a task that grants experience once when completed
//!
//! Daily quests can have their completion cleared by an explicit reset;
//! one-time quests stay done.

use serde::{Deserialize, Serialize};

use crate::ids::QuestId;
use crate::value_objects::QuestTitle;

/// Experience granted by quests the player adds without choosing a reward.
pub const DEFAULT_QUEST_REWARD: u64 = 50;

/// A quest tracked on the player record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: QuestId,
    pub title: QuestTitle,
    /// Experience granted once, on completion
    #[serde(alias = "xp")]
    pub experience_reward: u64,
    /// Whether a daily reset clears completion
    #[serde(alias = "daily")]
    pub is_daily: bool,
    #[serde(alias = "done")]
    pub is_done: bool,
}

impl Quest {
    /// A new one-time quest, not yet done.
    pub fn new(id: QuestId, title: QuestTitle, experience_reward: u64) -> Self {
        Self {
            id,
            title,
            experience_reward,
            is_daily: false,
            is_done: false,
        }
    }

    /// A new daily quest, not yet done.
    pub fn daily(id: QuestId, title: QuestTitle, experience_reward: u64) -> Self {
        Self {
            is_daily: true,
            ..Self::new(id, title, experience_reward)
        }
    }
}
