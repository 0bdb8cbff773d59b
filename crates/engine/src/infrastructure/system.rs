//! Production adapters for the clock and quest-id ports.

use chrono::{DateTime, Utc};
use levelup_domain::QuestId;
use uuid::Uuid;

use crate::infrastructure::ports::{ClockPort, QuestIdGenerator};

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Quest ids of the form `q-<uuid v4>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidQuestIds;

impl QuestIdGenerator for UuidQuestIds {
    fn next_quest_id(&self) -> QuestId {
        QuestId::from_uuid(Uuid::new_v4())
    }
}

/// Clock frozen at one instant.
#[cfg(test)]
pub struct FixedClock(pub DateTime<Utc>);

#[cfg(test)]
impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Generator that proposes the same id every time.
#[cfg(test)]
pub struct FixedQuestIds(pub &'static str);

#[cfg(test)]
impl QuestIdGenerator for FixedQuestIds {
    fn next_quest_id(&self) -> QuestId {
        QuestId::new(self.0)
    }
}
