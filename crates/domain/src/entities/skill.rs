//! Skill entity and the level-gated unlock table
//!
//! Skills are granted either automatically when the player reaches the
//! level a table entry requires, or explicitly by the caller.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::SkillId;
use crate::value_objects::Level;

/// A skill the player has unlocked
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    #[serde(default, alias = "desc")]
    pub description: String,
}

impl Skill {
    pub fn new(id: impl Into<SkillId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One row of the unlock table: every skill granted on reaching `level`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillUnlock {
    pub level: Level,
    pub skills: Vec<Skill>,
}

/// Static level -> skills table, kept sorted by ascending level.
///
/// Rows sharing a level are merged in insertion order, so iteration yields
/// skills by ascending required level, then definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillUnlockTable {
    rows: Vec<SkillUnlock>,
}

impl SkillUnlockTable {
    pub fn new(rows: impl IntoIterator<Item = SkillUnlock>) -> Self {
        let mut merged: Vec<SkillUnlock> = Vec::new();
        for row in rows {
            match merged.iter_mut().find(|existing| existing.level == row.level) {
                Some(existing) => existing.skills.extend(row.skills),
                None => merged.push(row),
            }
        }
        // sort_by_key is stable, definition order within a level survives
        merged.sort_by_key(|row| row.level);
        Self { rows: merged }
    }

    /// Builds a table from raw `(level, skills)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if any row names level 0.
    pub fn from_levels(
        rows: impl IntoIterator<Item = (u32, Vec<Skill>)>,
    ) -> Result<Self, DomainError> {
        let rows = rows
            .into_iter()
            .map(|(level, skills)| {
                Ok(SkillUnlock {
                    level: Level::new(level)?,
                    skills,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;
        Ok(Self::new(rows))
    }

    pub fn rows(&self) -> &[SkillUnlock] {
        &self.rows
    }

    /// Skills whose required level is <= `level`, in unlock order.
    pub fn eligible_at(&self, level: Level) -> impl Iterator<Item = &Skill> + '_ {
        self.rows
            .iter()
            .take_while(move |row| row.level <= level)
            .flat_map(|row| row.skills.iter())
    }
}
