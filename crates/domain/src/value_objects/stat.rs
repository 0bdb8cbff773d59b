//! Stat value objects - the five player attributes and the block holding them.
//!
//! Provides type safety for stat references instead of using magic strings like "STR", "AGI".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Player attributes that allocatable points can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stat {
    /// Strength - physical power
    #[serde(rename = "STR")]
    Strength,
    /// Agility - speed and reflexes
    #[serde(rename = "AGI")]
    Agility,
    /// Endurance - stamina and toughness
    #[serde(rename = "END")]
    Endurance,
    /// Intelligence - reasoning and memory
    #[serde(rename = "INT")]
    Intelligence,
    /// Luck - fortune
    #[serde(rename = "LUCK")]
    Luck,
}

impl Stat {
    /// Every stat, in display order.
    pub const ALL: [Stat; 5] = [
        Self::Strength,
        Self::Agility,
        Self::Endurance,
        Self::Intelligence,
        Self::Luck,
    ];

    /// Returns the short uppercase key (e.g., "STR", "LUCK").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "STR",
            Self::Agility => "AGI",
            Self::Endurance => "END",
            Self::Intelligence => "INT",
            Self::Luck => "LUCK",
        }
    }

    /// Returns the full name of the stat (e.g., "Strength").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Strength => "Strength",
            Self::Agility => "Agility",
            Self::Endurance => "Endurance",
            Self::Intelligence => "Intelligence",
            Self::Luck => "Luck",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Stat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "STR" | "STRENGTH" => Ok(Self::Strength),
            "AGI" | "AGILITY" => Ok(Self::Agility),
            "END" | "ENDURANCE" => Ok(Self::Endurance),
            "INT" | "INTELLIGENCE" => Ok(Self::Intelligence),
            "LUCK" => Ok(Self::Luck),
            _ => Err(DomainError::invalid_stat(s)),
        }
    }
}

/// The fixed, exhaustive set of stat values.
///
/// One field per [`Stat`], so no stat can ever be missing or removed.
/// Serializes as `{"STR":5,"AGI":5,"END":5,"INT":5,"LUCK":1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatBlock {
    #[serde(rename = "STR")]
    strength: u32,
    #[serde(rename = "AGI")]
    agility: u32,
    #[serde(rename = "END")]
    endurance: u32,
    #[serde(rename = "INT")]
    intelligence: u32,
    #[serde(rename = "LUCK")]
    luck: u32,
}

impl StatBlock {
    pub fn new(strength: u32, agility: u32, endurance: u32, intelligence: u32, luck: u32) -> Self {
        Self {
            strength,
            agility,
            endurance,
            intelligence,
            luck,
        }
    }

    pub fn get(&self, stat: Stat) -> u32 {
        match stat {
            Stat::Strength => self.strength,
            Stat::Agility => self.agility,
            Stat::Endurance => self.endurance,
            Stat::Intelligence => self.intelligence,
            Stat::Luck => self.luck,
        }
    }

    /// Returns a copy with `stat` raised by one.
    pub fn incremented(mut self, stat: Stat) -> Self {
        let slot = match stat {
            Stat::Strength => &mut self.strength,
            Stat::Agility => &mut self.agility,
            Stat::Endurance => &mut self.endurance,
            Stat::Intelligence => &mut self.intelligence,
            Stat::Luck => &mut self.luck,
        };
        *slot = slot.saturating_add(1);
        self
    }

    /// Iterates `(stat, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Stat, u32)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}

impl Default for StatBlock {
    /// Starting stats for a fresh player.
    fn default() -> Self {
        Self::new(5, 5, 5, 5, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_from_str() {
        assert_eq!(Stat::from_str("STR"), Ok(Stat::Strength));
        assert_eq!(Stat::from_str("agi"), Ok(Stat::Agility));
        assert_eq!(Stat::from_str("Endurance"), Ok(Stat::Endurance));
        assert_eq!(Stat::from_str("INT"), Ok(Stat::Intelligence));
        assert_eq!(Stat::from_str("luck"), Ok(Stat::Luck));
    }

    #[test]
    fn test_stat_from_str_unknown() {
        assert_eq!(
            Stat::from_str("CHA"),
            Err(DomainError::InvalidStat("CHA".to_string()))
        );
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(format!("{}", Stat::Strength), "STR");
        assert_eq!(format!("{}", Stat::Luck), "LUCK");
    }

    #[test]
    fn test_default_block() {
        let block = StatBlock::default();
        assert_eq!(block.get(Stat::Strength), 5);
        assert_eq!(block.get(Stat::Luck), 1);
    }

    #[test]
    fn test_incremented_touches_one_stat() {
        let block = StatBlock::default().incremented(Stat::Agility);
        assert_eq!(block.get(Stat::Agility), 6);
        assert_eq!(block.get(Stat::Strength), 5);
        assert_eq!(block.get(Stat::Endurance), 5);
    }

    #[test]
    fn test_block_json_layout() {
        let json = serde_json::to_value(StatBlock::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"STR": 5, "AGI": 5, "END": 5, "INT": 5, "LUCK": 1})
        );
    }

    #[test]
    fn test_block_rejects_missing_stat() {
        let result: Result<StatBlock, _> =
            serde_json::from_str(r#"{"STR":5,"AGI":5,"END":5,"INT":5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_iter_covers_all_stats() {
        let keys: Vec<_> = StatBlock::default().iter().map(|(s, _)| s).collect();
        assert_eq!(keys, Stat::ALL.to_vec());
    }
}
