//! Player level - a positive integer that only ever grows.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A player level, always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Level(u32);

impl Level {
    /// The level every new player starts at.
    pub const FIRST: Level = Level(1);

    /// # Errors
    ///
    /// Returns `DomainError::Validation` for level 0.
    pub fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::validation("Level must be at least 1"));
        }
        Ok(Self(value))
    }

    /// Like [`Level::new`], but clamps 0 up to 1.
    pub const fn clamped(value: u32) -> Self {
        if value == 0 {
            Self(1)
        } else {
            Self(value)
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// The following level. Saturates at `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Number of levels from `earlier` up to `self` (0 if `earlier` is higher).
    pub fn levels_since(self, earlier: Level) -> u32 {
        self.0.saturating_sub(earlier.0)
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Level {
    type Error = DomainError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Level> for u32 {
    fn from(value: Level) -> Self {
        value.0
    }
}
