//! Validated text newtypes
//!
//! These newtypes ensure that user-entered text is valid by construction:
//! non-empty after trimming, and stored trimmed.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

// ============================================================================
// QuestTitle
// ============================================================================

/// A validated quest title (non-empty, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct QuestTitle(String);

impl QuestTitle {
    /// Create a new validated quest title.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuestTitle` if the title is empty after
    /// trimming.
    pub fn new(title: impl Into<String>) -> Result<Self, DomainError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidQuestTitle);
        }
        if trimmed.len() == title.len() {
            return Ok(Self(title));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Wraps a title already known to be trimmed and non-blank.
    pub(crate) fn from_static(title: &'static str) -> Self {
        Self(title.to_string())
    }

    /// Returns the title as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for QuestTitle {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<QuestTitle> for String {
    fn from(value: QuestTitle) -> Self {
        value.0
    }
}
