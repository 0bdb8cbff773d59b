//! Unified error types for the domain layer
//!
//! Every variant is recoverable: a failed transition never leaves a
//! `PlayerRecord` partially updated, so callers can surface the message and
//! keep going with the record they already hold.

use thiserror::Error;

/// Unified error type for progression operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Stat allocation attempted with no allocatable points left
    #[error("No allocation points available")]
    InsufficientPoints,

    /// Stat key is not one of the fixed stat names
    #[error("Unknown stat: {0}")]
    InvalidStat(String),

    /// Quest title is empty or whitespace-only
    #[error("Quest title cannot be blank")]
    InvalidQuestTitle,

    /// Validation failed (e.g., malformed configuration data)
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    /// Creates a validation error for values that violate a domain invariant.
    ///
    /// # Example
    /// ```ignore
    /// if raw == 0 {
    ///     return Err(DomainError::validation("Level must be at least 1"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid stat error
    pub fn invalid_stat(name: impl Into<String>) -> Self {
        Self::InvalidStat(name.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_points_message() {
        let err = DomainError::InsufficientPoints;
        assert_eq!(err.to_string(), "No allocation points available");
    }

    #[test]
    fn test_invalid_stat_error() {
        let err = DomainError::invalid_stat("CHA");
        assert!(matches!(err, DomainError::InvalidStat(_)));
        assert_eq!(err.to_string(), "Unknown stat: CHA");
    }

    #[test]
    fn test_validation_error() {
        let err = DomainError::validation("level must be at least 1");
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(err.to_string(), "Validation failed: level must be at least 1");
    }
}
