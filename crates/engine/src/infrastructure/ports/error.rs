//! Error types for port operations.

/// Key-value storage errors with context for debugging.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The storage medium could not be read or written - includes operation name for tracing.
    #[error("Storage error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// The storage medium holds data that cannot be decoded.
    #[error("Storage data is corrupt: {0}")]
    Corrupt(String),
}

impl StorageError {
    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    /// Create a Corrupt error.
    pub fn corrupt(message: impl ToString) -> Self {
        Self::Corrupt(message.to_string())
    }

    /// Check if this is a Corrupt error.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }
}
