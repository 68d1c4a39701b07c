use super::{QueryError, SetupError, StorageError};

/// Convenience alias used across every docrank crate.
pub type DocrankResult<T> = Result<T, DocrankError>;

/// Top-level error type. Subsystem errors convert into it via `From`.
#[derive(Debug, thiserror::Error)]
pub enum DocrankError {
    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("setup error: {0}")]
    SetupError(#[from] SetupError),

    #[error("query error: {0}")]
    QueryError(#[from] QueryError),

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("retriever is closed")]
    Closed,

    #[error("config error: {reason}")]
    ConfigError { reason: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DocrankError {
    /// Shorthand for a caller-contract violation.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Shorthand for a configuration problem.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }
}
