//! Stable error codes for callers that match on strings rather than types.

use super::{DocrankError, QueryError, SetupError, StorageError};

/// Maps an error to a stable, machine-readable code.
pub trait DocrankErrorCode {
    /// Returns the error code string (e.g., "POOL_EXHAUSTED").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const CONNECTION_ERROR: &str = "CONNECTION_ERROR";
pub const POOL_EXHAUSTED: &str = "POOL_EXHAUSTED";
pub const POOL_CLOSED: &str = "POOL_CLOSED";
pub const SETUP_ERROR: &str = "SETUP_ERROR";
pub const QUERY_ERROR: &str = "QUERY_ERROR";
pub const VALUE_ERROR: &str = "VALUE_ERROR";
pub const CLOSED_ERROR: &str = "CLOSED_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";

impl DocrankErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        match self {
            StorageError::SqliteError { .. } => STORAGE_ERROR,
            StorageError::ConnectionFailed { .. } => CONNECTION_ERROR,
            StorageError::PoolExhausted { .. } => POOL_EXHAUSTED,
            StorageError::PoolClosed => POOL_CLOSED,
            StorageError::CloseIncomplete { .. } => CONNECTION_ERROR,
        }
    }
}

impl DocrankErrorCode for SetupError {
    fn error_code(&self) -> &'static str {
        SETUP_ERROR
    }
}

impl DocrankErrorCode for QueryError {
    fn error_code(&self) -> &'static str {
        QUERY_ERROR
    }
}

impl DocrankErrorCode for DocrankError {
    fn error_code(&self) -> &'static str {
        match self {
            DocrankError::StorageError(e) => e.error_code(),
            DocrankError::SetupError(e) => e.error_code(),
            DocrankError::QueryError(e) => e.error_code(),
            DocrankError::InvalidInput { .. } => VALUE_ERROR,
            DocrankError::Closed => CLOSED_ERROR,
            DocrankError::ConfigError { .. } => CONFIG_ERROR,
            DocrankError::SerializationError(_) => SERIALIZATION_ERROR,
        }
    }
}
