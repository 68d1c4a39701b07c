//! # docrank-storage
//!
//! SQLite persistence for docrank: a bounded connection pool, idempotent
//! schema and FTS5 index provisioning, deduplicated batched writes, ranked
//! queries, and post-delete compaction.

pub mod compaction;
pub mod pool;
pub mod queries;
pub mod schema;
pub mod store;
pub mod transaction;

pub use pool::{ConnectionPool, PoolStatus, PooledConnection};
pub use store::DocumentStore;

use docrank_core::errors::{DocrankError, StorageError};

/// Wrap any displayable error as a storage error.
pub(crate) fn to_storage_err(message: impl Into<String>) -> DocrankError {
    DocrankError::StorageError(StorageError::SqliteError {
        message: message.into(),
    })
}
