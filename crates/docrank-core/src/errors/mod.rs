//! Error handling for docrank.
//! One error enum per subsystem, `thiserror` only.

pub mod docrank_error;
pub mod error_code;
pub mod query_error;
pub mod setup_error;
pub mod storage_error;

pub use docrank_error::{DocrankError, DocrankResult};
pub use error_code::DocrankErrorCode;
pub use query_error::QueryError;
pub use setup_error::SetupError;
pub use storage_error::StorageError;
