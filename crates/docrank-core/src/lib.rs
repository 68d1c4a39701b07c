//! # docrank-core
//!
//! Foundation crate for the docrank document store.
//! Defines types, traits, errors, config, and the text normalizer shared
//! by the storage and retrieval crates.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod normalize;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RetrieverConfig;
pub use errors::{DocrankError, DocrankResult};
pub use models::{Document, SearchResult, TableName};
pub use normalize::UnicodeNormalizer;
