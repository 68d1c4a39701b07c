//! # docrank-retrieval
//!
//! Ranked retrieval over a docrank store: query preparation, FTS5 top-k
//! execution, result mapping, and the [`Retriever`] facade that owns the
//! pool for its whole lifetime.

pub mod engine;
pub mod query;
pub mod retriever;

pub use docrank_core::traits::IRetriever;
pub use engine::RankedQueryEngine;
pub use retriever::{Retriever, RetrieverState};
