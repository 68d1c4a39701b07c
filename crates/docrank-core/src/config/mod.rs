//! Configuration for docrank.
//! TOML-based; every sub-struct falls back to the values in [`defaults`].

pub mod defaults;
pub mod pool_config;
pub mod query_config;
pub mod retriever_config;

pub use pool_config::PoolConfig;
pub use query_config::QueryConfig;
pub use retriever_config::RetrieverConfig;
