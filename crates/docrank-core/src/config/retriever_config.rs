use serde::{Deserialize, Serialize};

use super::{defaults, PoolConfig, QueryConfig};
use crate::errors::{DocrankError, DocrankResult};
use crate::models::TableName;

/// Top-level retriever configuration. Immutable once a retriever is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieverConfig {
    /// SQLite path or `file:` URI.
    pub connection_uri: String,
    /// Trusted storage table name, validated on construction.
    pub table_name: TableName,
    /// Default result cap for searches.
    #[serde(default = "defaults::default_k")]
    pub k: usize,
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

impl RetrieverConfig {
    /// Build a config with default pool and query settings.
    pub fn new(
        connection_uri: impl Into<String>,
        table_name: impl Into<String>,
        k: usize,
    ) -> DocrankResult<Self> {
        let config = Self {
            connection_uri: connection_uri.into(),
            table_name: TableName::new(table_name)?,
            k,
            pool: PoolConfig::default(),
            query: QueryConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(s: &str) -> DocrankResult<Self> {
        let config: Self = toml::from_str(s).map_err(|e| DocrankError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_pool(mut self, pool: PoolConfig) -> DocrankResult<Self> {
        self.pool = pool;
        self.validate()?;
        Ok(self)
    }

    pub fn with_query(mut self, query: QueryConfig) -> Self {
        self.query = query;
        self
    }

    /// Check cross-field constraints not expressible in the types.
    pub fn validate(&self) -> DocrankResult<()> {
        if self.connection_uri.trim().is_empty() {
            return Err(DocrankError::config("connection_uri must not be empty"));
        }
        if self.k == 0 {
            return Err(DocrankError::config("k must be a positive integer"));
        }
        if self.pool.min_size == 0 {
            return Err(DocrankError::config("pool.min_size must be at least 1"));
        }
        if self.pool.min_size > self.pool.max_size {
            return Err(DocrankError::config(format!(
                "pool.min_size ({}) exceeds pool.max_size ({})",
                self.pool.min_size, self.pool.max_size
            )));
        }
        Ok(())
    }
}
