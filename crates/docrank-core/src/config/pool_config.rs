use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Connection pool configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Connections opened eagerly when the pool is created.
    pub min_size: usize,
    /// Hard cap on simultaneously open connections.
    pub max_size: usize,
    /// How long `checkout` waits for a free connection before failing.
    pub checkout_timeout_ms: u64,
    /// SQLite busy timeout applied to every connection.
    pub busy_timeout_ms: u32,
}

impl PoolConfig {
    pub fn checkout_timeout(&self) -> Duration {
        Duration::from_millis(self.checkout_timeout_ms)
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            min_size: defaults::DEFAULT_POOL_MIN_SIZE,
            max_size: defaults::DEFAULT_POOL_MAX_SIZE,
            checkout_timeout_ms: defaults::DEFAULT_CHECKOUT_TIMEOUT_MS,
            busy_timeout_ms: defaults::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}
