// Single source of truth for all default values.

// --- Pool ---
pub const DEFAULT_POOL_MIN_SIZE: usize = 1;
pub const DEFAULT_POOL_MAX_SIZE: usize = 15;
pub const DEFAULT_CHECKOUT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 4;
pub const DEFAULT_STRIP_SUFFIX: bool = false;

pub(crate) fn default_k() -> usize {
    DEFAULT_TOP_K
}
