/// Storage-layer errors for SQLite connections and statements.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("SQLite error: {message}")]
    SqliteError { message: String },

    #[error("cannot connect to {uri}: {reason}")]
    ConnectionFailed { uri: String, reason: String },

    #[error("connection pool exhausted: {in_use} connections in use, waited {waited_ms}ms")]
    PoolExhausted { in_use: usize, waited_ms: u64 },

    #[error("connection pool is closed")]
    PoolClosed,

    #[error("pool closed with {outstanding} connections still leased")]
    CloseIncomplete { outstanding: usize },
}
