//! Bounded connection pool with checkout/checkin discipline.
//!
//! `min_size` connections are opened eagerly; more are opened on demand up
//! to `max_size`. When every connection is leased, `checkout` blocks on a
//! condition variable for at most `checkout_timeout_ms` and then fails with
//! `PoolExhausted`. After `close_all`, checkout fails with `PoolClosed`.

pub mod pragmas;
mod pooled;

use std::sync::{Condvar, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info, warn};

use docrank_core::config::PoolConfig;
use docrank_core::errors::{DocrankError, DocrankResult, StorageError};

pub use pooled::PooledConnection;

use self::pragmas::{apply_pragmas, verify_wal_mode};
use crate::to_storage_err;

/// Point-in-time view of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStatus {
    /// Connections open and waiting in the pool.
    pub idle: usize,
    /// Connections currently leased to callers.
    pub in_use: usize,
    /// Every connection the pool accounts for, including ones being opened.
    pub total: usize,
    pub max_size: usize,
    pub closed: bool,
}

struct PoolState {
    idle: Vec<Connection>,
    leased: usize,
    total: usize,
    closed: bool,
}

/// A bounded pool of read-write SQLite connections to one database.
pub struct ConnectionPool {
    uri: String,
    config: PoolConfig,
    state: Mutex<PoolState>,
    returned: Condvar,
}

impl ConnectionPool {
    /// Open a pool against `uri`, eagerly connecting `config.min_size` times.
    ///
    /// Fails with `ConnectionFailed` if the URI is malformed, points at an
    /// in-memory database, or the database cannot be opened.
    pub fn open(uri: &str, config: PoolConfig) -> DocrankResult<Self> {
        if config.min_size == 0 || config.min_size > config.max_size {
            return Err(DocrankError::config(format!(
                "invalid pool bounds: min_size={} max_size={}",
                config.min_size, config.max_size
            )));
        }
        if is_in_memory(uri) {
            return Err(connection_failed(
                uri,
                "in-memory databases are private per connection; use a file path",
            ));
        }

        let mut idle = Vec::with_capacity(config.max_size);
        for _ in 0..config.min_size {
            idle.push(open_connection(uri, &config)?);
        }

        info!(
            uri,
            min_size = config.min_size,
            max_size = config.max_size,
            "connection pool created"
        );

        let total = idle.len();
        Ok(Self {
            uri: uri.to_string(),
            config,
            state: Mutex::new(PoolState {
                idle,
                leased: 0,
                total,
                closed: false,
            }),
            returned: Condvar::new(),
        })
    }

    /// Lease a connection, waiting up to the checkout timeout.
    pub fn checkout(&self) -> DocrankResult<PooledConnection<'_>> {
        let timeout = self.config.checkout_timeout();
        let deadline = Instant::now() + timeout;
        let mut state = self.lock_state()?;

        loop {
            if state.closed {
                return Err(StorageError::PoolClosed.into());
            }

            if let Some(conn) = state.idle.pop() {
                state.leased += 1;
                return Ok(PooledConnection::new(self, conn));
            }

            if state.total < self.config.max_size {
                // Reserve the slot, then connect without holding the lock.
                state.total += 1;
                state.leased += 1;
                drop(state);
                return match open_connection(&self.uri, &self.config) {
                    Ok(conn) => {
                        debug!(uri = %self.uri, "opened additional pooled connection");
                        Ok(PooledConnection::new(self, conn))
                    }
                    Err(e) => {
                        let mut state = self.recover_state();
                        state.total -= 1;
                        state.leased -= 1;
                        drop(state);
                        self.returned.notify_one();
                        Err(e)
                    }
                };
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(
                    in_use = state.leased,
                    max_size = self.config.max_size,
                    "connection pool exhausted"
                );
                return Err(StorageError::PoolExhausted {
                    in_use: state.leased,
                    waited_ms: duration_ms(timeout),
                }
                .into());
            }

            let (guard, _) = self
                .returned
                .wait_timeout(state, deadline - now)
                .map_err(|e| to_storage_err(format!("pool lock poisoned: {e}")))?;
            state = guard;
        }
    }

    /// Close every connection. Leased connections are closed as they come
    /// back; this waits up to the checkout timeout for them and reports
    /// `CloseIncomplete` if some are still out. Calling it again is harmless.
    pub fn close_all(&self) -> DocrankResult<()> {
        let idle = {
            let mut state = self.lock_state()?;
            state.closed = true;
            let idle = std::mem::take(&mut state.idle);
            state.total -= idle.len();
            idle
        };
        // Waiters must observe `closed` and fail fast.
        self.returned.notify_all();

        let closed_now = idle.len();
        for conn in idle {
            close_connection(conn);
        }

        let deadline = Instant::now() + self.config.checkout_timeout();
        let mut state = self.lock_state()?;
        while state.total > 0 {
            let now = Instant::now();
            if now >= deadline {
                warn!(outstanding = state.total, "pool closed with leased connections");
                return Err(StorageError::CloseIncomplete {
                    outstanding: state.total,
                }
                .into());
            }
            let (guard, _) = self
                .returned
                .wait_timeout(state, deadline - now)
                .map_err(|e| to_storage_err(format!("pool lock poisoned: {e}")))?;
            state = guard;
        }

        info!(uri = %self.uri, closed = closed_now, "connection pool closed");
        Ok(())
    }

    /// Snapshot of the pool's occupancy.
    pub fn status(&self) -> PoolStatus {
        let state = self.recover_state();
        PoolStatus {
            idle: state.idle.len(),
            in_use: state.leased,
            total: state.total,
            max_size: self.config.max_size,
            closed: state.closed,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.recover_state().closed
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Take a connection back from a lease.
    fn checkin(&self, conn: Connection) {
        // A lease that errored out mid-transaction must not poison the next one.
        if !conn.is_autocommit() {
            if let Err(e) = conn.execute_batch("ROLLBACK") {
                warn!(error = %e, "rollback on checkin failed");
            }
        }

        let mut state = self.recover_state();
        if state.leased == 0 {
            drop(state);
            warn!("checkin without a matching checkout; closing connection");
            close_connection(conn);
            return;
        }
        state.leased -= 1;
        if state.closed {
            state.total -= 1;
            drop(state);
            close_connection(conn);
        } else {
            state.idle.push(conn);
            drop(state);
        }
        self.returned.notify_all();
    }

    fn lock_state(&self) -> DocrankResult<MutexGuard<'_, PoolState>> {
        self.state
            .lock()
            .map_err(|e| to_storage_err(format!("pool lock poisoned: {e}")))
    }

    /// Lock for paths that cannot fail (checkin, status). Pool state is only
    /// mutated in short non-panicking sections, so a poisoned lock still
    /// holds consistent counters.
    fn recover_state(&self) -> MutexGuard<'_, PoolState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Drop for ConnectionPool {
    fn drop(&mut self) {
        let state = self.recover_state();
        if !state.closed && state.total > 0 {
            debug!(uri = %self.uri, open = state.total, "dropping unclosed connection pool");
        }
    }
}

/// Open one connection with the pool's flags and pragmas applied.
fn open_connection(uri: &str, config: &PoolConfig) -> DocrankResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn =
        Connection::open_with_flags(uri, flags).map_err(|e| connection_failed(uri, e.to_string()))?;
    // Opening is lazy; the pragmas are the first real round trip.
    apply_pragmas(&conn, config.busy_timeout_ms)
        .map_err(|e| connection_failed(uri, e.to_string()))?;
    if !verify_wal_mode(&conn)? {
        warn!(uri = %uri, "journal_mode is not WAL; readers will block on writers");
    }
    Ok(conn)
}

fn close_connection(conn: Connection) {
    if let Err((_, e)) = conn.close() {
        warn!(error = %e, "failed to close connection cleanly");
    }
}

fn is_in_memory(uri: &str) -> bool {
    let trimmed = uri.trim();
    trimmed.is_empty()
        || trimmed == ":memory:"
        || trimmed.starts_with("file::memory:")
        || (trimmed.starts_with("file:") && trimmed.contains("mode=memory"))
}

fn connection_failed(uri: &str, reason: impl Into<String>) -> DocrankError {
    StorageError::ConnectionFailed {
        uri: uri.to_string(),
        reason: reason.into(),
    }
    .into()
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
