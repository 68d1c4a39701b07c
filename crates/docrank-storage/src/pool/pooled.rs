//! Scoped connection lease.

use std::ops::Deref;

use rusqlite::Connection;

use super::ConnectionPool;

/// A connection leased from a [`ConnectionPool`].
///
/// The connection goes back to the pool when the guard is dropped, on every
/// exit path. [`PooledConnection::checkin`] returns it explicitly; since the
/// guard is consumed, the same lease cannot be checked in twice.
pub struct PooledConnection<'pool> {
    pool: &'pool ConnectionPool,
    conn: Option<Connection>,
}

impl<'pool> PooledConnection<'pool> {
    pub(super) fn new(pool: &'pool ConnectionPool, conn: Connection) -> Self {
        Self {
            pool,
            conn: Some(conn),
        }
    }

    /// Return the connection to the pool now.
    pub fn checkin(self) {
        drop(self);
    }
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn
            .as_ref()
            .expect("leased connection is present until drop")
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.checkin(conn);
        }
    }
}
