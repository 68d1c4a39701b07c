//! Write transaction helper.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use docrank_core::errors::DocrankResult;

use crate::to_storage_err;

/// Execute `f` inside a `BEGIN IMMEDIATE` transaction.
///
/// The write lock is taken up front, so concurrent writers wait on
/// `busy_timeout` instead of failing mid-transaction. If `f` fails the
/// transaction is dropped, which rolls it back; a failed commit is rolled
/// back the same way.
pub fn with_immediate_transaction<F, T>(conn: &Connection, f: F) -> DocrankResult<T>
where
    F: FnOnce(&Transaction<'_>) -> DocrankResult<T>,
{
    // Pooled connections are shared by reference, so the `&mut` based
    // `Connection::transaction` is not available here.
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)
        .map_err(|e| to_storage_err(format!("failed to begin immediate transaction: {e}")))?;

    let result = f(&tx)?;

    tx.commit()
        .map_err(|e| to_storage_err(format!("failed to commit: {e}")))?;

    Ok(result)
}
