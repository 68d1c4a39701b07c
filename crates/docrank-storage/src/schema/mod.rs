//! Idempotent provisioning of the storage table and its FTS5 ranking index.
//!
//! Both steps run inside one `BEGIN IMMEDIATE` transaction, so concurrent
//! first-time callers (threads or processes) serialize on the write lock and
//! the loser finds everything already in place.

pub mod ranking_index;
pub mod table;

use rusqlite::Connection;
use tracing::{error, info};

use docrank_core::errors::{DocrankError, DocrankResult, SetupError};
use docrank_core::models::TableName;

use crate::transaction::with_immediate_transaction;

/// Create the storage table and ranking index for `table` if absent.
///
/// Never retried; the caller decides what to do with a `SetupError`.
pub fn ensure_schema(conn: &Connection, table: &TableName) -> DocrankResult<()> {
    let result = ranking_index::check_extension(conn).and_then(|()| {
        with_immediate_transaction(conn, |tx| {
            table::create_table(tx, table)?;
            let created = ranking_index::create_if_absent(tx, table)?;
            Ok(created)
        })
    });

    match result {
        Ok(created) => {
            info!(table = %table, index_created = created, "schema ensured");
            Ok(())
        }
        Err(e) => {
            error!(table = %table, error = %e, "schema provisioning failed");
            Err(into_setup_error(table, e))
        }
    }
}

/// Lock and commit failures come back as storage errors; report them as
/// setup failures so construction sees one error kind.
fn into_setup_error(table: &TableName, err: DocrankError) -> DocrankError {
    match err {
        DocrankError::SetupError(_) => err,
        other => SetupError::TableCreation {
            table: table.to_string(),
            reason: other.to_string(),
        }
        .into(),
    }
}

/// Whether `name` exists in the catalog with the given type.
pub(crate) fn catalog_has(conn: &Connection, kind: &str, name: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2)",
        rusqlite::params![kind, name],
        |row| row.get(0),
    )
}

/// Whether the storage table exists.
pub fn table_exists(conn: &Connection, table: &TableName) -> DocrankResult<bool> {
    catalog_has(conn, "table", table.as_str()).map_err(|e| crate::to_storage_err(e.to_string()))
}

/// Whether the ranking index exists.
pub fn ranking_index_exists(conn: &Connection, table: &TableName) -> DocrankResult<bool> {
    catalog_has(conn, "table", &table.ranking_index())
        .map_err(|e| crate::to_storage_err(e.to_string()))
}
