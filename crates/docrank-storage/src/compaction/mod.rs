//! Post-delete space reclamation.

pub mod storage_health;

use rusqlite::Connection;
use tracing::debug;

use docrank_core::errors::DocrankResult;
use docrank_core::models::TableName;

use crate::queries::maintenance;

/// Optimize the ranking index, VACUUM the database file, then truncate
/// the WAL that VACUUM filled.
///
/// Must run outside a transaction. VACUUM rewrites the whole database
/// file, not only `table`.
pub fn compact(conn: &Connection, table: &TableName) -> DocrankResult<()> {
    maintenance::optimize_ranking_index(conn, table)?;
    maintenance::full_vacuum(conn)?;
    maintenance::wal_checkpoint(conn)?;
    debug!(table = %table, "compaction complete");
    Ok(())
}
