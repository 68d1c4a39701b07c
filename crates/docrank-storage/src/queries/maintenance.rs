//! VACUUM, ranking index optimize, page statistics, integrity check.

use rusqlite::Connection;

use docrank_core::errors::DocrankResult;
use docrank_core::models::TableName;

use crate::to_storage_err;

/// Merge the ranking index's b-trees and drop entries for deleted rows.
pub fn optimize_ranking_index(conn: &Connection, table: &TableName) -> DocrankResult<()> {
    let index = table.ranking_index();
    conn.execute_batch(&format!("INSERT INTO {index}({index}) VALUES ('optimize');"))
        .map_err(|e| to_storage_err(format!("optimize {index}: {e}")))?;
    Ok(())
}

/// Run full vacuum. Must be called outside a transaction.
pub fn full_vacuum(conn: &Connection) -> DocrankResult<()> {
    conn.execute_batch("VACUUM")
        .map_err(|e| to_storage_err(format!("vacuum: {e}")))?;
    Ok(())
}

/// WAL checkpoint.
pub fn wal_checkpoint(conn: &Connection) -> DocrankResult<()> {
    conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE)")
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Run integrity check. Returns true if the database is OK.
pub fn integrity_check(conn: &Connection) -> DocrankResult<bool> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(result == "ok")
}

/// Raw page statistics: `(page_count, page_size, freelist_count)`.
pub fn page_stats(conn: &Connection) -> DocrankResult<(u64, u64, u64)> {
    let read = |name: &str| -> DocrankResult<u64> {
        conn.pragma_query_value(None, name, |row| row.get(0))
            .map_err(|e| to_storage_err(e.to_string()))
    };
    Ok((read("page_count")?, read("page_size")?, read("freelist_count")?))
}
