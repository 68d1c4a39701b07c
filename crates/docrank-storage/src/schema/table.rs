//! Storage table DDL.

use rusqlite::Connection;

use docrank_core::errors::{DocrankResult, SetupError};
use docrank_core::models::TableName;

/// Columns: surrogate `id` (never reused, so index rowids stay unique),
/// 32-char unique content `hash`, caller-facing `doc_id`, normalized
/// `content`, and `metadata` as JSON text.
pub fn create_table(conn: &Connection, table: &TableName) -> DocrankResult<()> {
    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            hash CHAR(32) NOT NULL UNIQUE,
            doc_id TEXT NOT NULL UNIQUE,
            content TEXT NOT NULL,
            metadata TEXT NOT NULL
        );"
    ))
    .map_err(|e| {
        SetupError::TableCreation {
            table: table.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
