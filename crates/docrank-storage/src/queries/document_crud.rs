//! Batched deduplicating insert, delete by id, counts.

use rusqlite::{params, params_from_iter, Connection};

use docrank_core::errors::DocrankResult;
use docrank_core::models::TableName;

use crate::to_storage_err;

/// SQLite's bound-parameter ceiling for the bundled build.
const MAX_BOUND_PARAMS: usize = 32_766;

/// A document ready for insertion: normalized, hashed, metadata serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDocumentRow {
    pub hash: String,
    pub doc_id: String,
    pub content: String,
    pub metadata: String,
}

/// Result of [`insert_batch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Per input row, the id now associated with its content.
    pub ids: Vec<String>,
    /// Rows actually written; the rest were duplicates.
    pub inserted: usize,
}

/// Insert rows, skipping any whose hash is already stored.
///
/// Each reported id is the row's own `doc_id` if it was inserted, otherwise
/// the `doc_id` of the row that already holds that hash. Runs on whatever
/// transaction `conn` is in.
pub fn insert_batch(
    conn: &Connection,
    table: &TableName,
    rows: &[NewDocumentRow],
) -> DocrankResult<BatchOutcome> {
    let mut insert = conn
        .prepare_cached(&format!(
            "INSERT INTO {table} (hash, doc_id, content, metadata)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT (hash) DO NOTHING"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;
    let mut lookup = conn
        .prepare_cached(&format!("SELECT doc_id FROM {table} WHERE hash = ?1"))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut ids = Vec::with_capacity(rows.len());
    let mut inserted_total = 0;
    for row in rows {
        let inserted = insert
            .execute(params![row.hash, row.doc_id, row.content, row.metadata])
            .map_err(|e| to_storage_err(format!("insert {}: {e}", row.doc_id)))?;
        if inserted == 1 {
            inserted_total += 1;
            ids.push(row.doc_id.clone());
        } else {
            let existing: String = lookup
                .query_row(params![row.hash], |r| r.get(0))
                .map_err(|e| to_storage_err(format!("dedup lookup {}: {e}", row.hash)))?;
            ids.push(existing);
        }
    }
    Ok(BatchOutcome {
        ids,
        inserted: inserted_total,
    })
}

/// Delete every row whose `doc_id` is in `ids`. Returns rows removed.
pub fn delete_by_doc_ids(conn: &Connection, table: &TableName, ids: &[String]) -> DocrankResult<usize> {
    let mut removed = 0;
    for chunk in ids.chunks(MAX_BOUND_PARAMS) {
        let placeholders = vec!["?"; chunk.len()].join(",");
        removed += conn
            .execute(
                &format!("DELETE FROM {table} WHERE doc_id IN ({placeholders})"),
                params_from_iter(chunk.iter()),
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
    }
    Ok(removed)
}

/// Number of stored documents.
pub fn count(conn: &Connection, table: &TableName) -> DocrankResult<usize> {
    let n: i64 = conn
        .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
        .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(n as usize)
}
