//! FTS5 ranked retrieval.

use rusqlite::{params, Connection};

use docrank_core::errors::{DocrankResult, QueryError};
use docrank_core::models::TableName;

/// A raw ranked row before metadata is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub doc_id: String,
    pub content: String,
    pub metadata: String,
    pub score: f64,
}

/// Run an FTS5 `MATCH` expression and return the top `limit` rows by
/// relevance, most relevant first.
///
/// FTS5's `bm25()` is lower-is-better, so it is negated to give a score
/// where higher means more relevant.
pub fn search_bm25(
    conn: &Connection,
    table: &TableName,
    match_expr: &str,
    limit: usize,
) -> DocrankResult<Vec<RankedRow>> {
    let index = table.ranking_index();
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT t.doc_id, t.content, t.metadata, -bm25({index}) AS score
             FROM {index}
             JOIN {table} t ON t.id = {index}.rowid
             WHERE {index} MATCH ?1
             ORDER BY score DESC
             LIMIT ?2"
        ))
        .map_err(query_failed)?;

    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let rows = stmt
        .query_map(params![match_expr, limit], |row| {
            Ok(RankedRow {
                doc_id: row.get(0)?,
                content: row.get(1)?,
                metadata: row.get(2)?,
                score: row.get(3)?,
            })
        })
        .map_err(query_failed)?;

    let mut results = Vec::new();
    for row in rows {
        results.push(row.map_err(query_failed)?);
    }
    Ok(results)
}

fn query_failed(e: rusqlite::Error) -> docrank_core::DocrankError {
    QueryError::ExecutionFailed {
        reason: e.to_string(),
    }
    .into()
}
