//! RankedQueryEngine: prepares a query, runs it against the ranking index,
//! and maps rows to scored results.
//!
//! Errors propagate: a failed execution is logged and returned as
//! `QueryError`. Only "nothing matched" yields an empty list.

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tracing::{debug, error};

use docrank_core::config::QueryConfig;
use docrank_core::constants::{METADATA_ID_KEY, METADATA_SCORE_KEY};
use docrank_core::errors::{DocrankError, DocrankResult, QueryError};
use docrank_core::models::{Metadata, SearchResult, TableName};
use docrank_core::traits::INormalizer;
use docrank_storage::queries::document_search::{self, RankedRow};
use docrank_storage::ConnectionPool;

use crate::query::{build_match_expression, strip_suffix};

/// Executes top-k relevance queries against one table.
pub struct RankedQueryEngine {
    pool: Arc<ConnectionPool>,
    table: TableName,
    normalizer: Arc<dyn INormalizer>,
    query_config: QueryConfig,
}

impl RankedQueryEngine {
    pub fn new(
        pool: Arc<ConnectionPool>,
        table: TableName,
        normalizer: Arc<dyn INormalizer>,
        query_config: QueryConfig,
    ) -> Self {
        Self {
            pool,
            table,
            normalizer,
            query_config,
        }
    }

    /// Top `k` documents for `query`, most relevant first.
    pub fn search(&self, query: &str, k: usize) -> DocrankResult<Vec<SearchResult>> {
        if k == 0 {
            return Err(DocrankError::invalid_input("k must be a positive integer"));
        }

        let normalized = self
            .normalizer
            .normalize(strip_suffix(query, &self.query_config));
        let Some(match_expr) = build_match_expression(&normalized) else {
            debug!(table = %self.table, "query normalized to nothing; no results");
            return Ok(Vec::new());
        };

        let start = Instant::now();
        let rows = {
            let conn = self.pool.checkout()?;
            document_search::search_bm25(&conn, &self.table, &match_expr, k).map_err(|e| {
                error!(table = %self.table, query = %normalized, error = %e, "ranked query failed");
                e
            })?
        };

        let results = rows
            .into_iter()
            .map(into_search_result)
            .collect::<DocrankResult<Vec<_>>>()?;
        debug!(
            table = %self.table,
            k,
            hits = results.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "search complete"
        );
        Ok(results)
    }

    pub fn query_config(&self) -> &QueryConfig {
        &self.query_config
    }
}

/// Parse stored metadata and merge in the id and score.
fn into_search_result(row: RankedRow) -> DocrankResult<SearchResult> {
    let mut metadata: Metadata =
        serde_json::from_str(&row.metadata).map_err(|e| QueryError::MalformedMetadata {
            id: row.doc_id.clone(),
            reason: e.to_string(),
        })?;
    metadata.insert(METADATA_ID_KEY.to_string(), Value::from(row.doc_id.clone()));
    metadata.insert(METADATA_SCORE_KEY.to_string(), Value::from(row.score));

    Ok(SearchResult {
        document_id: row.doc_id,
        content: row.content,
        metadata,
        relevance_score: row.score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(metadata: &str) -> RankedRow {
        RankedRow {
            doc_id: "d1".into(),
            content: "alpha beta".into(),
            metadata: metadata.into(),
            score: 1.5,
        }
    }

    #[test]
    fn merges_id_and_score_into_metadata() {
        let r = into_search_result(row(r#"{"source":"wiki","page":3}"#)).unwrap();
        assert_eq!(r.document_id, "d1");
        assert_eq!(r.metadata["source"], "wiki");
        assert_eq!(r.metadata["page"], 3);
        assert_eq!(r.metadata["id"], "d1");
        assert_eq!(r.metadata["relevance_score"], 1.5);
        assert_eq!(r.relevance_score, 1.5);
    }

    #[test]
    fn non_object_metadata_is_rejected() {
        let err = into_search_result(row("[1,2,3]")).unwrap_err();
        assert!(matches!(
            err,
            DocrankError::QueryError(QueryError::MalformedMetadata { .. })
        ));
    }
}
