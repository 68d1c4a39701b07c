//! Query preparation: suffix stripping and match-expression building.

use docrank_core::config::QueryConfig;

/// Cut `query` at the first occurrence of the configured marker, if
/// stripping is active and the marker is present. Otherwise unchanged.
pub fn strip_suffix<'q>(query: &'q str, config: &QueryConfig) -> &'q str {
    match config.active_marker().and_then(|m| query.find(m)) {
        Some(idx) => &query[..idx],
        None => query,
    }
}

/// Build an FTS5 match expression from normalized text.
///
/// Every token is quoted, so words like `OR` or `NEAR` are matched
/// literally, and restricted to the `content` column. Tokens are combined
/// with `OR` and ranked by BM25. Returns `None` when there is nothing to
/// match.
pub fn build_match_expression(normalized: &str) -> Option<String> {
    let terms: Vec<String> = normalized
        .split_whitespace()
        .map(|token| format!("content:\"{}\"", token.replace('"', "\"\"")))
        .collect();
    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" OR "))
    }
}
