use serde::{Deserialize, Serialize};

use super::Metadata;

/// One ranked hit returned by a search.
///
/// `metadata` is the stored map with `id` and `relevance_score` merged in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub document_id: String,
    pub content: String,
    pub metadata: Metadata,
    /// Engine-assigned score; higher is more relevant.
    pub relevance_score: f64,
}
