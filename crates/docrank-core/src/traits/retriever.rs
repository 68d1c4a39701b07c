use crate::errors::DocrankResult;
use crate::models::{Document, SearchResult};

/// The capability every retriever backend provides.
pub trait IRetriever: Send + Sync {
    /// Store documents, returning the id associated with each one.
    /// Content already present keeps its original id.
    fn add_documents(&self, documents: &[Document], ids: Option<&[String]>)
        -> DocrankResult<Vec<String>>;

    /// Top-k search. `k = None` uses the retriever's configured cap.
    fn search(&self, query: &str, k: Option<usize>) -> DocrankResult<Vec<SearchResult>>;

    /// Remove documents by id. Returns the number of rows removed.
    fn delete(&self, ids: &[String]) -> DocrankResult<usize>;

    /// Release every backend resource. Safe to call more than once.
    fn close(&self) -> DocrankResult<()>;
}
