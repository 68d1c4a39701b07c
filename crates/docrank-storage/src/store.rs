//! DocumentStore: deduplicated batched ingest and delete-with-compaction.
//!
//! Both write paths fail loud: any error rolls the transaction back and is
//! returned, partial success is never exposed.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use docrank_core::errors::{DocrankError, DocrankResult};
use docrank_core::models::{content_hash, Document, TableName};
use docrank_core::traits::INormalizer;

use crate::compaction::{self, storage_health};
use crate::pool::ConnectionPool;
use crate::queries::document_crud::{self, NewDocumentRow};
use crate::transaction::with_immediate_transaction;

/// Writes to one storage table through a shared pool.
pub struct DocumentStore {
    pool: Arc<ConnectionPool>,
    table: TableName,
    normalizer: Arc<dyn INormalizer>,
}

impl DocumentStore {
    pub fn new(pool: Arc<ConnectionPool>, table: TableName, normalizer: Arc<dyn INormalizer>) -> Self {
        Self {
            pool,
            table,
            normalizer,
        }
    }

    pub fn table(&self) -> &TableName {
        &self.table
    }

    /// Store `documents`, returning the id associated with each.
    ///
    /// Without `ids`, a fresh UUID is generated per document. Content that
    /// normalizes to an already-stored hash is skipped and reports the id
    /// of the existing row, including duplicates within the same batch.
    pub fn add(&self, documents: &[Document], ids: Option<&[String]>) -> DocrankResult<Vec<String>> {
        if let Some(ids) = ids {
            if ids.len() != documents.len() {
                return Err(DocrankError::invalid_input(format!(
                    "number of ids ({}) must match number of documents ({})",
                    ids.len(),
                    documents.len()
                )));
            }
        }
        if documents.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = match ids {
            Some(ids) => ids.to_vec(),
            None => documents
                .iter()
                .map(|_| Uuid::new_v4().to_string())
                .collect(),
        };
        let rows = documents
            .iter()
            .zip(ids)
            .map(|(doc, doc_id)| self.prepare_row(doc, doc_id))
            .collect::<DocrankResult<Vec<_>>>()?;

        let conn = self.pool.checkout()?;
        let outcome = with_immediate_transaction(&conn, |tx| {
            document_crud::insert_batch(tx, &self.table, &rows)
        })
        .map_err(|e| {
            error!(table = %self.table, batch = rows.len(), error = %e, "batch insert rolled back");
            e
        })?;

        info!(
            table = %self.table,
            batch = rows.len(),
            inserted = outcome.inserted,
            deduplicated = rows.len() - outcome.inserted,
            "documents added"
        );
        Ok(outcome.ids)
    }

    /// Delete rows by id, then compact.
    ///
    /// The delete commits on its own; compaction runs only after a
    /// successful commit and is best-effort (failures are logged, not
    /// returned). Returns the number of rows removed.
    pub fn delete(&self, ids: &[String]) -> DocrankResult<usize> {
        if ids.is_empty() {
            return Ok(0);
        }

        let conn = self.pool.checkout()?;
        let removed = with_immediate_transaction(&conn, |tx| {
            document_crud::delete_by_doc_ids(tx, &self.table, ids)
        })
        .map_err(|e| {
            error!(table = %self.table, ids = ids.len(), error = %e, "delete rolled back");
            e
        })?;
        info!(table = %self.table, requested = ids.len(), removed, "documents deleted");

        if let Err(e) = compaction::compact(&conn, &self.table) {
            warn!(table = %self.table, error = %e, "compaction after delete failed");
        }
        Ok(removed)
    }

    /// Number of stored documents.
    pub fn count(&self) -> DocrankResult<usize> {
        let conn = self.pool.checkout()?;
        document_crud::count(&conn, &self.table)
    }

    /// Page usage and document count for the backing database.
    pub fn health(&self) -> DocrankResult<storage_health::StorageHealthReport> {
        let conn = self.pool.checkout()?;
        storage_health::report(&conn, &self.table)
    }

    fn prepare_row(&self, doc: &Document, doc_id: String) -> DocrankResult<NewDocumentRow> {
        let content = self.normalizer.normalize(&doc.content);
        Ok(NewDocumentRow {
            hash: content_hash(&content),
            doc_id,
            content,
            metadata: serde_json::to_string(&doc.metadata)?,
        })
    }
}
