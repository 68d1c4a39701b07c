//! Retriever: the external-facing facade.
//!
//! `open` either returns a ready retriever (pool open, schema ensured) or an
//! error; a half-initialized retriever is never handed out. After `close`,
//! every operation fails with `Closed`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{error, info, warn};

use docrank_core::config::RetrieverConfig;
use docrank_core::constants::VERSION;
use docrank_core::errors::{DocrankError, DocrankResult, StorageError};
use docrank_core::models::{Document, SearchResult};
use docrank_core::traits::{INormalizer, IRetriever};
use docrank_core::UnicodeNormalizer;
use docrank_storage::compaction::storage_health::StorageHealthReport;
use docrank_storage::{schema, ConnectionPool, DocumentStore, PoolStatus};

use crate::engine::RankedQueryEngine;

/// Lifecycle state of a [`Retriever`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrieverState {
    Ready,
    Closed,
}

/// Document store plus ranked search over one table.
pub struct Retriever {
    config: RetrieverConfig,
    pool: Arc<ConnectionPool>,
    store: DocumentStore,
    engine: RankedQueryEngine,
    closed: AtomicBool,
}

impl Retriever {
    /// Open the pool and provision the schema with the default normalizer.
    pub fn open(config: RetrieverConfig) -> DocrankResult<Self> {
        Self::open_with_normalizer(config, Arc::new(UnicodeNormalizer::new()))
    }

    /// Same as [`Retriever::open`] with a caller-supplied normalizer.
    pub fn open_with_normalizer(
        config: RetrieverConfig,
        normalizer: Arc<dyn INormalizer>,
    ) -> DocrankResult<Self> {
        config.validate()?;

        let pool = ConnectionPool::open(&config.connection_uri, config.pool.clone()).map_err(|e| {
            error!(uri = %config.connection_uri, error = %e, "error creating connection pool");
            e
        })?;
        let pool = Arc::new(pool);

        let setup = pool
            .checkout()
            .and_then(|conn| schema::ensure_schema(&conn, &config.table_name));
        if let Err(e) = setup {
            if let Err(close_err) = pool.close_all() {
                warn!(error = %close_err, "failed to close pool after setup error");
            }
            return Err(e);
        }

        let store = DocumentStore::new(
            Arc::clone(&pool),
            config.table_name.clone(),
            Arc::clone(&normalizer),
        );
        let engine = RankedQueryEngine::new(
            Arc::clone(&pool),
            config.table_name.clone(),
            normalizer,
            config.query.clone(),
        );

        info!(version = VERSION, table = %config.table_name, k = config.k, "retriever ready");
        Ok(Self {
            config,
            pool,
            store,
            engine,
            closed: AtomicBool::new(false),
        })
    }

    pub fn state(&self) -> RetrieverState {
        if self.closed.load(Ordering::Acquire) {
            RetrieverState::Closed
        } else {
            RetrieverState::Ready
        }
    }

    pub fn config(&self) -> &RetrieverConfig {
        &self.config
    }

    /// Current pool occupancy.
    pub fn pool_status(&self) -> PoolStatus {
        self.pool.status()
    }

    /// Number of stored documents.
    pub fn count(&self) -> DocrankResult<usize> {
        self.ensure_ready()?;
        self.store.count().map_err(closed_pool_as_closed)
    }

    /// Page usage and document count.
    pub fn health(&self) -> DocrankResult<StorageHealthReport> {
        self.ensure_ready()?;
        self.store.health().map_err(closed_pool_as_closed)
    }

    fn ensure_ready(&self) -> DocrankResult<()> {
        match self.state() {
            RetrieverState::Ready => Ok(()),
            RetrieverState::Closed => Err(DocrankError::Closed),
        }
    }
}

/// A `close` that lands between the state check and the checkout shows up
/// as a closed pool; report it the same way as any call after close.
fn closed_pool_as_closed(err: DocrankError) -> DocrankError {
    match err {
        DocrankError::StorageError(StorageError::PoolClosed) => DocrankError::Closed,
        other => other,
    }
}

impl IRetriever for Retriever {
    fn add_documents(
        &self,
        documents: &[Document],
        ids: Option<&[String]>,
    ) -> DocrankResult<Vec<String>> {
        self.ensure_ready()?;
        self.store.add(documents, ids).map_err(closed_pool_as_closed)
    }

    fn search(&self, query: &str, k: Option<usize>) -> DocrankResult<Vec<SearchResult>> {
        self.ensure_ready()?;
        self.engine
            .search(query, k.unwrap_or(self.config.k))
            .map_err(closed_pool_as_closed)
    }

    fn delete(&self, ids: &[String]) -> DocrankResult<usize> {
        self.ensure_ready()?;
        self.store.delete(ids).map_err(closed_pool_as_closed)
    }

    /// Marks the retriever closed and closes the pool. A second call
    /// re-runs the (idempotent) pool shutdown, which also finishes a
    /// shutdown that earlier timed out on leased connections.
    fn close(&self) -> DocrankResult<()> {
        self.closed.store(true, Ordering::Release);
        self.pool.close_all()
    }
}

impl Drop for Retriever {
    fn drop(&mut self) {
        if self.state() == RetrieverState::Ready {
            if let Err(e) = self.close() {
                warn!(error = %e, "error closing connection pool on drop");
            }
        }
    }
}
