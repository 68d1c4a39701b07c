//! Document count, page usage, fragmentation %, integrity.

use rusqlite::Connection;

use docrank_core::errors::DocrankResult;
use docrank_core::models::TableName;

use crate::queries::{document_crud, maintenance};

/// Storage health report.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageHealthReport {
    pub documents: usize,
    pub page_count: u64,
    pub page_size: u64,
    pub freelist_count: u64,
    pub integrity_ok: bool,
}

impl StorageHealthReport {
    /// Estimated database size in bytes.
    pub fn estimated_db_size(&self) -> u64 {
        self.page_count * self.page_size
    }

    /// Fragmentation percentage.
    pub fn fragmentation_pct(&self) -> f64 {
        if self.page_count == 0 {
            return 0.0;
        }
        (self.freelist_count as f64 / self.page_count as f64) * 100.0
    }
}

/// Generate a storage health report for `table`.
pub fn report(conn: &Connection, table: &TableName) -> DocrankResult<StorageHealthReport> {
    let documents = document_crud::count(conn, table)?;
    let (page_count, page_size, freelist_count) = maintenance::page_stats(conn)?;
    Ok(StorageHealthReport {
        documents,
        page_count,
        page_size,
        freelist_count,
        integrity_ok: maintenance::integrity_check(conn)?,
    })
}
