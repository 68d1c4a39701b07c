//! FTS5 ranking index over (`content`, `metadata`), bound to the storage
//! table's `id` as an external-content table and kept in sync by triggers.

use rusqlite::Connection;
use tracing::debug;

use docrank_core::errors::{DocrankError, DocrankResult, SetupError};
use docrank_core::models::TableName;

use super::catalog_has;

/// Fail with `ExtensionMissing` unless this SQLite build has FTS5.
pub fn check_extension(conn: &Connection) -> DocrankResult<()> {
    let enabled: bool = conn
        .query_row("SELECT sqlite_compileoption_used('ENABLE_FTS5')", [], |row| {
            row.get(0)
        })
        .map_err(|e| extension_missing(e.to_string()))?;
    if enabled {
        Ok(())
    } else {
        Err(extension_missing("SQLite was built without ENABLE_FTS5"))
    }
}

/// Create the index unless the catalog already has it. Returns whether it
/// was created by this call.
pub fn create_if_absent(conn: &Connection, table: &TableName) -> DocrankResult<bool> {
    let index = table.ranking_index();
    let exists = catalog_has(conn, "table", &index).map_err(|e| index_error(&index, e))?;
    if exists {
        debug!(index = %index, "ranking index already present");
        return Ok(false);
    }

    conn.execute_batch(&index_ddl(table, &index))
        .map_err(|e| index_error(&index, e))?;

    // Pick up rows stored before the index existed.
    conn.execute_batch(&format!("INSERT INTO {index}({index}) VALUES ('rebuild');"))
        .map_err(|e| index_error(&index, e))?;
    Ok(true)
}

fn index_ddl(table: &TableName, index: &str) -> String {
    format!(
        "CREATE VIRTUAL TABLE IF NOT EXISTS {index} USING fts5(
            content,
            metadata,
            content = '{table}',
            content_rowid = 'id',
            tokenize = 'unicode61'
        );
        CREATE TRIGGER IF NOT EXISTS {index}_ai AFTER INSERT ON {table} BEGIN
            INSERT INTO {index}(rowid, content, metadata)
            VALUES (new.id, new.content, new.metadata);
        END;
        CREATE TRIGGER IF NOT EXISTS {index}_ad AFTER DELETE ON {table} BEGIN
            INSERT INTO {index}({index}, rowid, content, metadata)
            VALUES ('delete', old.id, old.content, old.metadata);
        END;
        CREATE TRIGGER IF NOT EXISTS {index}_au AFTER UPDATE ON {table} BEGIN
            INSERT INTO {index}({index}, rowid, content, metadata)
            VALUES ('delete', old.id, old.content, old.metadata);
            INSERT INTO {index}(rowid, content, metadata)
            VALUES (new.id, new.content, new.metadata);
        END;"
    )
}

fn extension_missing(reason: impl Into<String>) -> DocrankError {
    SetupError::ExtensionMissing {
        reason: reason.into(),
    }
    .into()
}

fn index_error(index: &str, e: rusqlite::Error) -> DocrankError {
    SetupError::IndexCreation {
        index: index.to_string(),
        reason: e.to_string(),
    }
    .into()
}
