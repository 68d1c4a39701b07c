//! Schema provisioning: idempotence and concurrent first-time callers.

use std::sync::{Arc, Barrier};
use std::thread;

use docrank_core::config::PoolConfig;
use docrank_core::models::TableName;
use docrank_storage::schema;
use docrank_storage::ConnectionPool;
use tempfile::TempDir;

fn open_pool(dir: &TempDir) -> ConnectionPool {
    let uri = dir.path().join("schema.db");
    ConnectionPool::open(uri.to_str().unwrap(), PoolConfig::default()).unwrap()
}

#[test]
fn ensure_schema_creates_table_and_index() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir);
    let table = TableName::new("docs").unwrap();

    let conn = pool.checkout().unwrap();
    schema::ensure_schema(&conn, &table).unwrap();
    assert!(schema::table_exists(&conn, &table).unwrap());
    assert!(schema::ranking_index_exists(&conn, &table).unwrap());

    let columns: Vec<String> = conn
        .prepare("SELECT name FROM pragma_table_info('docs') ORDER BY cid")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, ["id", "hash", "doc_id", "content", "metadata"]);
}

#[test]
fn ensure_schema_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir);
    let table = TableName::new("docs").unwrap();
    let conn = pool.checkout().unwrap();

    for _ in 0..3 {
        schema::ensure_schema(&conn, &table).unwrap();
    }
    let triggers: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'trigger' AND tbl_name = 'docs'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(triggers, 3);
}

#[test]
fn ensure_schema_indexes_preexisting_rows() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir);
    let table = TableName::new("legacy").unwrap();
    let conn = pool.checkout().unwrap();

    // Table created by an older tool that never built the ranking index.
    schema::table::create_table(&conn, &table).unwrap();
    conn.execute(
        "INSERT INTO legacy (hash, doc_id, content, metadata) VALUES ('h1', 'd1', 'orphan text', '{}')",
        [],
    )
    .unwrap();

    schema::ensure_schema(&conn, &table).unwrap();
    let hits: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM legacy_bm25 WHERE legacy_bm25 MATCH 'orphan'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(hits, 1);
}

#[test]
fn concurrent_first_time_provisioning() {
    let dir = TempDir::new().unwrap();
    let uri = dir.path().join("race.db");
    let uri = uri.to_str().unwrap().to_string();
    let table = TableName::new("docs").unwrap();

    // Separate pools stand in for separate processes.
    let barrier = Arc::new(Barrier::new(6));
    let handles: Vec<_> = (0..6)
        .map(|_| {
            let uri = uri.clone();
            let table = table.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let pool = ConnectionPool::open(&uri, PoolConfig::default()).unwrap();
                barrier.wait();
                let conn = pool.checkout().unwrap();
                schema::ensure_schema(&conn, &table)
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap().expect("every concurrent caller should succeed");
    }
}

#[test]
fn distinct_tables_do_not_collide() {
    let dir = TempDir::new().unwrap();
    let pool = open_pool(&dir);
    let conn = pool.checkout().unwrap();
    for name in ["alpha", "beta"] {
        schema::ensure_schema(&conn, &TableName::new(name).unwrap()).unwrap();
    }
    assert!(schema::ranking_index_exists(&conn, &TableName::new("alpha").unwrap()).unwrap());
    assert!(schema::ranking_index_exists(&conn, &TableName::new("beta").unwrap()).unwrap());
}
