//! DocumentStore: dedup, batch atomicity, delete with compaction.

use std::sync::Arc;

use docrank_core::config::PoolConfig;
use docrank_core::errors::{DocrankError, StorageError};
use docrank_core::models::{content_hash, Document, TableName};
use docrank_core::UnicodeNormalizer;
use docrank_storage::queries::document_search;
use docrank_storage::{schema, ConnectionPool, DocumentStore};
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    pool: Arc<ConnectionPool>,
    store: DocumentStore,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let uri = dir.path().join("store.db");
    let pool = Arc::new(ConnectionPool::open(uri.to_str().unwrap(), PoolConfig::default()).unwrap());
    let table = TableName::new("docs").unwrap();
    schema::ensure_schema(&pool.checkout().unwrap(), &table).unwrap();
    let store = DocumentStore::new(Arc::clone(&pool), table, Arc::new(UnicodeNormalizer::new()));
    Fixture {
        _dir: dir,
        pool,
        store,
    }
}

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn add_generates_unique_ids() {
    let f = fixture();
    let docs = vec![Document::new("alpha beta"), Document::new("beta gamma")];
    let out = f.store.add(&docs, None).unwrap();
    assert_eq!(out.len(), 2);
    assert_ne!(out[0], out[1]);
    assert!(uuid::Uuid::parse_str(&out[0]).is_ok());
    assert_eq!(f.store.count().unwrap(), 2);
}

#[test]
fn add_is_idempotent_at_content_level() {
    let f = fixture();
    let first = f.store.add(&[Document::new("alpha beta")], None).unwrap();
    let second = f.store.add(&[Document::new("alpha beta")], None).unwrap();
    assert_eq!(first, second, "deduped content reports the original id");
    assert_eq!(f.store.count().unwrap(), 1);

    // A different id and punctuation that normalizes away still dedups.
    let third = f
        .store
        .add(&[Document::new("alpha, beta!")], Some(ids(&["other"]).as_slice()))
        .unwrap();
    assert_eq!(third, first);
    assert_eq!(f.store.count().unwrap(), 1);
}

#[test]
fn duplicates_within_one_batch_share_an_id() {
    let f = fixture();
    let docs = vec![Document::new("same text"), Document::new("same  text")];
    let out = f.store.add(&docs, Some(ids(&["a", "b"]).as_slice())).unwrap();
    assert_eq!(out, ids(&["a", "a"]));
    assert_eq!(f.store.count().unwrap(), 1);
}

#[test]
fn id_count_mismatch_is_value_error() {
    let f = fixture();
    let err = f
        .store
        .add(&[Document::new("x"), Document::new("y")], Some(ids(&["only-one"]).as_slice()))
        .unwrap_err();
    assert!(matches!(err, DocrankError::InvalidInput { .. }));
    assert_eq!(f.store.count().unwrap(), 0);
    assert_eq!(f.pool.status().in_use, 0);
}

#[test]
fn empty_add_is_noop() {
    let f = fixture();
    assert!(f.store.add(&[], None).unwrap().is_empty());
    assert_eq!(f.store.count().unwrap(), 0);
}

#[test]
fn failing_batch_rolls_back_entirely() {
    let f = fixture();
    f.store.add(&[Document::new("existing")], Some(ids(&["taken"]).as_slice())).unwrap();

    // Third row reuses an id bound to different content: the whole batch fails.
    let docs = vec![
        Document::new("fresh one"),
        Document::new("fresh two"),
        Document::new("conflicting content"),
    ];
    let err = f
        .store
        .add(&docs, Some(ids(&["n1", "n2", "taken"]).as_slice()))
        .unwrap_err();
    assert!(matches!(
        err,
        DocrankError::StorageError(StorageError::SqliteError { .. })
    ));
    assert_eq!(f.store.count().unwrap(), 1, "no partial batch may be visible");
    assert_eq!(f.pool.status().in_use, 0);
}

#[test]
fn stored_content_is_normalized_and_hashed() {
    let f = fixture();
    f.store
        .add(&[Document::new("Hello, World!").with_field("lang", "en")], Some(ids(&["d1"]).as_slice()))
        .unwrap();
    let conn = f.pool.checkout().unwrap();
    let (hash, content, metadata): (String, String, String) = conn
        .query_row("SELECT hash, content, metadata FROM docs WHERE doc_id = 'd1'", [], |r| {
            Ok((r.get(0)?, r.get(1)?, r.get(2)?))
        })
        .unwrap();
    assert_eq!(content, "Hello World");
    assert_eq!(hash, content_hash("Hello World"));
    assert_eq!(hash.len(), 32);
    assert_eq!(metadata, r#"{"lang":"en"}"#);
}

#[test]
fn delete_removes_rows_and_index_entries() {
    let f = fixture();
    let table = TableName::new("docs").unwrap();
    f.store
        .add(
            &[Document::new("alpha beta"), Document::new("beta gamma")],
            Some(ids(&["d1", "d2"]).as_slice()),
        )
        .unwrap();

    let removed = f.store.delete(&ids(&["d1", "missing"])).unwrap();
    assert_eq!(removed, 1);
    assert_eq!(f.store.count().unwrap(), 1);

    let conn = f.pool.checkout().unwrap();
    let hits = document_search::search_bm25(&conn, &table, "content:\"alpha\"", 10).unwrap();
    assert!(hits.is_empty(), "deleted content must leave the index");
    let hits = document_search::search_bm25(&conn, &table, "content:\"beta\"", 10).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].doc_id, "d2");
}

#[test]
fn delete_frees_content_for_reinsert() {
    let f = fixture();
    f.store.add(&[Document::new("recycled")], Some(ids(&["old"]).as_slice())).unwrap();
    f.store.delete(&ids(&["old"])).unwrap();
    let out = f.store.add(&[Document::new("recycled")], Some(ids(&["new"]).as_slice())).unwrap();
    assert_eq!(out, ids(&["new"]));
}

#[test]
fn empty_delete_is_noop() {
    let f = fixture();
    assert_eq!(f.store.delete(&[]).unwrap(), 0);
}

#[test]
fn health_reports_document_count() {
    let f = fixture();
    f.store.add(&[Document::new("one"), Document::new("two")], None).unwrap();
    let report = f.store.health().unwrap();
    assert_eq!(report.documents, 2);
    assert!(report.page_count > 0);
    assert!(report.page_size > 0);
    assert!(report.integrity_ok);
}
