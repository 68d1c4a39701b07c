//! Pool non-leak under concurrent success and failure paths.

use std::sync::{Arc, Barrier};
use std::thread;

use docrank_core::config::PoolConfig;
use docrank_core::models::{Document, TableName};
use docrank_core::UnicodeNormalizer;
use docrank_storage::{schema, ConnectionPool, DocumentStore};
use tempfile::TempDir;

#[test]
fn concurrent_writes_return_every_connection() {
    let dir = TempDir::new().unwrap();
    let uri = dir.path().join("concurrent.db");
    let config = PoolConfig {
        min_size: 2,
        max_size: 4,
        checkout_timeout_ms: 10_000,
        ..PoolConfig::default()
    };
    let pool = Arc::new(ConnectionPool::open(uri.to_str().unwrap(), config).unwrap());
    let table = TableName::new("docs").unwrap();
    schema::ensure_schema(&pool.checkout().unwrap(), &table).unwrap();
    let store = Arc::new(DocumentStore::new(
        Arc::clone(&pool),
        table,
        Arc::new(UnicodeNormalizer::new()),
    ));

    let before = pool.status();
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..10 {
                    // Overlapping content across threads exercises the hash constraint.
                    let doc = Document::new(format!("shared {i}"));
                    store.add(&[doc], None).unwrap();

                    // Induced failure: mismatched ids never lease a connection.
                    assert!(store.add(&[Document::new("x")], Some(&[][..])).is_err());

                    if i % 3 == 0 {
                        store.delete(&[format!("nonexistent-{t}-{i}")]).unwrap();
                    }
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let after = pool.status();
    assert_eq!(after.in_use, 0);
    assert_eq!(after.in_use, before.in_use);
    assert!(after.total <= 4);
    assert_eq!(store.count().unwrap(), 10, "each distinct content stored once");
}
