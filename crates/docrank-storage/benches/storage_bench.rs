use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};

use docrank_core::config::PoolConfig;
use docrank_core::models::{Document, TableName};
use docrank_core::UnicodeNormalizer;
use docrank_storage::queries::document_search;
use docrank_storage::{schema, ConnectionPool, DocumentStore};

fn bench_add_and_search(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let uri = dir.path().join("bench.db");
    let pool = Arc::new(ConnectionPool::open(uri.to_str().unwrap(), PoolConfig::default()).unwrap());
    let table = TableName::new("bench").unwrap();
    schema::ensure_schema(&pool.checkout().unwrap(), &table).unwrap();
    let store = DocumentStore::new(Arc::clone(&pool), table.clone(), Arc::new(UnicodeNormalizer::new()));

    let mut round = 0u64;
    c.bench_function("add_100", |b| {
        b.iter(|| {
            round += 1;
            let docs: Vec<Document> = (0..100)
                .map(|i| Document::new(format!("round {round} document {i} about storage engines")))
                .collect();
            store.add(&docs, None).unwrap();
        })
    });

    c.bench_function("search_top10", |b| {
        b.iter(|| {
            let conn = pool.checkout().unwrap();
            document_search::search_bm25(&conn, &table, "content:\"storage\"", 10).unwrap();
        })
    });
}

criterion_group!(benches, bench_add_and_search);
criterion_main!(benches);
