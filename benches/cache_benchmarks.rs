//! Performance benchmarks for the caching layer.
//!
//! These benchmarks measure:
//! - Raw cache insert/get throughput, including FIFO eviction at capacity
//! - `stats()` cost as the cache fills (it serializes every entry)
//! - The caching client's hit path, which must never touch the backend

use async_trait::async_trait;
use call_analysis_cache::client::AsyncBackend;
use call_analysis_cache::error::{ApiError, ApiResult};
use call_analysis_cache::{BoundedTtlCache, CachingFetchClient, ItemInclude, ResourceCaches};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// Backend that is never expected to be called on the hit path.
struct UnreachableBackend;

#[async_trait]
impl AsyncBackend for UnreachableBackend {
    async fn get_json(&self, path: &str) -> ApiResult<Value> {
        Err(ApiError::HttpError(format!("unexpected fetch: {}", path)))
    }
}

fn recording(i: usize) -> Value {
    json!({
        "success": true,
        "id": format!("rec-{}", i),
        "title": "Quarterly review",
        "durationSecs": 1800,
        "summary": "Discussed pipeline, hiring and the Q3 roadmap.",
    })
}

/// Insert into a full cache so every insert evicts.
fn bench_insert_with_eviction(c: &mut Criterion) {
    let cache = BoundedTtlCache::new(100, Duration::from_secs(600));
    for i in 0..100 {
        cache.insert(format!("key{}", i), recording(i));
    }

    let mut i = 100;
    c.bench_function("insert_with_eviction", |b| {
        b.iter(|| {
            cache.insert(format!("key{}", i), recording(i));
            i += 1;
        });
    });
}

fn bench_get_hit(c: &mut Criterion) {
    let cache = BoundedTtlCache::new(100, Duration::from_secs(600));
    for i in 0..100 {
        cache.insert(format!("key{}", i), recording(i));
    }

    c.bench_function("get_hit", |b| {
        b.iter(|| cache.get("key50"));
    });
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stats");

    for size in [10usize, 50, 100] {
        let cache = BoundedTtlCache::new(size, Duration::from_secs(600));
        for i in 0..size {
            cache.insert(format!("key{}", i), recording(i));
        }

        group.bench_with_input(BenchmarkId::from_parameter(size), &cache, |b, cache| {
            b.iter(|| cache.stats());
        });
    }

    group.finish();
}

fn bench_client_hit(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let client =
        CachingFetchClient::with_caches(Arc::new(UnreachableBackend), ResourceCaches::new());
    client
        .caches()
        .items
        .insert("item_rec-1_summary", recording(1));

    c.bench_function("client_item_hit", |b| {
        b.to_async(&rt).iter(|| async {
            let _ = client.get_item("rec-1", ItemInclude::Summary, false).await;
        });
    });
}

criterion_group!(
    benches,
    bench_insert_with_eviction,
    bench_get_hit,
    bench_stats,
    bench_client_hit
);
criterion_main!(benches);
