//! Throughput Benchmark for timedmap
//!
//! Compares `TimedMap` against an unsynchronized `HashMap` for set and get
//! at growing sizes, and measures the cost of the full-scan operations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use timedmap::TimedMap;

const SIZES: [usize; 4] = [10, 100, 1_000, 10_000];
const TTL: Duration = Duration::from_secs(30);

/// Half the lookups hit, half miss, in a scattered order.
fn access_pattern(size: usize) -> Vec<usize> {
    let len = size * 2;
    // Stride coprime with len visits every index once
    let stride = (0..)
        .map(|k| len / 2 + 1 + k)
        .find(|s| gcd(*s, len) == 1)
        .unwrap_or(1);
    (0..len).map(|i| (i * stride) % len).collect()
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Benchmark SET operations
fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");

    for size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("timed_map", size), &size, |b, &size| {
            b.iter(|| {
                let map = TimedMap::new(TTL);
                for i in 0..size {
                    map.set(i, i);
                }
                black_box(map.len());
            });
        });

        group.bench_with_input(BenchmarkId::new("hash_map", size), &size, |b, &size| {
            b.iter(|| {
                let mut map = HashMap::with_capacity(size * 2);
                for i in 0..size {
                    map.insert(i, i);
                }
                black_box(map.len());
            });
        });
    }

    group.finish();
}

/// Benchmark GET operations
fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    for size in SIZES {
        let accesses = access_pattern(size);
        group.throughput(Throughput::Elements(accesses.len() as u64));

        let timed = TimedMap::new(TTL);
        let mut plain = HashMap::new();
        for i in 0..size {
            timed.set(i, i);
            plain.insert(i, i);
        }

        group.bench_with_input(BenchmarkId::new("timed_map", size), &accesses, |b, accesses| {
            b.iter(|| {
                for i in accesses {
                    black_box(timed.get(i));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("hash_map", size), &accesses, |b, accesses| {
            b.iter(|| {
                for i in accesses {
                    black_box(plain.get(i));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark PURGE and DUMP (full scans)
fn bench_maintenance(c: &mut Criterion) {
    let mut group = c.benchmark_group("maintenance");
    let size = 10_000;
    group.throughput(Throughput::Elements(size as u64));

    // Every other entry expired
    let populate = || {
        let map = TimedMap::new(TTL);
        let past = Instant::now() - Duration::from_secs(1);
        for i in 0..size {
            map.set(i, i);
            if i % 2 == 0 {
                map.set_expiration(&i, past);
            }
        }
        map
    };

    group.bench_function("purge_half_expired", |b| {
        b.iter_batched(
            populate,
            |map| black_box(map.purge()),
            criterion::BatchSize::LargeInput,
        );
    });

    let map = populate();
    group.bench_function("dump_half_expired", |b| {
        b.iter(|| black_box(map.dump().len()));
    });

    group.finish();
}

/// Benchmark concurrent access
fn bench_concurrent(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_mixed", |b| {
        b.iter(|| {
            let map = Arc::new(TimedMap::new(TTL));
            let handles: Vec<_> = (0..4)
                .map(|t| {
                    let map = Arc::clone(&map);
                    thread::spawn(move || {
                        for i in 0..10_000 {
                            let key = (t, i);
                            map.set(key, i);
                            map.get(&key);
                            if i % 10 == 0 {
                                map.reset(&key);
                            }
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(map.len());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_set,
    bench_get,
    bench_maintenance,
    bench_concurrent,
);

criterion_main!(benches);
