//! Benchmarks for the radix collections
//!
//! Compares against the standard library where an equivalent exists:
//! - FastMap (hash and index orders) vs BTreeMap / HashMap
//! - FractalTable positional edits vs VecDeque
//! - Clone-then-write cost of the persistent structures
//! - Shared and Atomic view overhead on reads

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use radix_collections::traits::{NavigableMap, Table};
use radix_collections::view::IntoView;
use radix_collections::{FastMap, FractalTable, IndexOrder, LexicalOrder};

// =============================================================================
// BENCHMARK CONFIGURATION
// =============================================================================

const SMALL_SIZE: usize = 100;
const MEDIUM_SIZE: usize = 1_000;
const LARGE_SIZE: usize = 10_000;
const SIZES: &[usize] = &[SMALL_SIZE, MEDIUM_SIZE, LARGE_SIZE];

fn scattered(n: usize) -> Vec<u32> {
    (0..n as u32).map(|i| i.wrapping_mul(2_654_435_761)).collect()
}

// =============================================================================
// MAP BENCHMARKS
// =============================================================================

fn bench_map_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_insertion");
    group.warm_up_time(Duration::from_millis(500));
    group.measurement_time(Duration::from_secs(2));

    for &size in SIZES {
        let keys = scattered(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("FastMap<IndexOrder>", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = FastMap::with_order(IndexOrder);
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("FastMap<HashOrder>", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = FastMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("HashMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut map = HashMap::new();
                for &k in keys {
                    map.insert(k, k);
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

fn bench_map_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_lookup");

    for &size in SIZES {
        let keys = scattered(size);
        let fast: FastMap<u32, u32, IndexOrder> = keys.iter().map(|&k| (k, k)).collect();
        let btree: BTreeMap<u32, u32> = keys.iter().map(|&k| (k, k)).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("FastMap<IndexOrder>", size), &keys, |b, keys| {
            b.iter(|| {
                let mut hits = 0;
                for k in keys {
                    hits += fast.get(k).is_some() as usize;
                }
                black_box(hits)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |b, keys| {
            b.iter(|| {
                let mut hits = 0;
                for k in keys {
                    hits += btree.get(k).is_some() as usize;
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    let mut group = c.benchmark_group("navigation");
    let words: Vec<String> = (0..MEDIUM_SIZE).map(|i| format!("key-{:05}", i * 7)).collect();
    let map = FastMap::from_iter_with_order(LexicalOrder::new(), words.iter().map(|w| (w.clone(), ())));
    let queries: Vec<String> = (0..MEDIUM_SIZE).map(|i| format!("key-{:05}", i * 7 + 3)).collect();

    group.bench_function("lexical_ceiling", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(map.ceiling_key(query));
            }
        });
    });

    group.bench_function("lexical_full_iteration", |b| {
        b.iter(|| black_box(map.keys().count()));
    });

    group.finish();
}

// =============================================================================
// TABLE BENCHMARKS
// =============================================================================

fn bench_table_middle_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_middle_insert");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("FractalTable", size), &size, |b, &size| {
            b.iter(|| {
                let mut table = FractalTable::new();
                for i in 0..size {
                    table.insert(i / 2, i).unwrap_or_default();
                }
                black_box(table)
            });
        });

        group.bench_with_input(BenchmarkId::new("VecDeque", size), &size, |b, &size| {
            b.iter(|| {
                let mut deque = VecDeque::new();
                for i in 0..size {
                    deque.insert(i / 2, i);
                }
                black_box(deque)
            });
        });
    }

    group.finish();
}

fn bench_clone_then_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone_then_write");
    let table: FractalTable<u64> = (0..LARGE_SIZE as u64).collect();
    let map: FastMap<u64, u64> = (0..LARGE_SIZE as u64).map(|i| (i, i)).collect();

    group.bench_function("FractalTable", |b| {
        b.iter(|| {
            let mut copy = table.clone();
            copy.push_front(1);
            black_box(copy)
        });
    });

    group.bench_function("FastMap", |b| {
        b.iter(|| {
            let mut copy = map.clone();
            copy.insert(LARGE_SIZE as u64, 0);
            black_box(copy)
        });
    });

    group.finish();
}

// =============================================================================
// VIEW BENCHMARKS
// =============================================================================

fn bench_view_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_reads");
    let keys = scattered(MEDIUM_SIZE);
    let base: FastMap<u32, u32, IndexOrder> = keys.iter().map(|&k| (k, k)).collect();
    let shared = base.clone().shared();
    let atomic = base.clone().atomic();
    let table = (0..MEDIUM_SIZE as u32).collect::<FractalTable<u32>>().shared();

    group.bench_function("plain", |b| {
        b.iter(|| keys.iter().filter(|k| base.get(k).is_some()).count());
    });
    group.bench_function("shared", |b| {
        b.iter(|| keys.iter().filter(|k| shared.get(k).is_some()).count());
    });
    group.bench_function("atomic", |b| {
        b.iter(|| keys.iter().filter(|k| atomic.get(k).is_some()).count());
    });
    group.bench_function("shared_table_get", |b| {
        b.iter(|| (0..MEDIUM_SIZE).filter_map(|i| table.get(i).ok()).count());
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_map_insertion,
    bench_map_lookup,
    bench_navigation,
    bench_table_middle_insert,
    bench_clone_then_write,
    bench_view_reads
);
criterion_main!(benches);
