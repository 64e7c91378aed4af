//! Concurrency tests for the shared and atomic views
//!
//! - Shared: concurrent writers through cloned handles are serialized, so
//!   the final state holds every write exactly once
//! - Atomic: readers always observe a complete snapshot, never a partial
//!   write, and snapshots taken earlier never change
//! - Split windows over shared handles can be processed on the rayon pool

use crossbeam_utils::thread as crossbeam_thread;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Barrier;

use radix_collections::traits::{Collection, NavigableMap, Table};
use radix_collections::view::{parallel, Atomic, IntoView, Shared};
use radix_collections::{FastMap, FastSet, FractalTable, IndexOrder};

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 500;

// =============================================================================
// SHARED
// =============================================================================

#[test]
fn test_shared_map_concurrent_puts() {
    let map = Shared::new(FastMap::<u64, usize>::new());
    let barrier = Barrier::new(THREADS);

    crossbeam_thread::scope(|s| {
        for t in 0..THREADS {
            let mut handle = map.clone();
            let barrier = &barrier;
            s.spawn(move |_| {
                barrier.wait();
                for i in 0..OPS_PER_THREAD {
                    let key = (t * OPS_PER_THREAD + i) as u64;
                    handle.put(key, t).unwrap();
                }
            });
        }
    })
    .unwrap();

    assert_eq!(NavigableMap::len(&map), THREADS * OPS_PER_THREAD);
    for t in 0..THREADS {
        let key = (t * OPS_PER_THREAD) as u64;
        assert_eq!(map.get(&key), Some(t));
    }
}

#[test]
fn test_shared_table_serializes_read_modify_write() {
    let table = FractalTable::from(vec![0u64]).shared();

    crossbeam_thread::scope(|s| {
        for _ in 0..THREADS {
            let handle = table.clone();
            s.spawn(move |_| {
                for _ in 0..OPS_PER_THREAD {
                    handle.write(|t| {
                        if let Some(counter) = t.get_mut(0) {
                            *counter += 1;
                        }
                        t.push_back(1);
                    });
                }
            });
        }
    })
    .unwrap();

    assert_eq!(Table::get(&table, 0).unwrap(), (THREADS * OPS_PER_THREAD) as u64);
    assert_eq!(Collection::len(&table), THREADS * OPS_PER_THREAD + 1);
}

#[test]
fn test_shared_set_mixed_readers_and_writers() {
    let set = FastSet::<u32, IndexOrder>::with_order(IndexOrder).shared();
    let done = AtomicBool::new(false);
    let observed = AtomicUsize::new(0);

    crossbeam_thread::scope(|s| {
        for t in 0..THREADS / 2 {
            let mut handle = set.clone();
            s.spawn(move |_| {
                for i in 0..OPS_PER_THREAD {
                    handle.add((t * OPS_PER_THREAD + i) as u32).unwrap();
                }
            });
        }
        for _ in 0..THREADS / 2 {
            let handle = set.clone();
            let done = &done;
            let observed = &observed;
            s.spawn(move |_| {
                while !done.load(Ordering::Acquire) {
                    let len = Collection::len(&handle);
                    let mut counted = 0;
                    handle.for_each_until(&mut |_| {
                        counted += 1;
                        true
                    });
                    // One read lock per call: a later call may see more.
                    assert!(counted >= len);
                    observed.fetch_max(counted, Ordering::Relaxed);
                    std::thread::yield_now();
                }
            });
        }
        // Writers finish before readers are stopped.
        s.spawn(|_| {
            while Collection::len(&set) < (THREADS / 2) * OPS_PER_THREAD {
                std::thread::yield_now();
            }
            done.store(true, Ordering::Release);
        });
    })
    .unwrap();

    assert_eq!(Collection::len(&set), (THREADS / 2) * OPS_PER_THREAD);
    assert!(observed.load(Ordering::Relaxed) <= (THREADS / 2) * OPS_PER_THREAD);
}

// =============================================================================
// ATOMIC
// =============================================================================

#[test]
fn test_atomic_snapshot_isolation() {
    let mut map = Atomic::new(FastMap::<u32, u32, IndexOrder>::with_order(IndexOrder));
    for i in 0..100 {
        map.put(i, i).unwrap();
    }
    let before = map.snapshot();
    for i in 0..100 {
        map.remove(&i).unwrap();
    }
    map.put(1000, 1).unwrap();
    assert_eq!(before.len(), 100);
    assert_eq!(before.get(&42), Some(&42));
    assert_eq!(NavigableMap::len(&map), 1);
}

#[test]
fn test_atomic_readers_see_whole_batches() {
    // Each write publishes a batch of BATCH keys at once; readers must never
    // see a partial batch.
    const BATCH: u32 = 10;
    let map = Atomic::new(FastMap::<u32, u32, IndexOrder>::with_order(IndexOrder));
    let done = AtomicBool::new(false);

    crossbeam_thread::scope(|s| {
        let writer = map.clone();
        let done_flag = &done;
        s.spawn(move |_| {
            for batch in 0..200u32 {
                writer
                    .update(|m| {
                        for k in 0..BATCH {
                            m.insert(batch * BATCH + k, batch);
                        }
                        Ok(())
                    })
                    .unwrap();
            }
            done_flag.store(true, Ordering::Release);
        });
        for _ in 0..THREADS - 1 {
            let reader = map.clone();
            let done = &done;
            s.spawn(move |_| loop {
                let finished = done.load(Ordering::Acquire);
                let snapshot = reader.snapshot();
                assert_eq!(snapshot.len() % BATCH as usize, 0);
                if finished {
                    break;
                }
            });
        }
    })
    .unwrap();

    assert_eq!(NavigableMap::len(&map), 200 * BATCH as usize);
}

#[test]
fn test_atomic_writers_are_serialized() {
    let table = FractalTable::<usize>::new().atomic();

    crossbeam_thread::scope(|s| {
        for t in 0..THREADS {
            let mut handle = table.clone();
            s.spawn(move |_| {
                for i in 0..OPS_PER_THREAD / 10 {
                    handle.push_back(t * 1000 + i).unwrap();
                }
            });
        }
    })
    .unwrap();

    let mut values = table.to_vec();
    assert_eq!(values.len(), THREADS * OPS_PER_THREAD / 10);
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), THREADS * OPS_PER_THREAD / 10);
}

// =============================================================================
// RAYON
// =============================================================================

#[test]
fn test_parallel_parts_over_shared_table() {
    let table = (0..10_000u64).collect::<FractalTable<u64>>().shared();
    let parts = Table::split(&table, THREADS).unwrap();
    parallel::for_each_part(parts, |mut part| {
        for i in 0..Collection::len(&part) {
            let value = part.get(i).unwrap();
            part.set(i, value + 1).unwrap();
        }
    });
    let sum: u64 = table.read(|t| t.iter().sum());
    assert_eq!(sum, (1..=10_000u64).sum::<u64>());
}

#[test]
fn test_parallel_readers_over_snapshot() {
    let map: FastMap<u64, u64> = (0..5000u64).map(|i| (i, i * 2)).collect();
    let atomic = map.atomic();
    let snapshot = atomic.snapshot();
    let found: usize = (0..5000u64)
        .into_par_iter()
        .filter(|k| snapshot.get(k) == Some(&(k * 2)))
        .count();
    assert_eq!(found, 5000);
}
