//! Behavioral tests for FractalTable
//!
//! Small block configurations force many nesting levels with few elements,
//! so every structural path (leaf doubling, wrapping under a new level,
//! branch widening, whole-child rotation) is reached quickly. Results are
//! checked against a `VecDeque` model.

use std::collections::VecDeque;

use radix_collections::config::{Config, TableConfig};
use radix_collections::{CollectionError, FractalTable};

// =============================================================================
// HELPERS
// =============================================================================

fn configs() -> Vec<TableConfig> {
    vec![
        TableConfig { min_leaf_capacity: 2, block_bits: 2 },
        TableConfig { min_leaf_capacity: 4, block_bits: 3 },
        TableConfig::memory_preset(),
        TableConfig::default(),
    ]
}

fn assert_matches(table: &FractalTable<u64>, model: &VecDeque<u64>) {
    assert_eq!(table.len(), model.len());
    let items: Vec<u64> = table.iter().copied().collect();
    let expected: Vec<u64> = model.iter().copied().collect();
    assert_eq!(items, expected);
    assert!(table.capacity() >= table.len());
}

/// Small deterministic generator, enough to scatter positions.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_head_insertion_reverses() {
    for config in configs() {
        let mut table = FractalTable::with_config(config).unwrap();
        for value in 1..=3u64 {
            table.insert(0, value).unwrap();
        }
        assert_eq!(table.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    }
}

#[test]
fn test_deque_operations_across_growth() {
    for config in configs() {
        let mut table = FractalTable::with_config(config).unwrap();
        let mut model = VecDeque::new();
        for i in 0..600u64 {
            if i % 3 == 0 {
                table.push_front(i);
                model.push_front(i);
            } else {
                table.push_back(i);
                model.push_back(i);
            }
        }
        assert_matches(&table, &model);
        for _ in 0..200 {
            assert_eq!(table.pop_front(), model.pop_front());
            assert_eq!(table.pop_back(), model.pop_back());
        }
        assert_matches(&table, &model);
    }
}

#[test]
fn test_random_positional_edits_match_model() {
    for config in configs() {
        let mut table = FractalTable::with_config(config).unwrap();
        let mut model: VecDeque<u64> = VecDeque::new();
        let mut rng = Lcg(config.min_leaf_capacity as u64 + config.block_bits as u64);
        for step in 0..3000u64 {
            let roll = rng.next() % 10;
            if roll < 6 || model.is_empty() {
                let index = (rng.next() as usize) % (model.len() + 1);
                table.insert(index, step).unwrap();
                model.insert(index, step);
            } else if roll < 9 {
                let index = (rng.next() as usize) % model.len();
                assert_eq!(table.remove(index).unwrap(), model.remove(index).unwrap());
            } else {
                let index = (rng.next() as usize) % model.len();
                assert_eq!(table.set(index, step).unwrap(), model[index]);
                model[index] = step;
            }
        }
        assert_matches(&table, &model);
    }
}

#[test]
fn test_deep_nesting_reads() {
    let config = TableConfig { min_leaf_capacity: 2, block_bits: 2 };
    let table: FractalTable<u64> = {
        let mut t = FractalTable::with_config(config).unwrap();
        t.extend(0..1000u64);
        t
    };
    assert!(table.depth() > 3);
    for i in (0..1000).step_by(37) {
        assert_eq!(table.get(i), Some(&(i as u64)));
        assert_eq!(table[i], i as u64);
    }
    assert_eq!(table.first(), Some(&0));
    assert_eq!(table.last(), Some(&999));
    assert_eq!(table.iter().rev().take(2).copied().collect::<Vec<_>>(), vec![999, 998]);
    assert_eq!(table.iter().len(), 1000);
}

#[test]
fn test_out_of_bounds_errors() {
    let mut table: FractalTable<u64> = (0..5u64).collect();
    assert!(matches!(
        table.insert(6, 0),
        Err(CollectionError::OutOfBounds { index: 6, size: 5 })
    ));
    assert!(matches!(table.remove(5), Err(CollectionError::OutOfBounds { .. })));
    assert!(matches!(table.set(9, 1), Err(CollectionError::OutOfBounds { .. })));
    assert_eq!(table.get(5), None);
    assert_eq!(table.len(), 5);
}

#[test]
fn test_clone_shares_until_write() {
    let config = TableConfig { min_leaf_capacity: 2, block_bits: 3 };
    let mut original = FractalTable::with_config(config).unwrap();
    original.extend(0..200u64);
    let snapshot = original.clone();
    original.insert(100, 7777).unwrap();
    original.pop_front();
    assert_eq!(snapshot.len(), 200);
    assert_eq!(snapshot.iter().copied().collect::<Vec<_>>(), (0..200).collect::<Vec<_>>());
    assert_eq!(original.get(99), Some(&7777));
}

#[test]
fn test_clear_and_shrink() {
    let config = TableConfig { min_leaf_capacity: 2, block_bits: 2 };
    let mut table = FractalTable::with_config(config).unwrap();
    table.extend(0..500u64);
    let grown = table.capacity();
    for _ in 0..490 {
        table.pop_back();
    }
    assert_eq!(table.capacity(), grown);
    table.shrink_to_fit();
    assert!(table.capacity() < grown);
    assert_eq!(table.iter().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
    table.clear();
    assert!(table.is_empty());
    assert_eq!(table.capacity(), config.min_leaf_capacity - 1);
}

#[test]
fn test_sorted_helpers() {
    let mut table = FractalTable::new();
    for value in [5, 1, 4, 1, 3, 9, 2, 6] {
        table.add_sorted(value).unwrap();
    }
    assert_eq!(table.iter().copied().collect::<Vec<_>>(), vec![1, 1, 2, 3, 4, 5, 6, 9]);
    assert_eq!(table.index_of_sorted(&4), Ok(4));
    assert_eq!(table.index_of_sorted(&7), Err(7));
    assert_eq!(table.remove_sorted(&1), Some(1));
    assert_eq!(table.remove_sorted(&8), None);
    assert_eq!(table.len(), 7);

    let mut unsorted: FractalTable<i32> = vec![3, -1, 2, -7].into();
    unsorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(unsorted.iter().copied().collect::<Vec<_>>(), vec![3, 2, -1, -7]);
}

#[test]
fn test_search_and_retain() {
    let mut table: FractalTable<u32> = vec![4, 8, 15, 16, 23, 42, 8].into();
    assert_eq!(table.index_of(&8), Some(1));
    assert_eq!(table.last_index_of(&8), Some(6));
    assert!(table.contains(&23));
    assert!(!table.contains(&5));
    table.retain(|v| v % 2 == 0);
    assert_eq!(table.iter().copied().collect::<Vec<_>>(), vec![4, 8, 16, 42, 8]);
    assert_eq!(table, FractalTable::from(vec![4, 8, 16, 42, 8]));
}

#[test]
fn test_invalid_config_rejected() {
    let bad = TableConfig { min_leaf_capacity: 64, block_bits: 4 };
    assert!(matches!(
        FractalTable::<u8>::with_config(bad),
        Err(CollectionError::Configuration { .. })
    ));
}
