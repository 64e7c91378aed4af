//! Integration tests for views and the shared collection traits
//!
//! Views are stacked on each other and on every base collection to check
//! that each wrapper honors the contract of the traits it implements.

use std::ops::Bound;

use radix_collections::order::hash_index;
use radix_collections::traits::{Collection, Direction, NavigableMap, NavigableSet, Table};
use radix_collections::view::{Filtered, IntoView, Reversed, SubMap, SubTable, Unmodifiable};
use radix_collections::{
    CaseInsensitiveLexicalOrder, CollectionError, FastMap, FastMultiSet, FastSet, FractalTable, IndexOrder, LexicalOrder,
};

// =============================================================================
// SUB-RANGES
// =============================================================================

#[test]
fn test_sub_table_scenario() {
    let table: FractalTable<u32> = (0..=6).collect();
    let mut window = SubTable::new(table, 2, 5).unwrap();
    assert_eq!(window.get(0).unwrap(), 2);
    window.set(0, 99).unwrap();
    assert_eq!(window.get_ref().to_vec(), vec![0, 1, 99, 3, 4, 5, 6]);
    assert_eq!(Collection::len(&window), 3);
}

#[test]
fn test_sub_table_over_shared_writes_through() {
    let shared = FractalTable::from(vec![0u32; 10]).shared();
    let mut window = SubTable::new(shared.clone(), 5, 10).unwrap();
    window.push_front(1).unwrap();
    assert_eq!(Collection::len(&shared), 11);
    assert_eq!(Table::get(&shared, 5).unwrap(), 1);
    assert_eq!(window.range(), 5..11);
}

#[test]
fn test_nested_sub_tables() {
    let table: FractalTable<u32> = (0..20).collect();
    let outer = SubTable::new(table, 5, 15).unwrap();
    let inner = SubTable::new(outer, 2, 4).unwrap();
    assert_eq!(inner.to_vec(), vec![7, 8]);
}

#[test]
fn test_sub_map_over_lexical_keys() {
    let map: FastMap<String, usize, LexicalOrder> = FastMap::from_iter_with_order(
        LexicalOrder::new(),
        ["ant", "bee", "cat", "dog", "eel"].iter().map(|s| (s.to_string(), s.len())),
    );
    let mut view = SubMap::new(
        map,
        Bound::Included(String::from("b")),
        Bound::Excluded(String::from("d")),
    )
    .unwrap();
    assert_eq!(NavigableMap::len(&view), 2);
    assert_eq!(view.first_entry().map(|(k, _)| k), Some(String::from("bee")));
    assert!(matches!(
        view.put(String::from("zebra"), 5),
        Err(CollectionError::UnsupportedOperation { .. })
    ));
    view.put(String::from("cow"), 3).unwrap();
    assert_eq!(view.get_ref().len(), 6);
}

// =============================================================================
// SPLIT
// =============================================================================

#[test]
fn test_map_split_is_disjoint_and_complete() {
    let map: FastMap<u64, u64> = (0..1000u64).map(|i| (i, i)).collect();
    let parts = map.split(4).unwrap();
    assert_eq!(parts.len(), 4);
    let mut total = 0;
    for part in &parts {
        let size = NavigableMap::len(part);
        assert!((240..=260).contains(&size), "unbalanced part of {}", size);
        total += size;
    }
    assert_eq!(total, 1000);
    for key in 0..1000u64 {
        let owners = parts.iter().filter(|p| p.in_range(&key)).count();
        assert_eq!(owners, 1);
    }
}

#[test]
fn test_split_of_small_collections() {
    let table: FractalTable<u32> = vec![1, 2].into();
    assert_eq!(table.split(5).unwrap().len(), 2);
    let empty: FractalTable<u32> = FractalTable::new();
    assert_eq!(empty.split(3).unwrap().len(), 1);
    let map: FastMap<u32, u32, IndexOrder> = FastMap::with_order(IndexOrder);
    assert!(matches!(map.split(0), Err(CollectionError::InvalidArgument { .. })));
}

// =============================================================================
// REVERSED, FILTERED, UNMODIFIABLE
// =============================================================================

#[test]
fn test_reversed_hash_set() {
    let set: FastSet<&str> = ["a", "b", "c"].into_iter().collect();
    let largest = ["a", "b", "c"].into_iter().max_by_key(|s| hash_index(s)).unwrap();
    let smallest = ["a", "b", "c"].into_iter().min_by_key(|s| hash_index(s)).unwrap();
    let reversed = set.reversed();
    assert_eq!(reversed.first(), Some(largest));
    assert_eq!(reversed.last(), Some(smallest));
    let forward: Vec<&str> = reversed.get_ref().iter().copied().collect();
    let mut backward = reversed.to_vec();
    backward.reverse();
    assert_eq!(forward, backward);
}

#[test]
fn test_double_reverse_is_identity() {
    let table: FractalTable<u32> = (0..10).collect();
    let twice = Reversed::new(Reversed::new(table.clone()));
    assert_eq!(twice.to_vec(), table.to_vec());
    assert_eq!(Table::get(&twice, 3).unwrap(), 3);
}

#[test]
fn test_filtered_reversed_set() {
    let set: FastSet<u32, IndexOrder> = (0..50u32).collect();
    let view = set.filtered(|v: &u32| v % 7 == 0).reversed();
    assert_eq!(view.to_vec(), vec![49, 42, 35, 28, 21, 14, 7, 0]);
    assert_eq!(view.first(), Some(49));
    assert_eq!(view.higher(&30), Some(28));
    assert_eq!(view.ceiling(&30), Some(28));
    assert_eq!(view.compare(&1, &2), std::cmp::Ordering::Greater);
}

#[test]
fn test_filtered_rejects_quietly() {
    let mut view = Filtered::new(FastSet::<u32, IndexOrder>::with_order(IndexOrder), |v: &u32| *v < 10);
    assert_eq!(view.add(3), Ok(true));
    assert_eq!(view.add(30), Ok(false));
    assert_eq!(view.add(3), Ok(false));
    assert_eq!(Collection::len(&view), 1);
    assert_eq!(view.get_ref().len(), 1);
}

#[test]
fn test_unmodifiable_stack() {
    let mut view = Unmodifiable::new(FastSet::<u32, IndexOrder>::from_iter([1, 2, 3])).reversed();
    assert_eq!(view.first(), Some(3));
    assert!(matches!(view.add(4), Err(CollectionError::UnsupportedOperation { .. })));
    assert!(view.clear().is_err());
    assert_eq!(view.to_vec(), vec![3, 2, 1]);
}

// =============================================================================
// TRAIT SURFACE
// =============================================================================

fn drain_front<T, C: Table<T>>(table: &mut C) -> Vec<T> {
    let mut out = Vec::new();
    while let Ok(value) = table.pop_front() {
        out.push(value);
    }
    out
}

#[test]
fn test_generic_table_code_over_views() {
    let mut plain: FractalTable<u32> = (0..5).collect();
    assert_eq!(drain_front(&mut plain), vec![0, 1, 2, 3, 4]);

    let mut reversed = FractalTable::from(vec![0u32, 1, 2]).reversed();
    assert_eq!(drain_front(&mut reversed), vec![2, 1, 0]);

    let mut atomic = FractalTable::from(vec![7u32, 8]).atomic();
    assert_eq!(drain_front(&mut atomic), vec![7, 8]);
    assert!(matches!(atomic.pop_front(), Err(CollectionError::NoSuchElement { .. })));
}

#[test]
fn test_for_each_entry_directions() {
    let map: FastMap<u32, char, IndexOrder> = [(1, 'a'), (2, 'b'), (3, 'c'), (4, 'd')].into_iter().collect();
    let mut seen = Vec::new();
    map.for_each_entry(Direction::Descending, Some(&3), &mut |k, v| {
        seen.push((*k, *v));
        *k > 2
    });
    assert_eq!(seen, vec![(3, 'c'), (2, 'b')]);
    let entries = map.clone().shared().entries();
    assert_eq!(entries.len(), 4);
}

// =============================================================================
// DISTINCT AND LINKED
// =============================================================================

#[test]
fn test_distinct_multiset_reads_like_a_set() {
    let words = FastMultiSet::from_iter_with_order(
        CaseInsensitiveLexicalOrder::new(),
        ["b", "A", "a", "c", "B"].map(String::from),
    );
    assert_eq!(words.len(), 5);
    // Distinct compares by `Eq`, so spellings differing in case stay apart.
    let distinct = words.clone().distinct();
    assert_eq!(distinct.to_vec(), vec!["A", "a", "b", "B", "c"]);

    let lower: FastMultiSet<String, LexicalOrder> =
        FastMultiSet::from_iter_with_order(LexicalOrder::new(), ["x", "y", "x", "x"].map(String::from));
    let mut distinct = lower.distinct();
    assert_eq!(distinct.len(), 2);
    assert_eq!(distinct.add("y".to_string()), Ok(false));
    assert_eq!(distinct.remove_value(&"x".to_string()), Ok(true));
    assert_eq!(distinct.get_ref().len(), 1);
    assert_eq!(distinct.first().as_deref(), Some("y"));
}

#[test]
fn test_linked_map_keeps_insertion_order_under_views() {
    let mut map = FastMap::with_order(IndexOrder).linked_map::<u32, &str>();
    for (k, v) in [(40, "d"), (10, "a"), (30, "c"), (20, "b")] {
        map.put(k, v).unwrap();
    }
    let keys: Vec<u32> = map.entries().into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec![40, 10, 30, 20]);
    assert_eq!(map.floor_entry(&25), Some((20, "b")));

    let read_only = map.clone().unmodifiable();
    assert_eq!(NavigableMap::first_entry(&read_only), Some((40, "d")));
    let mut read_only = read_only;
    assert!(matches!(
        read_only.put(50, "e"),
        Err(CollectionError::UnsupportedOperation { .. })
    ));

    let mut backwards = Vec::new();
    map.for_each_entry(Direction::Descending, None, &mut |k, _| {
        backwards.push(*k);
        true
    });
    assert_eq!(backwards, vec![20, 30, 10, 40]);
}

#[test]
fn test_linked_table_is_plain_order() {
    let table: FractalTable<u32> = vec![3, 1, 2].into();
    let mut linked = table.linked();
    linked.add(0).unwrap();
    assert_eq!(linked.to_vec(), vec![3, 1, 2, 0]);
    assert_eq!(linked.get_ref().to_vec(), vec![3, 1, 2, 0]);
}
