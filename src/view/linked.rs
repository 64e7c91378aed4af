//! Insertion-ordered view.

use crate::error::Result;
use crate::table::FractalTable;
use crate::traits::{cut_points, part_count, ranges, Collection, Direction, NavigableMap};
use crate::view::SubMap;
use std::cmp::Ordering;

/// View iterating in insertion order instead of the collection's own order.
///
/// Keys are logged in a [`FractalTable`] as they are added; iteration walks
/// the log. Lookups and key navigation (`higher_entry`, `ceiling_entry`, ...)
/// still use the inner order, while `first_entry` and `last_entry` are the
/// oldest and newest keys. Re-putting an existing key keeps its position.
///
/// Intended for collections holding each key once (sets and maps); a
/// removal costs a pass over the log.
///
/// # Examples
///
/// ```rust
/// use radix_collections::traits::NavigableMap;
/// use radix_collections::view::Linked;
/// use radix_collections::{FastMap, IndexOrder};
///
/// let mut map = Linked::of_map(FastMap::<u32, &str, IndexOrder>::with_order(IndexOrder));
/// map.put(30, "c").unwrap();
/// map.put(10, "a").unwrap();
/// map.put(20, "b").unwrap();
/// let keys: Vec<u32> = map.entries().into_iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec![30, 10, 20]);
/// assert_eq!(map.ceiling_entry(&11), Some((20, "b")));
/// ```
#[derive(Debug, Clone)]
pub struct Linked<C, K> {
    inner: C,
    log: FractalTable<K>,
}

impl<C, K> Linked<C, K> {
    /// The collection behind the view.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwrap, dropping the insertion log.
    pub fn into_inner(self) -> C {
        self.inner
    }

    /// Keys in insertion order.
    pub fn insertion_order(&self) -> &FractalTable<K> {
        &self.log
    }
}

impl<C, K: Clone> Linked<C, K> {
    /// Linked view over a collection; present elements are logged in the
    /// collection's iteration order.
    pub fn of_collection(inner: C) -> Self
    where
        C: Collection<K>,
    {
        let log = inner.to_vec().into();
        Self { inner, log }
    }

    /// Linked view over a map; present keys are logged in key order.
    pub fn of_map<V>(inner: C) -> Self
    where
        C: NavigableMap<K, V>,
    {
        let mut log = FractalTable::new();
        inner.for_each_entry(Direction::Ascending, None, &mut |key, _| {
            log.push_back(key.clone());
            true
        });
        Self { inner, log }
    }
}

impl<T: Clone, C: Collection<T>> Collection<T> for Linked<C, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        let added = self.inner.add(value.clone())?;
        if added {
            self.log.push_back(value);
        }
        Ok(added)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        let removed = self.inner.remove_value(value)?;
        if removed {
            let inner = &self.inner;
            self.log.retain(|logged| inner.contains(logged));
        }
        Ok(removed)
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let removed = self.inner.remove_if(pred)?;
        if removed > 0 {
            let inner = &self.inner;
            self.log.retain(|logged| inner.contains(logged));
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()?;
        self.log.clear();
        Ok(())
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        for value in self.log.iter() {
            if !f(value) {
                break;
            }
        }
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        for value in self.log.iter().rev() {
            if !f(value) {
                break;
            }
        }
    }
}

impl<K: Clone, M> Linked<M, K> {
    fn logged_entry<V>(&self, key: Option<&K>) -> Option<(K, V)>
    where
        M: NavigableMap<K, V>,
    {
        let key = key?;
        self.inner.get(key).map(|value| (key.clone(), value))
    }

    fn position<V>(&self, key: &K) -> Option<usize>
    where
        M: NavigableMap<K, V>,
    {
        self.log
            .iter()
            .position(|logged| self.inner.compare_keys(logged, key) == Ordering::Equal)
    }
}

impl<K: Clone, V, M: NavigableMap<K, V>> NavigableMap<K, V> for Linked<M, K> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        let previous = self.inner.put(key.clone(), value)?;
        if previous.is_none() {
            self.log.push_back(key);
        }
        Ok(previous)
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        let removed = self.inner.remove(key)?;
        if removed.is_some() {
            let inner = &self.inner;
            self.log.retain(|logged| inner.contains_key(logged));
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()?;
        self.log.clear();
        Ok(())
    }

    fn first_entry(&self) -> Option<(K, V)> {
        self.logged_entry(self.log.first())
    }

    fn last_entry(&self) -> Option<(K, V)> {
        self.logged_entry(self.log.last())
    }

    fn higher_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.higher_entry(key)
    }

    fn lower_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.lower_entry(key)
    }

    fn ceiling_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.ceiling_entry(key)
    }

    fn floor_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.floor_entry(key)
    }

    /// Walks the insertion log. With `from`, starts at the logged position of
    /// the inner map's ceiling (ascending) or floor (descending) of `from`.
    fn for_each_entry(&self, direction: Direction, from: Option<&K>, f: &mut dyn FnMut(&K, &V) -> bool) {
        let start = match from {
            None => None,
            Some(key) => {
                let anchor = match direction {
                    Direction::Ascending => self.inner.ceiling_entry(key),
                    Direction::Descending => self.inner.floor_entry(key),
                };
                match anchor.and_then(|(k, _)| self.position::<V>(&k)) {
                    Some(position) => Some(position),
                    None => return,
                }
            }
        };
        let mut visit = |key: &K| match self.inner.get(key) {
            Some(value) => f(key, &value),
            None => true,
        };
        match direction {
            Direction::Ascending => {
                for key in self.log.iter().skip(start.unwrap_or(0)) {
                    if !visit(key) {
                        break;
                    }
                }
            }
            Direction::Descending => {
                let end = start.map_or(self.log.len(), |position| position + 1);
                for key in self.log.iter().take(end).rev() {
                    if !visit(key) {
                        break;
                    }
                }
            }
        }
    }

    fn compare_keys(&self, left: &K, right: &K) -> Ordering {
        self.inner.compare_keys(left, right)
    }

    // Ranges follow the key order, not the insertion order.
    fn split(&self, parts: usize) -> Result<Vec<SubMap<Self, K>>>
    where
        Self: Sized + Clone,
        K: Clone,
    {
        let len = self.inner.len();
        let parts = part_count(parts, len)?;
        let cuts = cut_points(len, parts, |visit| {
            self.inner
                .for_each_entry(Direction::Ascending, None, &mut |key, _| visit(key))
        });
        ranges(cuts)
            .into_iter()
            .map(|(low, high)| SubMap::new(self.clone(), low, high))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{IndexOrder, LexicalOrder};
    use crate::{FastMap, FastSet};

    fn linked_map() -> Linked<FastMap<u32, char, IndexOrder>, u32> {
        let mut map = Linked::of_map(FastMap::with_order(IndexOrder));
        for (k, v) in [(5, 'e'), (1, 'a'), (9, 'i'), (3, 'c')] {
            map.put(k, v).unwrap();
        }
        map
    }

    #[test]
    fn test_map_iterates_in_insertion_order() {
        let mut map = linked_map();
        let keys: Vec<u32> = map.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![5, 1, 9, 3]);
        assert_eq!(map.put(1, 'A').unwrap(), Some('a'));
        assert_eq!(map.remove(&9).unwrap(), Some('i'));
        let entries = map.entries();
        assert_eq!(entries, vec![(5, 'e'), (1, 'A'), (3, 'c')]);
        assert_eq!(map.first_entry(), Some((5, 'e')));
        assert_eq!(map.last_entry(), Some((3, 'c')));
        assert_eq!(map.higher_entry(&1), Some((3, 'c')));
    }

    #[test]
    fn test_traversal_from_a_key() {
        let map = linked_map();
        let mut seen = Vec::new();
        map.for_each_entry(Direction::Ascending, Some(&2), &mut |k, _| {
            seen.push(*k);
            true
        });
        // Ceiling of 2 is 3, the newest key.
        assert_eq!(seen, vec![3]);
        seen.clear();
        map.for_each_entry(Direction::Descending, Some(&8), &mut |k, _| {
            seen.push(*k);
            true
        });
        // Floor of 8 is 5, the oldest key.
        assert_eq!(seen, vec![5]);
        seen.clear();
        map.for_each_entry(Direction::Descending, None, &mut |k, _| {
            seen.push(*k);
            *k != 9
        });
        assert_eq!(seen, vec![3, 9]);
    }

    #[test]
    fn test_split_follows_key_order() {
        let map = linked_map();
        let parts = map.split(2).unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(NavigableMap::len(&parts[0]), 2);
        assert!(parts[0].in_range(&1) && parts[0].in_range(&3));
        assert!(parts[1].in_range(&5) && parts[1].in_range(&9));
    }

    #[test]
    fn test_linked_set() {
        let mut set: Linked<FastSet<String, LexicalOrder>, String> =
            Linked::of_collection(FastSet::with_order(LexicalOrder::new()));
        for word in ["pear", "apple", "fig", "apple"] {
            set.add(word.to_string()).unwrap();
        }
        assert_eq!(set.to_vec(), vec!["pear", "apple", "fig"]);
        assert!(set.remove_value(&"pear".to_string()).unwrap());
        assert_eq!(set.remove_if(&|w| w.len() == 3).unwrap(), 1);
        assert_eq!(set.to_vec(), vec!["apple"]);
        assert_eq!(set.insertion_order().len(), 1);
    }
}
