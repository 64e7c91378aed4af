//! Key-range window over a map.

use crate::error::{CollectionError, Result};
use crate::traits::{Direction, NavigableMap};
use std::cmp::Ordering;
use std::ops::Bound;

/// The entries of a [`NavigableMap`] whose keys fall within a range.
///
/// Bounds are compared with the map's own order. Puts outside the range fail
/// with [`CollectionError::UnsupportedOperation`]; reads and removals outside
/// it see nothing.
#[derive(Debug, Clone)]
pub struct SubMap<M, K> {
    inner: M,
    low: Bound<K>,
    high: Bound<K>,
}

impl<M, K> SubMap<M, K> {
    /// Entries of `inner` between `low` and `high`.
    ///
    /// Fails with [`CollectionError::InvalidArgument`] when `low` sorts after
    /// `high`.
    pub fn new<V>(inner: M, low: Bound<K>, high: Bound<K>) -> Result<Self>
    where
        M: NavigableMap<K, V>,
    {
        if let (Bound::Included(l) | Bound::Excluded(l), Bound::Included(h) | Bound::Excluded(h)) = (&low, &high) {
            if inner.compare_keys(l, h) == Ordering::Greater {
                return Err(CollectionError::invalid_argument("sub-map lower bound above upper bound"));
            }
        }
        Ok(Self { inner, low, high })
    }

    /// The lower bound.
    pub fn low(&self) -> Bound<&K> {
        self.low.as_ref()
    }

    /// The upper bound.
    pub fn high(&self) -> Bound<&K> {
        self.high.as_ref()
    }

    /// The map behind the window.
    pub fn get_ref(&self) -> &M {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> M {
        self.inner
    }

    fn above_low<V>(&self, key: &K) -> bool
    where
        M: NavigableMap<K, V>,
    {
        match &self.low {
            Bound::Unbounded => true,
            Bound::Included(low) => self.inner.compare_keys(key, low) != Ordering::Less,
            Bound::Excluded(low) => self.inner.compare_keys(key, low) == Ordering::Greater,
        }
    }

    fn below_high<V>(&self, key: &K) -> bool
    where
        M: NavigableMap<K, V>,
    {
        match &self.high {
            Bound::Unbounded => true,
            Bound::Included(high) => self.inner.compare_keys(key, high) != Ordering::Greater,
            Bound::Excluded(high) => self.inner.compare_keys(key, high) == Ordering::Less,
        }
    }

    /// Whether `key` lies within the window.
    pub fn in_range<V>(&self, key: &K) -> bool
    where
        M: NavigableMap<K, V>,
    {
        self.above_low(key) && self.below_high(key)
    }

    fn within<V>(&self, entry: Option<(K, V)>) -> Option<(K, V)>
    where
        M: NavigableMap<K, V>,
    {
        entry.filter(|(k, _)| self.in_range(k))
    }
}

impl<K, V, M: NavigableMap<K, V>> NavigableMap<K, V> for SubMap<M, K> {
    fn len(&self) -> usize {
        let mut count = 0;
        self.for_each_entry(Direction::Ascending, None, &mut |_, _| {
            count += 1;
            true
        });
        count
    }

    fn get(&self, key: &K) -> Option<V> {
        if !self.in_range(key) {
            return None;
        }
        self.inner.get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.in_range(key) && self.inner.contains_key(key)
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        if !self.in_range(&key) {
            return Err(CollectionError::unsupported("put outside the sub-map range"));
        }
        self.inner.put(key, value)
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        if !self.in_range(key) {
            return Ok(None);
        }
        self.inner.remove(key)
    }

    fn clear(&mut self) -> Result<()> {
        while let Some((key, _)) = self.first_entry() {
            self.inner.remove(&key)?;
        }
        Ok(())
    }

    fn first_entry(&self) -> Option<(K, V)> {
        let entry = match &self.low {
            Bound::Unbounded => self.inner.first_entry(),
            Bound::Included(low) => self.inner.ceiling_entry(low),
            Bound::Excluded(low) => self.inner.higher_entry(low),
        };
        self.within(entry)
    }

    fn last_entry(&self) -> Option<(K, V)> {
        let entry = match &self.high {
            Bound::Unbounded => self.inner.last_entry(),
            Bound::Included(high) => self.inner.floor_entry(high),
            Bound::Excluded(high) => self.inner.lower_entry(high),
        };
        self.within(entry)
    }

    fn higher_entry(&self, key: &K) -> Option<(K, V)> {
        if !self.above_low(key) {
            return self.first_entry();
        }
        self.within(self.inner.higher_entry(key))
    }

    fn lower_entry(&self, key: &K) -> Option<(K, V)> {
        if !self.below_high(key) {
            return self.last_entry();
        }
        self.within(self.inner.lower_entry(key))
    }

    fn ceiling_entry(&self, key: &K) -> Option<(K, V)> {
        if !self.above_low(key) {
            return self.first_entry();
        }
        self.within(self.inner.ceiling_entry(key))
    }

    fn floor_entry(&self, key: &K) -> Option<(K, V)> {
        if !self.below_high(key) {
            return self.last_entry();
        }
        self.within(self.inner.floor_entry(key))
    }

    fn for_each_entry(&self, direction: Direction, from: Option<&K>, f: &mut dyn FnMut(&K, &V) -> bool) {
        // Start at the tighter of `from` and the bound on the near side.
        let near = match direction {
            Direction::Ascending => &self.low,
            Direction::Descending => &self.high,
        };
        let start = match (from, near) {
            (Some(key), Bound::Included(b) | Bound::Excluded(b)) => {
                let before = match direction {
                    Direction::Ascending => Ordering::Less,
                    Direction::Descending => Ordering::Greater,
                };
                if self.inner.compare_keys(key, b) == before {
                    Some(b)
                } else {
                    Some(key)
                }
            }
            (Some(key), Bound::Unbounded) => Some(key),
            (None, Bound::Included(b) | Bound::Excluded(b)) => Some(b),
            (None, Bound::Unbounded) => None,
        };
        self.inner.for_each_entry(direction, start, &mut |k, v| {
            let (inside, passed) = match direction {
                Direction::Ascending => (self.above_low(k), !self.below_high(k)),
                Direction::Descending => (self.below_high(k), !self.above_low(k)),
            };
            if passed {
                return false;
            }
            !inside || f(k, v)
        });
    }

    fn compare_keys(&self, left: &K, right: &K) -> Ordering {
        self.inner.compare_keys(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::IndexOrder;
    use crate::FastMap;

    fn map() -> FastMap<u32, u32, IndexOrder> {
        (0..10u32).map(|i| (i * 10, i)).collect()
    }

    #[test]
    fn test_range_reads() {
        let view = SubMap::new(map(), Bound::Excluded(20), Bound::Included(60)).unwrap();
        assert_eq!(view.len(), 4);
        assert_eq!(view.first_entry(), Some((30, 3)));
        assert_eq!(view.last_entry(), Some((60, 6)));
        assert_eq!(view.get(&20), None);
        assert_eq!(view.get(&60), Some(6));
        assert_eq!(view.higher_entry(&0), Some((30, 3)));
        assert_eq!(view.lower_entry(&95), Some((60, 6)));
        assert_eq!(view.ceiling_entry(&61), None);
        assert_eq!(view.floor_entry(&25), None);
        let keys: Vec<u32> = view.entries().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![30, 40, 50, 60]);
        let mut descending = Vec::new();
        view.for_each_entry(Direction::Descending, Some(&55), &mut |k, _| {
            descending.push(*k);
            true
        });
        assert_eq!(descending, vec![50, 40, 30]);
    }

    #[test]
    fn test_range_writes() {
        let mut view = SubMap::new(map(), Bound::Included(30), Bound::Excluded(50)).unwrap();
        assert!(matches!(view.put(50, 0), Err(CollectionError::UnsupportedOperation { .. })));
        assert_eq!(view.put(35, 99).unwrap(), None);
        assert_eq!(view.remove(&0).unwrap(), None);
        assert_eq!(view.len(), 3);
        view.clear().unwrap();
        assert!(view.is_empty());
        assert_eq!(view.get_ref().len(), 8);
        assert_eq!(view.get_ref().get(&50), Some(&5));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = SubMap::new(map(), Bound::Included(50), Bound::Included(10));
        assert!(matches!(result, Err(CollectionError::InvalidArgument { .. })));
    }
}
