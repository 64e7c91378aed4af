//! Radix-indexed navigable map.

use super::iter::{Iter, Keys, Values};
use super::level::Level;
use crate::error::{CollectionError, Result};
use crate::order::{HashOrder, Order};
use std::fmt;

/// Ordered map whose key order is given by a pluggable [`Order`].
///
/// Keys are placed by `Order::index_of` into a 16-way radix trie; keys sharing
/// an index are separated by a nested level or kept in a sorted bucket.
/// Lookups cost a few radix steps regardless of the map size, and ascending
/// iteration yields keys sorted by `Order::compare`.
///
/// Maps are persistent: [`Clone`] shares all structure and later mutations of
/// either copy leave the other untouched.
///
/// # Examples
///
/// ```rust
/// use radix_collections::{FastMap, IndexOrder};
///
/// let mut map = FastMap::with_order(IndexOrder);
/// map.insert(30u32, "thirty");
/// map.insert(10u32, "ten");
/// map.insert(20u32, "twenty");
///
/// assert_eq!(map.first_key_value(), Some((&10, &"ten")));
/// assert_eq!(map.higher_key_value(&10), Some((&20, &"twenty")));
/// let keys: Vec<u32> = map.keys().copied().collect();
/// assert_eq!(keys, vec![10, 20, 30]);
/// ```
#[derive(Clone)]
pub struct FastMap<K, V, O = HashOrder> {
    root: Level<K, V, O>,
    len: usize,
}

impl<K, V> FastMap<K, V, HashOrder> {
    /// Empty map ordered by key hash.
    pub fn new() -> Self {
        Self::with_order(HashOrder)
    }
}

impl<K, V> Default for FastMap<K, V, HashOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, O> FastMap<K, V, O> {
    /// Empty map ordered by `order`.
    pub fn with_order(order: O) -> Self {
        Self {
            root: Level::new(order),
            len: 0,
        }
    }

    /// The root order of this map.
    pub fn order(&self) -> &O {
        &self.root.order
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, O> {
        Iter::new(&self.root, self.len, false)
    }

    /// Entries in descending key order.
    pub fn descending_iter(&self) -> Iter<'_, K, V, O> {
        Iter::new(&self.root, self.len, true)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V, O> {
        Keys { inner: self.iter() }
    }

    /// Values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V, O> {
        Values { inner: self.iter() }
    }

    /// Smallest key.
    pub fn first_key(&self) -> Option<&K> {
        self.first_key_value().map(|(k, _)| k)
    }

    /// Largest key.
    pub fn last_key(&self) -> Option<&K> {
        self.last_key_value().map(|(k, _)| k)
    }

    /// Entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.root.first()
    }

    /// Entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.root.last()
    }
}

impl<K, V, O: Order<K>> FastMap<K, V, O> {
    /// Value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.root.get(key).map(|(_, v)| v)
    }

    /// Stored key and value equal to `key`.
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.root.get(key)
    }

    /// Whether an entry for `key` exists.
    pub fn contains_key(&self, key: &K) -> bool {
        self.root.get(key).is_some()
    }

    /// Smallest entry with a key greater than or equal to `key`.
    pub fn ceiling_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.root.ceiling(key, true)
    }

    /// Smallest entry with a key strictly greater than `key`.
    pub fn higher_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.root.ceiling(key, false)
    }

    /// Largest entry with a key less than or equal to `key`.
    pub fn floor_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.root.floor(key, true)
    }

    /// Largest entry with a key strictly less than `key`.
    pub fn lower_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.root.floor(key, false)
    }

    /// Smallest key greater than or equal to `key`.
    pub fn ceiling_key(&self, key: &K) -> Option<&K> {
        self.ceiling_key_value(key).map(|(k, _)| k)
    }

    /// Smallest key strictly greater than `key`.
    pub fn higher_key(&self, key: &K) -> Option<&K> {
        self.higher_key_value(key).map(|(k, _)| k)
    }

    /// Largest key less than or equal to `key`.
    pub fn floor_key(&self, key: &K) -> Option<&K> {
        self.floor_key_value(key).map(|(k, _)| k)
    }

    /// Largest key strictly less than `key`.
    pub fn lower_key(&self, key: &K) -> Option<&K> {
        self.lower_key_value(key).map(|(k, _)| k)
    }

    /// Entries from `key` in ascending order; `inclusive` keeps an entry
    /// equal to `key`.
    pub fn iter_from(&self, key: &K, inclusive: bool) -> Iter<'_, K, V, O> {
        Iter::starting_at(&self.root, key, inclusive, false)
    }

    /// Entries from `key` in descending order; `inclusive` keeps an entry
    /// equal to `key`.
    pub fn descending_iter_from(&self, key: &K, inclusive: bool) -> Iter<'_, K, V, O> {
        Iter::starting_at(&self.root, key, inclusive, true)
    }

    /// Whether some entry holds `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }
}

impl<K: Clone, V: Clone, O: Order<K>> FastMap<K, V, O> {
    /// Map ordered by `order` holding the given entries.
    pub fn from_iter_with_order<I: IntoIterator<Item = (K, V)>>(order: O, iter: I) -> Self {
        let mut map = Self::with_order(order);
        map.extend(iter);
        map
    }

    /// Insert or replace, returning the previous value. A replaced entry
    /// keeps the key it was first inserted with.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let previous = self.root.insert(key, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Insert only when `key` is absent. Returns the value already present,
    /// leaving it unchanged, or `None` after inserting.
    pub fn put_if_absent(&mut self, key: K, value: V) -> Option<&V> {
        if self.contains_key(&key) {
            return self.get(&key);
        }
        self.insert(key, value);
        None
    }

    /// Mutable access to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        if !self.contains_key(key) {
            return None;
        }
        self.root.value_mut(key)
    }

    /// Remove `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Remove `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        // Absent keys must not unshare structure with clones.
        if !self.contains_key(key) {
            return None;
        }
        let removed = self.root.remove(key);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Remove and return the entry with the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let key = self.first_key_value()?.0.clone();
        self.remove_entry(&key)
    }

    /// Remove and return the entry with the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let key = self.last_key_value()?.0.clone();
        self.remove_entry(&key)
    }

    /// Drop every entry, keeping the order.
    pub fn clear(&mut self) {
        self.root.array.clear();
        self.len = 0;
    }

    /// Keep only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let doomed: Vec<K> = self
            .iter()
            .filter(|(k, v)| !keep(k, v))
            .map(|(k, _)| k.clone())
            .collect();
        for key in &doomed {
            self.remove_entry(key);
        }
    }

    /// Ascending cursor able to remove the entry it last returned.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V, O> {
        CursorMut::new(self, false)
    }

    /// Descending cursor able to remove the entry it last returned.
    pub fn descending_cursor_mut(&mut self) -> CursorMut<'_, K, V, O> {
        CursorMut::new(self, true)
    }

    fn step(&self, key: &K, descending: bool) -> Option<(&K, &V)> {
        if descending {
            self.root.predecessor(key)
        } else {
            self.root.successor(key)
        }
    }
}

/// Mutating cursor over a [`FastMap`].
///
/// The cursor remembers the key it returned last and the key it returns next,
/// so removing the current entry never disturbs the traversal.
pub struct CursorMut<'a, K, V, O> {
    map: &'a mut FastMap<K, V, O>,
    current: Option<K>,
    next: Option<K>,
    descending: bool,
}

impl<'a, K: Clone, V: Clone, O: Order<K>> CursorMut<'a, K, V, O> {
    fn new(map: &'a mut FastMap<K, V, O>, descending: bool) -> Self {
        let start = if descending {
            map.last_key_value()
        } else {
            map.first_key_value()
        };
        let next = start.map(|(k, _)| k.clone());
        Self {
            map,
            current: None,
            next,
            descending,
        }
    }

    /// Whether [`advance`](Self::advance) would return an entry.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Move to the next entry and return it.
    pub fn advance(&mut self) -> Result<(&K, &V)> {
        let key = self
            .next
            .take()
            .ok_or_else(|| CollectionError::no_such_element("cursor is exhausted"))?;
        self.next = self.map.step(&key, self.descending).map(|(k, _)| k.clone());
        let current = self.current.insert(key);
        self.map
            .get_key_value(current)
            .ok_or_else(|| CollectionError::illegal_state("cursor entry vanished"))
    }

    /// Key of the entry last returned by [`advance`](Self::advance).
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Mutable value of the entry last returned by [`advance`](Self::advance).
    pub fn value_mut(&mut self) -> Option<&mut V> {
        let key = self.current.as_ref()?;
        self.map.get_mut(key)
    }

    /// Remove the entry last returned by [`advance`](Self::advance).
    pub fn remove(&mut self) -> Result<(K, V)> {
        let key = self
            .current
            .take()
            .ok_or_else(|| CollectionError::illegal_state("remove requires a preceding advance"))?;
        self.map
            .remove_entry(&key)
            .ok_or_else(|| CollectionError::illegal_state("cursor entry vanished"))
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O> fmt::Debug for FastMap<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V: PartialEq, O: Order<K>> PartialEq for FastMap<K, V, O> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K, V: Eq, O: Order<K>> Eq for FastMap<K, V, O> {}

impl<K: Clone, V: Clone, O: Order<K>> Extend<(K, V)> for FastMap<K, V, O> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Clone, V: Clone, O: Order<K> + Default> FromIterator<(K, V)> for FastMap<K, V, O> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_order(O::default());
        map.extend(iter);
        map
    }
}

impl<'a, K, V, O> IntoIterator for &'a FastMap<K, V, O> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
