//! Maps and sets holding several entries under equal keys.
//!
//! A [`FastMultiMap`] groups entries whose keys the order considers equal.
//! Groups iterate in key order; inside a group entries keep insertion order,
//! and every entry keeps the key it was inserted with.

use super::fast_map::FastMap;
use crate::error::Result;
use crate::order::{HashOrder, Order};
use crate::traits::{Collection, NavigableSet};
use std::cmp::Ordering;
use std::fmt;

/// Map allowing any number of entries per key.
///
/// # Examples
///
/// ```rust
/// use radix_collections::{CaseInsensitiveLexicalOrder, FastMultiMap};
///
/// let mut presidents = FastMultiMap::with_order(CaseInsensitiveLexicalOrder::new());
/// presidents.insert("John".to_string(), "Adams");
/// presidents.insert("JOHN".to_string(), "Kennedy");
/// presidents.insert("Abraham".to_string(), "Lincoln");
///
/// assert_eq!(presidents.len(), 3);
/// assert_eq!(presidents.count(&"john".to_string()), 2);
/// let johns: Vec<&&str> = presidents.get_all(&"john".to_string()).collect();
/// assert_eq!(johns, vec![&"Adams", &"Kennedy"]);
/// ```
#[derive(Clone)]
pub struct FastMultiMap<K, V, O = HashOrder> {
    groups: FastMap<K, Vec<(K, V)>, O>,
    len: usize,
}

impl<K, V> FastMultiMap<K, V, HashOrder> {
    /// Empty multimap ordered by key hash.
    pub fn new() -> Self {
        Self::with_order(HashOrder)
    }
}

impl<K, V> Default for FastMultiMap<K, V, HashOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, O> FastMultiMap<K, V, O> {
    /// Empty multimap ordered by `order`.
    pub fn with_order(order: O) -> Self {
        Self {
            groups: FastMap::with_order(order),
            len: 0,
        }
    }

    /// The key order.
    pub fn order(&self) -> &O {
        self.groups.order()
    }

    /// Number of entries, counting every duplicate.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.groups.len()
    }

    /// Entries in ascending key order, duplicates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.groups.values().flat_map(|group| group.iter().map(|(k, v)| (k, v)))
    }

    /// Entries in descending key order, duplicates newest first.
    pub fn descending_iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.groups
            .descending_iter()
            .flat_map(|(_, group)| group.iter().rev().map(|(k, v)| (k, v)))
    }

    /// Oldest entry of the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.groups.first_key_value().and_then(|(_, group)| oldest(group))
    }

    /// Newest entry of the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.groups.last_key_value().and_then(|(_, group)| newest(group))
    }
}

fn oldest<K, V>(group: &[(K, V)]) -> Option<(&K, &V)> {
    group.first().map(|(k, v)| (k, v))
}

fn newest<K, V>(group: &[(K, V)]) -> Option<(&K, &V)> {
    group.last().map(|(k, v)| (k, v))
}

impl<K, V, O: Order<K>> FastMultiMap<K, V, O> {
    /// Oldest value stored under `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.groups.get(key).and_then(|group| oldest(group)).map(|(_, v)| v)
    }

    /// Every value stored under `key`, in insertion order.
    pub fn get_all<'a>(&'a self, key: &K) -> impl Iterator<Item = &'a V> + 'a {
        self.groups.get(key).into_iter().flat_map(|group| group.iter().map(|(_, v)| v))
    }

    /// How many entries `key` has.
    pub fn count(&self, key: &K) -> usize {
        self.groups.get(key).map_or(0, Vec::len)
    }

    /// Whether `key` has at least one entry.
    pub fn contains_key(&self, key: &K) -> bool {
        self.groups.contains_key(key)
    }

    /// Oldest entry of the smallest key greater than or equal to `key`.
    pub fn ceiling_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.groups.ceiling_key_value(key).and_then(|(_, group)| oldest(group))
    }

    /// Oldest entry of the smallest key strictly greater than `key`.
    pub fn higher_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.groups.higher_key_value(key).and_then(|(_, group)| oldest(group))
    }

    /// Newest entry of the largest key less than or equal to `key`.
    pub fn floor_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.groups.floor_key_value(key).and_then(|(_, group)| newest(group))
    }

    /// Newest entry of the largest key strictly less than `key`.
    pub fn lower_key_value(&self, key: &K) -> Option<(&K, &V)> {
        self.groups.lower_key_value(key).and_then(|(_, group)| newest(group))
    }
}

impl<K: Clone, V: Clone, O: Order<K>> FastMultiMap<K, V, O> {
    /// Multimap ordered by `order` holding the given entries.
    pub fn from_iter_with_order<I: IntoIterator<Item = (K, V)>>(order: O, iter: I) -> Self {
        let mut map = Self::with_order(order);
        map.extend(iter);
        map
    }

    /// Add an entry. Existing entries under an equal key are kept.
    pub fn insert(&mut self, key: K, value: V) {
        match self.groups.get_mut(&key) {
            Some(group) => group.push((key, value)),
            None => {
                self.groups.insert(key.clone(), vec![(key, value)]);
            }
        }
        self.len += 1;
    }

    /// Remove the oldest entry under `key`.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let group = self.groups.get_mut(key)?;
        let removed = (!group.is_empty()).then(|| group.remove(0));
        if group.is_empty() {
            self.groups.remove(key);
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Remove every entry under `key`, oldest first.
    pub fn remove_all(&mut self, key: &K) -> Vec<(K, V)> {
        let removed = self.groups.remove(key).unwrap_or_default();
        self.len -= removed.len();
        removed
    }

    /// Remove and return the oldest entry of the smallest key.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let key = self.groups.first_key()?.clone();
        self.remove(&key)
    }

    /// Remove and return the newest entry of the largest key.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let key = self.groups.last_key()?.clone();
        let group = self.groups.get_mut(&key)?;
        let popped = group.pop();
        if group.is_empty() {
            self.groups.remove(&key);
        }
        if popped.is_some() {
            self.len -= 1;
        }
        popped
    }

    /// Drop every entry, keeping the order.
    pub fn clear(&mut self) {
        self.groups.clear();
        self.len = 0;
    }

    /// Keep only the entries for which `keep` returns `true`.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let keys: Vec<K> = self.groups.keys().cloned().collect();
        for key in keys {
            if let Some(group) = self.groups.get_mut(&key) {
                let before = group.len();
                group.retain(|(k, v)| keep(k, v));
                self.len -= before - group.len();
                if group.is_empty() {
                    self.groups.remove(&key);
                }
            }
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, O> fmt::Debug for FastMultiMap<K, V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Clone, V: Clone, O: Order<K>> Extend<(K, V)> for FastMultiMap<K, V, O> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Clone, V: Clone, O: Order<K> + Default> FromIterator<(K, V)> for FastMultiMap<K, V, O> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_order(O::default());
        map.extend(iter);
        map
    }
}

/// Set allowing any number of equal elements.
///
/// Iteration visits every occurrence; navigation (`higher`, `lower`, ...)
/// treats equal elements as one position.
#[derive(Clone)]
pub struct FastMultiSet<T, O = HashOrder> {
    map: FastMultiMap<T, (), O>,
}

impl<T> FastMultiSet<T, HashOrder> {
    /// Empty multiset ordered by hash.
    pub fn new() -> Self {
        Self::with_order(HashOrder)
    }
}

impl<T> Default for FastMultiSet<T, HashOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> FastMultiSet<T, O> {
    /// Empty multiset ordered by `order`.
    pub fn with_order(order: O) -> Self {
        Self {
            map: FastMultiMap::with_order(order),
        }
    }

    /// The element order.
    pub fn order(&self) -> &O {
        self.map.order()
    }

    /// Number of elements, counting every occurrence.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether there are no elements.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Every occurrence in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.map.iter().map(|(k, _)| k)
    }

    /// Every occurrence in descending order.
    pub fn descending_iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.map.descending_iter().map(|(k, _)| k)
    }

    /// Smallest element, oldest occurrence.
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, _)| k)
    }

    /// Largest element, newest occurrence.
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, _)| k)
    }
}

impl<T, O: Order<T>> FastMultiSet<T, O> {
    /// How many occurrences of `value` are held.
    pub fn count(&self, value: &T) -> usize {
        self.map.count(value)
    }

    /// Whether at least one occurrence of `value` is held.
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Smallest element greater than or equal to `value`.
    pub fn ceiling(&self, value: &T) -> Option<&T> {
        self.map.ceiling_key_value(value).map(|(k, _)| k)
    }

    /// Smallest element strictly greater than `value`.
    pub fn higher(&self, value: &T) -> Option<&T> {
        self.map.higher_key_value(value).map(|(k, _)| k)
    }

    /// Largest element less than or equal to `value`.
    pub fn floor(&self, value: &T) -> Option<&T> {
        self.map.floor_key_value(value).map(|(k, _)| k)
    }

    /// Largest element strictly less than `value`.
    pub fn lower(&self, value: &T) -> Option<&T> {
        self.map.lower_key_value(value).map(|(k, _)| k)
    }
}

impl<T: Clone, O: Order<T>> FastMultiSet<T, O> {
    /// Multiset ordered by `order` holding the given elements.
    pub fn from_iter_with_order<I: IntoIterator<Item = T>>(order: O, iter: I) -> Self {
        let mut set = Self::with_order(order);
        set.extend(iter);
        set
    }

    /// Add one occurrence of `value`.
    pub fn insert(&mut self, value: T) {
        self.map.insert(value, ());
    }

    /// Remove the oldest occurrence of `value`.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove(value).is_some()
    }

    /// Remove and return the oldest occurrence of `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.map.remove(value).map(|(k, _)| k)
    }

    /// Remove every occurrence of `value`, returning how many went.
    pub fn remove_all(&mut self, value: &T) -> usize {
        self.map.remove_all(value).len()
    }

    /// Remove and return the oldest occurrence of the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, _)| k)
    }

    /// Remove and return the newest occurrence of the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, _)| k)
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Keep only the occurrences for which `keep` returns `true`.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        self.map.retain(|k, _| keep(k));
    }
}

impl<T: fmt::Debug, O> fmt::Debug for FastMultiSet<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone, O: Order<T>> Extend<T> for FastMultiSet<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Clone, O: Order<T> + Default> FromIterator<T> for FastMultiSet<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_order(O::default());
        set.extend(iter);
        set
    }
}

impl<T: Clone, O: Order<T>> Collection<T> for FastMultiSet<T, O> {
    fn len(&self) -> usize {
        FastMultiSet::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        FastMultiSet::contains(self, value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        self.insert(value);
        Ok(true)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        Ok(self.remove(value))
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let before = FastMultiSet::len(self);
        self.retain(|value| !pred(value));
        Ok(before - FastMultiSet::len(self))
    }

    fn clear(&mut self) -> Result<()> {
        FastMultiSet::clear(self);
        Ok(())
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        for value in self.iter() {
            if !f(value) {
                break;
            }
        }
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        for value in self.descending_iter() {
            if !f(value) {
                break;
            }
        }
    }
}

impl<T: Clone, O: Order<T>> NavigableSet<T> for FastMultiSet<T, O> {
    fn first(&self) -> Option<T> {
        FastMultiSet::first(self).cloned()
    }

    fn last(&self) -> Option<T> {
        FastMultiSet::last(self).cloned()
    }

    fn higher(&self, value: &T) -> Option<T> {
        FastMultiSet::higher(self, value).cloned()
    }

    fn lower(&self, value: &T) -> Option<T> {
        FastMultiSet::lower(self, value).cloned()
    }

    fn ceiling(&self, value: &T) -> Option<T> {
        FastMultiSet::ceiling(self, value).cloned()
    }

    fn floor(&self, value: &T) -> Option<T> {
        FastMultiSet::floor(self, value).cloned()
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.order().compare(left, right)
    }
}
