//! Order-reversing view.

use crate::error::{CollectionError, Result};
use crate::traits::{Collection, Direction, NavigableMap, NavigableSet, Table};
use std::cmp::Ordering;

/// View iterating its collection backwards: tables by index, sets and maps
/// by their order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversed<C> {
    inner: C,
}

impl<C> Reversed<C> {
    /// Reverse `inner`.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The collection in its own order.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<T, C: Collection<T>> Collection<T> for Reversed<C> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        self.inner.add(value)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        self.inner.remove_value(value)
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        self.inner.remove_if(pred)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.inner.for_each_descending_until(f)
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.inner.for_each_until(f)
    }
}

impl<T, C: NavigableSet<T>> NavigableSet<T> for Reversed<C> {
    fn first(&self) -> Option<T> {
        self.inner.last()
    }

    fn last(&self) -> Option<T> {
        self.inner.first()
    }

    fn higher(&self, value: &T) -> Option<T> {
        self.inner.lower(value)
    }

    fn lower(&self, value: &T) -> Option<T> {
        self.inner.higher(value)
    }

    fn ceiling(&self, value: &T) -> Option<T> {
        self.inner.floor(value)
    }

    fn floor(&self, value: &T) -> Option<T> {
        self.inner.ceiling(value)
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(right, left)
    }
}

impl<C> Reversed<C> {
    fn mirror<T>(&self, index: usize) -> Result<usize>
    where
        C: Table<T>,
    {
        let len = self.inner.len();
        if index >= len {
            return Err(CollectionError::out_of_bounds(index, len));
        }
        Ok(len - 1 - index)
    }
}

impl<T, C: Table<T>> Table<T> for Reversed<C> {
    fn get(&self, index: usize) -> Result<T> {
        self.inner.get(self.mirror(index)?)
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        let index = self.mirror(index)?;
        self.inner.set(index, value)
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.inner.len();
        if index > len {
            return Err(CollectionError::out_of_bounds(index, len));
        }
        self.inner.insert(len - index, value)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        let index = self.mirror(index)?;
        self.inner.remove_at(index)
    }

    fn push_front(&mut self, value: T) -> Result<()> {
        self.inner.push_back(value)
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        self.inner.push_front(value)
    }

    fn pop_front(&mut self) -> Result<T> {
        self.inner.pop_back()
    }

    fn pop_back(&mut self) -> Result<T> {
        self.inner.pop_front()
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        let last = self.inner.last_index_of(value)?;
        Some(self.inner.len() - 1 - last)
    }

    fn last_index_of(&self, value: &T) -> Option<usize> {
        let first = self.inner.index_of(value)?;
        Some(self.inner.len() - 1 - first)
    }
}

impl<K, V, M: NavigableMap<K, V>> NavigableMap<K, V> for Reversed<M> {
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
        self.inner.put(key, value)
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        self.inner.remove(key)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn first_entry(&self) -> Option<(K, V)> {
        self.inner.last_entry()
    }

    fn last_entry(&self) -> Option<(K, V)> {
        self.inner.first_entry()
    }

    fn higher_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.lower_entry(key)
    }

    fn lower_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.higher_entry(key)
    }

    fn ceiling_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.floor_entry(key)
    }

    fn floor_entry(&self, key: &K) -> Option<(K, V)> {
        self.inner.ceiling_entry(key)
    }

    fn for_each_entry(&self, direction: Direction, from: Option<&K>, f: &mut dyn FnMut(&K, &V) -> bool) {
        self.inner.for_each_entry(direction.reverse(), from, f)
    }

    fn compare_keys(&self, left: &K, right: &K) -> Ordering {
        self.inner.compare_keys(right, left)
    }
}
