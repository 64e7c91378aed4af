//! Read-only view.

use crate::error::{CollectionError, Result};
use crate::traits::{Collection, Direction, NavigableMap, NavigableSet, Table};
use std::cmp::Ordering;

/// Read-only wrapper: reads delegate, every mutator fails with
/// [`CollectionError::UnsupportedOperation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unmodifiable<C> {
    inner: C,
}

impl<C> Unmodifiable<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The wrapped collection.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwrap, giving write access back.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

#[inline]
fn rejected<R>(operation: &str) -> Result<R> {
    Err(CollectionError::unsupported(format!("{operation} on an unmodifiable view")))
}

impl<T, C: Collection<T>> Collection<T> for Unmodifiable<C> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    fn add(&mut self, _value: T) -> Result<bool> {
        rejected("add")
    }

    fn remove_value(&mut self, _value: &T) -> Result<bool> {
        rejected("remove")
    }

    fn remove_if(&mut self, _pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        rejected("remove_if")
    }

    fn clear(&mut self) -> Result<()> {
        rejected("clear")
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.inner.for_each_until(f)
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.inner.for_each_descending_until(f)
    }
}

impl<T, C: NavigableSet<T>> NavigableSet<T> for Unmodifiable<C> {
    fn first(&self) -> Option<T> {
        self.inner.first()
    }

    fn last(&self) -> Option<T> {
        self.inner.last()
    }

    fn higher(&self, value: &T) -> Option<T> {
        self.inner.higher(value)
    }

    fn lower(&self, value: &T) -> Option<T> {
        self.inner.lower(value)
    }

    fn ceiling(&self, value: &T) -> Option<T> {
        self.inner.ceiling(value)
    }

    fn floor(&self, value: &T) -> Option<T> {
        self.inner.floor(value)
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(left, right)
    }
}

impl<T, C: Table<T>> Table<T> for Unmodifiable<C> {
    fn get(&self, index: usize) -> Result<T> {
        self.inner.get(index)
    }

    fn set(&mut self, _index: usize, _value: T) -> Result<T> {
        rejected("set")
    }

    fn insert(&mut self, _index: usize, _value: T) -> Result<()> {
        rejected("insert")
    }

    fn remove_at(&mut self, _index: usize) -> Result<T> {
        rejected("remove_at")
    }

    fn pop_front(&mut self) -> Result<T> {
        rejected("pop_front")
    }

    fn pop_back(&mut self) -> Result<T> {
        rejected("pop_back")
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        self.inner.index_of(value)
    }

    fn last_index_of(&self, value: &T) -> Option<usize> {
        self.inner.last_index_of(value)
    }
}

impl<K, V, M: NavigableMap<K, V>> NavigableMap<K, V> for Unmodifiable<M> {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.inner.contains_key(key)
    }

    fn put(&mut self, _key: K, _value: V) -> Result<Option<V>> {
        rejected("put")
    }

    fn remove(&mut self, _key: &K) -> Result<Option<V>> {
        rejected("remove")
    }

    fn clear(&mut self) -> Result<()> {
        rejected("clear")
    }

    fn first_entry(&self) -> Option<(K, V)> {
        self.inner.first_entry()
    }

    fn last_entry(&self) -> Option<(K, V)> {
        self.inner.last_entry()
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

    fn for_each_entry(&self, direction: Direction, from: Option<&K>, f: &mut dyn FnMut(&K, &V) -> bool) {
        self.inner.for_each_entry(direction, from, f)
    }

    fn compare_keys(&self, left: &K, right: &K) -> Ordering {
        self.inner.compare_keys(left, right)
    }
}
