//! Lock-guarded view shared between threads.

use crate::error::Result;
use crate::traits::{Collection, Direction, NavigableMap, NavigableSet, Table};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Collection behind a reader/writer lock.
///
/// Reads take the read lock, mutators the write lock, each for the duration
/// of one call. Clones of the handle, and the windows produced by `split`,
/// share the same lock, so concurrent writers through any of them are
/// serialized.
///
/// # Examples
///
/// ```rust
/// use radix_collections::traits::Table;
/// use radix_collections::view::Shared;
/// use radix_collections::FractalTable;
///
/// let table = Shared::new(FractalTable::<u32>::new());
/// let writer = table.clone();
/// std::thread::spawn(move || {
///     let mut writer = writer;
///     writer.push_back(7).unwrap();
/// })
/// .join()
/// .unwrap();
/// assert_eq!(table.get(0).unwrap(), 7);
/// ```
pub struct Shared<C> {
    inner: Arc<RwLock<C>>,
}

impl<C> Shared<C> {
    /// Put `inner` behind a fresh lock.
    pub fn new(inner: C) -> Self {
        Self {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Run `f` under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run `f` under the write lock.
    ///
    /// Use this to make several operations atomic with respect to other
    /// handles.
    pub fn write<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut self.inner.write())
    }

    /// Whether both handles guard the same collection.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<C: Clone> Shared<C> {
    /// Clone of the current contents.
    pub fn snapshot(&self) -> C {
        self.inner.read().clone()
    }
}

impl<C> Clone for Shared<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Shared<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Shared").field(&*self.inner.read()).finish()
    }
}

impl<T, C: Collection<T>> Collection<T> for Shared<C> {
    fn len(&self) -> usize {
        self.read(|c| c.len())
    }

    fn contains(&self, value: &T) -> bool {
        self.read(|c| c.contains(value))
    }

    fn add(&mut self, value: T) -> Result<bool> {
        self.write(|c| c.add(value))
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        self.write(|c| c.remove_value(value))
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        self.write(|c| c.remove_if(pred))
    }

    fn clear(&mut self) -> Result<()> {
        self.write(|c| c.clear())
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.read(|c| c.for_each_until(f))
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.read(|c| c.for_each_descending_until(f))
    }
}

impl<T, C: NavigableSet<T>> NavigableSet<T> for Shared<C> {
    fn first(&self) -> Option<T> {
        self.read(|c| c.first())
    }

    fn last(&self) -> Option<T> {
        self.read(|c| c.last())
    }

    fn higher(&self, value: &T) -> Option<T> {
        self.read(|c| c.higher(value))
    }

    fn lower(&self, value: &T) -> Option<T> {
        self.read(|c| c.lower(value))
    }

    fn ceiling(&self, value: &T) -> Option<T> {
        self.read(|c| c.ceiling(value))
    }

    fn floor(&self, value: &T) -> Option<T> {
        self.read(|c| c.floor(value))
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.read(|c| c.compare(left, right))
    }
}

impl<T, C: Table<T>> Table<T> for Shared<C> {
    fn get(&self, index: usize) -> Result<T> {
        self.read(|c| c.get(index))
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.write(|c| c.set(index, value))
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.write(|c| c.insert(index, value))
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        self.write(|c| c.remove_at(index))
    }

    fn push_front(&mut self, value: T) -> Result<()> {
        self.write(|c| c.push_front(value))
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        self.write(|c| c.push_back(value))
    }

    fn pop_front(&mut self) -> Result<T> {
        self.write(|c| c.pop_front())
    }

    fn pop_back(&mut self) -> Result<T> {
        self.write(|c| c.pop_back())
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        self.read(|c| c.index_of(value))
    }

    fn last_index_of(&self, value: &T) -> Option<usize> {
        self.read(|c| c.last_index_of(value))
    }
}

impl<K, V, M: NavigableMap<K, V>> NavigableMap<K, V> for Shared<M> {
    fn len(&self) -> usize {
        self.read(|m| m.len())
    }

    fn get(&self, key: &K) -> Option<V> {
        self.read(|m| m.get(key))
    }

    fn contains_key(&self, key: &K) -> bool {
        self.read(|m| m.contains_key(key))
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        self.write(|m| m.put(key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        self.write(|m| m.remove(key))
    }

    fn clear(&mut self) -> Result<()> {
        self.write(|m| m.clear())
    }

    fn first_entry(&self) -> Option<(K, V)> {
        self.read(|m| m.first_entry())
    }

    fn last_entry(&self) -> Option<(K, V)> {
        self.read(|m| m.last_entry())
    }

    fn higher_entry(&self, key: &K) -> Option<(K, V)> {
        self.read(|m| m.higher_entry(key))
    }

    fn lower_entry(&self, key: &K) -> Option<(K, V)> {
        self.read(|m| m.lower_entry(key))
    }

    fn ceiling_entry(&self, key: &K) -> Option<(K, V)> {
        self.read(|m| m.ceiling_entry(key))
    }

    fn floor_entry(&self, key: &K) -> Option<(K, V)> {
        self.read(|m| m.floor_entry(key))
    }

    fn for_each_entry(&self, direction: Direction, from: Option<&K>, f: &mut dyn FnMut(&K, &V) -> bool) {
        self.read(|m| m.for_each_entry(direction, from, f))
    }

    fn compare_keys(&self, left: &K, right: &K) -> Ordering {
        self.read(|m| m.compare_keys(left, right))
    }
}
