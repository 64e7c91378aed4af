//! Snapshot-publishing view with lock-free reads.

use crate::error::Result;
use crate::traits::{Collection, Direction, NavigableMap, NavigableSet, Table};
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Collection published as a sequence of immutable snapshots.
///
/// Readers load the current snapshot without locking and always observe one
/// complete state. A writer takes the writer mutex, clones the current
/// snapshot (cheap, the collections share structure), applies its change and
/// publishes the result. Clones of the handle share the snapshot pointer.
pub struct Atomic<C> {
    current: Arc<ArcSwap<C>>,
    writer: Arc<Mutex<()>>,
}

impl<C> Atomic<C> {
    /// Publish `inner` as the first snapshot.
    pub fn new(inner: C) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(inner)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// The current snapshot. Later writes do not affect it.
    pub fn snapshot(&self) -> Arc<C> {
        self.current.load_full()
    }

    /// Run `f` against the current snapshot.
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.current.load())
    }

    /// Whether both handles publish to the same pointer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.current, &other.current)
    }
}

impl<C: Clone> Atomic<C> {
    /// Apply `f` to a private copy of the current snapshot and publish it.
    ///
    /// Writers are serialized; the copy is published only when `f` succeeds.
    pub fn update<R>(&self, f: impl FnOnce(&mut C) -> Result<R>) -> Result<R> {
        let _guard = self.writer.lock();
        let mut next = C::clone(&self.current.load());
        let out = f(&mut next)?;
        self.current.store(Arc::new(next));
        Ok(out)
    }
}

impl<C> Clone for Atomic<C> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Atomic<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Atomic").field(&**self.current.load()).finish()
    }
}

impl<T, C: Collection<T> + Clone> Collection<T> for Atomic<C> {
    fn len(&self) -> usize {
        self.read(|c| c.len())
    }

    fn contains(&self, value: &T) -> bool {
        self.read(|c| c.contains(value))
    }

    fn add(&mut self, value: T) -> Result<bool> {
        self.update(|c| c.add(value))
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        self.update(|c| c.remove_value(value))
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        self.update(|c| c.remove_if(pred))
    }

    fn clear(&mut self) -> Result<()> {
        self.update(|c| c.clear())
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.read(|c| c.for_each_until(f))
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.read(|c| c.for_each_descending_until(f))
    }
}

impl<T, C: NavigableSet<T> + Clone> NavigableSet<T> for Atomic<C> {
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

impl<T, C: Table<T> + Clone> Table<T> for Atomic<C> {
    fn get(&self, index: usize) -> Result<T> {
        self.read(|c| c.get(index))
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        self.update(|c| c.set(index, value))
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        self.update(|c| c.insert(index, value))
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        self.update(|c| c.remove_at(index))
    }

    fn push_front(&mut self, value: T) -> Result<()> {
        self.update(|c| c.push_front(value))
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        self.update(|c| c.push_back(value))
    }

    fn pop_front(&mut self) -> Result<T> {
        self.update(|c| c.pop_front())
    }

    fn pop_back(&mut self) -> Result<T> {
        self.update(|c| c.pop_back())
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        self.read(|c| c.index_of(value))
    }

    fn last_index_of(&self, value: &T) -> Option<usize> {
        self.read(|c| c.last_index_of(value))
    }
}

impl<K, V, M: NavigableMap<K, V> + Clone> NavigableMap<K, V> for Atomic<M> {
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
        self.update(|m| m.put(key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        self.update(|m| m.remove(key))
    }

    fn clear(&mut self) -> Result<()> {
        self.update(|m| m.clear())
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
