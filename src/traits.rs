//! Common surface shared by the base collections and every view.
//!
//! The traits here are what lets a view wrap any collection: a [`Shared`]
//! table is still a [`Table`], a [`Reversed`] set is still a
//! [`NavigableSet`]. Reads hand out owned clones so that a lock guard or a
//! snapshot never escapes a call; mutators return [`Result`] because a view
//! may refuse them.
//!
//! [`Shared`]: crate::view::Shared
//! [`Reversed`]: crate::view::Reversed

use crate::error::{CollectionError, Result};
use crate::map::{FastMap, FastSet};
use crate::order::Order;
use crate::table::FractalTable;
use crate::view::{SubMap, SubSet, SubTable};
use std::cmp::Ordering;
use std::ops::Bound;

/// Traversal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

impl Direction {
    /// The opposite direction.
    #[inline]
    pub fn reverse(self) -> Self {
        match self {
            Direction::Ascending => Direction::Descending,
            Direction::Descending => Direction::Ascending,
        }
    }
}

/// A group of elements.
pub trait Collection<T> {
    /// Number of elements.
    fn len(&self) -> usize;

    /// Whether there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether an element equal to `value` is present.
    fn contains(&self, value: &T) -> bool;

    /// Add `value`; `Ok(false)` when the collection did not change.
    fn add(&mut self, value: T) -> Result<bool>;

    /// Remove one element equal to `value`; `Ok(false)` when none was found.
    fn remove_value(&mut self, value: &T) -> Result<bool>;

    /// Remove every element matching `pred`, returning how many went.
    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize>;

    /// Remove every element.
    fn clear(&mut self) -> Result<()>;

    /// Visit elements in iteration order until `f` returns `false`.
    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool);

    /// Visit elements in reverse iteration order until `f` returns `false`.
    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool);

    /// Owned copy of the elements in iteration order.
    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.for_each_until(&mut |value| {
            out.push(value.clone());
            true
        });
        out
    }
}

/// A sorted set with navigation.
pub trait NavigableSet<T>: Collection<T> {
    /// Smallest element.
    fn first(&self) -> Option<T>;

    /// Largest element.
    fn last(&self) -> Option<T>;

    /// Smallest element strictly greater than `value`.
    fn higher(&self, value: &T) -> Option<T>;

    /// Largest element strictly less than `value`.
    fn lower(&self, value: &T) -> Option<T>;

    /// Smallest element greater than or equal to `value`.
    fn ceiling(&self, value: &T) -> Option<T>;

    /// Largest element less than or equal to `value`.
    fn floor(&self, value: &T) -> Option<T>;

    /// The order the set iterates in.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Cut the value space into at most `parts` adjacent ranges holding a
    /// near-equal number of elements.
    ///
    /// The ranges are disjoint and together cover every possible element.
    fn split(&self, parts: usize) -> Result<Vec<SubSet<Self, T>>>
    where
        Self: Sized + Clone,
        T: Clone,
    {
        let parts = part_count(parts, self.len())?;
        let cuts = cut_points(self.len(), parts, |visit| self.for_each_until(visit));
        ranges(cuts)
            .into_iter()
            .map(|(low, high)| SubSet::new(self.clone(), low, high))
            .collect()
    }
}

/// An indexed sequence.
pub trait Table<T>: Collection<T> {
    /// Element at `index`.
    fn get(&self, index: usize) -> Result<T>;

    /// Replace the element at `index`, returning the old one.
    fn set(&mut self, index: usize, value: T) -> Result<T>;

    /// Insert `value` so that it ends up at `index`.
    fn insert(&mut self, index: usize, value: T) -> Result<()>;

    /// Remove and return the element at `index`.
    fn remove_at(&mut self, index: usize) -> Result<T>;

    /// Prepend `value`.
    fn push_front(&mut self, value: T) -> Result<()> {
        self.insert(0, value)
    }

    /// Append `value`.
    fn push_back(&mut self, value: T) -> Result<()> {
        let len = self.len();
        self.insert(len, value)
    }

    /// Remove and return the first element.
    fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(CollectionError::no_such_element("pop_front on an empty table"));
        }
        self.remove_at(0)
    }

    /// Remove and return the last element.
    fn pop_back(&mut self) -> Result<T> {
        match self.len() {
            0 => Err(CollectionError::no_such_element("pop_back on an empty table")),
            len => self.remove_at(len - 1),
        }
    }

    /// Position of the first element equal to `value`.
    fn index_of(&self, value: &T) -> Option<usize>;

    /// Position of the last element equal to `value`.
    fn last_index_of(&self, value: &T) -> Option<usize>;

    /// Cut the table into at most `parts` adjacent windows of near-equal length.
    ///
    /// Every window holds its own clone of this handle; for a shared or
    /// atomic handle the windows therefore see each other's writes. An insert
    /// or removal through one window leaves the windows after it stale (see
    /// [`SubTable`]).
    fn split(&self, parts: usize) -> Result<Vec<SubTable<Self>>>
    where
        Self: Sized + Clone,
    {
        let len = self.len();
        let parts = part_count(parts, len)?;
        (0..parts)
            .map(|i| SubTable::new(self.clone(), i * len / parts, (i + 1) * len / parts))
            .collect()
    }
}

/// A sorted map with navigation.
pub trait NavigableMap<K, V> {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Whether there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value stored under `key`.
    fn get(&self, key: &K) -> Option<V>;

    /// Whether `key` is present.
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Store `value` under `key`, returning the previous value.
    fn put(&mut self, key: K, value: V) -> Result<Option<V>>;

    /// Remove `key`, returning its value.
    fn remove(&mut self, key: &K) -> Result<Option<V>>;

    /// Remove every entry.
    fn clear(&mut self) -> Result<()>;

    /// Entry with the smallest key.
    fn first_entry(&self) -> Option<(K, V)>;

    /// Entry with the largest key.
    fn last_entry(&self) -> Option<(K, V)>;

    /// Entry with the smallest key strictly greater than `key`.
    fn higher_entry(&self, key: &K) -> Option<(K, V)>;

    /// Entry with the largest key strictly less than `key`.
    fn lower_entry(&self, key: &K) -> Option<(K, V)>;

    /// Entry with the smallest key greater than or equal to `key`.
    fn ceiling_entry(&self, key: &K) -> Option<(K, V)>;

    /// Entry with the largest key less than or equal to `key`.
    fn floor_entry(&self, key: &K) -> Option<(K, V)>;

    /// Visit entries in `direction` until `f` returns `false`.
    ///
    /// With `from`, traversal starts at the first key not before `from` in
    /// that direction (inclusive).
    fn for_each_entry(&self, direction: Direction, from: Option<&K>, f: &mut dyn FnMut(&K, &V) -> bool);

    /// The order keys iterate in.
    fn compare_keys(&self, left: &K, right: &K) -> Ordering;

    /// Owned copy of the entries in ascending order.
    fn entries(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        let mut out = Vec::with_capacity(self.len());
        self.for_each_entry(Direction::Ascending, None, &mut |k, v| {
            out.push((k.clone(), v.clone()));
            true
        });
        out
    }

    /// Cut the key space into at most `parts` adjacent ranges holding a
    /// near-equal number of entries.
    ///
    /// The ranges are disjoint and together cover every possible key.
    fn split(&self, parts: usize) -> Result<Vec<SubMap<Self, K>>>
    where
        Self: Sized + Clone,
        K: Clone,
    {
        let parts = part_count(parts, self.len())?;
        let cuts = cut_points(self.len(), parts, |visit| {
            self.for_each_entry(Direction::Ascending, None, &mut |key, _| visit(key))
        });
        ranges(cuts)
            .into_iter()
            .map(|(low, high)| SubMap::new(self.clone(), low, high))
            .collect()
    }
}

/// Number of parts a split of `len` elements into `requested` parts yields.
pub(crate) fn part_count(requested: usize, len: usize) -> Result<usize> {
    if requested == 0 {
        return Err(CollectionError::invalid_argument("split into zero parts"));
    }
    Ok(requested.min(len.max(1)))
}

/// Elements at which `len` ascending elements divide into `parts` runs of
/// near-equal length; `walk` feeds them in ascending order until told to stop.
pub(crate) fn cut_points<T: Clone>(
    len: usize,
    parts: usize,
    walk: impl FnOnce(&mut dyn FnMut(&T) -> bool),
) -> Vec<T> {
    let mut cuts = Vec::with_capacity(parts.saturating_sub(1));
    let mut position = 0;
    let mut cut = 1;
    walk(&mut |value| {
        if cut < parts && position == len * cut / parts {
            cuts.push(value.clone());
            cut += 1;
        }
        position += 1;
        cut < parts
    });
    cuts
}

/// Adjacent ranges split at `cuts`, together covering every value.
pub(crate) fn ranges<T: Clone>(cuts: Vec<T>) -> Vec<(Bound<T>, Bound<T>)> {
    let mut out = Vec::with_capacity(cuts.len() + 1);
    let mut low = Bound::Unbounded;
    for cut in cuts {
        out.push((low, Bound::Excluded(cut.clone())));
        low = Bound::Included(cut);
    }
    out.push((low, Bound::Unbounded));
    out
}

impl<T: Clone, O: Order<T>> Collection<T> for FastSet<T, O> {
    fn len(&self) -> usize {
        FastSet::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        FastSet::contains(self, value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        Ok(self.insert(value))
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        Ok(self.remove(value))
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let before = FastSet::len(self);
        self.retain(|value| !pred(value));
        Ok(before - FastSet::len(self))
    }

    fn clear(&mut self) -> Result<()> {
        FastSet::clear(self);
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

impl<T: Clone, O: Order<T>> NavigableSet<T> for FastSet<T, O> {
    fn first(&self) -> Option<T> {
        FastSet::first(self).cloned()
    }

    fn last(&self) -> Option<T> {
        FastSet::last(self).cloned()
    }

    fn higher(&self, value: &T) -> Option<T> {
        FastSet::higher(self, value).cloned()
    }

    fn lower(&self, value: &T) -> Option<T> {
        FastSet::lower(self, value).cloned()
    }

    fn ceiling(&self, value: &T) -> Option<T> {
        FastSet::ceiling(self, value).cloned()
    }

    fn floor(&self, value: &T) -> Option<T> {
        FastSet::floor(self, value).cloned()
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.order().compare(left, right)
    }
}

impl<T: Clone + PartialEq> Collection<T> for FractalTable<T> {
    fn len(&self) -> usize {
        FractalTable::len(self)
    }

    fn contains(&self, value: &T) -> bool {
        FractalTable::contains(self, value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        FractalTable::push_back(self, value);
        Ok(true)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        match FractalTable::index_of(self, value) {
            Some(index) => FractalTable::remove(self, index).map(|_| true),
            None => Ok(false),
        }
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let before = FractalTable::len(self);
        self.retain(|value| !pred(value));
        Ok(before - FractalTable::len(self))
    }

    fn clear(&mut self) -> Result<()> {
        FractalTable::clear(self);
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
        for value in self.iter().rev() {
            if !f(value) {
                break;
            }
        }
    }
}

impl<T: Clone + PartialEq> Table<T> for FractalTable<T> {
    fn get(&self, index: usize) -> Result<T> {
        FractalTable::get(self, index)
            .cloned()
            .ok_or_else(|| CollectionError::out_of_bounds(index, FractalTable::len(self)))
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        FractalTable::set(self, index, value)
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        FractalTable::insert(self, index, value)
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        FractalTable::remove(self, index)
    }

    fn push_front(&mut self, value: T) -> Result<()> {
        FractalTable::push_front(self, value);
        Ok(())
    }

    fn push_back(&mut self, value: T) -> Result<()> {
        FractalTable::push_back(self, value);
        Ok(())
    }

    fn pop_front(&mut self) -> Result<T> {
        FractalTable::pop_front(self)
            .ok_or_else(|| CollectionError::no_such_element("pop_front on an empty table"))
    }

    fn pop_back(&mut self) -> Result<T> {
        FractalTable::pop_back(self)
            .ok_or_else(|| CollectionError::no_such_element("pop_back on an empty table"))
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        FractalTable::index_of(self, value)
    }

    fn last_index_of(&self, value: &T) -> Option<usize> {
        FractalTable::last_index_of(self, value)
    }
}

impl<K: Clone, V: Clone, O: Order<K>> NavigableMap<K, V> for FastMap<K, V, O> {
    fn len(&self) -> usize {
        FastMap::len(self)
    }

    fn get(&self, key: &K) -> Option<V> {
        FastMap::get(self, key).cloned()
    }

    fn contains_key(&self, key: &K) -> bool {
        FastMap::contains_key(self, key)
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.insert(key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(FastMap::remove(self, key))
    }

    fn clear(&mut self) -> Result<()> {
        FastMap::clear(self);
        Ok(())
    }

    fn first_entry(&self) -> Option<(K, V)> {
        owned(self.first_key_value())
    }

    fn last_entry(&self) -> Option<(K, V)> {
        owned(self.last_key_value())
    }

    fn higher_entry(&self, key: &K) -> Option<(K, V)> {
        owned(self.higher_key_value(key))
    }

    fn lower_entry(&self, key: &K) -> Option<(K, V)> {
        owned(self.lower_key_value(key))
    }

    fn ceiling_entry(&self, key: &K) -> Option<(K, V)> {
        owned(self.ceiling_key_value(key))
    }

    fn floor_entry(&self, key: &K) -> Option<(K, V)> {
        owned(self.floor_key_value(key))
    }

    fn for_each_entry(&self, direction: Direction, from: Option<&K>, f: &mut dyn FnMut(&K, &V) -> bool) {
        let iter = match (direction, from) {
            (Direction::Ascending, None) => self.iter(),
            (Direction::Descending, None) => self.descending_iter(),
            (Direction::Ascending, Some(key)) => self.iter_from(key, true),
            (Direction::Descending, Some(key)) => self.descending_iter_from(key, true),
        };
        for (k, v) in iter {
            if !f(k, v) {
                break;
            }
        }
    }

    fn compare_keys(&self, left: &K, right: &K) -> Ordering {
        self.order().compare(left, right)
    }
}

#[inline]
fn owned<K: Clone, V: Clone>(entry: Option<(&K, &V)>) -> Option<(K, V)> {
    entry.map(|(k, v)| (k.clone(), v.clone()))
}
