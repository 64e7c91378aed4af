//! Sequence with amortized O(1) insertion and removal at any index.

use super::block::Block;
use crate::config::{Config, TableConfig};
use crate::error::{check_bounds, CollectionError, Result};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ops::Index;
use std::sync::Arc;

/// Indexed sequence built from nested circular blocks.
///
/// Elements occupy logical positions `0..len` of a root [block](super::block).
/// Pushing or popping at either end rotates the root in O(1). Inserting or
/// removing in the interior moves only the shorter side of the sequence, and
/// inside that side whole child blocks are rotated instead of copied, so the
/// cost is bounded by the block size rather than the table length.
///
/// Growth doubles the root until it reaches the maximum block size, then nests
/// the whole structure under a new outer level without copying any element.
/// Tables never shrink on their own; see [`shrink_to_fit`](Self::shrink_to_fit).
///
/// # Examples
///
/// ```rust
/// use radix_collections::FractalTable;
///
/// let mut table = FractalTable::new();
/// for value in 1..=3 {
///     table.insert(0, value)?;
/// }
/// assert_eq!(table.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
/// # Ok::<(), radix_collections::CollectionError>(())
/// ```
#[derive(Clone)]
pub struct FractalTable<T> {
    root: Arc<Block<T>>,
    len: usize,
    config: TableConfig,
}

impl<T> FractalTable<T> {
    /// Empty table with the default [`TableConfig`].
    pub fn new() -> Self {
        Self::empty(TableConfig::default())
    }

    /// Empty table with a validated configuration.
    pub fn with_config(config: TableConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::empty(config))
    }

    fn empty(config: TableConfig) -> Self {
        Self {
            root: Arc::new(Block::leaf(config.min_leaf_capacity, config.block_bits)),
            len: 0,
            config,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Elements the table holds before its next growth step. One position of
    /// the root is always kept free so head and tail never meet.
    pub fn capacity(&self) -> usize {
        self.root.capacity() - 1
    }

    /// Configuration the table was built with.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Number of nested block levels.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        self.root.get(index)
    }

    /// First element.
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    /// Last element.
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Elements from head to tail.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            table: self,
            front: 0,
            back: self.len,
        }
    }

    /// Index of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Index of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().rposition(|v| v == value)
    }

    /// Whether some element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// First index whose element fails `pred`, assuming the table is
    /// partitioned by it.
    pub fn partition_point<P: FnMut(&T) -> bool>(&self, mut pred: P) -> usize {
        let (mut low, mut high) = (0, self.len);
        while low < high {
            let mid = low + (high - low) / 2;
            match self.get(mid) {
                Some(value) if pred(value) => low = mid + 1,
                _ => high = mid,
            }
        }
        low
    }

    /// Binary search of a table sorted by `cmp`.
    pub fn index_of_sorted_by<F>(&self, mut cmp: F) -> std::result::Result<usize, usize>
    where
        F: FnMut(&T) -> Ordering,
    {
        let index = self.partition_point(|v| cmp(v) == Ordering::Less);
        match self.get(index) {
            Some(value) if cmp(value) == Ordering::Equal => Ok(index),
            _ => Err(index),
        }
    }

    /// Binary search of a sorted table.
    pub fn index_of_sorted(&self, value: &T) -> std::result::Result<usize, usize>
    where
        T: Ord,
    {
        self.index_of_sorted_by(|v| v.cmp(value))
    }
}

impl<T: Clone> FractalTable<T> {
    #[inline]
    fn root_mut(&mut self) -> &mut Block<T> {
        Arc::make_mut(&mut self.root)
    }

    /// Make room for one more element.
    fn reserve_one(&mut self) {
        let capacity = self.root.capacity();
        if self.len + 1 < capacity {
            return;
        }
        if self.root.is_full_width() {
            log::debug!(
                "fractal table nests root of capacity {} under a new level (len {})",
                capacity,
                self.len
            );
            self.root = Arc::new(Block::wrap(Arc::clone(&self.root)));
        } else {
            log::debug!("fractal table doubles root capacity {} -> {}", capacity, capacity * 2);
            self.root = Arc::new(self.root.widened(self.len));
        }
    }

    /// Mutable access to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        self.root_mut().get_mut(index)
    }

    /// Replace the element at `index`, returning the previous one.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let len = self.len;
        let slot = self
            .get_mut(index)
            .ok_or_else(|| CollectionError::out_of_bounds(index, len))?;
        Ok(mem::replace(slot, value))
    }

    /// Append at the tail.
    pub fn push_back(&mut self, value: T) {
        self.reserve_one();
        let len = self.len;
        self.root_mut().put(len, Some(value));
        self.len += 1;
    }

    /// Prepend at the head.
    pub fn push_front(&mut self, value: T) {
        self.reserve_one();
        let root = self.root_mut();
        root.rotate(1);
        root.put(0, Some(value));
        self.len += 1;
    }

    /// Remove the tail element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let len = self.len;
        self.root_mut().take(len)
    }

    /// Remove the head element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let root = self.root_mut();
        let value = root.take(0);
        root.rotate(-1);
        value
    }

    /// Insert `value` before `index`; `index == len` appends.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(CollectionError::out_of_bounds(index, self.len));
        }
        self.reserve_one();
        let len = self.len;
        let root = self.root_mut();
        if index < len - index {
            root.rotate(1);
            root.shift_left(1, index);
        } else {
            root.shift_right(index, len - index);
        }
        root.put(index, Some(value));
        self.len += 1;
        Ok(())
    }

    /// Remove and return the element at `index`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        check_bounds(index, self.len)?;
        let len = self.len;
        let root = self.root_mut();
        let value = root.take(index);
        if index < len - 1 - index {
            root.shift_right(0, index);
            root.rotate(-1);
        } else {
            root.shift_left(index + 1, len - 1 - index);
        }
        self.len -= 1;
        value.ok_or_else(|| CollectionError::illegal_state(format!("table position {} was vacant", index)))
    }

    /// Drop every element and return to a single minimal leaf.
    pub fn clear(&mut self) {
        let config = self.config;
        *self = Self::empty(config);
    }

    /// Re-lay the elements into the smallest structure able to hold them.
    pub fn shrink_to_fit(&mut self) {
        let before = self.root.capacity();
        let mut compact = Self::empty(self.config);
        while let Some(value) = self.pop_front() {
            compact.push_back(value);
        }
        log::debug!(
            "fractal table shrinks capacity {} -> {}",
            before,
            compact.root.capacity()
        );
        *self = compact;
    }

    /// Keep only the elements for which `keep` returns `true`, in order.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        let mut kept = Self::empty(self.config);
        while let Some(value) = self.pop_front() {
            if keep(&value) {
                kept.push_back(value);
            }
        }
        *self = kept;
    }

    /// Sort with a comparator, stable.
    pub fn sort_by<F: FnMut(&T, &T) -> Ordering>(&mut self, cmp: F) {
        let mut items: Vec<T> = Vec::with_capacity(self.len);
        while let Some(value) = self.pop_front() {
            items.push(value);
        }
        items.sort_by(cmp);
        self.extend(items);
    }

    /// Sort in ascending order, stable.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(Ord::cmp);
    }

    /// Insert into a sorted table after any equal elements; returns the index
    /// used.
    pub fn add_sorted(&mut self, value: T) -> Result<usize>
    where
        T: Ord,
    {
        let index = self.partition_point(|v| v <= &value);
        self.insert(index, value)?;
        Ok(index)
    }

    /// Remove one element equal to `value` from a sorted table.
    pub fn remove_sorted(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let index = self.index_of_sorted(value).ok()?;
        self.remove(index).ok()
    }
}

impl<T> Default for FractalTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for FractalTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for FractalTable<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for FractalTable<T> {}

impl<T> Index<usize> for FractalTable<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {} out of bounds for table of length {}", index, self.len),
        }
    }
}

impl<T: Clone> Extend<T> for FractalTable<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: Clone> FromIterator<T> for FractalTable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<T: Clone> From<Vec<T>> for FractalTable<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a FractalTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`FractalTable`].
pub struct Iter<'a, T> {
    table: &'a FractalTable<T>,
    front: usize,
    back: usize,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.table.get(self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.table.get(self.back)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> TableConfig {
        TableConfig {
            min_leaf_capacity: 2,
            block_bits: 2,
        }
    }

    fn to_vec<T: Clone>(table: &FractalTable<T>) -> Vec<T> {
        table.iter().cloned().collect()
    }

    #[test]
    fn test_head_insertion_reverses() {
        let mut table = FractalTable::new();
        for value in [1, 2, 3] {
            table.insert(0, value).unwrap();
        }
        assert_eq!(to_vec(&table), vec![3, 2, 1]);
    }

    #[test]
    fn test_push_pop_both_ends() {
        let mut table = FractalTable::with_config(tiny()).unwrap();
        for i in 0..50 {
            if i % 2 == 0 {
                table.push_back(i);
            } else {
                table.push_front(i);
            }
        }
        assert_eq!(table.len(), 50);
        assert_eq!(table.first(), Some(&49));
        assert_eq!(table.last(), Some(&48));
        assert_eq!(table.pop_front(), Some(49));
        assert_eq!(table.pop_back(), Some(48));
        assert_eq!(table.len(), 48);
    }

    #[test]
    fn test_interior_edits_match_vec() {
        let mut table = FractalTable::with_config(tiny()).unwrap();
        let mut model = Vec::new();
        for i in 0..200usize {
            let index = (i * 7919) % (model.len() + 1);
            table.insert(index, i).unwrap();
            model.insert(index, i);
        }
        assert_eq!(to_vec(&table), model);
        for i in 0..150usize {
            let index = (i * 104_729) % model.len();
            assert_eq!(table.remove(index).unwrap(), model.remove(index));
        }
        assert_eq!(to_vec(&table), model);
    }

    #[test]
    fn test_growth_keeps_capacity_invariant() {
        let mut table = FractalTable::with_config(tiny()).unwrap();
        assert_eq!(table.capacity(), 1);
        for i in 0..100 {
            table.push_back(i);
            assert!(table.len() <= table.capacity());
        }
        assert!(table.depth() >= 3);
        assert_eq!(table[99], 99);
    }

    #[test]
    fn test_errors() {
        let mut table: FractalTable<i32> = FractalTable::new();
        assert!(matches!(table.insert(1, 0), Err(CollectionError::OutOfBounds { index: 1, size: 0 })));
        assert!(matches!(table.remove(0), Err(CollectionError::OutOfBounds { .. })));
        assert!(table.set(0, 1).is_err());
        assert_eq!(table.pop_front(), None);
        assert!(FractalTable::<i32>::with_config(TableConfig {
            min_leaf_capacity: 3,
            block_bits: 4
        })
        .is_err());
    }

    #[test]
    fn test_clone_is_isolated() {
        let mut table: FractalTable<i32> = (0..40).collect();
        let snapshot = table.clone();
        table.insert(20, -1).unwrap();
        table.set(0, 100).unwrap();
        table.pop_back();
        assert_eq!(to_vec(&snapshot), (0..40).collect::<Vec<_>>());
        assert_eq!(table[0], 100);
        assert_eq!(table[20], -1);
    }

    #[test]
    fn test_sorted_helpers() {
        let mut table = FractalTable::new();
        for value in [5, 1, 4, 1, 3] {
            table.add_sorted(value).unwrap();
        }
        assert_eq!(to_vec(&table), vec![1, 1, 3, 4, 5]);
        assert_eq!(table.index_of_sorted(&4), Ok(3));
        assert_eq!(table.index_of_sorted(&2), Err(2));
        assert_eq!(table.remove_sorted(&1), Some(1));
        assert_eq!(table.remove_sorted(&9), None);

        let mut unsorted: FractalTable<i32> = vec![3, -1, 2].into();
        unsorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(to_vec(&unsorted), vec![3, 2, -1]);
    }

    #[test]
    fn test_search_and_shrink() {
        let mut table: FractalTable<i32> = FractalTable::with_config(tiny()).unwrap();
        table.extend([7, 8, 7, 9]);
        assert_eq!(table.index_of(&7), Some(0));
        assert_eq!(table.last_index_of(&7), Some(2));
        assert!(!table.contains(&1));

        table.extend(0..60);
        let grown = table.capacity();
        table.retain(|v| *v > 50);
        assert!(table.capacity() < grown);
        table.shrink_to_fit();
        assert_eq!(to_vec(&table), (51..60).collect::<Vec<_>>());

        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.capacity(), 1);
    }

    #[test]
    fn test_iter_both_ends() {
        let table: FractalTable<i32> = (0..10).collect();
        let mut iter = table.iter();
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&9));
        assert_eq!(iter.len(), 8);
        assert_eq!(table.iter().rev().take(2).copied().collect::<Vec<_>>(), vec![9, 8]);
    }
}
