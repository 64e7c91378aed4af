//! Persistent sparse array over the full unsigned 32-bit index space.
//!
//! [`SparseArray`] maps `u32` indices to values with a 16-way radix trie.
//! A single occupant is stored inline without any node; a level is added only
//! where two indices collide, and removed again as soon as one of them goes.
//! Nodes are shared between clones and copied on write, so cloning is `O(1)`
//! and a mutation copies at most one root-to-leaf path.
//!
//! Index order is unsigned: `0x8000_0000` sorts after `0x7fff_ffff`.

use std::fmt;
use std::iter::FusedIterator;

mod trie;

use trie::Slot;

/// Sparse array of `E` indexed by `u32`.
#[derive(Clone)]
pub struct SparseArray<E> {
    root: Slot<E>,
    len: usize,
}

impl<E> Default for SparseArray<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> SparseArray<E> {
    /// Empty array.
    pub const fn new() -> Self {
        Self {
            root: Slot::Vacant,
            len: 0,
        }
    }

    /// Number of occupied indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no index is occupied.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value at `index`, if any.
    #[inline]
    pub fn get(&self, index: u32) -> Option<&E> {
        trie::get(&self.root, index)
    }

    /// Whether `index` is occupied.
    #[inline]
    pub fn contains(&self, index: u32) -> bool {
        self.get(index).is_some()
    }

    /// Smallest occupied index strictly greater than `after`.
    pub fn next(&self, after: u32) -> Option<u32> {
        after
            .checked_add(1)
            .and_then(|from| self.ceiling_entry(from))
            .map(|(index, _)| index)
    }

    /// Largest occupied index strictly smaller than `before`.
    pub fn previous(&self, before: u32) -> Option<u32> {
        before
            .checked_sub(1)
            .and_then(|from| self.floor_entry(from))
            .map(|(index, _)| index)
    }

    /// Smallest occupied index greater than or equal to `from`, with its value.
    #[inline]
    pub fn ceiling_entry(&self, from: u32) -> Option<(u32, &E)> {
        trie::ceiling(&self.root, from)
    }

    /// Largest occupied index smaller than or equal to `from`, with its value.
    #[inline]
    pub fn floor_entry(&self, from: u32) -> Option<(u32, &E)> {
        trie::floor(&self.root, from)
    }

    /// Entry at the smallest occupied index.
    pub fn first(&self) -> Option<(u32, &E)> {
        self.ceiling_entry(0)
    }

    /// Entry at the largest occupied index.
    pub fn last(&self) -> Option<(u32, &E)> {
        self.floor_entry(u32::MAX)
    }

    /// Smallest occupied index.
    pub fn first_index(&self) -> Option<u32> {
        self.first().map(|(index, _)| index)
    }

    /// Largest occupied index.
    pub fn last_index(&self) -> Option<u32> {
        self.last().map(|(index, _)| index)
    }

    /// Ascending iterator over `(index, value)`; also iterates backwards.
    pub fn iter(&self) -> Iter<'_, E> {
        Iter {
            array: self,
            front: 0,
            back: u32::MAX,
            remaining: self.len,
        }
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.root = Slot::Vacant;
        self.len = 0;
    }

    /// Number of trie levels on the deepest path; `0` when no node exists.
    pub fn depth(&self) -> usize {
        trie::depth(&self.root)
    }
}

impl<E: Clone> SparseArray<E> {
    /// Store `value` at `index`, returning the value it replaced.
    pub fn insert(&mut self, index: u32, value: E) -> Option<E> {
        let previous = trie::insert(&mut self.root, index, value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Clear `index`, returning the value it held.
    pub fn remove(&mut self, index: u32) -> Option<E> {
        // Absent indices must not unshare nodes.
        if !self.contains(index) {
            return None;
        }
        let removed = trie::remove(&mut self.root, index);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Mutable access to the value at `index`.
    pub fn get_mut(&mut self, index: u32) -> Option<&mut E> {
        if !self.contains(index) {
            return None;
        }
        trie::get_mut(&mut self.root, index)
    }

    /// Set or clear `index` and hand back the array to keep using.
    ///
    /// `None` clears the index, so a caller can thread an array through a
    /// sequence of updates without distinguishing insertion from removal.
    #[must_use]
    pub fn with(mut self, index: u32, value: Option<E>) -> Self {
        match value {
            Some(value) => {
                self.insert(index, value);
            }
            None => {
                self.remove(index);
            }
        }
        self
    }
}

impl<E: fmt::Debug> fmt::Debug for SparseArray<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<E: PartialEq> PartialEq for SparseArray<E> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<E: Eq> Eq for SparseArray<E> {}

impl<E: Clone> FromIterator<(u32, E)> for SparseArray<E> {
    fn from_iter<I: IntoIterator<Item = (u32, E)>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<E: Clone> Extend<(u32, E)> for SparseArray<E> {
    fn extend<I: IntoIterator<Item = (u32, E)>>(&mut self, iter: I) {
        for (index, value) in iter {
            self.insert(index, value);
        }
    }
}

impl<'a, E> IntoIterator for &'a SparseArray<E> {
    type Item = (u32, &'a E);
    type IntoIter = Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the occupied indices of a [`SparseArray`].
#[derive(Debug, Clone)]
pub struct Iter<'a, E> {
    array: &'a SparseArray<E>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<'a, E> Iterator for Iter<'a, E> {
    type Item = (u32, &'a E);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (index, value) = self.array.ceiling_entry(self.front)?;
        self.front = index.wrapping_add(1);
        self.remaining -= 1;
        Some((index, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> DoubleEndedIterator for Iter<'_, E> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (index, value) = self.array.floor_entry(self.back)?;
        self.back = index.wrapping_sub(1);
        self.remaining -= 1;
        Some((index, value))
    }
}

impl<E> ExactSizeIterator for Iter<'_, E> {}

impl<E> FusedIterator for Iter<'_, E> {}
