//! Radix-indexed navigable set.

use super::fast_map::{CursorMut, FastMap};
use super::iter::Keys;
use crate::error::Result;
use crate::order::{HashOrder, Order};
use std::fmt;

/// Navigable set backed by a [`FastMap`] with unit values.
///
/// # Examples
///
/// ```rust
/// use radix_collections::FastSet;
///
/// let mut set = FastSet::new();
/// assert!(set.insert("x"));
/// assert!(!set.insert("x"));
/// assert!(set.contains(&"x"));
/// ```
#[derive(Clone)]
pub struct FastSet<T, O = HashOrder> {
    map: FastMap<T, (), O>,
}

impl<T> FastSet<T, HashOrder> {
    /// Empty set ordered by element hash.
    pub fn new() -> Self {
        Self { map: FastMap::new() }
    }
}

impl<T> Default for FastSet<T, HashOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O> FastSet<T, O> {
    /// Empty set ordered by `order`.
    pub fn with_order(order: O) -> Self {
        Self {
            map: FastMap::with_order(order),
        }
    }

    /// The root order of this set.
    pub fn order(&self) -> &O {
        self.map.order()
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the set is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Elements in ascending order.
    pub fn iter(&self) -> Keys<'_, T, (), O> {
        self.map.keys()
    }

    /// Elements in descending order.
    pub fn descending_iter(&self) -> Keys<'_, T, (), O> {
        Keys {
            inner: self.map.descending_iter(),
        }
    }

    /// Smallest element.
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, _)| k)
    }

    /// Largest element.
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, _)| k)
    }
}

impl<T, O: Order<T>> FastSet<T, O> {
    /// Whether an element equal to `value` is present.
    pub fn contains(&self, value: &T) -> bool {
        self.map.contains_key(value)
    }

    /// Stored element equal to `value`.
    pub fn get(&self, value: &T) -> Option<&T> {
        self.map.get_key_value(value).map(|(k, _)| k)
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

    /// Elements from `value` in ascending order.
    pub fn iter_from(&self, value: &T, inclusive: bool) -> Keys<'_, T, (), O> {
        Keys {
            inner: self.map.iter_from(value, inclusive),
        }
    }

    /// Elements from `value` in descending order.
    pub fn descending_iter_from(&self, value: &T, inclusive: bool) -> Keys<'_, T, (), O> {
        Keys {
            inner: self.map.descending_iter_from(value, inclusive),
        }
    }
}

impl<T: Clone, O: Order<T>> FastSet<T, O> {
    /// Set ordered by `order` holding the given elements.
    pub fn from_iter_with_order<I: IntoIterator<Item = T>>(order: O, iter: I) -> Self {
        let mut set = Self::with_order(order);
        set.extend(iter);
        set
    }

    /// Add `value`; `false` when an equal element was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.map.put_if_absent(value, ()).is_none()
    }

    /// Remove `value`; `false` when it was absent.
    pub fn remove(&mut self, value: &T) -> bool {
        self.map.remove_entry(value).is_some()
    }

    /// Remove and return the stored element equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        self.map.remove_entry(value).map(|(k, _)| k)
    }

    /// Remove and return the smallest element.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, _)| k)
    }

    /// Remove and return the largest element.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, _)| k)
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Keep only the elements for which `keep` returns `true`.
    pub fn retain<F: FnMut(&T) -> bool>(&mut self, mut keep: F) {
        self.map.retain(|k, _| keep(k));
    }

    /// Ascending cursor able to remove the element it last returned.
    pub fn cursor_mut(&mut self) -> SetCursorMut<'_, T, O> {
        SetCursorMut {
            inner: self.map.cursor_mut(),
        }
    }

    /// Descending cursor able to remove the element it last returned.
    pub fn descending_cursor_mut(&mut self) -> SetCursorMut<'_, T, O> {
        SetCursorMut {
            inner: self.map.descending_cursor_mut(),
        }
    }
}

/// Mutating cursor over a [`FastSet`].
pub struct SetCursorMut<'a, T, O> {
    inner: CursorMut<'a, T, (), O>,
}

impl<T: Clone, O: Order<T>> SetCursorMut<'_, T, O> {
    /// Whether [`advance`](Self::advance) would return an element.
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Move to the next element and return it.
    pub fn advance(&mut self) -> Result<&T> {
        self.inner.advance().map(|(k, _)| k)
    }

    /// Remove the element last returned by [`advance`](Self::advance).
    pub fn remove(&mut self) -> Result<T> {
        self.inner.remove().map(|(k, _)| k)
    }
}

impl<T: fmt::Debug, O> fmt::Debug for FastSet<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, O: Order<T>> PartialEq for FastSet<T, O> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T, O: Order<T>> Eq for FastSet<T, O> {}

impl<T: Clone, O: Order<T>> Extend<T> for FastSet<T, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Clone, O: Order<T> + Default> FromIterator<T> for FastSet<T, O> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::with_order(O::default());
        set.extend(iter);
        set
    }
}

impl<'a, T, O> IntoIterator for &'a FastSet<T, O> {
    type Item = &'a T;
    type IntoIter = Keys<'a, T, (), O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
