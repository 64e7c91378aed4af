//! View skipping repeated elements.

use crate::error::Result;
use crate::traits::{Collection, NavigableSet};
use ahash::AHashSet;
use std::cmp::Ordering;
use std::hash::Hash;

/// View that never yields the same element twice.
///
/// Traversal remembers what it has already produced and skips later equal
/// elements (by `Eq`), so the first occurrence in traversal order wins: the
/// oldest one ascending, the newest one descending. Adding an element already
/// present is a no-op reported as `Ok(false)`; removing one removes every
/// occurrence.
///
/// # Examples
///
/// ```rust
/// use radix_collections::traits::Collection;
/// use radix_collections::view::IntoView;
/// use radix_collections::FractalTable;
///
/// let table = FractalTable::from(vec![3, 1, 3, 2, 1]);
/// let distinct = table.distinct();
/// assert_eq!(distinct.to_vec(), vec![3, 1, 2]);
/// assert_eq!(distinct.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Distinct<C> {
    inner: C,
}

impl<C> Distinct<C> {
    /// Distinct view over `inner`.
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    /// The collection behind the view.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

fn visit_once<T: Hash + Eq + Clone>(
    walk: impl FnOnce(&mut dyn FnMut(&T) -> bool),
    f: &mut dyn FnMut(&T) -> bool,
) {
    let mut seen = AHashSet::new();
    walk(&mut |value| {
        if seen.contains(value) {
            return true;
        }
        seen.insert(value.clone());
        f(value)
    });
}

impl<T: Hash + Eq + Clone, C: Collection<T>> Collection<T> for Distinct<C> {
    fn len(&self) -> usize {
        let mut count = 0;
        self.for_each_until(&mut |_| {
            count += 1;
            true
        });
        count
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn contains(&self, value: &T) -> bool {
        self.inner.contains(value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        if self.inner.contains(&value) {
            return Ok(false);
        }
        self.inner.add(value)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        self.inner.remove_if(&|candidate| candidate == value).map(|n| n > 0)
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        self.inner.remove_if(pred)
    }

    fn clear(&mut self) -> Result<()> {
        self.inner.clear()
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        visit_once(|g| self.inner.for_each_until(g), f);
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        visit_once(|g| self.inner.for_each_descending_until(g), f);
    }
}

// Navigation already steps over equal elements.
impl<T: Hash + Eq + Clone, C: NavigableSet<T>> NavigableSet<T> for Distinct<C> {
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
