//! Key-range window over a set.

use crate::error::{CollectionError, Result};
use crate::traits::{Collection, NavigableSet};
use std::cmp::Ordering;
use std::ops::Bound;

/// The elements of a [`NavigableSet`] that fall within a range.
///
/// The set counterpart of [`SubMap`](crate::view::SubMap): bounds are
/// compared with the set's own order, adds outside the range fail with
/// [`CollectionError::UnsupportedOperation`], and reads and removals outside
/// it see nothing. Traversal walks the inner set with `higher`/`lower` from
/// the near bound, so it never touches elements outside the range.
#[derive(Debug, Clone)]
pub struct SubSet<S, T> {
    inner: S,
    low: Bound<T>,
    high: Bound<T>,
}

impl<S, T> SubSet<S, T> {
    /// Elements of `inner` between `low` and `high`.
    ///
    /// Fails with [`CollectionError::InvalidArgument`] when `low` sorts after
    /// `high`.
    pub fn new(inner: S, low: Bound<T>, high: Bound<T>) -> Result<Self>
    where
        S: NavigableSet<T>,
    {
        if let (Bound::Included(l) | Bound::Excluded(l), Bound::Included(h) | Bound::Excluded(h)) = (&low, &high) {
            if inner.compare(l, h) == Ordering::Greater {
                return Err(CollectionError::invalid_argument("sub-set lower bound above upper bound"));
            }
        }
        Ok(Self { inner, low, high })
    }

    /// The lower bound.
    pub fn low(&self) -> Bound<&T> {
        self.low.as_ref()
    }

    /// The upper bound.
    pub fn high(&self) -> Bound<&T> {
        self.high.as_ref()
    }

    /// The set behind the window.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: NavigableSet<T>, T> SubSet<S, T> {
    fn above_low(&self, value: &T) -> bool {
        match &self.low {
            Bound::Unbounded => true,
            Bound::Included(low) => self.inner.compare(value, low) != Ordering::Less,
            Bound::Excluded(low) => self.inner.compare(value, low) == Ordering::Greater,
        }
    }

    fn below_high(&self, value: &T) -> bool {
        match &self.high {
            Bound::Unbounded => true,
            Bound::Included(high) => self.inner.compare(value, high) != Ordering::Greater,
            Bound::Excluded(high) => self.inner.compare(value, high) == Ordering::Less,
        }
    }

    /// Whether `value` lies within the window.
    pub fn in_range(&self, value: &T) -> bool {
        self.above_low(value) && self.below_high(value)
    }

    fn within(&self, value: Option<T>) -> Option<T> {
        value.filter(|v| self.in_range(v))
    }
}

impl<T, S: NavigableSet<T>> Collection<T> for SubSet<S, T> {
    fn len(&self) -> usize {
        let mut count = 0;
        self.for_each_until(&mut |_| {
            count += 1;
            true
        });
        count
    }

    fn contains(&self, value: &T) -> bool {
        self.in_range(value) && self.inner.contains(value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        if !self.in_range(&value) {
            return Err(CollectionError::unsupported("add outside the sub-set range"));
        }
        self.inner.add(value)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        if !self.in_range(value) {
            return Ok(false);
        }
        self.inner.remove_value(value)
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let mut doomed = Vec::new();
        let mut cursor = self.first();
        while let Some(value) = cursor {
            cursor = self.higher(&value);
            if pred(&value) {
                doomed.push(value);
            }
        }
        for value in &doomed {
            self.inner.remove_value(value)?;
        }
        Ok(doomed.len())
    }

    fn clear(&mut self) -> Result<()> {
        while let Some(value) = self.first() {
            self.inner.remove_value(&value)?;
        }
        Ok(())
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        let mut cursor = self.first();
        while let Some(value) = cursor {
            if !f(&value) {
                return;
            }
            cursor = self.higher(&value);
        }
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        let mut cursor = self.last();
        while let Some(value) = cursor {
            if !f(&value) {
                return;
            }
            cursor = self.lower(&value);
        }
    }
}

impl<T, S: NavigableSet<T>> NavigableSet<T> for SubSet<S, T> {
    fn first(&self) -> Option<T> {
        let value = match &self.low {
            Bound::Unbounded => self.inner.first(),
            Bound::Included(low) => self.inner.ceiling(low),
            Bound::Excluded(low) => self.inner.higher(low),
        };
        self.within(value)
    }

    fn last(&self) -> Option<T> {
        let value = match &self.high {
            Bound::Unbounded => self.inner.last(),
            Bound::Included(high) => self.inner.floor(high),
            Bound::Excluded(high) => self.inner.lower(high),
        };
        self.within(value)
    }

    fn higher(&self, value: &T) -> Option<T> {
        if !self.above_low(value) {
            return self.first();
        }
        self.within(self.inner.higher(value))
    }

    fn lower(&self, value: &T) -> Option<T> {
        if !self.below_high(value) {
            return self.last();
        }
        self.within(self.inner.lower(value))
    }

    fn ceiling(&self, value: &T) -> Option<T> {
        if !self.above_low(value) {
            return self.first();
        }
        self.within(self.inner.ceiling(value))
    }

    fn floor(&self, value: &T) -> Option<T> {
        if !self.below_high(value) {
            return self.last();
        }
        self.within(self.inner.floor(value))
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(left, right)
    }
}
