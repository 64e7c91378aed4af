//! Predicate-restricted view.

use crate::error::Result;
use crate::traits::{Collection, NavigableSet};
use std::cmp::Ordering;
use std::fmt;

/// View exposing only the elements that satisfy a predicate.
///
/// Adding or removing an element the predicate rejects is a no-op reported
/// as `Ok(false)`.
#[derive(Clone)]
pub struct Filtered<C, P> {
    inner: C,
    predicate: P,
}

impl<C, P> Filtered<C, P> {
    /// Restrict `inner` to the elements accepted by `predicate`.
    pub fn new(inner: C, predicate: P) -> Self {
        Self { inner, predicate }
    }

    /// The unfiltered collection.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: fmt::Debug, P> fmt::Debug for Filtered<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filtered").field("inner", &self.inner).finish_non_exhaustive()
    }
}

impl<T, C, P> Collection<T> for Filtered<C, P>
where
    C: Collection<T>,
    P: Fn(&T) -> bool,
{
    fn len(&self) -> usize {
        let mut count = 0;
        self.for_each_until(&mut |_| {
            count += 1;
            true
        });
        count
    }

    fn is_empty(&self) -> bool {
        let mut empty = true;
        self.for_each_until(&mut |_| {
            empty = false;
            false
        });
        empty
    }

    fn contains(&self, value: &T) -> bool {
        (self.predicate)(value) && self.inner.contains(value)
    }

    fn add(&mut self, value: T) -> Result<bool> {
        if !(self.predicate)(&value) {
            return Ok(false);
        }
        self.inner.add(value)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        if !(self.predicate)(value) {
            return Ok(false);
        }
        self.inner.remove_value(value)
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let predicate = &self.predicate;
        self.inner.remove_if(&|value| predicate(value) && pred(value))
    }

    fn clear(&mut self) -> Result<()> {
        let predicate = &self.predicate;
        self.inner.remove_if(&|value| predicate(value)).map(|_| ())
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.inner
            .for_each_until(&mut |value| !(self.predicate)(value) || f(value))
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        self.inner
            .for_each_descending_until(&mut |value| !(self.predicate)(value) || f(value))
    }
}

impl<T, C, P> NavigableSet<T> for Filtered<C, P>
where
    C: NavigableSet<T>,
    P: Fn(&T) -> bool,
{
    fn first(&self) -> Option<T> {
        self.accept_upwards(self.inner.first())
    }

    fn last(&self) -> Option<T> {
        self.accept_downwards(self.inner.last())
    }

    fn higher(&self, value: &T) -> Option<T> {
        self.accept_upwards(self.inner.higher(value))
    }

    fn lower(&self, value: &T) -> Option<T> {
        self.accept_downwards(self.inner.lower(value))
    }

    fn ceiling(&self, value: &T) -> Option<T> {
        self.accept_upwards(self.inner.ceiling(value))
    }

    fn floor(&self, value: &T) -> Option<T> {
        self.accept_downwards(self.inner.floor(value))
    }

    fn compare(&self, left: &T, right: &T) -> Ordering {
        self.inner.compare(left, right)
    }
}

impl<C, P> Filtered<C, P> {
    fn accept_upwards<T>(&self, mut candidate: Option<T>) -> Option<T>
    where
        C: NavigableSet<T>,
        P: Fn(&T) -> bool,
    {
        while let Some(value) = candidate {
            if (self.predicate)(&value) {
                return Some(value);
            }
            candidate = self.inner.higher(&value);
        }
        None
    }

    fn accept_downwards<T>(&self, mut candidate: Option<T>) -> Option<T>
    where
        C: NavigableSet<T>,
        P: Fn(&T) -> bool,
    {
        while let Some(value) = candidate {
            if (self.predicate)(&value) {
                return Some(value);
            }
            candidate = self.inner.lower(&value);
        }
        None
    }
}
