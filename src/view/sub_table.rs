//! Index window over a table.

use crate::error::{check_range, CollectionError, Result};
use crate::traits::{Collection, Table};

/// Window `[from, to)` over a [`Table`].
///
/// Indices are relative to `from`. Inserting or removing through the window
/// moves its upper bound along; reads past the window fail with
/// [`CollectionError::OutOfBounds`], writes past it with
/// [`CollectionError::UnsupportedOperation`].
///
/// Bounds are plain offsets into the backing table. Only edits made through
/// this window move them: when windows share a backing handle (as the parts
/// of [`Table::split`] over a [`Shared`](crate::view::Shared) table do), an
/// insert or removal through one window shifts the elements under every
/// window after it, and those windows are stale from then on. Split again
/// after structural edits; `set` through a window never invalidates others.
///
/// # Examples
///
/// ```rust
/// use radix_collections::traits::{Collection, Table};
/// use radix_collections::view::SubTable;
/// use radix_collections::FractalTable;
///
/// let table: FractalTable<u32> = (0..=6).collect();
/// let mut window = SubTable::new(table, 2, 5).unwrap();
/// assert_eq!(window.get(0).unwrap(), 2);
/// window.set(0, 99).unwrap();
/// assert_eq!(window.len(), 3);
/// assert_eq!(window.get_ref().to_vec(), vec![0, 1, 99, 3, 4, 5, 6]);
/// ```
#[derive(Debug, Clone)]
pub struct SubTable<C> {
    inner: C,
    from: usize,
    to: usize,
}

impl<C> SubTable<C> {
    /// The table behind the window.
    pub fn get_ref(&self) -> &C {
        &self.inner
    }

    /// Unwrap.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> SubTable<C> {
    /// Window `[from, to)` over `inner`.
    ///
    /// Fails with [`CollectionError::InvalidArgument`] when `from > to` or
    /// `to` lies past the end of `inner`.
    pub fn new<T>(inner: C, from: usize, to: usize) -> Result<Self>
    where
        C: Table<T>,
    {
        check_range(from, to, inner.len())?;
        Ok(Self { inner, from, to })
    }

    /// Window bounds in the table's own indices, as given at construction
    /// and moved by edits through the window.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.from..self.to
    }

    // Clipped to the table's current length, which other handles may have
    // shrunk.
    fn clip(&self, len: usize) -> (usize, usize) {
        (self.from.min(len), self.to.min(len))
    }
}

fn outside<R>(operation: &str, index: usize, len: usize) -> Result<R> {
    Err(CollectionError::unsupported(format!(
        "{operation} at {index} outside a window of {len}"
    )))
}

impl<T: PartialEq, C: Table<T>> Collection<T> for SubTable<C> {
    fn len(&self) -> usize {
        let (from, to) = self.clip(self.inner.len());
        to - from
    }

    fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    fn add(&mut self, value: T) -> Result<bool> {
        self.push_back(value).map(|_| true)
    }

    fn remove_value(&mut self, value: &T) -> Result<bool> {
        match self.index_of(value) {
            Some(index) => self.remove_at(index).map(|_| true),
            None => Ok(false),
        }
    }

    fn remove_if(&mut self, pred: &dyn Fn(&T) -> bool) -> Result<usize> {
        let mut removed = 0;
        let mut index = Collection::len(self);
        while index > 0 {
            index -= 1;
            if pred(&self.get(index)?) {
                self.remove_at(index)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    fn clear(&mut self) -> Result<()> {
        while !Collection::is_empty(self) {
            self.pop_back()?;
        }
        Ok(())
    }

    fn for_each_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        let (from, to) = self.clip(self.inner.len());
        for index in from..to {
            match self.inner.get(index) {
                Ok(value) if f(&value) => {}
                _ => break,
            }
        }
    }

    fn for_each_descending_until(&self, f: &mut dyn FnMut(&T) -> bool) {
        let (from, to) = self.clip(self.inner.len());
        for index in (from..to).rev() {
            match self.inner.get(index) {
                Ok(value) if f(&value) => {}
                _ => break,
            }
        }
    }
}

impl<T: PartialEq, C: Table<T>> Table<T> for SubTable<C> {
    fn get(&self, index: usize) -> Result<T> {
        let (from, to) = self.clip(self.inner.len());
        if index >= to - from {
            return Err(CollectionError::out_of_bounds(index, to - from));
        }
        self.inner.get(from + index)
    }

    fn set(&mut self, index: usize, value: T) -> Result<T> {
        let (from, to) = self.clip(self.inner.len());
        if index >= to - from {
            return outside("set", index, to - from);
        }
        self.inner.set(from + index, value)
    }

    fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let (from, to) = self.clip(self.inner.len());
        if index > to - from {
            return outside("insert", index, to - from);
        }
        self.inner.insert(from + index, value)?;
        self.from = from;
        self.to = to + 1;
        Ok(())
    }

    fn remove_at(&mut self, index: usize) -> Result<T> {
        let (from, to) = self.clip(self.inner.len());
        if index >= to - from {
            return outside("remove_at", index, to - from);
        }
        let value = self.inner.remove_at(from + index)?;
        self.from = from;
        self.to = to - 1;
        Ok(value)
    }

    fn index_of(&self, value: &T) -> Option<usize> {
        let mut position = 0;
        let mut found = false;
        self.for_each_until(&mut |candidate| {
            found = candidate == value;
            position += usize::from(!found);
            !found
        });
        found.then_some(position)
    }

    fn last_index_of(&self, value: &T) -> Option<usize> {
        let mut position = Collection::len(self);
        let mut found = false;
        self.for_each_descending_until(&mut |candidate| {
            position -= 1;
            found = candidate == value;
            !found
        });
        found.then_some(position)
    }
}
