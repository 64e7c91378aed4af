//! Views: wrappers that change how a collection may be used without copying
//! it.
//!
//! Every view implements the same [`traits`](crate::traits) as the
//! collection it wraps, so views stack: a filtered, reversed, shared set is
//! `Shared::new(Reversed::new(Filtered::new(set, pred)))`, or with
//! [`IntoView`], `set.filtered(pred).reversed().shared()`.
//!
//! - [`Unmodifiable`] - rejects every mutation
//! - [`Shared`] - reader/writer lock, cloneable across threads
//! - [`Atomic`] - lock-free reads of published snapshots
//! - [`Filtered`] - only the elements matching a predicate
//! - [`Reversed`] - backwards indices or order
//! - [`SubTable`] / [`SubMap`] / [`SubSet`] - index window or key range
//! - [`Distinct`] - each element once
//! - [`Linked`] - insertion order

mod atomic;
mod distinct;
mod filtered;
mod linked;
pub mod parallel;
mod reversed;
mod shared;
mod sub_map;
mod sub_set;
mod sub_table;
mod unmodifiable;

pub use atomic::Atomic;
pub use distinct::Distinct;
pub use filtered::Filtered;
pub use linked::Linked;
pub use reversed::Reversed;
pub use shared::Shared;
pub use sub_map::SubMap;
pub use sub_set::SubSet;
pub use sub_table::SubTable;
pub use unmodifiable::Unmodifiable;

use crate::map::{FastMap, FastMultiMap, FastMultiSet, FastSet};
use crate::table::FractalTable;
use crate::traits::{Collection, NavigableMap};

/// Wrap a collection in a view by method call.
pub trait IntoView: Sized {
    /// Read-only view.
    fn unmodifiable(self) -> Unmodifiable<Self> {
        Unmodifiable::new(self)
    }

    /// Lock-guarded, cloneable handle.
    fn shared(self) -> Shared<Self> {
        Shared::new(self)
    }

    /// Snapshot-publishing handle.
    fn atomic(self) -> Atomic<Self> {
        Atomic::new(self)
    }

    /// Only the elements matching `predicate`.
    fn filtered<P>(self, predicate: P) -> Filtered<Self, P> {
        Filtered::new(self, predicate)
    }

    /// Backwards view.
    fn reversed(self) -> Reversed<Self> {
        Reversed::new(self)
    }

    /// Each element once, first occurrence wins.
    fn distinct(self) -> Distinct<Self> {
        Distinct::new(self)
    }

    /// Iterate elements in insertion order.
    fn linked<T: Clone>(self) -> Linked<Self, T>
    where
        Self: Collection<T>,
    {
        Linked::of_collection(self)
    }

    /// Iterate entries in key insertion order.
    fn linked_map<K: Clone, V>(self) -> Linked<Self, K>
    where
        Self: NavigableMap<K, V>,
    {
        Linked::of_map(self)
    }
}

impl<K, V, O> IntoView for FastMap<K, V, O> {}
impl<T, O> IntoView for FastSet<T, O> {}
impl<T> IntoView for FractalTable<T> {}
impl<C> IntoView for Unmodifiable<C> {}
impl<C> IntoView for Shared<C> {}
impl<C> IntoView for Atomic<C> {}
impl<C, P> IntoView for Filtered<C, P> {}
impl<C> IntoView for Reversed<C> {}
impl<C> IntoView for SubTable<C> {}
impl<M, K> IntoView for SubMap<M, K> {}
impl<S, T> IntoView for SubSet<S, T> {}
impl<C> IntoView for Distinct<C> {}
impl<C, K> IntoView for Linked<C, K> {}
impl<K, V, O> IntoView for FastMultiMap<K, V, O> {}
impl<T, O> IntoView for FastMultiSet<T, O> {}
