//! Radix-indexed navigable maps and sets.
//!
//! [`FastMap`] places each key by its [`Order`](crate::Order) index in a
//! persistent sparse array. Keys colliding on an index move one level down
//! through `sub_order`, or into a bucket sorted by `compare` when the order
//! has no finer level. [`FastSet`] is a map with unit values.
//! [`FastMultiMap`] and [`FastMultiSet`] keep every entry under equal keys.

mod fast_map;
mod fast_set;
mod iter;
mod level;
mod multi;

pub use fast_map::{CursorMut, FastMap};
pub use fast_set::{FastSet, SetCursorMut};
pub use iter::{Iter, Keys, Values};
pub use multi::{FastMultiMap, FastMultiSet};
