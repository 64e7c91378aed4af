//! Pluggable total orders
//!
//! An [`Order`] tells the radix-indexed collections three things about a key:
//! where it goes (`index_of`, an unsigned 32-bit radix digit), how it sorts
//! (`compare`) and when two keys are the same (`are_equal`). Keys that collide
//! on `index_of` are separated at the next nesting level by `sub_order`; an
//! order with no finer level returns `None` and the collection keeps such keys
//! in a small bucket sorted by `compare`.
//!
//! Every order here is index-consistent: if `index_of(a) < index_of(b)`
//! (unsigned) then `compare(a, b)` is `Less`. That is what makes ascending
//! iteration over a [`FastMap`](crate::FastMap) equal to a sort by `compare`.
//!
//! # Available orders
//!
//! - [`HashOrder`] - the default, any `Hash + Eq` key
//! - [`IdentityOrder`] - pointer identity of `Arc<T>` keys
//! - [`NaturalOrder`] - `Ord` keys, single bucket
//! - [`IndexOrder`] - `u32` keys used directly as radix index
//! - [`LexicalOrder`] / [`CaseInsensitiveLexicalOrder`] - string keys, four
//!   bytes per nesting level

use ahash::RandomState;
use std::cmp::Ordering;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

mod lexical;

pub use lexical::{CaseInsensitiveLexicalOrder, LexicalOrder};

/// Strategy combining radix indexing, comparison and equality over keys.
///
/// Implementations must be pure: `index_of` may never change for a given key
/// during the lifetime of a collection. Orders are plain values, shareable
/// across threads without synchronization.
pub trait Order<T: ?Sized>: Clone + Send + Sync {
    /// Unsigned radix index of the key at this nesting level.
    fn index_of(&self, key: &T) -> u32;

    /// Whether both keys denote the same entry.
    fn are_equal(&self, left: &T, right: &T) -> bool;

    /// Total order over keys, consistent with `index_of`.
    fn compare(&self, left: &T, right: &T) -> Ordering;

    /// Order used one nesting level deeper for keys colliding with `key`
    /// at this level, or `None` when no finer distinction exists.
    fn sub_order(&self, key: &T) -> Option<Self>;
}

// Fixed seeds keep indices stable for the whole process.
const HASH_SEEDS: [u64; 4] = [
    0x243f_6a88_85a3_08d3,
    0x1319_8a2e_0370_7344,
    0xa409_3822_299f_31d0,
    0x082e_fa98_ec4e_6c89,
];

fn hash_state() -> &'static RandomState {
    static STATE: OnceLock<RandomState> = OnceLock::new();
    STATE.get_or_init(|| RandomState::with_seeds(HASH_SEEDS[0], HASH_SEEDS[1], HASH_SEEDS[2], HASH_SEEDS[3]))
}

/// 32-bit hash code of a value, as used by [`HashOrder`].
#[inline]
pub fn hash_index<T: Hash + ?Sized>(value: &T) -> u32 {
    let hash = hash_state().hash_one(value);
    (hash ^ (hash >> 32)) as u32
}

/// Default order: the key's 32-bit hash code read as an unsigned index.
///
/// Distinct keys with the same hash code have no finer level and share a
/// collision bucket; they compare as `Equal` and keep insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HashOrder;

impl<T: Hash + Eq + ?Sized> Order<T> for HashOrder {
    #[inline]
    fn index_of(&self, key: &T) -> u32 {
        hash_index(key)
    }

    #[inline]
    fn are_equal(&self, left: &T, right: &T) -> bool {
        left == right
    }

    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        hash_index(left).cmp(&hash_index(right))
    }

    #[inline]
    fn sub_order(&self, _key: &T) -> Option<Self> {
        None
    }
}

/// Identity order over shared pointers: two keys are equal only when they
/// point to the same allocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IdentityOrder;

impl IdentityOrder {
    #[inline]
    fn address<T: ?Sized>(key: &Arc<T>) -> usize {
        Arc::as_ptr(key) as *const () as usize
    }
}

impl<T: ?Sized> Order<Arc<T>> for IdentityOrder {
    #[inline]
    fn index_of(&self, key: &Arc<T>) -> u32 {
        hash_index(&Self::address(key))
    }

    #[inline]
    fn are_equal(&self, left: &Arc<T>, right: &Arc<T>) -> bool {
        Self::address(left) == Self::address(right)
    }

    #[inline]
    fn compare(&self, left: &Arc<T>, right: &Arc<T>) -> Ordering {
        self.index_of(left).cmp(&self.index_of(right))
    }

    #[inline]
    fn sub_order(&self, _key: &Arc<T>) -> Option<Self> {
        None
    }
}

/// Natural order of `Ord` keys.
///
/// The index is always `0`, so every key lands in one sorted bucket. Lookups
/// are logarithmic and insertions linear in the collection size; prefer a
/// radix-friendly order for large collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Order<T> for NaturalOrder {
    #[inline]
    fn index_of(&self, _key: &T) -> u32 {
        0
    }

    #[inline]
    fn are_equal(&self, left: &T, right: &T) -> bool {
        left.cmp(right) == Ordering::Equal
    }

    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }

    #[inline]
    fn sub_order(&self, _key: &T) -> Option<Self> {
        None
    }
}

/// Unsigned 32-bit order: the key is its own radix index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IndexOrder;

impl Order<u32> for IndexOrder {
    #[inline]
    fn index_of(&self, key: &u32) -> u32 {
        *key
    }

    #[inline]
    fn are_equal(&self, left: &u32, right: &u32) -> bool {
        left == right
    }

    #[inline]
    fn compare(&self, left: &u32, right: &u32) -> Ordering {
        left.cmp(right)
    }

    #[inline]
    fn sub_order(&self, _key: &u32) -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_order_is_stable() {
        let order = HashOrder;
        let a = Order::<str>::index_of(&order, "alpha");
        let b = Order::<str>::index_of(&order, "alpha");
        assert_eq!(a, b);
        assert_eq!(a, hash_index("alpha"));
    }

    #[test]
    fn test_hash_order_consistency() {
        let order = HashOrder;
        let keys = ["a", "b", "c", "d", "e"];
        for x in &keys {
            for y in &keys {
                let by_index = order.index_of(x).cmp(&order.index_of(y));
                assert_eq!(order.compare(x, y), by_index);
                assert_eq!(order.are_equal(x, y), x == y);
            }
        }
        assert!(Order::<&str>::sub_order(&order, &"a").is_none());
    }

    #[test]
    fn test_identity_order() {
        let order = IdentityOrder;
        let first = Arc::new(String::from("same"));
        let second = Arc::new(String::from("same"));
        let alias = Arc::clone(&first);

        assert!(order.are_equal(&first, &alias));
        assert!(!order.are_equal(&first, &second));
        assert_eq!(order.index_of(&first), order.index_of(&alias));
        assert_eq!(order.compare(&first, &alias), Ordering::Equal);
    }

    #[test]
    fn test_natural_order() {
        let order = NaturalOrder;
        assert_eq!(order.index_of(&42i64), 0);
        assert_eq!(order.compare(&-1i64, &1i64), Ordering::Less);
        assert!(order.are_equal(&7i64, &7i64));
        assert!(order.sub_order(&7i64).is_none());
    }

    #[test]
    fn test_index_order() {
        let order = IndexOrder;
        assert_eq!(order.index_of(&u32::MAX), u32::MAX);
        assert_eq!(order.compare(&0, &u32::MAX), Ordering::Less);
        assert!(order.are_equal(&3, &3));
    }
}
