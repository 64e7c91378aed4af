//! # radix-collections: Radix-Indexed Persistent Collections
//!
//! This crate provides navigable maps, sets and an indexed sequence built on
//! persistent radix-indexed nodes. Cloning any collection is O(1) and the
//! clone is fully independent: nodes are shared until one side writes.
//!
//! ## Key Features
//!
//! - **Pluggable orders**: every key is placed by an [`Order`] giving an
//!   unsigned 32-bit radix index, a comparison and an equality
//! - **Sparse arrays**: [`SparseArray`], a 16-way radix trie over `u32`
//!   indices with ordered navigation
//! - **Navigable maps and sets**: [`FastMap`] and [`FastSet`], nested sparse
//!   arrays with ceiling/floor/higher/lower queries and mutating cursors
//! - **Multi-maps**: [`FastMultiMap`] and [`FastMultiSet`] keep equal keys
//!   side by side in insertion order
//! - **Fractal table**: [`FractalTable`], a sequence of nested circular
//!   blocks with O(1) push/pop at both ends and cheap interior edits
//! - **Views**: read-only, lock-guarded, snapshot-publishing, filtered,
//!   reversed, sub-range, distinct and insertion-ordered wrappers sharing
//!   one set of [`traits`]
//!
//! ## Quick Start
//!
//! ```rust
//! use radix_collections::{FastMap, FastSet, FractalTable, LexicalOrder};
//! use radix_collections::traits::NavigableSet;
//! use radix_collections::view::IntoView;
//!
//! // Map sorted by string content
//! let mut map = FastMap::with_order(LexicalOrder::new());
//! map.insert(String::from("pear"), 3);
//! map.insert(String::from("apple"), 5);
//! assert_eq!(map.first_key().map(String::as_str), Some("apple"));
//!
//! // Hash-ordered set, iterated backwards
//! let set: FastSet<u64> = (0..100).collect();
//! let reversed = set.clone().reversed();
//! assert_eq!(reversed.first(), set.last().copied());
//!
//! // Sequence with cheap inserts at the head
//! let mut table = FractalTable::new();
//! for i in 0..3 {
//!     table.insert(0, i).unwrap();
//! }
//! assert_eq!(table.iter().copied().collect::<Vec<_>>(), vec![2, 1, 0]);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod map;
pub mod order;
pub mod sparse;
pub mod table;
pub mod traits;
pub mod view;

// Re-export core types
pub use config::{Config, TableConfig};
pub use error::{CollectionError, Result};
pub use map::{CursorMut, FastMap, FastMultiMap, FastMultiSet, FastSet, SetCursorMut};
pub use order::{
    CaseInsensitiveLexicalOrder, HashOrder, IdentityOrder, IndexOrder, LexicalOrder, NaturalOrder, Order,
};
pub use sparse::SparseArray;
pub use table::FractalTable;
pub use traits::{Collection, Direction, NavigableMap, NavigableSet, Table};
pub use view::{
    Atomic, Distinct, Filtered, IntoView, Linked, Reversed, Shared, SubMap, SubSet, SubTable, Unmodifiable,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (currently no-op, for future use)
pub fn init() {
    log::debug!("Initializing radix-collections v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_functionality() {
        init();
        let mut map: FastMap<u32, u32> = FastMap::new();
        map.insert(1, 2);
        assert_eq!(map.get(&1), Some(&2));
    }

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }
}
