//! Radix trie nodes backing [`SparseArray`](super::SparseArray).
//!
//! A node covers every index sharing `prefix` above its digit and dispatches on
//! the 4-bit digit at `shift`. Nodes are reference counted and updated through
//! `Arc::make_mut`, so a mutation copies only the path it touches while clones
//! of the array keep sharing the rest.

use std::mem;
use std::sync::Arc;

/// Bits consumed per trie level.
pub(crate) const RADIX_BITS: u32 = 4;
/// Slots per trie node.
pub(crate) const RADIX: usize = 1 << RADIX_BITS;

const DIGIT_MASK: u32 = RADIX as u32 - 1;

#[inline]
fn digit(index: u32, shift: u32) -> usize {
    ((index >> shift) & DIGIT_MASK) as usize
}

#[inline]
fn high(index: u32, shift: u32) -> u64 {
    u64::from(index) >> (shift + RADIX_BITS)
}

/// Shift of the digit holding the highest bit where `a` and `b` differ.
#[inline]
fn common_shift(a: u32, b: u32) -> u32 {
    debug_assert_ne!(a, b);
    let highest = 31 - (a ^ b).leading_zeros();
    highest - highest % RADIX_BITS
}

#[derive(Debug, Clone)]
pub(crate) enum Slot<E> {
    Vacant,
    Leaf(u32, E),
    Node(Arc<Trie<E>>),
}

impl<E> Slot<E> {
    #[inline]
    fn is_vacant(&self) -> bool {
        matches!(self, Slot::Vacant)
    }

    #[inline]
    fn into_value(self) -> Option<E> {
        match self {
            Slot::Leaf(_, value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Trie<E> {
    shift: u32,
    prefix: u64,
    occupied: usize,
    slots: [Slot<E>; RADIX],
}

impl<E> Trie<E> {
    /// Node holding two occupants whose indices first differ at this level.
    fn pair(a_index: u32, a: Slot<E>, b_index: u32, b: Slot<E>) -> Self {
        let shift = common_shift(a_index, b_index);
        let mut slots: [Slot<E>; RADIX] = std::array::from_fn(|_| Slot::Vacant);
        slots[digit(a_index, shift)] = a;
        slots[digit(b_index, shift)] = b;
        log::trace!("sparse array nests indices {:#x} and {:#x} at shift {}", a_index, b_index, shift);
        Self {
            shift,
            prefix: high(a_index, shift),
            occupied: 2,
            slots,
        }
    }

    #[inline]
    fn covers(&self, index: u32) -> bool {
        high(index, self.shift) == self.prefix
    }

    #[inline]
    fn base_index(&self) -> u32 {
        (self.prefix << (self.shift + RADIX_BITS)) as u32
    }

    fn ceiling(&self, from: u32) -> Option<(u32, &E)> {
        let start = match high(from, self.shift).cmp(&self.prefix) {
            std::cmp::Ordering::Less => 0,
            std::cmp::Ordering::Equal => digit(from, self.shift),
            std::cmp::Ordering::Greater => return None,
        };
        self.slots[start..].iter().find_map(|slot| ceiling(slot, from))
    }

    fn floor(&self, from: u32) -> Option<(u32, &E)> {
        let end = match high(from, self.shift).cmp(&self.prefix) {
            std::cmp::Ordering::Greater => RADIX - 1,
            std::cmp::Ordering::Equal => digit(from, self.shift),
            std::cmp::Ordering::Less => return None,
        };
        self.slots[..=end].iter().rev().find_map(|slot| floor(slot, from))
    }

    fn depth(&self) -> usize {
        1 + self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Node(node) => node.depth(),
                _ => 0,
            })
            .max()
            .unwrap_or(0)
    }

    fn take_single(&mut self) -> Slot<E> {
        self.slots
            .iter_mut()
            .find(|slot| !slot.is_vacant())
            .map(|slot| mem::replace(slot, Slot::Vacant))
            .unwrap_or(Slot::Vacant)
    }
}

impl<E: Clone> Trie<E> {
    fn insert(&mut self, index: u32, value: E) -> Option<E> {
        let d = digit(index, self.shift);
        let was_vacant = self.slots[d].is_vacant();
        let previous = insert(&mut self.slots[d], index, value);
        if was_vacant {
            self.occupied += 1;
        }
        previous
    }

    fn remove(&mut self, index: u32) -> Option<E> {
        let d = digit(index, self.shift);
        let removed = remove(&mut self.slots[d], index)?;
        if self.slots[d].is_vacant() {
            self.occupied -= 1;
        }
        Some(removed)
    }
}

pub(crate) fn get<E>(mut slot: &Slot<E>, index: u32) -> Option<&E> {
    loop {
        match slot {
            Slot::Vacant => return None,
            Slot::Leaf(i, value) => return (*i == index).then_some(value),
            Slot::Node(node) => {
                if !node.covers(index) {
                    return None;
                }
                slot = &node.slots[digit(index, node.shift)];
            }
        }
    }
}

/// Callers check presence first: every node on the path is made unique.
pub(crate) fn get_mut<E: Clone>(slot: &mut Slot<E>, index: u32) -> Option<&mut E> {
    match slot {
        Slot::Vacant => None,
        Slot::Leaf(i, value) => (*i == index).then_some(value),
        Slot::Node(node) => {
            if !node.covers(index) {
                return None;
            }
            let node = Arc::make_mut(node);
            get_mut(&mut node.slots[digit(index, node.shift)], index)
        }
    }
}

pub(crate) fn insert<E: Clone>(slot: &mut Slot<E>, index: u32, value: E) -> Option<E> {
    let existing_index = match slot {
        Slot::Vacant => {
            *slot = Slot::Leaf(index, value);
            return None;
        }
        Slot::Leaf(i, current) => {
            if *i == index {
                return Some(mem::replace(current, value));
            }
            *i
        }
        Slot::Node(node) => {
            if node.covers(index) {
                return Arc::make_mut(node).insert(index, value);
            }
            node.base_index()
        }
    };
    // Collision below this slot, or index outside the node: add a level.
    let existing = mem::replace(slot, Slot::Vacant);
    *slot = Slot::Node(Arc::new(Trie::pair(existing_index, existing, index, Slot::Leaf(index, value))));
    None
}

/// Callers check presence first: every node on the path is made unique.
pub(crate) fn remove<E: Clone>(slot: &mut Slot<E>, index: u32) -> Option<E> {
    match slot {
        Slot::Vacant => None,
        Slot::Leaf(i, _) => {
            if *i != index {
                return None;
            }
            mem::replace(slot, Slot::Vacant).into_value()
        }
        Slot::Node(node) => {
            if !node.covers(index) {
                return None;
            }
            let node = Arc::make_mut(node);
            let removed = node.remove(index)?;
            if node.occupied == 1 {
                // A node never outlives its second occupant.
                let survivor = node.take_single();
                *slot = survivor;
            }
            Some(removed)
        }
    }
}

pub(crate) fn ceiling<E>(slot: &Slot<E>, from: u32) -> Option<(u32, &E)> {
    match slot {
        Slot::Vacant => None,
        Slot::Leaf(i, value) => (*i >= from).then_some((*i, value)),
        Slot::Node(node) => node.ceiling(from),
    }
}

pub(crate) fn floor<E>(slot: &Slot<E>, from: u32) -> Option<(u32, &E)> {
    match slot {
        Slot::Vacant => None,
        Slot::Leaf(i, value) => (*i <= from).then_some((*i, value)),
        Slot::Node(node) => node.floor(from),
    }
}

pub(crate) fn depth<E>(slot: &Slot<E>) -> usize {
    match slot {
        Slot::Node(node) => node.depth(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_shift() {
        assert_eq!(common_shift(0, 1), 0);
        assert_eq!(common_shift(0, 0x10), 4);
        assert_eq!(common_shift(0x1234, 0x1235), 0);
        assert_eq!(common_shift(0, 0x8000_0000), 28);
        assert_eq!(common_shift(0x0fff_ffff, 0x1000_0000), 28);
    }

    #[test]
    fn test_pair_layout() {
        let trie = Trie::pair(0x120, Slot::Leaf(0x120, 'a'), 0x150, Slot::Leaf(0x150, 'b'));
        assert_eq!(trie.shift, 4);
        assert!(trie.covers(0x1ff));
        assert!(!trie.covers(0x200));
        assert_eq!(trie.base_index(), 0x100);
        assert_eq!(trie.ceiling(0x121).map(|(i, v)| (i, *v)), Some((0x150, 'b')));
        assert_eq!(trie.floor(0x14f).map(|(i, v)| (i, *v)), Some((0x120, 'a')));
        assert!(trie.ceiling(0x151).is_none());
        assert!(trie.floor(0x11f).is_none());
    }

    #[test]
    fn test_top_level_node_covers_everything() {
        let trie = Trie::pair(0, Slot::Leaf(0, 1), u32::MAX, Slot::Leaf(u32::MAX, 2));
        assert_eq!(trie.shift, 28);
        assert_eq!(trie.base_index(), 0);
        assert!(trie.covers(0x7777_7777));
    }
}
