//! Self-similar circular blocks backing [`FractalTable`](super::FractalTable).
//!
//! A block is a power-of-two ring of positions. A leaf block stores elements
//! directly; a branch block stores child blocks of `1 << shift` positions
//! each. Every block keeps its own rotation `offset`, so logical position `p`
//! lives at physical slot `(p + offset) & (capacity - 1)` and, in a branch,
//! in child `physical >> shift` at child position `physical & (span - 1)`.
//!
//! Rotating a block moves every element by one position in O(1). Shifting a
//! run of positions therefore only copies elements inside the two boundary
//! children of each level; the children in between are rotated whole.

use std::mem;
use std::sync::Arc;

#[derive(Debug, Clone)]
enum Cells<T> {
    Leaf(Vec<Option<T>>),
    Branch(Vec<Option<Arc<Block<T>>>>),
}

#[derive(Debug, Clone)]
pub(crate) struct Block<T> {
    shift: u32,
    offset: usize,
    block_bits: u32,
    cells: Cells<T>,
}

fn vacant<S>(n: usize) -> Vec<Option<S>> {
    (0..n).map(|_| None).collect()
}

impl<T> Block<T> {
    pub(crate) fn leaf(capacity: usize, block_bits: u32) -> Self {
        Self {
            shift: 0,
            offset: 0,
            block_bits,
            cells: Cells::Leaf(vacant(capacity)),
        }
    }

    /// Empty block of `1 << capacity_bits` positions shaped like a full
    /// sibling: a leaf up to the maximum block size, otherwise a branch of
    /// maximum fan-out whose children are created on first write.
    fn empty(capacity_bits: u32, block_bits: u32) -> Self {
        if capacity_bits <= block_bits {
            return Self::leaf(1 << capacity_bits, block_bits);
        }
        Self {
            shift: capacity_bits - block_bits,
            offset: 0,
            block_bits,
            cells: Cells::Branch(vacant(1 << block_bits)),
        }
    }

    /// New outer level holding `root` as its first child.
    pub(crate) fn wrap(root: Arc<Self>) -> Self {
        let shift = root.capacity().trailing_zeros();
        let block_bits = root.block_bits;
        Self {
            shift,
            offset: 0,
            block_bits,
            cells: Cells::Branch(vec![Some(root), None]),
        }
    }

    #[inline]
    fn slots(&self) -> usize {
        match &self.cells {
            Cells::Leaf(cells) => cells.len(),
            Cells::Branch(children) => children.len(),
        }
    }

    /// Raw number of positions.
    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.slots() << self.shift
    }

    /// Whether the block has reached the maximum leaf size or fan-out.
    pub(crate) fn is_full_width(&self) -> bool {
        self.slots() >= 1 << self.block_bits
    }

    #[inline]
    fn locate(&self, position: usize) -> (usize, usize) {
        let physical = (position + self.offset) & (self.capacity() - 1);
        (physical >> self.shift, physical & ((1 << self.shift) - 1))
    }

    pub(crate) fn get(&self, position: usize) -> Option<&T> {
        let (slot, local) = self.locate(position);
        match &self.cells {
            Cells::Leaf(cells) => cells[slot].as_ref(),
            Cells::Branch(children) => children[slot].as_deref()?.get(local),
        }
    }

    /// Move every position by `delta` towards the tail, wrapping around.
    #[inline]
    pub(crate) fn rotate(&mut self, delta: isize) {
        self.offset = self.offset.wrapping_add_signed(-delta) & (self.capacity() - 1);
    }

    pub(crate) fn depth(&self) -> usize {
        match &self.cells {
            Cells::Leaf(_) => 1,
            Cells::Branch(children) => {
                1 + children
                    .iter()
                    .flatten()
                    .map(|child| child.depth())
                    .max()
                    .unwrap_or(0)
            }
        }
    }
}

impl<T: Clone> Block<T> {
    pub(crate) fn get_mut(&mut self, position: usize) -> Option<&mut T> {
        let (slot, local) = self.locate(position);
        match &mut self.cells {
            Cells::Leaf(cells) => cells[slot].as_mut(),
            Cells::Branch(children) => Arc::make_mut(children[slot].as_mut()?).get_mut(local),
        }
    }

    /// Store `value` at `position`, returning what was there.
    pub(crate) fn put(&mut self, position: usize, value: Option<T>) -> Option<T> {
        let (slot, local) = self.locate(position);
        let (shift, block_bits) = (self.shift, self.block_bits);
        match &mut self.cells {
            Cells::Leaf(cells) => mem::replace(&mut cells[slot], value),
            Cells::Branch(children) => {
                if children[slot].is_none() {
                    if value.is_none() {
                        return None;
                    }
                    children[slot] = Some(Arc::new(Block::empty(shift, block_bits)));
                }
                let child = children[slot].as_mut()?;
                Arc::make_mut(child).put(local, value)
            }
        }
    }

    #[inline]
    pub(crate) fn take(&mut self, position: usize) -> Option<T> {
        self.put(position, None)
    }

    fn child_mut(&mut self, slot: usize) -> Option<&mut Block<T>> {
        let (shift, block_bits) = (self.shift, self.block_bits);
        match &mut self.cells {
            Cells::Leaf(_) => None,
            Cells::Branch(children) => {
                let child = children[slot].get_or_insert_with(|| Arc::new(Block::empty(shift, block_bits)));
                Some(Arc::make_mut(child))
            }
        }
    }

    /// Move positions `[from, from + count)` one step towards the tail.
    /// Position `from + count` must be vacant; `from` is vacant afterwards.
    pub(crate) fn shift_right(&mut self, from: usize, count: usize) {
        if count == 0 {
            return;
        }
        let mask = self.capacity() - 1;
        let offset = self.offset;
        if let Cells::Leaf(cells) = &mut self.cells {
            for position in (from..from + count).rev() {
                let source = (position + offset) & mask;
                cells[(source + 1) & mask] = cells[source].take();
            }
            return;
        }

        let span = 1usize << self.shift;
        let mut end = from + count;
        while end > from {
            let last = end - 1;
            let (slot, local_last) = self.locate(last);
            let run = (local_last + 1).min(end - from);
            if local_last == span - 1 {
                // The tail element leaves this child for the next one.
                let spilled = self.take(last);
                self.put(last + 1, spilled);
                if let Some(child) = self.child_mut(slot) {
                    if run == span {
                        child.rotate(1);
                    } else {
                        child.shift_right(local_last + 1 - run, run - 1);
                    }
                }
            } else if let Some(child) = self.child_mut(slot) {
                child.shift_right(local_last + 1 - run, run);
            }
            end -= run;
        }
    }

    /// Move positions `[from, from + count)` one step towards the head.
    /// Position `from - 1` must be vacant; `from + count - 1` is vacant
    /// afterwards.
    pub(crate) fn shift_left(&mut self, from: usize, count: usize) {
        if count == 0 {
            return;
        }
        let mask = self.capacity() - 1;
        let offset = self.offset;
        if let Cells::Leaf(cells) = &mut self.cells {
            for position in from..from + count {
                let source = (position + offset) & mask;
                cells[source.wrapping_sub(1) & mask] = cells[source].take();
            }
            return;
        }

        let span = 1usize << self.shift;
        let end = from + count;
        let mut start = from;
        while start < end {
            let (slot, local_first) = self.locate(start);
            let run = (span - local_first).min(end - start);
            if local_first == 0 {
                // The head element leaves this child for the previous one.
                let spilled = self.take(start);
                self.put(start - 1, spilled);
                if let Some(child) = self.child_mut(slot) {
                    if run == span {
                        child.rotate(-1);
                    } else {
                        child.shift_left(1, run - 1);
                    }
                }
            } else if let Some(child) = self.child_mut(slot) {
                child.shift_left(local_first, run);
            }
            start += run;
        }
    }

    /// Block of twice the width holding the first `len` positions of `self`
    /// at offset zero.
    pub(crate) fn widened(&self, len: usize) -> Self {
        let span = 1usize << self.shift;
        if let Cells::Branch(children) = &self.cells {
            if self.offset & (span - 1) == 0 {
                // Child-aligned rotation: reorder the children themselves.
                let n = children.len();
                let start = self.offset >> self.shift;
                let reordered = (0..2 * n)
                    .map(|i| if i < n { children[(start + i) % n].clone() } else { None })
                    .collect();
                return Self {
                    shift: self.shift,
                    offset: 0,
                    block_bits: self.block_bits,
                    cells: Cells::Branch(reordered),
                };
            }
        }
        let cells = match &self.cells {
            Cells::Leaf(cells) => Cells::Leaf(vacant(2 * cells.len())),
            Cells::Branch(children) => Cells::Branch(vacant(2 * children.len())),
        };
        let mut target = Self {
            shift: self.shift,
            offset: 0,
            block_bits: self.block_bits,
            cells,
        };
        for position in 0..len {
            target.put(position, self.get(position).cloned());
        }
        target
    }
}
