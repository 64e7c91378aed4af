//! Iterators over [`FastMap`](super::FastMap) entries.
//!
//! Iteration walks the radix levels with an explicit stack of frames: a frame
//! is either a cursor over one level's sparse array or a run of entries taken
//! from a bucket. Positioned iteration seeds the stack by descending to the
//! slot of the starting key.

use super::level::{Level, Node};
use crate::order::Order;
use crate::sparse::SparseArray;
use std::cmp::Ordering;
use std::iter::FusedIterator;
use std::slice;

enum Frame<'a, K, V, O> {
    Array {
        array: &'a SparseArray<Node<K, V, O>>,
        cursor: Option<u32>,
    },
    Run(slice::Iter<'a, (K, V)>),
}

impl<K, V, O> Clone for Frame<'_, K, V, O> {
    fn clone(&self) -> Self {
        match self {
            Frame::Array { array, cursor } => Frame::Array {
                array: *array,
                cursor: *cursor,
            },
            Frame::Run(run) => Frame::Run(run.clone()),
        }
    }
}

/// Iterator over `(&K, &V)` in ascending or descending key order.
pub struct Iter<'a, K, V, O> {
    stack: Vec<Frame<'a, K, V, O>>,
    descending: bool,
    remaining: Option<usize>,
}

impl<K, V, O> Clone for Iter<'_, K, V, O> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            descending: self.descending,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V, O> Iter<'a, K, V, O> {
    pub(crate) fn new(root: &'a Level<K, V, O>, len: usize, descending: bool) -> Self {
        let start = if descending { u32::MAX } else { 0 };
        Self {
            stack: vec![Frame::Array {
                array: &root.array,
                cursor: Some(start),
            }],
            descending,
            remaining: Some(len),
        }
    }

    fn push_node(&mut self, node: &'a Node<K, V, O>) {
        let frame = match node {
            Node::Entry(entry) => Frame::Run(slice::from_ref(entry).iter()),
            Node::Bucket(bucket) => Frame::Run(bucket.iter()),
            Node::Nested(level) => Frame::Array {
                array: &level.array,
                cursor: Some(if self.descending { u32::MAX } else { 0 }),
            },
        };
        self.stack.push(frame);
    }
}

impl<'a, K, V, O: Order<K>> Iter<'a, K, V, O> {
    /// Entries from `key` onwards in the iteration direction; `inclusive`
    /// keeps entries comparing equal to `key`.
    pub(crate) fn starting_at(root: &'a Level<K, V, O>, key: &K, inclusive: bool, descending: bool) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            descending,
            remaining: None,
        };
        iter.seek(root, key, inclusive);
        iter
    }

    fn seek(&mut self, level: &'a Level<K, V, O>, key: &K, inclusive: bool) {
        let order = &level.order;
        let index = order.index_of(key);
        let descending = self.descending;
        let rest = if descending {
            index.checked_sub(1)
        } else {
            index.checked_add(1)
        };
        self.stack.push(Frame::Array {
            array: &level.array,
            cursor: rest,
        });

        let keep = |c: Ordering| match c {
            Ordering::Equal => inclusive,
            Ordering::Greater => !descending,
            Ordering::Less => descending,
        };
        match level.array.get(index) {
            None => {}
            Some(Node::Entry(entry)) => {
                if keep(order.compare(&entry.0, key)) {
                    self.stack.push(Frame::Run(slice::from_ref(entry).iter()));
                }
            }
            Some(Node::Nested(nested)) => self.seek(nested.as_ref(), key, inclusive),
            Some(Node::Bucket(bucket)) => {
                let split = bucket.partition_point(|(k, _)| match order.compare(k, key) {
                    Ordering::Less => true,
                    Ordering::Equal => inclusive == descending,
                    Ordering::Greater => false,
                });
                let run = if descending { &bucket[..split] } else { &bucket[split..] };
                self.stack.push(Frame::Run(run.iter()));
            }
        }
    }
}

impl<'a, K, V, O> Iterator for Iter<'a, K, V, O> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let descending = self.descending;
            match self.stack.last_mut()? {
                Frame::Run(run) => {
                    let item = if descending { run.next_back() } else { run.next() };
                    match item {
                        Some((k, v)) => {
                            if let Some(remaining) = self.remaining.as_mut() {
                                *remaining = remaining.saturating_sub(1);
                            }
                            return Some((k, v));
                        }
                        None => {
                            self.stack.pop();
                        }
                    }
                }
                Frame::Array { array, cursor } => {
                    let array: &'a SparseArray<Node<K, V, O>> = *array;
                    let found = cursor.and_then(|from| {
                        if descending {
                            array.floor_entry(from)
                        } else {
                            array.ceiling_entry(from)
                        }
                    });
                    match found {
                        Some((index, node)) => {
                            *cursor = if descending {
                                index.checked_sub(1)
                            } else {
                                index.checked_add(1)
                            };
                            self.push_node(node);
                        }
                        None => {
                            self.stack.pop();
                        }
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(remaining) => (remaining, Some(remaining)),
            None => (0, None),
        }
    }
}

impl<K, V, O> FusedIterator for Iter<'_, K, V, O> {}

/// Iterator over the keys of a [`FastMap`](super::FastMap).
pub struct Keys<'a, K, V, O> {
    pub(crate) inner: Iter<'a, K, V, O>,
}

impl<'a, K, V, O> Iterator for Keys<'a, K, V, O> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, O> FusedIterator for Keys<'_, K, V, O> {}

/// Iterator over the values of a [`FastMap`](super::FastMap).
pub struct Values<'a, K, V, O> {
    pub(crate) inner: Iter<'a, K, V, O>,
}

impl<'a, K, V, O> Iterator for Values<'a, K, V, O> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, O> FusedIterator for Values<'_, K, V, O> {}
