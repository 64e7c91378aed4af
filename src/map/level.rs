//! One radix level of a [`FastMap`](super::FastMap).
//!
//! A level owns an order and a sparse array indexed by that order. Each
//! occupied slot holds a single entry, a nested level built from the order's
//! `sub_order`, or a bucket of entries the order cannot separate any further.
//! Buckets stay sorted by `compare`; ties keep insertion order.

use crate::order::Order;
use crate::sparse::SparseArray;
use std::cmp::Ordering;
use std::mem;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub(crate) enum Node<K, V, O> {
    Entry((K, V)),
    Nested(Arc<Level<K, V, O>>),
    Bucket(Vec<(K, V)>),
}

impl<K, V, O> Node<K, V, O> {
    pub(crate) fn first(&self) -> Option<(&K, &V)> {
        match self {
            Node::Entry((k, v)) => Some((k, v)),
            Node::Nested(level) => level.first(),
            Node::Bucket(bucket) => bucket.first().map(|(k, v)| (k, v)),
        }
    }

    pub(crate) fn last(&self) -> Option<(&K, &V)> {
        match self {
            Node::Entry((k, v)) => Some((k, v)),
            Node::Nested(level) => level.last(),
            Node::Bucket(bucket) => bucket.last().map(|(k, v)| (k, v)),
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Level<K, V, O> {
    pub(crate) order: O,
    pub(crate) array: SparseArray<Node<K, V, O>>,
}

/// Position of `key` in a sorted bucket: `Ok` when an equal key is stored,
/// otherwise `Err` with the insertion point after every tie.
fn bucket_find<K, V, O: Order<K>>(order: &O, bucket: &[(K, V)], key: &K) -> Result<usize, usize> {
    let mut i = bucket.partition_point(|(k, _)| order.compare(k, key) == Ordering::Less);
    while i < bucket.len() && order.compare(&bucket[i].0, key) == Ordering::Equal {
        if order.are_equal(&bucket[i].0, key) {
            return Ok(i);
        }
        i += 1;
    }
    Err(i)
}

impl<K, V, O> Level<K, V, O> {
    pub(crate) fn new(order: O) -> Self {
        Self {
            order,
            array: SparseArray::new(),
        }
    }

    pub(crate) fn first(&self) -> Option<(&K, &V)> {
        self.array.first().and_then(|(_, node)| node.first())
    }

    pub(crate) fn last(&self) -> Option<(&K, &V)> {
        self.array.last().and_then(|(_, node)| node.last())
    }

    fn after_slot(&self, index: u32) -> Option<(&K, &V)> {
        index
            .checked_add(1)
            .and_then(|from| self.array.ceiling_entry(from))
            .and_then(|(_, node)| node.first())
    }

    fn before_slot(&self, index: u32) -> Option<(&K, &V)> {
        index
            .checked_sub(1)
            .and_then(|from| self.array.floor_entry(from))
            .and_then(|(_, node)| node.last())
    }
}

impl<K, V, O: Order<K>> Level<K, V, O> {
    pub(crate) fn get(&self, key: &K) -> Option<(&K, &V)> {
        let mut level = self;
        loop {
            match level.array.get(level.order.index_of(key))? {
                Node::Entry((k, v)) => return level.order.are_equal(k, key).then_some((k, v)),
                Node::Nested(nested) => level = nested.as_ref(),
                Node::Bucket(bucket) => {
                    let i = bucket_find(&level.order, bucket, key).ok()?;
                    let (k, v) = &bucket[i];
                    return Some((k, v));
                }
            }
        }
    }

    /// Smallest entry comparing greater than `key` (or equal, if `inclusive`).
    pub(crate) fn ceiling(&self, key: &K, inclusive: bool) -> Option<(&K, &V)> {
        let order = &self.order;
        let index = order.index_of(key);
        let within = self.array.get(index).and_then(|node| match node {
            Node::Entry((k, v)) => {
                let c = order.compare(k, key);
                (c == Ordering::Greater || (inclusive && c == Ordering::Equal)).then_some((k, v))
            }
            Node::Nested(nested) => nested.ceiling(key, inclusive),
            Node::Bucket(bucket) => {
                let i = bucket.partition_point(|(k, _)| match order.compare(k, key) {
                    Ordering::Less => true,
                    Ordering::Equal => !inclusive,
                    Ordering::Greater => false,
                });
                bucket.get(i).map(|(k, v)| (k, v))
            }
        });
        within.or_else(|| self.after_slot(index))
    }

    /// Largest entry comparing less than `key` (or equal, if `inclusive`).
    pub(crate) fn floor(&self, key: &K, inclusive: bool) -> Option<(&K, &V)> {
        let order = &self.order;
        let index = order.index_of(key);
        let within = self.array.get(index).and_then(|node| match node {
            Node::Entry((k, v)) => {
                let c = order.compare(k, key);
                (c == Ordering::Less || (inclusive && c == Ordering::Equal)).then_some((k, v))
            }
            Node::Nested(nested) => nested.floor(key, inclusive),
            Node::Bucket(bucket) => {
                let i = bucket.partition_point(|(k, _)| match order.compare(k, key) {
                    Ordering::Less => true,
                    Ordering::Equal => inclusive,
                    Ordering::Greater => false,
                });
                i.checked_sub(1).map(|i| {
                    let (k, v) = &bucket[i];
                    (k, v)
                })
            }
        });
        within.or_else(|| self.before_slot(index))
    }

    /// Entry following `key` in ascending iteration order. Unlike
    /// [`ceiling`](Self::ceiling) this steps over collision siblings one by one.
    pub(crate) fn successor(&self, key: &K) -> Option<(&K, &V)> {
        let order = &self.order;
        let index = order.index_of(key);
        let within = self.array.get(index).and_then(|node| match node {
            Node::Entry((k, v)) => {
                (!order.are_equal(k, key) && order.compare(k, key) == Ordering::Greater).then_some((k, v))
            }
            Node::Nested(nested) => nested.successor(key),
            Node::Bucket(bucket) => {
                let i = match bucket_find(order, bucket, key) {
                    Ok(i) => i + 1,
                    Err(i) => i,
                };
                bucket.get(i).map(|(k, v)| (k, v))
            }
        });
        within.or_else(|| self.after_slot(index))
    }

    /// Entry preceding `key` in ascending iteration order.
    pub(crate) fn predecessor(&self, key: &K) -> Option<(&K, &V)> {
        let order = &self.order;
        let index = order.index_of(key);
        let within = self.array.get(index).and_then(|node| match node {
            Node::Entry((k, v)) => {
                (!order.are_equal(k, key) && order.compare(k, key) == Ordering::Less).then_some((k, v))
            }
            Node::Nested(nested) => nested.predecessor(key),
            Node::Bucket(bucket) => {
                let i = match bucket_find(order, bucket, key) {
                    Ok(i) => i,
                    Err(_) => bucket.partition_point(|(k, _)| order.compare(k, key) == Ordering::Less),
                };
                i.checked_sub(1).map(|i| {
                    let (k, v) = &bucket[i];
                    (k, v)
                })
            }
        });
        within.or_else(|| self.before_slot(index))
    }
}

impl<K: Clone, V: Clone, O: Order<K>> Level<K, V, O> {
    /// Mutable value for `key`. Unshares every node on the path, so callers
    /// look the key up first.
    pub(crate) fn value_mut(&mut self, key: &K) -> Option<&mut V> {
        let order = &self.order;
        match self.array.get_mut(order.index_of(key))? {
            Node::Entry((k, v)) => order.are_equal(k, key).then_some(v),
            Node::Nested(nested) => Arc::make_mut(nested).value_mut(key),
            Node::Bucket(bucket) => {
                let i = bucket_find(order, bucket, key).ok()?;
                Some(&mut bucket[i].1)
            }
        }
    }

    /// Insert or replace. A replaced entry keeps its original key.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let order = &self.order;
        let index = order.index_of(&key);
        let Some(node) = self.array.get_mut(index) else {
            self.array.insert(index, Node::Entry((key, value)));
            return None;
        };
        match node {
            Node::Entry((k, v)) => {
                if order.are_equal(k, &key) {
                    return Some(mem::replace(v, value));
                }
            }
            Node::Nested(nested) => return Arc::make_mut(nested).insert(key, value),
            Node::Bucket(bucket) => {
                return match bucket_find(order, bucket, &key) {
                    Ok(i) => Some(mem::replace(&mut bucket[i].1, value)),
                    Err(i) => {
                        bucket.insert(i, (key, value));
                        None
                    }
                };
            }
        }
        // Two distinct keys share this slot.
        if let Node::Entry(existing) = mem::replace(node, Node::Bucket(Vec::new())) {
            *node = Self::split(order, existing, (key, value));
        }
        None
    }

    fn split(order: &O, existing: (K, V), entry: (K, V)) -> Node<K, V, O> {
        match order.sub_order(&entry.0) {
            Some(sub) => {
                log::trace!("map slot {:#x} nests a sub-level", order.index_of(&entry.0));
                let mut level = Level::new(sub);
                level.insert(existing.0, existing.1);
                level.insert(entry.0, entry.1);
                Node::Nested(Arc::new(level))
            }
            None => {
                let mut bucket = vec![existing];
                if let Err(i) = bucket_find(order, &bucket, &entry.0) {
                    bucket.insert(i, entry);
                }
                Node::Bucket(bucket)
            }
        }
    }

    /// Remove `key`. Unshares every node on the path, so callers look the key
    /// up first.
    pub(crate) fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let index = self.order.index_of(key);
        let node = self.array.get_mut(index)?;
        let removed = match node {
            Node::Entry((k, _)) => {
                if !self.order.are_equal(k, key) {
                    return None;
                }
                return match self.array.remove(index) {
                    Some(Node::Entry(entry)) => Some(entry),
                    _ => None,
                };
            }
            Node::Nested(nested) => {
                let nested = Arc::make_mut(nested);
                let removed = nested.remove(key)?;
                if let Some(single) = nested.take_single_entry() {
                    *node = Node::Entry(single);
                }
                removed
            }
            Node::Bucket(bucket) => {
                let i = bucket_find(&self.order, bucket, key).ok()?;
                let removed = bucket.remove(i);
                if bucket.len() == 1 {
                    if let Some(single) = bucket.pop() {
                        *node = Node::Entry(single);
                    }
                }
                removed
            }
        };
        Some(removed)
    }

    fn take_single_entry(&mut self) -> Option<(K, V)> {
        if self.array.len() != 1 {
            return None;
        }
        let (index, node) = self.array.first()?;
        if !matches!(node, Node::Entry(_)) {
            return None;
        }
        match self.array.remove(index) {
            Some(Node::Entry(entry)) => Some(entry),
            _ => None,
        }
    }
}
