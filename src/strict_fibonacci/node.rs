//! Tree nodes and the per-node state queries
//!
//! A node is *active* when its active record is the heap's live record and
//! *passive* otherwise. Whether a node is an active root, passive linkable or
//! in need of a fix-list entry is always derived from the node and its
//! neighbours, never cached.

use super::arena::{ActiveKey, BucketKey, FixKey, NodeKey};
use super::StrictFibonacciHeap;

/// Ordering key of a node: the caller's item plus a heap-unique stamp.
///
/// The stamp breaks ties between equal items so that node keys are strictly
/// ordered and a node can never be linked below one of its own descendants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Key<T> {
    pub(crate) item: T,
    pub(crate) seq: u64,
}

/// Where an active node's rank is stored.
///
/// Nodes that need a fix-list entry reach their bucket through the entry,
/// every other active node points at the bucket directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rank {
    Bucket(BucketKey),
    FixEntry(FixKey),
}

#[derive(Debug)]
pub(crate) struct NodeRecord<T> {
    pub(crate) key: Key<T>,
    pub(crate) parent: Option<NodeKey>,
    /// Leftmost child; the children form a circular ring through `left`/`right`
    pub(crate) left_child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    pub(crate) active: Option<ActiveKey>,
    /// Only meaningful while the node is active
    pub(crate) loss: u32,
    pub(crate) rank: Option<Rank>,
    pub(crate) q_prev: Option<NodeKey>,
    pub(crate) q_next: Option<NodeKey>,
}

impl<T> NodeRecord<T> {
    /// A detached passive node whose sibling ring contains only itself
    pub(crate) fn new(key: Key<T>, this: NodeKey) -> Self {
        Self {
            key,
            parent: None,
            left_child: None,
            left: this,
            right: this,
            active: None,
            loss: 0,
            rank: None,
            q_prev: None,
            q_next: None,
        }
    }
}

impl<T: Ord> StrictFibonacciHeap<T> {
    #[inline]
    pub(super) fn is_active(&self, n: NodeKey) -> bool {
        self.arena.nodes[n]
            .active
            .is_some_and(|a| self.arena.actives[a].flag)
    }

    /// Active with a passive parent (or no parent at all)
    #[inline]
    pub(super) fn is_active_root(&self, n: NodeKey) -> bool {
        self.is_active(n)
            && self.arena.nodes[n]
                .parent
                .map_or(true, |p| !self.is_active(p))
    }

    /// Passive with no active child. Active children sit leftmost, so looking
    /// at the leftmost child is enough.
    #[inline]
    pub(super) fn is_passive_linkable(&self, n: NodeKey) -> bool {
        !self.is_active(n)
            && self.arena.nodes[n]
                .left_child
                .map_or(true, |c| !self.is_active(c))
    }

    /// Active roots and active nodes with positive loss belong in the fix-list
    #[inline]
    pub(super) fn needs_fix(&self, n: NodeKey) -> bool {
        self.is_active(n) && (self.is_active_root(n) || self.arena.nodes[n].loss > 0)
    }

    /// The bucket an active node's rank resolves to
    pub(super) fn bucket_of(&self, n: NodeKey) -> Option<BucketKey> {
        match self.arena.nodes[n].rank? {
            Rank::Bucket(b) => Some(b),
            Rank::FixEntry(e) => Some(self.arena.fixes[e].bucket),
        }
    }

    pub(super) fn rank_of(&self, n: NodeKey) -> Option<usize> {
        if !self.is_active(n) {
            return None;
        }
        self.bucket_of(n)
            .map(|b| usize::from(self.arena.buckets[b].number))
    }

    pub(super) fn loss_of(&self, n: NodeKey) -> Option<u32> {
        self.is_active(n).then(|| self.arena.nodes[n].loss)
    }

    #[inline]
    pub(super) fn key_less(&self, a: NodeKey, b: NodeKey) -> bool {
        self.arena.nodes[a].key < self.arena.nodes[b].key
    }

    /// The smaller and the larger of two nodes
    pub(super) fn order_pair(&self, a: NodeKey, b: NodeKey) -> (NodeKey, NodeKey) {
        if self.key_less(b, a) {
            (b, a)
        } else {
            (a, b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_orders_by_item_then_stamp() {
        let a = Key { item: 5, seq: 9 };
        let b = Key { item: 5, seq: 10 };
        let c = Key { item: 4, seq: 100 };

        assert!(a < b);
        assert!(c < a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_singleton_node_is_passive_linkable() {
        let heap = StrictFibonacciHeap::from_items([3]);
        let root = heap.record.root.unwrap();

        assert!(!heap.is_active(root));
        assert!(!heap.is_active_root(root));
        assert!(heap.is_passive_linkable(root));
        assert!(!heap.needs_fix(root));
        assert_eq!(heap.rank_of(root), None);
        assert_eq!(heap.loss_of(root), None);
    }
}
