//! Read-only views of the heap's internal structure, for tests and debugging

use std::fmt;

use super::arena::{BucketKey, FixKey, NodeKey};
use super::fix_list::Part;
use super::StrictFibonacciHeap;

/// Borrowed view of a heap's structure
pub struct HeapView<'a, T> {
    heap: &'a StrictFibonacciHeap<T>,
}

/// Borrowed view of one node
pub struct NodeView<'a, T> {
    heap: &'a StrictFibonacciHeap<T>,
    key: NodeKey,
}

impl<T> Clone for NodeView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeView<'_, T> {}

impl<T> PartialEq for NodeView<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.heap, other.heap) && self.key == other.key
    }
}

impl<T> Eq for NodeView<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for NodeView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NodeView")
            .field(&self.heap.arena.nodes[self.key].key.item)
            .finish()
    }
}

/// One fix-list entry
#[derive(Debug)]
pub struct FixEntryView<'a, T> {
    pub part: Part,
    pub rank: usize,
    pub node: NodeView<'a, T>,
}

/// One bucket of the rank list
#[derive(Debug)]
pub struct BucketView<'a, T> {
    pub rank: usize,
    pub ref_count: u32,
    pub active_root: Option<NodeView<'a, T>>,
    pub loss: Option<NodeView<'a, T>>,
}

impl<'a, T: Ord> HeapView<'a, T> {
    pub(super) fn new(heap: &'a StrictFibonacciHeap<T>) -> Self {
        Self { heap }
    }

    fn node(&self, key: NodeKey) -> NodeView<'a, T> {
        NodeView {
            heap: self.heap,
            key,
        }
    }

    pub fn root(&self) -> Option<NodeView<'a, T>> {
        self.heap.record.root.map(|k| self.node(k))
    }

    pub fn len(&self) -> usize {
        self.heap.record.size
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every node of the heap, in arena order
    pub fn nodes(&self) -> impl Iterator<Item = NodeView<'a, T>> + '_ {
        self.heap.arena.nodes.keys().map(|k| self.node(k))
    }

    /// First node holding `item`, if any
    pub fn find(&self, item: &T) -> Option<NodeView<'a, T>> {
        self.nodes().find(|n| n.item() == item)
    }

    /// Rightmost root child that is not passive linkable
    pub fn non_linkable_child(&self) -> Option<NodeView<'a, T>> {
        self.heap.record.non_linkable_child.map(|k| self.node(k))
    }

    /// The extract-min queue from head to tail
    pub fn queue(&self) -> Vec<NodeView<'a, T>> {
        self.heap
            .queue_nodes()
            .into_iter()
            .map(|k| self.node(k))
            .collect()
    }

    fn fix_entry(&self, e: FixKey) -> FixEntryView<'a, T> {
        let entry = &self.heap.arena.fixes[e];
        FixEntryView {
            part: entry.part,
            rank: usize::from(self.heap.arena.buckets[entry.bucket].number),
            node: self.node(entry.node),
        }
    }

    /// The fix-list in order
    pub fn fix_list(&self) -> Vec<FixEntryView<'a, T>> {
        self.heap
            .fix_entries()
            .into_iter()
            .map(|e| self.fix_entry(e))
            .collect()
    }

    /// Head of each fix-list part
    pub fn part_head(&self, part: Part) -> Option<FixEntryView<'a, T>> {
        self.heap.record.parts[part.index()].map(|e| self.fix_entry(e))
    }

    /// First entry of the single parts
    pub fn singles(&self) -> Option<FixEntryView<'a, T>> {
        self.heap.fix_singles().map(|e| self.fix_entry(e))
    }

    fn bucket(&self, b: BucketKey) -> BucketView<'a, T> {
        let bucket = &self.heap.arena.buckets[b];
        let rep = |e: Option<FixKey>| e.map(|e| self.node(self.heap.arena.fixes[e].node));
        BucketView {
            rank: usize::from(bucket.number),
            ref_count: bucket.ref_count,
            active_root: rep(bucket.active_roots),
            loss: rep(bucket.loss),
        }
    }

    /// The rank list from rank 0 upwards
    pub fn rank_list(&self) -> Vec<BucketView<'a, T>> {
        let mut out = Vec::new();
        let mut cursor = self.heap.record.rank_list;
        while let Some(b) = cursor {
            out.push(self.bucket(b));
            cursor = self.heap.arena.buckets[b].inc;
        }
        out
    }

    /// Bucket holding `rank`, if the list currently has one
    pub fn rank_bucket(&self, rank: usize) -> Option<BucketView<'a, T>> {
        self.rank_list().into_iter().find(|b| b.rank == rank)
    }
}

impl<'a, T: Ord> NodeView<'a, T> {
    pub fn item(&self) -> &'a T {
        &self.heap.arena.nodes[self.key].key.item
    }

    pub fn is_active(&self) -> bool {
        self.heap.is_active(self.key)
    }

    pub fn is_passive(&self) -> bool {
        !self.is_active()
    }

    pub fn is_active_root(&self) -> bool {
        self.heap.is_active_root(self.key)
    }

    pub fn is_passive_linkable(&self) -> bool {
        self.heap.is_passive_linkable(self.key)
    }

    /// Number of active children; `None` for passive nodes
    pub fn rank(&self) -> Option<usize> {
        self.heap.rank_of(self.key)
    }

    /// `None` for passive nodes
    pub fn loss(&self) -> Option<u32> {
        self.heap.loss_of(self.key)
    }

    pub fn parent(&self) -> Option<NodeView<'a, T>> {
        self.heap.arena.nodes[self.key].parent.map(|key| NodeView {
            heap: self.heap,
            key,
        })
    }

    /// Children from left to right
    pub fn children(&self) -> Vec<NodeView<'a, T>> {
        self.heap
            .children(self.key)
            .into_iter()
            .map(|key| NodeView {
                heap: self.heap,
                key,
            })
            .collect()
    }

    pub fn degree(&self) -> usize {
        self.heap.degree(self.key)
    }

    /// Whether the node currently has a fix-list entry
    pub fn in_fix_list(&self) -> bool {
        matches!(
            self.heap.arena.nodes[self.key].rank,
            Some(super::node::Rank::FixEntry(_))
        )
    }
}

impl<T: Ord + fmt::Debug> HeapView<'_, T> {
    /// Human-readable dump of the fix-list, one entry per line
    pub fn describe_fix_list(&self) -> String {
        let mut out = String::new();
        for entry in self.fix_list() {
            out.push_str(&format!(
                "{:?} rank={} loss={} item={:?}\n",
                entry.part,
                entry.rank,
                entry.node.loss().unwrap_or(0),
                entry.node.item()
            ));
        }
        out
    }

    /// Human-readable dump of the rank list, one bucket per line
    pub fn describe_rank_list(&self) -> String {
        let mut out = String::new();
        for bucket in self.rank_list() {
            out.push_str(&format!(
                "rank={} refs={} active_root={:?} loss={:?}\n",
                bucket.rank,
                bucket.ref_count,
                bucket.active_root.map(|n| n.item()),
                bucket.loss.map(|n| n.item())
            ));
        }
        out
    }
}
