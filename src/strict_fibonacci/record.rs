//! Heap record plus the two circular structures threaded through the nodes:
//! sibling rings and the extract-min queue.

use smallvec::SmallVec;

use super::arena::{ActiveKey, BucketKey, FixKey, NodeKey};
use super::StrictFibonacciHeap;

/// Per-heap bookkeeping
#[derive(Debug)]
pub(crate) struct HeapRecord {
    pub(crate) root: Option<NodeKey>,
    pub(crate) size: usize,
    pub(crate) active: ActiveKey,
    /// The rank 0 bucket
    pub(crate) rank_list: Option<BucketKey>,
    /// Head of each fix-list part, indexed by [`Part::index`](super::fix_list::Part::index)
    pub(crate) parts: [Option<FixKey>; 4],
    pub(crate) q_head: Option<NodeKey>,
    /// Rightmost root child that is not passive linkable
    pub(crate) non_linkable_child: Option<NodeKey>,
}

impl HeapRecord {
    pub(crate) fn new(active: ActiveKey) -> Self {
        Self {
            root: None,
            size: 0,
            active,
            rank_list: None,
            parts: [None; 4],
            q_head: None,
            non_linkable_child: None,
        }
    }

    pub(crate) fn singleton(root: NodeKey, active: ActiveKey) -> Self {
        Self {
            root: Some(root),
            size: 1,
            ..Self::new(active)
        }
    }
}

pub(crate) type ChildList = SmallVec<[NodeKey; 16]>;

impl<T: Ord> StrictFibonacciHeap<T> {
    fn ring_insert_before(&mut self, x: NodeKey, anchor: NodeKey) {
        let prev = self.arena.nodes[anchor].left;
        self.arena.nodes[x].left = prev;
        self.arena.nodes[x].right = anchor;
        self.arena.nodes[prev].right = x;
        self.arena.nodes[anchor].left = x;
    }

    fn ring_insert_after(&mut self, x: NodeKey, anchor: NodeKey) {
        let next = self.arena.nodes[anchor].right;
        self.arena.nodes[x].left = anchor;
        self.arena.nodes[x].right = next;
        self.arena.nodes[anchor].right = x;
        self.arena.nodes[next].left = x;
    }

    /// Remove `x` from its parent's child ring
    pub(super) fn detach_child(&mut self, x: NodeKey) {
        let node = &self.arena.nodes[x];
        let (left, right, parent) = (node.left, node.right, node.parent);
        if let Some(p) = parent {
            if self.arena.nodes[p].left_child == Some(x) {
                self.arena.nodes[p].left_child = (right != x).then_some(right);
            }
        }
        if left != x {
            self.arena.nodes[left].right = right;
            self.arena.nodes[right].left = left;
        }
        let node = &mut self.arena.nodes[x];
        node.left = x;
        node.right = x;
        node.parent = None;
    }

    pub(super) fn attach_leftmost(&mut self, x: NodeKey, parent: NodeKey) {
        if let Some(first) = self.arena.nodes[parent].left_child {
            self.ring_insert_before(x, first);
        }
        self.arena.nodes[parent].left_child = Some(x);
        self.arena.nodes[x].parent = Some(parent);
    }

    pub(super) fn attach_rightmost(&mut self, x: NodeKey, parent: NodeKey) {
        match self.arena.nodes[parent].left_child {
            Some(first) => self.ring_insert_before(x, first),
            None => self.arena.nodes[parent].left_child = Some(x),
        }
        self.arena.nodes[x].parent = Some(parent);
    }

    pub(super) fn attach_after(&mut self, x: NodeKey, sibling: NodeKey) {
        self.ring_insert_after(x, sibling);
        self.arena.nodes[x].parent = self.arena.nodes[sibling].parent;
    }

    /// Left sibling of `x`, or `None` when `x` is its parent's leftmost child
    pub(super) fn left_sibling(&self, x: NodeKey) -> Option<NodeKey> {
        let node = &self.arena.nodes[x];
        let parent = node.parent?;
        (self.arena.nodes[parent].left_child != Some(x)).then_some(node.left)
    }

    pub(super) fn rightmost_child(&self, p: NodeKey) -> Option<NodeKey> {
        self.arena.nodes[p]
            .left_child
            .map(|first| self.arena.nodes[first].left)
    }

    pub(super) fn children(&self, p: NodeKey) -> ChildList {
        let mut out = ChildList::new();
        let Some(first) = self.arena.nodes[p].left_child else {
            return out;
        };
        let mut c = first;
        loop {
            out.push(c);
            c = self.arena.nodes[c].right;
            if c == first {
                return out;
            }
        }
    }

    pub(super) fn degree(&self, p: NodeKey) -> usize {
        self.children(p).len()
    }

    /// Append `x` at the back of the queue
    #[cfg(test)]
    pub(super) fn queue_push_back(&mut self, x: NodeKey) {
        match self.record.q_head {
            Some(head) => {
                let tail = self.arena.nodes[head].q_prev.unwrap_or(head);
                self.arena.nodes[x].q_prev = Some(tail);
                self.arena.nodes[x].q_next = Some(head);
                self.arena.nodes[tail].q_next = Some(x);
                self.arena.nodes[head].q_prev = Some(x);
            }
            None => {
                self.arena.nodes[x].q_prev = Some(x);
                self.arena.nodes[x].q_next = Some(x);
                self.record.q_head = Some(x);
            }
        }
    }

    pub(super) fn queue_remove(&mut self, x: NodeKey) {
        let node = &mut self.arena.nodes[x];
        let (Some(prev), Some(next)) = (node.q_prev.take(), node.q_next.take()) else {
            return;
        };
        if next == x {
            self.record.q_head = None;
            return;
        }
        self.arena.nodes[prev].q_next = Some(next);
        self.arena.nodes[next].q_prev = Some(prev);
        if self.record.q_head == Some(x) {
            self.record.q_head = Some(next);
        }
    }

    /// Move the head of the queue to the back and return it
    pub(super) fn queue_rotate(&mut self) -> Option<NodeKey> {
        let head = self.record.q_head?;
        self.record.q_head = self.arena.nodes[head].q_next;
        Some(head)
    }

    /// Concatenate queue `front`, node `middle` and queue `back`; returns the
    /// new head
    pub(super) fn queue_splice(
        &mut self,
        front: Option<NodeKey>,
        middle: NodeKey,
        back: Option<NodeKey>,
    ) -> NodeKey {
        self.arena.nodes[middle].q_prev = Some(middle);
        self.arena.nodes[middle].q_next = Some(middle);

        if let Some(b) = back {
            let tail = self.arena.nodes[b].q_prev.unwrap_or(b);
            self.arena.nodes[middle].q_next = Some(b);
            self.arena.nodes[b].q_prev = Some(middle);
            self.arena.nodes[tail].q_next = Some(middle);
            self.arena.nodes[middle].q_prev = Some(tail);
        }

        let Some(a) = front else {
            return middle;
        };
        let front_tail = self.arena.nodes[a].q_prev.unwrap_or(a);
        let back_tail = self.arena.nodes[middle].q_prev.unwrap_or(middle);
        self.arena.nodes[front_tail].q_next = Some(middle);
        self.arena.nodes[middle].q_prev = Some(front_tail);
        self.arena.nodes[back_tail].q_next = Some(a);
        self.arena.nodes[a].q_prev = Some(back_tail);
        a
    }

    /// Queue contents from head to tail
    pub(super) fn queue_nodes(&self) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let Some(head) = self.record.q_head else {
            return out;
        };
        let mut x = head;
        loop {
            out.push(x);
            match self.arena.nodes[x].q_next {
                Some(next) if next != head => x = next,
                _ => return out,
            }
        }
    }
}
