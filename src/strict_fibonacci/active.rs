//! Shared active records
//!
//! Every active node points at the active record of the heap it belongs to.
//! Clearing the record's flag turns all of those nodes passive at once, which
//! is what lets meld demote a whole heap in O(1).
//!
//! A node demoted this way keeps its record, rank and loss until it is touched
//! again. [`StrictFibonacciHeap::release_stale`] drops that leftover state the
//! first time the node is activated, promoted to root or removed.

use super::arena::{ActiveKey, NodeKey};
use super::node::Rank;
use super::StrictFibonacciHeap;

#[derive(Debug)]
pub(crate) struct ActiveRecord {
    pub(crate) flag: bool,
    /// Number of nodes that point at this record
    pub(crate) ref_count: u32,
}

impl<T: Ord> StrictFibonacciHeap<T> {
    pub(super) fn new_active_record(&mut self) -> ActiveKey {
        self.arena.actives.insert(ActiveRecord {
            flag: true,
            ref_count: 0,
        })
    }

    /// Demote every node of a record in one step
    pub(super) fn deactivate_record(&mut self, active: ActiveKey) {
        let record = &mut self.arena.actives[active];
        record.flag = false;
        if record.ref_count == 0 {
            self.arena.actives.remove(active);
        }
    }

    fn release_active(&mut self, active: ActiveKey) {
        let record = &mut self.arena.actives[active];
        record.ref_count -= 1;
        if record.ref_count == 0 && !record.flag {
            self.arena.actives.remove(active);
        }
    }

    /// Drop the state a node kept from a heap that was melded away.
    ///
    /// The record, buckets and fix entry it refers to belong to a structure
    /// nothing else consults any more, so they are freed without unlinking.
    pub(super) fn release_stale(&mut self, n: NodeKey) {
        let Some(active) = self.arena.nodes[n].active else {
            return;
        };
        if self.arena.actives[active].flag {
            return;
        }

        let node = &mut self.arena.nodes[n];
        let rank = node.rank.take();
        node.active = None;
        node.loss = 0;

        let bucket = match rank {
            Some(Rank::Bucket(b)) => Some(b),
            Some(Rank::FixEntry(e)) => self.arena.fixes.remove(e).map(|f| f.bucket),
            None => None,
        };
        if let Some(b) = bucket {
            self.release_stale_bucket(b);
        }
        self.release_active(active);
    }

    /// Make a passive node an active node of rank 0 and loss 0
    pub(super) fn activate(&mut self, n: NodeKey) {
        self.release_stale(n);
        if self.is_active(n) {
            return;
        }

        let active = self.record.active;
        self.arena.actives[active].ref_count += 1;
        let zero = self.zero_bucket();
        self.retain_bucket(zero);

        let node = &mut self.arena.nodes[n];
        node.active = Some(active);
        node.loss = 0;
        node.rank = Some(Rank::Bucket(zero));
        self.sync_fix(n);
    }

    /// Turn a live active node passive. Its active children become active
    /// roots.
    pub(super) fn make_passive(&mut self, n: NodeKey) {
        if !self.is_active(n) {
            return;
        }

        let bucket = match self.arena.nodes[n].rank.take() {
            Some(Rank::Bucket(b)) => Some(b),
            Some(Rank::FixEntry(e)) => {
                self.fix_remove(e);
                self.arena.fixes.remove(e).map(|f| f.bucket)
            }
            None => None,
        };
        if let Some(b) = bucket {
            self.release_bucket(b);
        }

        let node = &mut self.arena.nodes[n];
        let active = node.active.take();
        node.loss = 0;
        if let Some(a) = active {
            self.release_active(a);
        }

        // Active children form a prefix of the ring
        let Some(first) = self.arena.nodes[n].left_child else {
            return;
        };
        let mut child = first;
        while self.is_active(child) {
            self.arena.nodes[child].loss = 0;
            self.sync_fix(child);
            child = self.arena.nodes[child].right;
            if child == first {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deactivate_unreferenced_record_frees_it() {
        let mut heap: StrictFibonacciHeap<i32> = StrictFibonacciHeap::new();
        let before = heap.arena.actives.len();

        let key = heap.new_active_record();
        assert_eq!(heap.arena.actives.len(), before + 1);

        heap.deactivate_record(key);
        assert_eq!(heap.arena.actives.len(), before);
    }

    #[test]
    fn test_deactivate_referenced_record_keeps_it_until_released() {
        let mut heap: StrictFibonacciHeap<i32> = StrictFibonacciHeap::new();
        let key = heap.new_active_record();
        heap.arena.actives[key].ref_count = 2;

        heap.deactivate_record(key);
        assert!(!heap.arena.actives[key].flag);

        heap.release_active(key);
        assert!(heap.arena.actives.get(key).is_some());
        heap.release_active(key);
        assert!(heap.arena.actives.get(key).is_none());
    }
}
