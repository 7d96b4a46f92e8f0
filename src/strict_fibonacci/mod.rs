//! Strict Fibonacci Heap implementation
//!
//! A strict Fibonacci heap (Brodal, Lagogiannis and Tarjan, 2012) achieves the
//! Fibonacci heap bounds in the worst case rather than amortized:
//! - O(1) worst-case insert, find_min, decrease_key and meld
//! - O(log n) worst-case extract_min
//!
//! The heap is a single tree. Nodes are *active* or *passive*; every active
//! node carries a rank (its number of active children) and a loss (active
//! children it lost since it last became an active root). Four local
//! transformations keep the structure in shape:
//!
//! - **active-root reduction** links two active roots of equal rank
//! - **root-degree reduction** turns three passive leaves of the root into a
//!   small active tree
//! - **one-node loss reduction** promotes a node with loss >= 2
//! - **two-node loss reduction** links two loss-1 nodes of equal rank
//!
//! Candidates for all of them are found in O(1) through the fix-list and the
//! rank list. Each operation performs a fixed number of transformations,
//! except extract-min which runs them until none applies.
//!
//! Items are their own keys: [`decrease_key`](StrictFibonacciHeap::decrease_key)
//! names the item to replace, and a side table maps items to nodes. Equal items
//! may be stored more than once; ties are broken by insertion order.

mod active;
mod arena;
mod fix_list;
mod node;
mod rank_list;
mod record;
mod sanity;
mod transform;
mod view;

pub use fix_list::Part;
pub use sanity::InvariantViolation;
pub use view::{BucketView, FixEntryView, HeapView, NodeView};

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use slotmap::SecondaryMap;
use smallvec::SmallVec;

use crate::tracing_helpers::debug_log;
use crate::traits::{HeapError, MinHeap};
use arena::{Arena, NodeKey};
use node::{Key, NodeRecord};
use record::HeapRecord;
use transform::ReductionBudget;

/// Queue heads processed by one extract-min
const QUEUE_STEPS: usize = 2;

/// Strict Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use strict_fibonacci_heap::StrictFibonacciHeap;
///
/// let mut heap = StrictFibonacciHeap::new();
/// heap.insert(7);
/// heap.insert(3);
/// heap.insert(9);
/// heap.decrease_key(&9, 1).unwrap();
///
/// assert_eq!(heap.peek(), Some(&1));
/// assert_eq!(heap.extract_min(), Ok(1));
/// assert_eq!(heap.extract_min(), Ok(3));
/// assert_eq!(heap.len(), 1);
/// ```
pub struct StrictFibonacciHeap<T> {
    arena: Arena<T>,
    record: HeapRecord,
    lookup: FxHashMap<T, SmallVec<[NodeKey; 1]>>,
    next_seq: u64,
}

impl<T> StrictFibonacciHeap<T> {
    pub fn new() -> Self {
        Self::with_arena(Arena::new())
    }

    /// An empty heap with room for `capacity` items before reallocating
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_arena(Arena::with_capacity(capacity))
    }

    fn with_arena(mut arena: Arena<T>) -> Self {
        let active = arena.actives.insert(active::ActiveRecord {
            flag: true,
            ref_count: 0,
        });
        Self {
            arena,
            record: HeapRecord::new(active),
            lookup: FxHashMap::default(),
            next_seq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.record.size
    }

    pub fn is_empty(&self) -> bool {
        self.record.size == 0
    }

    /// The minimum item, without removing it
    pub fn peek(&self) -> Option<&T> {
        self.record.root.map(|r| &self.arena.nodes[r].key.item)
    }

    fn stamp(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }
}

impl<T> Default for StrictFibonacciHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> StrictFibonacciHeap<T> {
    /// Read-only view of the internal structure
    pub fn view(&self) -> HeapView<'_, T> {
        HeapView::new(self)
    }

    /// Meld a heap record living in this heap's arena into the current one.
    /// The record of the larger heap survives; the other heap's nodes are
    /// turned passive in one step.
    fn meld_record(&mut self, mut other: HeapRecord) {
        if other.size > self.record.size {
            std::mem::swap(&mut self.record, &mut other);
        }
        self.deactivate_record(other.active);
        if let Some(zero) = other.rank_list {
            if self.arena.buckets[zero].ref_count == 0 {
                self.arena.buckets.remove(zero);
            }
        }

        let (Some(kept), Some(joined)) = (self.record.root, other.root) else {
            if self.record.root.is_none() {
                self.record.root = other.root;
                self.record.q_head = other.q_head;
                self.record.size = other.size;
            }
            return;
        };

        let (u, v) = self.order_pair(kept, joined);
        if u != kept {
            // The new root's children all belong to the demoted heap
            self.record.root = Some(u);
            self.record.non_linkable_child = None;
        }
        self.link(v, u);

        let head = self.queue_splice(other.q_head, v, self.record.q_head);
        self.record.q_head = Some(head);
        self.record.size += other.size;
    }

    /// Replace the root by its smallest child and restore the structure
    fn promote_min_child(&mut self, old_root: NodeKey) {
        let children = self.children(old_root);
        let Some(&x) = children
            .iter()
            .min_by(|&&a, &&b| self.arena.nodes[a].key.cmp(&self.arena.nodes[b].key))
        else {
            return;
        };

        self.release_stale(x);
        self.make_passive(x);
        self.queue_remove(x);
        self.detach_child(x);
        self.record.root = Some(x);
        self.arrange_root_children(x);
        for c in children {
            if c != x {
                self.link(c, x);
            }
        }

        for _ in 0..QUEUE_STEPS {
            let Some(y) = self.queue_rotate() else {
                break;
            };
            let Some(first) = self.arena.nodes[y].left_child else {
                continue;
            };
            let last = self.arena.nodes[first].left;
            let second = self.arena.nodes[last].left;
            if !self.is_active(last) {
                self.link(last, x);
            }
            if second != last && !self.is_active(second) {
                self.link(second, x);
            }
        }

        self.run_reductions(ReductionBudget::EXTRACT_MIN);
    }
}

impl<T: Ord + Hash + Clone> StrictFibonacciHeap<T> {
    /// Build a heap from any collection of items
    pub fn from_items<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut heap = Self::new();
        heap.extend(items);
        heap
    }

    /// Returns true if `item` is currently in the heap
    pub fn contains(&self, item: &T) -> bool {
        self.lookup.contains_key(item)
    }

    fn locate(&self, item: &T) -> Option<NodeKey> {
        self.lookup.get(item).and_then(|keys| keys.last().copied())
    }

    fn bind(&mut self, item: T, n: NodeKey) {
        self.lookup.entry(item).or_default().push(n);
    }

    fn unbind(&mut self, item: &T, n: NodeKey) {
        let Some(keys) = self.lookup.get_mut(item) else {
            return;
        };
        if let Some(i) = keys.iter().position(|&k| k == n) {
            keys.swap_remove(i);
        }
        if keys.is_empty() {
            self.lookup.remove(item);
        }
    }

    /// Insert an item in O(1) worst-case time
    pub fn insert(&mut self, item: T) {
        debug_log!(len = self.record.size, "insert");
        let key = Key {
            item: item.clone(),
            seq: self.stamp(),
        };
        let n = self.arena.nodes.insert_with_key(|k| NodeRecord::new(key, k));
        self.bind(item, n);

        if self.record.root.is_none() {
            self.record.root = Some(n);
            self.record.size = 1;
        } else {
            let active = self.new_active_record();
            self.meld_record(HeapRecord::singleton(n, active));
            self.run_reductions(ReductionBudget::MELD);
        }
        self.after_operation();
    }

    /// Remove and return the minimum item in O(log n) worst-case time
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap holds no items.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        let root = self.record.root.ok_or(HeapError::EmptyHeap)?;
        debug_log!(len = self.record.size, "extract_min");

        self.release_stale(root);
        self.record.size -= 1;
        if self.arena.nodes[root].left_child.is_some() {
            self.promote_min_child(root);
        } else {
            self.record.root = None;
            self.record.non_linkable_child = None;
        }

        let node = self.arena.nodes.remove(root).ok_or(HeapError::EmptyHeap)?;
        self.unbind(&node.key.item, root);
        self.after_operation();
        Ok(node.key.item)
    }

    /// Replace `old` by the smaller item `new` in O(1) worst-case time
    ///
    /// Replacing an item by an equal one is a no-op. When `old` is stored more
    /// than once, one of its copies is replaced.
    ///
    /// # Errors
    /// Returns [`HeapError::NotFound`] if `old` is not in the heap and
    /// [`HeapError::InvalidDecrease`] if `new > old`. The heap is left
    /// untouched in both cases.
    pub fn decrease_key(&mut self, old: &T, new: T) -> Result<(), HeapError> {
        let x = self.locate(old).ok_or(HeapError::NotFound)?;
        match new.cmp(old) {
            Ordering::Greater => return Err(HeapError::InvalidDecrease),
            Ordering::Equal => return Ok(()),
            Ordering::Less => {}
        }
        let root = self.record.root.ok_or(HeapError::NotFound)?;
        debug_log!(len = self.record.size, is_root = (x == root), "decrease_key");

        self.unbind(old, x);
        let key = Key {
            item: new.clone(),
            seq: self.stamp(),
        };
        if x != root && key < self.arena.nodes[root].key {
            // The new item becomes the minimum: it takes over the root and the
            // old minimum moves to x
            let displaced = std::mem::replace(&mut self.arena.nodes[root].key, key);
            self.unbind(&displaced.item, root);
            self.bind(displaced.item.clone(), x);
            self.bind(new, root);
            self.arena.nodes[x].key = displaced;
        } else {
            self.arena.nodes[x].key = key;
            self.bind(new, x);
        }

        if x != root {
            self.link(x, root);
            self.run_reductions(ReductionBudget::DECREASE_KEY);
        }
        self.after_operation();
        Ok(())
    }

    /// Meld `other` into this heap
    ///
    /// The structural meld is O(1): the smaller heap is demoted by clearing
    /// its active record, and the root holding the larger item is linked
    /// below the other root.
    ///
    /// Every heap owns its arena, and node keys are only meaningful inside the
    /// arena that issued them. Sharing one arena between independently owned
    /// heaps would need shared mutable storage behind every handle, so the
    /// smaller heap's nodes are moved into this arena first. That move costs
    /// O(min(n, m)); `insert` melds a one-node record built in place and pays
    /// only the O(1) part.
    pub fn meld(&mut self, mut other: Self) {
        if other.is_empty() {
            return;
        }
        if self.is_empty() {
            *self = other;
            self.after_operation();
            return;
        }
        if other.len() > self.len() {
            std::mem::swap(self, &mut other);
        }
        debug_log!(len = self.len(), other = other.len(), "meld");

        let record = self.adopt(other);
        self.meld_record(record);
        self.run_reductions(ReductionBudget::MELD);
        self.after_operation();
    }

    /// Move every node of `other` into this arena as a passive node and
    /// return the heap record describing them
    fn adopt(&mut self, other: Self) -> HeapRecord {
        let Self {
            mut arena,
            record,
            lookup,
            next_seq,
        } = other;
        let offset = self.next_seq;
        self.next_seq += next_seq;

        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(record.size);
        let mut moved = Vec::with_capacity(record.size);
        for (old, node) in arena.nodes.drain() {
            let key = Key {
                item: node.key.item,
                seq: node.key.seq + offset,
            };
            let new = self.arena.nodes.insert_with_key(|k| NodeRecord::new(key, k));
            remap.insert(old, new);
            moved.push((new, node.parent, node.left_child, node.left, node.right, node.q_prev, node.q_next));
        }

        let map = |k: NodeKey| remap.get(k).copied();
        for (new, parent, left_child, left, right, q_prev, q_next) in moved {
            let node = &mut self.arena.nodes[new];
            node.parent = parent.and_then(map);
            node.left_child = left_child.and_then(map);
            node.left = map(left).unwrap_or(new);
            node.right = map(right).unwrap_or(new);
            node.q_prev = q_prev.and_then(map);
            node.q_next = q_next.and_then(map);
        }

        for (item, keys) in lookup {
            self.lookup
                .entry(item)
                .or_default()
                .extend(keys.into_iter().filter_map(map));
        }

        let active = self.new_active_record();
        HeapRecord {
            root: record.root.and_then(map),
            size: record.size,
            q_head: record.q_head.and_then(map),
            ..HeapRecord::new(active)
        }
    }

    #[inline]
    fn after_operation(&self) {
        #[cfg(feature = "invariant-checks")]
        if let Err(violation) = self.check_invariants() {
            crate::tracing_helpers::warn_log!(%violation, "structural check failed");
            panic!("{violation}");
        }
    }
}

impl<T: Ord + Hash + Clone> MinHeap<T> for StrictFibonacciHeap<T> {
    fn insert(&mut self, item: T) {
        StrictFibonacciHeap::insert(self, item);
    }

    fn extract_min(&mut self) -> Result<T, HeapError> {
        StrictFibonacciHeap::extract_min(self)
    }

    fn decrease_key(&mut self, old: &T, new: T) -> Result<(), HeapError> {
        StrictFibonacciHeap::decrease_key(self, old, new)
    }

    fn len(&self) -> usize {
        self.record.size
    }

    fn contains(&self, item: &T) -> bool {
        StrictFibonacciHeap::contains(self, item)
    }
}

impl<T: Ord + Hash + Clone> Extend<T> for StrictFibonacciHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

impl<T: Ord + Hash + Clone> FromIterator<T> for StrictFibonacciHeap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        Self::from_items(items)
    }
}

impl<T: fmt::Debug> fmt::Debug for StrictFibonacciHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrictFibonacciHeap")
            .field("len", &self.record.size)
            .field("min", &self.peek())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T: Ord + Hash + Clone>(heap: &mut StrictFibonacciHeap<T>) -> Vec<T> {
        let mut out = Vec::new();
        while let Ok(item) = heap.extract_min() {
            heap.check_invariants().unwrap();
            out.push(item);
        }
        out
    }

    #[test]
    fn test_basic_operations() {
        let mut heap = StrictFibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));

        heap.insert(5);
        heap.insert(3);
        heap.insert(7);
        assert_eq!(heap.len(), 3);
        assert_eq!(heap.peek(), Some(&3));
        heap.check_invariants().unwrap();

        assert_eq!(heap.extract_min(), Ok(3));
        assert_eq!(heap.extract_min(), Ok(5));
        assert_eq!(heap.extract_min(), Ok(7));
        assert!(heap.is_empty());
        heap.check_invariants().unwrap();
    }

    #[test]
    fn test_decrease_key_errors_leave_heap_untouched() {
        let mut heap = StrictFibonacciHeap::from_items([4, 8, 15]);

        assert_eq!(heap.decrease_key(&16, 1), Err(HeapError::NotFound));
        assert_eq!(heap.decrease_key(&8, 9), Err(HeapError::InvalidDecrease));
        assert_eq!(heap.decrease_key(&8, 8), Ok(()));
        assert!(heap.contains(&8));
        assert_eq!(drain(&mut heap), vec![4, 8, 15]);
    }

    #[test]
    fn test_decrease_key_below_root_swaps_with_root() {
        let mut heap = StrictFibonacciHeap::from_items([10, 20, 30]);
        heap.decrease_key(&30, 5).unwrap();

        let view = heap.view();
        let root = view.root().unwrap();
        assert_eq!(*root.item(), 5);
        assert!(!heap.contains(&30));
        assert_eq!(drain(&mut heap), vec![5, 10, 20]);
    }

    #[test]
    fn test_decrease_key_of_root() {
        let mut heap = StrictFibonacciHeap::from_items([10, 20]);
        heap.decrease_key(&10, 1).unwrap();
        assert_eq!(heap.peek(), Some(&1));
        assert_eq!(drain(&mut heap), vec![1, 20]);
    }

    #[test]
    fn test_duplicate_items() {
        let mut heap = StrictFibonacciHeap::from_items([3, 1, 3, 2, 1]);
        heap.check_invariants().unwrap();

        heap.decrease_key(&3, 0).unwrap();
        assert!(heap.contains(&3));
        assert_eq!(drain(&mut heap), vec![0, 1, 1, 2, 3]);
        assert!(!heap.contains(&1));
    }

    #[test]
    fn test_meld_smaller_into_larger() {
        let mut big = StrictFibonacciHeap::from_items((0..20).map(|i| i * 2));
        let small = StrictFibonacciHeap::from_items([7, 3, 41]);
        big.meld(small);
        big.check_invariants().unwrap();
        assert_eq!(big.len(), 23);

        let mut expected: Vec<i32> = (0..20).map(|i| i * 2).chain([7, 3, 41]).collect();
        expected.sort_unstable();
        assert_eq!(drain(&mut big), expected);
    }

    #[test]
    fn test_meld_larger_into_smaller() {
        let mut small = StrictFibonacciHeap::from_items([100, 50]);
        let big = StrictFibonacciHeap::from_items(1..=30);
        small.meld(big);
        small.check_invariants().unwrap();

        small.decrease_key(&100, 0).unwrap();
        let mut expected: Vec<i32> = (0..=30).chain([50]).collect();
        expected.sort_unstable();
        assert_eq!(drain(&mut small), expected);
    }

    #[test]
    fn test_meld_with_empty() {
        let mut heap = StrictFibonacciHeap::from_items([2, 1]);
        heap.meld(StrictFibonacciHeap::new());
        assert_eq!(heap.len(), 2);

        let mut empty = StrictFibonacciHeap::new();
        empty.meld(heap);
        assert_eq!(empty.len(), 2);
        empty.check_invariants().unwrap();
        assert_eq!(drain(&mut empty), vec![1, 2]);
    }

    // Two records share the arena mid-test, which the per-operation checker
    // would reject
    #[test]
    #[cfg(not(feature = "invariant-checks"))]
    fn test_meld_records_sharing_an_arena() {
        // Grow a second heap next to the first one in the same arena, then
        // meld the two records directly so one side keeps stale state
        let mut heap = StrictFibonacciHeap::new();
        for i in [10, 4, 7, 1, 9, 3, 12, 0] {
            heap.insert(i);
        }
        heap.extract_min().unwrap();

        let active = heap.new_active_record();
        let first = std::mem::replace(&mut heap.record, HeapRecord::new(active));
        for i in [8, 2, 6, 5, 11] {
            heap.insert(i);
        }
        heap.decrease_key(&11, 1).unwrap();

        heap.meld_record(first);
        heap.run_reductions(ReductionBudget::MELD);
        heap.check_invariants().unwrap();
        assert_eq!(heap.len(), 12);

        assert_eq!(drain(&mut heap), vec![1, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12]);
        assert!(heap.arena.fixes.is_empty());
        assert_eq!(heap.arena.actives.len(), 1);
    }

    #[test]
    fn test_collect_and_extend() {
        let mut heap: StrictFibonacciHeap<u32> = [9, 4, 6].into_iter().collect();
        heap.extend([1, 8]);
        assert_eq!(heap.len(), 5);
        assert_eq!(format!("{heap:?}"), "StrictFibonacciHeap { len: 5, min: Some(1) }");
        assert_eq!(drain(&mut heap), vec![1, 4, 6, 8, 9]);
    }

    #[test]
    fn test_seq_stamps_break_ties() {
        let mut heap = StrictFibonacciHeap::new();
        for _ in 0..10 {
            heap.insert(7);
        }
        heap.check_invariants().unwrap();
        assert_eq!(drain(&mut heap), vec![7; 10]);
    }
}
