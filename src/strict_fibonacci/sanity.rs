//! Structural self-checks
//!
//! [`StrictFibonacciHeap::check_invariants`] walks every structure of the heap
//! and reports the first inconsistency it finds. Walks are bounded by arena
//! sizes so a corrupted ring is reported instead of looping forever.
//!
//! The [`invariant!`] macro guards the conditions transformations rely on. It
//! panics in debug builds and with the `invariant-checks` feature, and compiles
//! to nothing otherwise.

use std::fmt;
use std::hash::Hash;

use slotmap::SecondaryMap;

use super::arena::{ActiveKey, BucketKey, FixKey, NodeKey};
use super::fix_list::Part;
use super::node::Rank;
use super::record::ChildList;
use super::StrictFibonacciHeap;
use crate::rank::root_degree_bound;

macro_rules! invariant {
    ($cond:expr, $($arg:tt)+) => {
        if cfg!(any(debug_assertions, feature = "invariant-checks")) && !$cond {
            panic!("invariant violated: {}", format_args!($($arg)+));
        }
    };
}

pub(crate) use invariant;

/// A broken structural invariant, as reported by
/// [`StrictFibonacciHeap::check_invariants`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invariant violated: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err(InvariantViolation::new(format!($($arg)+)));
        }
    };
}

impl<T: Ord + Hash> StrictFibonacciHeap<T> {
    /// Verify every structural invariant of the heap.
    ///
    /// Runs in O(n) and is meant for tests and debugging. With the
    /// `invariant-checks` feature it also runs after every public operation.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let Some(root) = self.record.root else {
            ensure!(self.record.size == 0, "empty heap with size {}", self.record.size);
            ensure!(self.arena.nodes.is_empty(), "empty heap still owns nodes");
            ensure!(self.record.q_head.is_none(), "empty heap with a queue");
            ensure!(self.fix_first().is_none(), "empty heap with a fix-list");
            ensure!(self.lookup.is_empty(), "empty heap with lookup entries");
            ensure!(self.arena.fixes.is_empty(), "empty heap keeps fix entries");
            ensure!(
                self.arena.buckets.len() <= 1,
                "empty heap keeps {} buckets",
                self.arena.buckets.len()
            );
            ensure!(
                self.arena.actives.len() == 1 && self.arena.actives.contains_key(self.record.active),
                "empty heap keeps {} active records",
                self.arena.actives.len()
            );
            return Ok(());
        };

        self.check_tree(root)?;
        self.check_lookup()?;
        self.check_root_layout(root)?;
        self.check_nodes()?;
        self.check_arena_accounting()?;
        let kinds_seen = self.check_fix_list()?;
        self.check_rank_list(&kinds_seen)?;
        self.check_queue(root)?;
        self.check_active_records()?;

        let degree = self.degree(root);
        let bound = root_degree_bound(self.record.size);
        ensure!(degree <= bound, "root degree {degree} exceeds {bound}");
        Ok(())
    }

    fn children_bounded(&self, p: NodeKey) -> Result<ChildList, InvariantViolation> {
        let mut out = ChildList::new();
        let Some(first) = self.arena.nodes[p].left_child else {
            return Ok(out);
        };
        let mut c = first;
        loop {
            ensure!(out.len() < self.arena.nodes.len(), "child ring does not close");
            out.push(c);
            let right = self.arena.nodes[c].right;
            ensure!(self.arena.nodes[right].left == c, "sibling links disagree");
            c = right;
            if c == first {
                return Ok(out);
            }
        }
    }

    fn check_tree(&self, root: NodeKey) -> Result<(), InvariantViolation> {
        ensure!(self.arena.nodes[root].parent.is_none(), "root has a parent");
        ensure!(!self.is_active(root), "root is active");

        let mut stack = vec![root];
        let mut reached = 0usize;
        while let Some(p) = stack.pop() {
            reached += 1;
            ensure!(reached <= self.arena.nodes.len(), "tree contains a cycle");
            let mut passive_seen = false;
            for c in self.children_bounded(p)? {
                let node = &self.arena.nodes[c];
                ensure!(node.parent == Some(p), "child with a foreign parent link");
                ensure!(self.key_less(p, c), "heap order violated below a node");
                if p != root {
                    if self.is_active(c) {
                        ensure!(!passive_seen, "active child right of a passive child");
                    } else {
                        passive_seen = true;
                    }
                }
                stack.push(c);
            }
        }
        ensure!(
            reached == self.record.size && reached == self.arena.nodes.len(),
            "tree holds {reached} nodes, size is {}, arena holds {}",
            self.record.size,
            self.arena.nodes.len()
        );
        Ok(())
    }

    fn check_lookup(&self) -> Result<(), InvariantViolation> {
        let mut bound = 0usize;
        for (item, keys) in &self.lookup {
            ensure!(!keys.is_empty(), "lookup keeps an empty entry");
            for &k in keys {
                let node = self.arena.nodes.get(k);
                ensure!(
                    node.is_some_and(|n| n.key.item == *item),
                    "lookup entry does not match its node"
                );
                bound += 1;
            }
        }
        ensure!(bound == self.record.size, "lookup binds {bound} nodes");
        Ok(())
    }

    fn check_root_layout(&self, root: NodeKey) -> Result<(), InvariantViolation> {
        let mut region = 0;
        let mut expected = None;
        for c in self.children_bounded(root)? {
            let r = if self.is_active(c) {
                0
            } else if self.is_passive_linkable(c) {
                2
            } else {
                1
            };
            ensure!(r >= region, "root children out of region order");
            region = r;
            if r < 2 {
                expected = Some(c);
            }
        }
        ensure!(
            self.record.non_linkable_child == expected,
            "stale non-linkable child pointer"
        );
        Ok(())
    }

    fn check_nodes(&self) -> Result<(), InvariantViolation> {
        let live = self.record.active;
        for (k, node) in &self.arena.nodes {
            if !self.is_active(k) {
                ensure!(
                    node.active != Some(live) && (node.active.is_some() || node.rank.is_none()),
                    "passive node with live rank state"
                );
                continue;
            }
            let active_children = self
                .children_bounded(k)?
                .iter()
                .filter(|&&c| self.is_active(c))
                .count();
            ensure!(
                self.rank_of(k) == Some(active_children),
                "rank {:?} but {active_children} active children",
                self.rank_of(k)
            );
            if self.is_active_root(k) {
                ensure!(node.loss == 0, "active root with loss {}", node.loss);
            }
            match node.rank {
                Some(Rank::FixEntry(e)) => {
                    ensure!(self.needs_fix(k), "fix entry for a node without need");
                    ensure!(
                        self.arena.fixes.get(e).is_some_and(|f| f.node == k),
                        "fix entry owned by another node"
                    );
                }
                Some(Rank::Bucket(_)) => {
                    ensure!(!self.needs_fix(k), "node needing a fix entry has none")
                }
                None => ensure!(false, "active node without rank"),
            }
        }
        Ok(())
    }

    /// Every fix entry and bucket in the arena is held either by the live
    /// structure or by a node that has not dropped its stale state yet
    fn check_arena_accounting(&self) -> Result<(), InvariantViolation> {
        let mut fixes: SecondaryMap<FixKey, ()> = SecondaryMap::new();
        let mut buckets: SecondaryMap<BucketKey, ()> = SecondaryMap::new();
        if let Some(zero) = self.record.rank_list {
            ensure!(self.arena.buckets.contains_key(zero), "freed zero bucket");
            buckets.insert(zero, ());
        }

        for node in self.arena.nodes.values() {
            let bucket = match node.rank {
                Some(Rank::Bucket(b)) => b,
                Some(Rank::FixEntry(e)) => {
                    let Some(entry) = self.arena.fixes.get(e) else {
                        return Err(InvariantViolation::new("node with a freed fix entry".into()));
                    };
                    ensure!(fixes.insert(e, ()).is_none(), "fix entry shared by two nodes");
                    entry.bucket
                }
                None => continue,
            };
            ensure!(self.arena.buckets.contains_key(bucket), "node with a freed bucket");
            buckets.insert(bucket, ());
        }

        ensure!(
            fixes.len() == self.arena.fixes.len(),
            "arena holds {} fix entries, {} referenced",
            self.arena.fixes.len(),
            fixes.len()
        );
        ensure!(
            buckets.len() == self.arena.buckets.len(),
            "arena holds {} buckets, {} referenced",
            self.arena.buckets.len(),
            buckets.len()
        );
        Ok(())
    }

    /// Returns, per bucket, whether an active-root group and a loss group of
    /// that rank were seen
    fn check_fix_list(&self) -> Result<SecondaryMap<BucketKey, [bool; 2]>, InvariantViolation> {
        let mut entries: Vec<FixKey> = Vec::new();
        if let Some(first) = self.fix_first() {
            let mut e = first;
            loop {
                ensure!(entries.len() < self.arena.fixes.len(), "fix-list does not close");
                entries.push(e);
                let right = self.arena.fixes[e].right;
                ensure!(self.arena.fixes[right].left == e, "fix-list links disagree");
                e = right;
                if e == first {
                    break;
                }
            }
        }
        let needing = self
            .arena
            .nodes
            .keys()
            .filter(|&k| self.needs_fix(k))
            .count();
        ensure!(
            entries.len() == needing,
            "fix-list holds {} entries, {needing} nodes need one",
            entries.len()
        );

        for part in Part::ALL {
            let first = entries
                .iter()
                .copied()
                .find(|&e| self.arena.fixes[e].part == part);
            ensure!(
                self.record.parts[part.index()] == first,
                "wrong head for {part:?}"
            );
        }

        // Runs of entries sharing bucket and part
        let mut runs: Vec<(BucketKey, Part, Vec<FixKey>)> = Vec::new();
        let mut last_part = Part::TransformableRoots;
        for &e in &entries {
            let entry = &self.arena.fixes[e];
            let node = &self.arena.nodes[entry.node];
            ensure!(entry.part >= last_part, "fix-list parts out of order");
            last_part = entry.part;
            ensure!(node.rank == Some(Rank::FixEntry(e)), "entry not owned by its node");
            ensure!(
                entry.part.holds_active_roots() == self.is_active_root(entry.node),
                "{:?} entry of the wrong kind",
                entry.part
            );
            match entry.part {
                Part::SingleLoss => ensure!(node.loss == 1, "single loss entry with loss {}", node.loss),
                Part::TransformableLoss => ensure!(node.loss >= 1, "loss entry with zero loss"),
                _ => {}
            }
            match runs.last_mut() {
                Some((b, p, run)) if *b == entry.bucket && *p == entry.part => run.push(e),
                _ => runs.push((entry.bucket, entry.part, vec![e])),
            }
        }

        let mut kinds_seen: SecondaryMap<BucketKey, [bool; 2]> = SecondaryMap::new();
        for (bucket, part, run) in &runs {
            let kind = usize::from(!part.holds_active_roots());
            let seen = kinds_seen.entry(*bucket).map(|e| e.or_insert([false; 2]));
            let Some(seen) = seen else {
                return Err(InvariantViolation::new("fix entry with a freed bucket".into()));
            };
            ensure!(!seen[kind], "rank group split across the fix-list");
            seen[kind] = true;

            match part {
                Part::TransformableRoots => ensure!(run.len() >= 2, "lone transformable root"),
                Part::SingleRoots | Part::SingleLoss => ensure!(run.len() == 1, "{part:?} group of {}", run.len()),
                Part::TransformableLoss => ensure!(
                    run.len() >= 2 || self.arena.nodes[self.arena.fixes[run[0]].node].loss >= 2,
                    "lone loss-1 entry in the transformable part"
                ),
            }

            let b = &self.arena.buckets[*bucket];
            let rep = if part.holds_active_roots() {
                b.active_roots
            } else {
                b.loss
            };
            ensure!(
                rep.is_some_and(|r| run.contains(&r)),
                "bucket representative outside its group"
            );
        }

        Ok(kinds_seen)
    }

    fn check_rank_list(
        &self,
        kinds_seen: &SecondaryMap<BucketKey, [bool; 2]>,
    ) -> Result<(), InvariantViolation> {
        let mut counts: SecondaryMap<BucketKey, u32> = SecondaryMap::new();
        for k in self.arena.nodes.keys() {
            if let Some(b) = self.bucket_of(k) {
                if let Some(count) = counts.entry(b).map(|e| e.or_insert(0)) {
                    *count += 1;
                }
            }
        }

        let mut cursor = self.record.rank_list;
        let mut previous: Option<BucketKey> = None;
        let mut walked = 0usize;
        while let Some(b) = cursor {
            walked += 1;
            ensure!(walked <= self.arena.buckets.len(), "rank list does not end");
            let bucket = &self.arena.buckets[b];
            ensure!(bucket.dec == previous, "rank list links disagree");
            match previous {
                None => ensure!(bucket.number == 0, "rank list starts at {}", bucket.number),
                Some(p) => ensure!(
                    self.arena.buckets[p].number < bucket.number,
                    "rank list out of order"
                ),
            }
            let expected = counts.get(b).copied().unwrap_or(0);
            ensure!(
                bucket.ref_count == expected,
                "rank {} counts {} references, {expected} nodes use it",
                bucket.number,
                bucket.ref_count
            );
            if previous.is_some() {
                ensure!(bucket.ref_count > 0, "unused bucket of rank {}", bucket.number);
            }
            let seen = kinds_seen.get(b).copied().unwrap_or([false; 2]);
            ensure!(
                seen[0] || bucket.active_roots.is_none(),
                "dangling active-root representative at rank {}",
                bucket.number
            );
            ensure!(
                seen[1] || bucket.loss.is_none(),
                "dangling loss representative at rank {}",
                bucket.number
            );
            previous = Some(b);
            cursor = bucket.inc;
        }
        Ok(())
    }

    fn check_queue(&self, root: NodeKey) -> Result<(), InvariantViolation> {
        let mut queued: SecondaryMap<NodeKey, ()> = SecondaryMap::new();
        if let Some(head) = self.record.q_head {
            let mut x = head;
            loop {
                ensure!(queued.len() < self.arena.nodes.len(), "queue does not close");
                ensure!(queued.insert(x, ()).is_none(), "node queued twice");
                let next = self.arena.nodes[x].q_next;
                let Some(next) = next else {
                    return Err(InvariantViolation::new("queue link missing".into()));
                };
                ensure!(self.arena.nodes[next].q_prev == Some(x), "queue links disagree");
                x = next;
                if x == head {
                    break;
                }
            }
        }
        ensure!(!queued.contains_key(root), "root is queued");
        ensure!(
            queued.len() + 1 == self.record.size,
            "queue holds {} of {} non-root nodes",
            queued.len(),
            self.record.size - 1
        );
        Ok(())
    }

    fn check_active_records(&self) -> Result<(), InvariantViolation> {
        let mut counts: SecondaryMap<ActiveKey, u32> = SecondaryMap::new();
        for node in self.arena.nodes.values() {
            if let Some(a) = node.active {
                match counts.entry(a) {
                    Some(e) => *e.or_insert(0) += 1,
                    None => return Err(InvariantViolation::new("node with a freed active record".into())),
                }
            }
        }
        for (k, record) in &self.arena.actives {
            let expected = counts.get(k).copied().unwrap_or(0);
            ensure!(record.ref_count == expected, "active record counts {} of {expected}", record.ref_count);
            if k == self.record.active {
                ensure!(record.flag, "live active record is cleared");
            } else {
                ensure!(!record.flag && expected > 0, "leftover active record");
            }
        }
        Ok(())
    }
}
