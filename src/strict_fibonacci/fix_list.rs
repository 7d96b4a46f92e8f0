//! The fix-list: one circular list of entries for active roots and for active
//! nodes with positive loss, kept in four consecutive parts.
//!
//! ```text
//!  | TransformableRoots | SingleRoots | SingleLoss | TransformableLoss |
//!    equal-rank groups    one per rank  loss 1,      equal-rank groups,
//!    of size >= 2                       one per rank or a lone loss >= 2
//! ```
//!
//! Entries of the same rank and kind are adjacent. The first entry of each
//! bucket group is the bucket's representative, which is where a new entry of
//! that rank and kind is inserted. With this layout an active-root reduction
//! is possible iff the first part is non-empty, and a loss reduction is
//! decided by looking at the head of the last part.

use super::arena::{BucketKey, FixKey, NodeKey};
use super::node::Rank;
use super::StrictFibonacciHeap;

/// The four consecutive parts of the fix-list
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    /// Active roots sharing their rank with another active root
    TransformableRoots = 0,
    /// Active roots alone at their rank
    SingleRoots = 1,
    /// Loss-1 nodes alone at their rank
    SingleLoss = 2,
    /// Positive-loss nodes sharing their rank, and lone nodes with loss >= 2
    TransformableLoss = 3,
}

impl Part {
    pub(crate) const ALL: [Part; 4] = [
        Part::TransformableRoots,
        Part::SingleRoots,
        Part::SingleLoss,
        Part::TransformableLoss,
    ];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether the part holds active roots rather than positive-loss nodes
    #[inline]
    pub fn holds_active_roots(self) -> bool {
        matches!(self, Part::TransformableRoots | Part::SingleRoots)
    }
}

#[derive(Debug)]
pub(crate) struct FixListRecord {
    pub(crate) node: NodeKey,
    pub(crate) bucket: BucketKey,
    pub(crate) left: FixKey,
    pub(crate) right: FixKey,
    pub(crate) part: Part,
}

impl<T: Ord> StrictFibonacciHeap<T> {
    /// First entry of the whole list
    pub(super) fn fix_first(&self) -> Option<FixKey> {
        self.record.parts.iter().flatten().next().copied()
    }

    /// Entry right after the last entry of `part`
    fn fix_after_part(&self, part: Part) -> Option<FixKey> {
        self.record.parts[part.index() + 1..]
            .iter()
            .flatten()
            .next()
            .copied()
            .or_else(|| self.fix_first())
    }

    /// Head of the single parts, i.e. the first entry that does not belong to
    /// a transformable group of active roots
    pub(super) fn fix_singles(&self) -> Option<FixKey> {
        self.record.parts[Part::SingleRoots.index()]
            .or(self.record.parts[Part::SingleLoss.index()])
    }

    fn fix_splice_before(&mut self, e: FixKey, anchor: FixKey) {
        let prev = self.arena.fixes[anchor].left;
        self.arena.fixes[e].left = prev;
        self.arena.fixes[e].right = anchor;
        self.arena.fixes[prev].right = e;
        self.arena.fixes[anchor].left = e;
    }

    fn fix_splice_after(&mut self, e: FixKey, anchor: FixKey) {
        let next = self.arena.fixes[anchor].right;
        self.arena.fixes[e].left = anchor;
        self.arena.fixes[e].right = next;
        self.arena.fixes[anchor].right = e;
        self.arena.fixes[next].left = e;
        self.arena.fixes[e].part = self.arena.fixes[anchor].part;
    }

    fn fix_push_front(&mut self, e: FixKey, part: Part) {
        self.arena.fixes[e].part = part;
        let anchor = self.record.parts[part.index()].or_else(|| self.fix_after_part(part));
        if let Some(anchor) = anchor {
            self.fix_splice_before(e, anchor);
        }
        self.record.parts[part.index()] = Some(e);
    }

    /// Take an entry out of the ring, fixing the head of its part but no
    /// bucket representative
    fn fix_unlink(&mut self, e: FixKey) {
        let FixListRecord {
            left, right, part, ..
        } = self.arena.fixes[e];
        if self.record.parts[part.index()] == Some(e) {
            self.record.parts[part.index()] =
                (right != e && self.arena.fixes[right].part == part).then_some(right);
        }
        if left != e {
            self.arena.fixes[left].right = right;
            self.arena.fixes[right].left = left;
        }
        let entry = &mut self.arena.fixes[e];
        entry.left = e;
        entry.right = e;
    }

    fn same_group(&self, a: FixKey, b: FixKey) -> bool {
        a != b && {
            let (x, y) = (&self.arena.fixes[a], &self.arena.fixes[b]);
            x.bucket == y.bucket && x.part == y.part
        }
    }

    fn representative_mut(&mut self, e: FixKey) -> &mut Option<FixKey> {
        let entry = &self.arena.fixes[e];
        let bucket = &mut self.arena.buckets[entry.bucket];
        if entry.part.holds_active_roots() {
            &mut bucket.active_roots
        } else {
            &mut bucket.loss
        }
    }

    /// Place an unlinked entry according to the current state of its node
    pub(super) fn fix_insert(&mut self, e: FixKey) {
        let entry = &self.arena.fixes[e];
        let (n, b) = (entry.node, entry.bucket);
        let active_root = self.is_active_root(n);

        let bucket = &self.arena.buckets[b];
        let rep = if active_root {
            bucket.active_roots
        } else {
            bucket.loss
        };

        match rep {
            None => {
                let part = if active_root {
                    self.arena.buckets[b].active_roots = Some(e);
                    Part::SingleRoots
                } else {
                    self.arena.buckets[b].loss = Some(e);
                    if self.arena.nodes[n].loss >= 2 {
                        Part::TransformableLoss
                    } else {
                        Part::SingleLoss
                    }
                };
                self.fix_push_front(e, part);
            }
            Some(rep) => {
                let paired = if active_root {
                    Part::TransformableRoots
                } else {
                    Part::TransformableLoss
                };
                if self.arena.fixes[rep].part != paired {
                    self.fix_unlink(rep);
                    self.fix_push_front(rep, paired);
                }
                self.fix_splice_after(e, rep);
            }
        }
    }

    /// Unlink an entry, handing representation to a group mate and demoting a
    /// group that shrinks to a single entry.
    pub(super) fn fix_remove(&mut self, e: FixKey) {
        let FixListRecord {
            left, right, part, ..
        } = self.arena.fixes[e];
        let mate = if self.same_group(right, e) {
            Some(right)
        } else if self.same_group(left, e) {
            Some(left)
        } else {
            None
        };

        let rep = self.representative_mut(e);
        if *rep == Some(e) {
            *rep = mate;
        }
        self.fix_unlink(e);

        let Some(mate) = mate else {
            return;
        };
        let FixListRecord {
            left, right, node, ..
        } = self.arena.fixes[mate];
        if self.same_group(left, mate) || self.same_group(right, mate) {
            return;
        }
        match part {
            Part::TransformableRoots => {
                self.fix_unlink(mate);
                self.fix_push_front(mate, Part::SingleRoots);
            }
            Part::TransformableLoss if self.arena.nodes[node].loss == 1 => {
                self.fix_unlink(mate);
                self.fix_push_front(mate, Part::SingleLoss);
            }
            _ => {}
        }
    }

    /// Create, drop or reposition the fix-list entry of a node so that it
    /// reflects the node's current state
    pub(super) fn sync_fix(&mut self, n: NodeKey) {
        let wants_entry = self.needs_fix(n);
        match (self.arena.nodes[n].rank, wants_entry) {
            (Some(Rank::Bucket(bucket)), true) => {
                let e = self.arena.fixes.insert_with_key(|e| FixListRecord {
                    node: n,
                    bucket,
                    left: e,
                    right: e,
                    part: Part::SingleRoots,
                });
                self.arena.nodes[n].rank = Some(Rank::FixEntry(e));
                self.fix_insert(e);
            }
            (Some(Rank::FixEntry(e)), true) => {
                self.fix_remove(e);
                self.fix_insert(e);
            }
            (Some(Rank::FixEntry(e)), false) => {
                self.fix_remove(e);
                if let Some(entry) = self.arena.fixes.remove(e) {
                    self.arena.nodes[n].rank = Some(Rank::Bucket(entry.bucket));
                }
            }
            (Some(Rank::Bucket(_)), false) | (None, _) => {}
        }
    }

    /// Entries in list order, starting at the first part
    pub(super) fn fix_entries(&self) -> Vec<FixKey> {
        let mut entries = Vec::new();
        let Some(first) = self.fix_first() else {
            return entries;
        };
        let mut e = first;
        loop {
            entries.push(e);
            e = self.arena.fixes[e].right;
            if e == first {
                return entries;
            }
        }
    }

    /// Two active roots of equal rank, if any
    pub(super) fn active_root_pair(&self) -> Option<(NodeKey, NodeKey)> {
        let head = self.record.parts[Part::TransformableRoots.index()]?;
        let next = self.arena.fixes[head].right;
        self.same_group(head, next)
            .then(|| (self.arena.fixes[head].node, self.arena.fixes[next].node))
    }

    /// Head of the last part and its group mate, if it has one
    fn loss_candidates(&self) -> Option<(NodeKey, Option<NodeKey>)> {
        let head = self.record.parts[Part::TransformableLoss.index()]?;
        let next = self.arena.fixes[head].right;
        let mate = self
            .same_group(head, next)
            .then(|| self.arena.fixes[next].node);
        Some((self.arena.fixes[head].node, mate))
    }

    /// Two loss-1 nodes of equal rank
    pub(super) fn two_node_loss_pair(&self) -> Option<(NodeKey, NodeKey)> {
        match self.loss_candidates()? {
            (t, Some(u)) if self.arena.nodes[t].loss == 1 && self.arena.nodes[u].loss == 1 => {
                Some((t, u))
            }
            _ => None,
        }
    }

    /// A node with loss at least 2
    pub(super) fn one_node_loss_candidate(&self) -> Option<NodeKey> {
        let (t, u) = self.loss_candidates()?;
        if self.arena.nodes[t].loss >= 2 {
            return Some(t);
        }
        u.filter(|&u| self.arena.nodes[u].loss >= 2)
    }
}
