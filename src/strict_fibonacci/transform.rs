//! Link and the four reduction transformations
//!
//! Every transformation is built on [`link`](StrictFibonacciHeap::link), which
//! moves a subtree below a new parent and keeps ranks, losses, the fix-list
//! and the root-child layout consistent.
//!
//! Children of the root are kept in three regions:
//!
//! ```text
//! root
//!  └─ [ active | passive non-linkable | passive linkable ]
//!                                ^ non_linkable_child
//! ```
//!
//! so a root-degree reduction finds its three candidates at the right end and
//! a node can be filed into the right region in O(1).

use super::arena::NodeKey;
use super::record::ChildList;
use super::StrictFibonacciHeap;
use crate::tracing_helpers::trace_log;

/// How many reductions of each kind an operation may perform after its own
/// restructuring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReductionBudget {
    pub(crate) loss: usize,
    pub(crate) active_root: usize,
    pub(crate) root_degree: usize,
}

impl ReductionBudget {
    pub(crate) const MELD: Self = Self {
        loss: 0,
        active_root: 1,
        root_degree: 1,
    };
    pub(crate) const DECREASE_KEY: Self = Self {
        loss: 1,
        active_root: 6,
        root_degree: 4,
    };
    pub(crate) const EXTRACT_MIN: Self = Self {
        loss: 1,
        active_root: usize::MAX,
        root_degree: usize::MAX,
    };
}

impl<T: Ord> StrictFibonacciHeap<T> {
    /// Make `x` a child of `y`
    pub(super) fn link(&mut self, x: NodeKey, y: NodeKey) {
        let previous = self.arena.nodes[x].parent;
        if previous == Some(y) {
            return;
        }
        trace_log!(?x, ?y, "link");

        let x_active = self.is_active(x);
        if let Some(p) = previous {
            self.cut(x, p, x_active);
        }

        if self.record.root == Some(y) {
            self.attach_to_root(x);
        } else if x_active {
            self.attach_leftmost(x, y);
        } else {
            self.attach_rightmost(x, y);
        }

        if x_active {
            if self.is_active(y) {
                self.increase_rank(y);
            }
            if self.is_active_root(x) {
                self.arena.nodes[x].loss = 0;
            }
            self.sync_fix(x);
        }
    }

    /// Detach `x` from its parent `p`. An active parent that is not an active
    /// root is charged one loss for any departing child; its rank only drops
    /// when the child is active.
    fn cut(&mut self, x: NodeKey, p: NodeKey, x_active: bool) {
        let root = self.record.root;
        if root == Some(p) && self.record.non_linkable_child == Some(x) {
            self.record.non_linkable_child = self.left_sibling(x);
        }
        self.detach_child(x);

        if self.is_active(p) {
            if x_active {
                self.decrease_rank(p);
            }
            if !self.is_active_root(p) {
                self.arena.nodes[p].loss += 1;
                self.sync_fix(p);
            }
        } else if x_active
            && root.is_some()
            && self.arena.nodes[p].parent == root
            && self.is_passive_linkable(p)
        {
            self.move_to_linkable_end(p);
        }
    }

    /// File a child of the root into its region
    pub(super) fn attach_to_root(&mut self, x: NodeKey) {
        let Some(root) = self.record.root else {
            return;
        };
        if self.is_active(x) {
            self.attach_leftmost(x, root);
            if self.record.non_linkable_child.is_none() {
                self.record.non_linkable_child = Some(x);
            }
        } else if self.is_passive_linkable(x) {
            self.attach_rightmost(x, root);
        } else {
            match self.record.non_linkable_child {
                Some(anchor) => self.attach_after(x, anchor),
                None => self.attach_leftmost(x, root),
            }
            self.record.non_linkable_child = Some(x);
        }
    }

    /// A root child that just lost its last active child
    fn move_to_linkable_end(&mut self, p: NodeKey) {
        if self.record.non_linkable_child == Some(p) {
            self.record.non_linkable_child = self.left_sibling(p);
        }
        self.detach_child(p);
        self.attach_to_root(p);
    }

    /// Rebuild the child ring of a fresh root into the three regions
    pub(super) fn arrange_root_children(&mut self, root: NodeKey) {
        let mut active = ChildList::new();
        let mut blocked = ChildList::new();
        let mut free = ChildList::new();
        for c in self.children(root) {
            if self.is_active(c) {
                active.push(c);
            } else if self.is_passive_linkable(c) {
                free.push(c);
            } else {
                blocked.push(c);
            }
        }

        self.arena.nodes[root].left_child = None;
        for &c in active.iter().chain(&blocked).chain(&free) {
            let node = &mut self.arena.nodes[c];
            node.left = c;
            node.right = c;
            self.attach_rightmost(c, root);
        }
        self.record.non_linkable_child = blocked.last().or(active.last()).copied();
    }

    /// The three rightmost root children, if they are distinct and passive
    /// linkable
    pub(super) fn root_degree_candidates(&self) -> Option<[NodeKey; 3]> {
        let root = self.record.root?;
        let z = self.rightmost_child(root)?;
        let y = self.arena.nodes[z].left;
        let x = self.arena.nodes[y].left;
        let distinct = x != y && y != z && x != z;
        let linkable = [x, y, z].iter().all(|&n| self.is_passive_linkable(n));
        (distinct && linkable).then_some([x, y, z])
    }

    /// Turn three passive linkable root children into one active root of rank
    /// 1 with an active child and a passive grandchild
    pub(super) fn root_degree_reduction(&mut self, candidates: [NodeKey; 3]) {
        let mut sorted = candidates;
        sorted.sort_by(|&a, &b| self.arena.nodes[a].key.cmp(&self.arena.nodes[b].key));
        let [x, y, z] = sorted;
        trace_log!(?x, ?y, ?z, "root degree reduction");

        self.activate(x);
        self.activate(y);
        self.detach_child(x);
        self.attach_to_root(x);
        self.link(z, y);
        self.link(y, x);
    }

    /// Link two active roots of equal rank
    pub(super) fn active_root_reduction(&mut self, a: NodeKey, b: NodeKey) {
        let (x, y) = self.order_pair(a, b);
        trace_log!(?x, ?y, "active root reduction");

        self.link(y, x);
        if let (Some(z), Some(root)) = (self.rightmost_child(x), self.record.root) {
            if !self.is_active(z) {
                self.link(z, root);
            }
        }
    }

    /// Promote a node with loss at least 2 to an active root
    pub(super) fn one_node_loss_reduction(&mut self, x: NodeKey) {
        trace_log!(?x, "one-node loss reduction");
        if let Some(root) = self.record.root {
            self.link(x, root);
        }
    }

    /// Link two loss-1 nodes of equal rank and clear both losses
    pub(super) fn two_node_loss_reduction(&mut self, a: NodeKey, b: NodeKey) {
        let (x, y) = self.order_pair(a, b);
        trace_log!(?x, ?y, "two-node loss reduction");

        self.link(y, x);
        for n in [x, y] {
            self.arena.nodes[n].loss = 0;
            self.sync_fix(n);
        }
    }

    /// One loss reduction, preferring the two-node kind
    pub(super) fn loss_reduction(&mut self) -> bool {
        if let Some((a, b)) = self.two_node_loss_pair() {
            self.two_node_loss_reduction(a, b);
            true
        } else if let Some(x) = self.one_node_loss_candidate() {
            self.one_node_loss_reduction(x);
            true
        } else {
            false
        }
    }

    /// Run loss reductions, then alternate active-root and root-degree
    /// reductions until both are exhausted or out of budget
    pub(super) fn run_reductions(&mut self, budget: ReductionBudget) {
        for _ in 0..budget.loss {
            if !self.loss_reduction() {
                break;
            }
        }

        let (mut active_root, mut root_degree) = (0, 0);
        loop {
            let mut progressed = false;
            if active_root < budget.active_root {
                if let Some((a, b)) = self.active_root_pair() {
                    self.active_root_reduction(a, b);
                    active_root += 1;
                    progressed = true;
                }
            }
            if root_degree < budget.root_degree {
                if let Some(candidates) = self.root_degree_candidates() {
                    self.root_degree_reduction(candidates);
                    root_degree += 1;
                    progressed = true;
                }
            }
            if !progressed {
                return;
            }
        }
    }
}
