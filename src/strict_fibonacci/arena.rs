//! Arena storage for the strict Fibonacci heap
//!
//! All records of a heap (nodes, fix-list entries, rank buckets and active
//! records) live in `slotmap` arenas owned by the heap and refer to each other
//! through generational keys. Circular sibling rings, the extract-min queue and
//! the fix-list are therefore plain key rewrites, with no aliasing and no
//! `unsafe`.
//!
//! Generational keys also make stale references harmless: a key into a record
//! that has been removed simply fails to resolve instead of pointing at reused
//! memory.

use slotmap::{new_key_type, SlotMap};

use super::active::ActiveRecord;
use super::fix_list::FixListRecord;
use super::node::NodeRecord;
use super::rank_list::RankListRecord;

new_key_type! {
    /// Key of a tree node
    pub struct NodeKey;
    /// Key of a fix-list entry
    pub struct FixKey;
    /// Key of a rank bucket
    pub struct BucketKey;
    /// Key of an active record
    pub struct ActiveKey;
}

/// Backing storage for every record of one heap.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    pub(crate) nodes: SlotMap<NodeKey, NodeRecord<T>>,
    pub(crate) fixes: SlotMap<FixKey, FixListRecord>,
    pub(crate) buckets: SlotMap<BucketKey, RankListRecord>,
    pub(crate) actives: SlotMap<ActiveKey, ActiveRecord>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            fixes: SlotMap::with_key(),
            buckets: SlotMap::with_key(),
            actives: SlotMap::with_key(),
        }
    }

    pub(crate) fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(nodes),
            ..Self::new()
        }
    }
}
