//! Rank list: shared buckets that store the rank of active nodes
//!
//! Buckets form a doubly linked list sorted by rank and starting at the rank 0
//! bucket of the heap record. Moving a node one rank up or down is a step to
//! the neighbouring bucket, created on demand when the neighbour does not hold
//! the adjacent rank. A bucket is freed as soon as no node refers to it, except
//! for the rank 0 bucket which lives as long as the record.
//!
//! Each bucket also remembers one fix-list entry per kind (active root and
//! positive loss) of its rank; those representatives are what lets the
//! fix-list keep equal-rank entries adjacent in O(1).

use super::arena::{BucketKey, FixKey, NodeKey};
use super::node::Rank;
use super::StrictFibonacciHeap;
use crate::rank::{self, checked_increment};

#[derive(Debug)]
pub(crate) struct RankListRecord {
    pub(crate) number: rank::Rank,
    pub(crate) inc: Option<BucketKey>,
    pub(crate) dec: Option<BucketKey>,
    /// Number of active nodes whose rank resolves to this bucket
    pub(crate) ref_count: u32,
    pub(crate) active_roots: Option<FixKey>,
    pub(crate) loss: Option<FixKey>,
}

impl RankListRecord {
    fn new(number: rank::Rank, dec: Option<BucketKey>, inc: Option<BucketKey>) -> Self {
        Self {
            number,
            inc,
            dec,
            ref_count: 0,
            active_roots: None,
            loss: None,
        }
    }
}

impl<T: Ord> StrictFibonacciHeap<T> {
    /// The record's rank 0 bucket, created on first use
    pub(super) fn zero_bucket(&mut self) -> BucketKey {
        if let Some(b) = self.record.rank_list {
            return b;
        }
        let b = self.arena.buckets.insert(RankListRecord::new(0, None, None));
        self.record.rank_list = Some(b);
        b
    }

    pub(super) fn retain_bucket(&mut self, b: BucketKey) {
        self.arena.buckets[b].ref_count += 1;
    }

    /// Drop one reference to a live bucket, unlinking it when it becomes unused
    pub(super) fn release_bucket(&mut self, b: BucketKey) {
        let bucket = &mut self.arena.buckets[b];
        bucket.ref_count -= 1;
        if bucket.ref_count > 0 || self.record.rank_list == Some(b) {
            return;
        }

        let (dec, inc) = (bucket.dec, bucket.inc);
        if let Some(d) = dec {
            self.arena.buckets[d].inc = inc;
        }
        if let Some(i) = inc {
            self.arena.buckets[i].dec = dec;
        }
        self.arena.buckets.remove(b);
    }

    /// Drop one reference to a bucket of a melded-away record. The list it sits
    /// in is never walked again, so neighbours are left as they are.
    pub(super) fn release_stale_bucket(&mut self, b: BucketKey) {
        let bucket = &mut self.arena.buckets[b];
        bucket.ref_count -= 1;
        if bucket.ref_count == 0 {
            self.arena.buckets.remove(b);
        }
    }

    /// Bucket for the rank right above `b`, created if missing
    fn bucket_above(&mut self, b: BucketKey) -> BucketKey {
        let bucket = &self.arena.buckets[b];
        let number = checked_increment(bucket.number);
        let next = bucket.inc;
        if let Some(i) = next {
            if self.arena.buckets[i].number == number {
                return i;
            }
        }

        let created = self
            .arena
            .buckets
            .insert(RankListRecord::new(number, Some(b), next));
        if let Some(i) = next {
            self.arena.buckets[i].dec = Some(created);
        }
        self.arena.buckets[b].inc = Some(created);
        created
    }

    /// Bucket for the rank right below `b`, created if missing
    fn bucket_below(&mut self, b: BucketKey) -> BucketKey {
        let bucket = &self.arena.buckets[b];
        let number = bucket.number;
        let prev = bucket.dec;
        super::sanity::invariant!(number > 0, "rank decrease below zero");
        let number = rank::saturating_decrement(number);
        if let Some(d) = prev {
            if self.arena.buckets[d].number == number {
                return d;
            }
        }

        let created = self
            .arena
            .buckets
            .insert(RankListRecord::new(number, prev, Some(b)));
        if let Some(d) = prev {
            self.arena.buckets[d].inc = Some(created);
        }
        self.arena.buckets[b].dec = Some(created);
        created
    }

    /// Point an active node at a different bucket, keeping its fix-list entry
    /// grouped with the entries of the new rank.
    fn change_bucket(&mut self, n: NodeKey, new: BucketKey) {
        self.retain_bucket(new);
        let old = match self.arena.nodes[n].rank {
            Some(Rank::Bucket(old)) => {
                self.arena.nodes[n].rank = Some(Rank::Bucket(new));
                old
            }
            Some(Rank::FixEntry(e)) => {
                self.fix_remove(e);
                let old = std::mem::replace(&mut self.arena.fixes[e].bucket, new);
                self.fix_insert(e);
                old
            }
            None => {
                super::sanity::invariant!(false, "rank change on a passive node");
                self.release_bucket(new);
                return;
            }
        };
        self.release_bucket(old);
    }

    pub(super) fn increase_rank(&mut self, n: NodeKey) {
        let Some(b) = self.bucket_of(n) else {
            return;
        };
        let above = self.bucket_above(b);
        self.change_bucket(n, above);
    }

    pub(super) fn decrease_rank(&mut self, n: NodeKey) {
        let Some(b) = self.bucket_of(n) else {
            return;
        };
        let below = self.bucket_below(b);
        self.change_bucket(n, below);
    }
}
