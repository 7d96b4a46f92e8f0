//! Rank arithmetic and the logarithmic size bounds built on it.
//!
//! The rank of an active node is its number of active children. Ranks are not
//! stored on nodes: every active node points at a shared bucket of the rank
//! list, and the bucket holds the number. Moving a node one rank up or down
//! means moving it to the neighbouring bucket, so the arithmetic here only
//! runs when a bucket is created.
//!
//! Ranks and the root degree both stay `O(log n)`. A `u8` is enough for any
//! heap that fits in memory, and [`checked_increment`] turns an impossible
//! overflow into a panic instead of a silent wrap.

/// Rank of an active node, as stored in a rank-list bucket.
pub type Rank = u8;

/// Largest rank a bucket can hold.
pub const MAX_RANK: Rank = u8::MAX;

/// Rank of the bucket above `rank`.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`, which would mean a broken rank list.
///
/// # Example
///
/// ```rust
/// use strict_fibonacci_heap::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1)
        .expect("rank overflow: active ranks are O(log n) and cannot reach u8::MAX")
}

/// Rank of the bucket below `rank`; the zero bucket has nothing below it.
///
/// ```rust
/// use strict_fibonacci_heap::rank::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Bit length of `len`: 0 for an empty heap, `floor(log2(len)) + 1` otherwise.
#[inline]
pub fn size_bits(len: usize) -> usize {
    (usize::BITS - len.leading_zeros()) as usize
}

/// Largest root degree the structural checker accepts for a heap of `len`
/// items. The heap keeps the degree logarithmic; the slack absorbs the growth
/// between two extract-min operations.
#[inline]
pub fn root_degree_bound(len: usize) -> usize {
    16 * size_bits(len) + 64
}
