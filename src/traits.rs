//! Common traits for min-heap data structures
//!
//! This module provides the capability contract consumed by graph algorithms
//! such as Dijkstra's shortest path and Prim's minimum spanning tree:
//!
//! - [`MinHeap`]: item-keyed min-heap with `decrease_key`, `contains` and
//!   `extract_min`
//! - [`HeapError`]: the caller-facing failures of those operations
//!
//! Unlike handle-based heaps, a [`MinHeap`] is addressed by the items
//! themselves: the item is its own key, and `decrease_key` replaces one item
//! with a smaller one.

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// `decrease_key` was called with an item that is not in the heap
    NotFound,
    /// `extract_min` was called on an empty heap
    EmptyHeap,
    /// The replacement item is greater than the item it replaces
    InvalidDecrease,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::NotFound => write!(f, "item not found in the heap"),
            HeapError::EmptyHeap => write!(f, "the heap is empty"),
            HeapError::InvalidDecrease => {
                write!(f, "new item is greater than the item it replaces")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// Item-keyed min-heap contract
///
/// Items are totally ordered and serve as their own priority. This is the
/// interface graph algorithms seed with every vertex at an "infinite" key and
/// then relax through [`decrease_key`](MinHeap::decrease_key).
///
/// # Example
///
/// ```rust
/// use strict_fibonacci_heap::{MinHeap, StrictFibonacciHeap};
///
/// let mut heap = StrictFibonacciHeap::new();
/// heap.insert(30);
/// heap.insert(10);
/// heap.insert(20);
/// heap.decrease_key(&30, 5).unwrap();
///
/// assert_eq!(heap.extract_min(), Ok(5));
/// assert_eq!(heap.extract_min(), Ok(10));
/// assert!(heap.contains(&20));
/// ```
pub trait MinHeap<T: Ord> {
    /// Inserts an item
    ///
    /// # Time Complexity
    /// O(1) worst-case for the strict Fibonacci heap.
    fn insert(&mut self, item: T);

    /// Removes and returns the minimum item
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap holds no items.
    fn extract_min(&mut self) -> Result<T, HeapError>;

    /// Replaces `old` with the smaller-or-equal item `new`
    ///
    /// # Errors
    /// Returns [`HeapError::NotFound`] if `old` is not in the heap and
    /// [`HeapError::InvalidDecrease`] if `new > old`. The heap is left
    /// untouched in both cases.
    fn decrease_key(&mut self, old: &T, new: T) -> Result<(), HeapError>;

    /// Returns the number of items in the heap
    fn len(&self) -> usize;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `item` is currently in the heap
    fn contains(&self, item: &T) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(HeapError::NotFound.to_string(), "item not found in the heap");
        assert_eq!(HeapError::EmptyHeap.to_string(), "the heap is empty");
        assert_eq!(
            HeapError::InvalidDecrease.to_string(),
            "new item is greater than the item it replaces"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&HeapError::EmptyHeap);
    }
}
