//! Strict Fibonacci heap for Rust
//!
//! This crate provides a strict Fibonacci heap (Brodal, Lagogiannis and
//! Tarjan), a priority queue with worst-case rather than amortized bounds:
//!
//! | Operation      | Worst case |
//! |----------------|------------|
//! | `insert`       | O(1)       |
//! | `peek`         | O(1)       |
//! | `decrease_key` | O(1)       |
//! | `meld`         | O(1) *     |
//! | `extract_min`  | O(log n)   |
//!
//! \* structural work; moving the smaller heap into the larger heap's arena
//! costs O(min(n, m)).
//!
//! Items are their own keys. The heap implements the [`MinHeap`] contract used
//! by graph algorithms such as Dijkstra and Prim: seed every vertex, then relax
//! through [`decrease_key`](MinHeap::decrease_key).
//!
//! # Example
//!
//! ```rust
//! use strict_fibonacci_heap::{HeapError, MinHeap, StrictFibonacciHeap};
//!
//! let mut heap: StrictFibonacciHeap<(u32, &str)> =
//!     [(7, "c"), (3, "b"), (9, "d")].into_iter().collect();
//! heap.decrease_key(&(9, "d"), (1, "d")).unwrap();
//!
//! assert_eq!(heap.extract_min(), Ok((1, "d")));
//! assert_eq!(heap.decrease_key(&(9, "d"), (0, "d")), Err(HeapError::NotFound));
//! assert_eq!(heap.len(), 2);
//! ```
//!
//! # Features
//!
//! - `tracing`: log every public operation (debug) and transformation (trace)
//!   through the `tracing` crate
//! - `invariant-checks`: run [`StrictFibonacciHeap::check_invariants`] after
//!   every public operation and panic on the first violation

pub mod rank;
pub mod strict_fibonacci;
pub mod traits;

mod tracing_helpers;

pub use strict_fibonacci::{InvariantViolation, StrictFibonacciHeap};
pub use traits::{HeapError, MinHeap};
