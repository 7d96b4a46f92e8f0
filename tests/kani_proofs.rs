//! Kani verification proofs for heap operations
//!
//! Kani is AWS's model checker for Rust. It can verify properties of Rust code
//! by checking all possible executions up to certain bounds.
//!
//! To run these proofs:
//!   cargo kani

#[allow(unused_imports)]
use strict_fibonacci_heap::{HeapError, StrictFibonacciHeap};

/// Proof that insert always increments the length
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_insert_increments_len() {
    let mut heap: StrictFibonacciHeap<u8> = StrictFibonacciHeap::new();
    let first: u8 = kani::any();
    heap.insert(first);
    let initial_len = heap.len();

    let item: u8 = kani::any();
    heap.insert(item);

    assert!(heap.len() == initial_len + 1);
    assert!(heap.contains(&item));
}

/// Proof that peek returns the smaller of two inserted items
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_peek_is_minimum() {
    let mut heap: StrictFibonacciHeap<u8> = StrictFibonacciHeap::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();

    heap.insert(a);
    heap.insert(b);

    assert!(heap.peek() == Some(&a.min(b)));
}

/// Proof that three extractions come out in order
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(12)]
fn verify_extract_min_order() {
    let mut heap: StrictFibonacciHeap<u8> = StrictFibonacciHeap::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    let c: u8 = kani::any();

    heap.insert(a);
    heap.insert(b);
    heap.insert(c);

    let x = heap.extract_min();
    let y = heap.extract_min();
    let z = heap.extract_min();

    assert!(x.is_ok() && y.is_ok() && z.is_ok());
    assert!(x.unwrap() <= y.unwrap());
    assert!(y.unwrap() <= z.unwrap());
    assert!(heap.extract_min() == Err(HeapError::EmptyHeap));
}

/// Proof that decrease_key rejects larger items without changing the heap
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_invalid_decrease_is_rejected() {
    let mut heap: StrictFibonacciHeap<u8> = StrictFibonacciHeap::new();
    let old: u8 = kani::any();
    let new: u8 = kani::any();
    kani::assume(new > old);

    heap.insert(old);
    assert!(heap.decrease_key(&old, new) == Err(HeapError::InvalidDecrease));
    assert!(heap.len() == 1);
    assert!(heap.peek() == Some(&old));
}

/// Proof that a decreased item becomes visible as the minimum
#[cfg(kani)]
#[kani::proof]
#[kani::unwind(10)]
fn verify_decrease_key_to_minimum() {
    let mut heap: StrictFibonacciHeap<u8> = StrictFibonacciHeap::new();
    let a: u8 = kani::any();
    let b: u8 = kani::any();
    kani::assume(a < b);
    kani::assume(a > 0);

    heap.insert(a);
    heap.insert(b);
    assert!(heap.decrease_key(&b, a - 1).is_ok());
    assert!(heap.extract_min() == Ok(a - 1));
}
