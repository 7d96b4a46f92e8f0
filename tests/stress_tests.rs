//! Extreme stress tests that really push the heap to its limits
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use strict_fibonacci_heap::{MinHeap, StrictFibonacciHeap};

/// Test massive numbers of inserts and extractions
#[test]
fn test_massive_operations() {
    let mut heap = StrictFibonacciHeap::new();

    for i in 0..10_000 {
        heap.insert(i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
    assert!(heap.is_empty());
    heap.check_invariants().unwrap();
}

/// Test reverse-ordered inserts, where every insert replaces the root
#[test]
fn test_descending_inserts() {
    let mut heap = StrictFibonacciHeap::new();
    for i in (0..5000).rev() {
        heap.insert(i);
    }
    heap.check_invariants().unwrap();

    for i in 0..5000 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
}

/// Test many decrease_key operations, Dijkstra style: seed everything at a
/// large key, then relax
#[test]
fn test_many_decrease_keys() {
    let mut heap = StrictFibonacciHeap::new();
    for v in 0..2000u64 {
        heap.insert((u64::MAX, v));
    }

    for v in 0..2000u64 {
        heap.decrease_key(&(u64::MAX, v), (v * 3 + 1, v)).unwrap();
    }
    // Relax the odd vertices once more
    for v in (1..2000u64).step_by(2) {
        heap.decrease_key(&(v * 3 + 1, v), (v, v)).unwrap();
    }
    heap.check_invariants().unwrap();

    let mut previous = None;
    while let Ok(item) = heap.extract_min() {
        if let Some(p) = previous {
            assert!(p < item);
        }
        previous = Some(item);
    }
}

/// Test alternating insert and extract
#[test]
fn test_alternating_ops() {
    let mut heap = StrictFibonacciHeap::new();

    for i in 0..2000 {
        heap.insert(i * 2);
        heap.insert(i * 2 + 1);
        assert_eq!(heap.extract_min(), Ok(i));
    }
    heap.check_invariants().unwrap();
    assert_eq!(heap.len(), 2000);

    for i in 2000..4000 {
        assert_eq!(heap.extract_min(), Ok(i));
    }
}

/// Test a seeded random mix of every operation against a model, including
/// melds in both directions
#[test]
fn test_random_mixed_workload() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut heap = StrictFibonacciHeap::new();
    let mut model: Vec<i64> = Vec::new();

    for round in 0..20_000 {
        match rng.gen_range(0..100) {
            0..=44 => {
                let item = rng.gen_range(-50_000..50_000);
                heap.insert(item);
                model.push(item);
            }
            45..=74 if !model.is_empty() => {
                let i = rng.gen_range(0..model.len());
                let new = model[i] - rng.gen_range(0..1000);
                heap.decrease_key(&model[i], new).unwrap();
                model[i] = new;
            }
            75..=97 if !model.is_empty() => {
                let (i, &min) = model
                    .iter()
                    .enumerate()
                    .min_by_key(|&(_, x)| *x)
                    .unwrap();
                assert_eq!(heap.extract_min(), Ok(min), "round {round}");
                model.swap_remove(i);
            }
            98..=99 => {
                let items: Vec<i64> = (0..rng.gen_range(0..200))
                    .map(|_| rng.gen_range(-50_000..50_000))
                    .collect();
                let mut other = StrictFibonacciHeap::from_items(items.iter().copied());
                if rng.gen_bool(0.5) {
                    heap.meld(other);
                } else {
                    other.meld(heap);
                    heap = other;
                }
                model.extend(items);
            }
            _ => {}
        }
        assert_eq!(heap.len(), model.len());
        if round % 500 == 0 {
            heap.check_invariants().unwrap();
        }
    }

    heap.check_invariants().unwrap();
    model.sort_unstable();
    let drained: Vec<i64> = std::iter::from_fn(|| heap.extract_min().ok()).collect();
    assert_eq!(drained, model);
}

/// Test that shuffled inputs of many sizes come out sorted through the trait
#[test]
fn test_shuffled_sizes_through_trait() {
    fn drain<H: MinHeap<u32>>(heap: &mut H) -> Vec<u32> {
        std::iter::from_fn(|| heap.extract_min().ok()).collect()
    }

    let mut rng = StdRng::seed_from_u64(99);
    for size in [0usize, 1, 2, 3, 4, 5, 7, 8, 31, 64, 257, 1000] {
        let mut items: Vec<u32> = (0..size as u32).collect();
        items.shuffle(&mut rng);

        let mut heap = StrictFibonacciHeap::from_items(items);
        heap.check_invariants().unwrap();
        assert_eq!(drain(&mut heap), (0..size as u32).collect::<Vec<_>>());
    }
}

/// Test many small melds into one heap
#[test]
fn test_repeated_small_melds() {
    let mut heap = StrictFibonacciHeap::new();
    for chunk in 0..300 {
        let other = StrictFibonacciHeap::from_items((0..5).map(|j| chunk * 5 + j));
        heap.meld(other);
        if chunk % 3 == 0 {
            heap.extract_min().unwrap();
        }
    }
    heap.check_invariants().unwrap();

    let drained: Vec<i32> = std::iter::from_fn(|| heap.extract_min().ok()).collect();
    assert_eq!(drained.len(), 1500 - 100);
    assert!(drained.windows(2).all(|w| w[0] < w[1]));
}
