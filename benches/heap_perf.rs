//! Strict Fibonacci heap benchmarks
//!
//! Compares the heap against `std::collections::BinaryHeap` on the workloads
//! it is built for. The binary heap has no decrease-key, so the decrease-key
//! workload uses lazy re-insertion for it, the way Dijkstra is usually written
//! over `BinaryHeap`.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_perf
//!
//! # Only one workload
//! cargo bench --bench heap_perf -- decrease_key
//! ```

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use strict_fibonacci_heap::StrictFibonacciHeap;

const SIZES: [usize; 3] = [1 << 8, 1 << 12, 1 << 16];

fn shuffled(n: usize, seed: u64) -> Vec<u64> {
    let mut items: Vec<u64> = (0..n as u64).collect();
    items.shuffle(&mut StdRng::seed_from_u64(seed));
    items
}

fn strict_insert_drain(items: &[u64]) -> u64 {
    let mut heap = StrictFibonacciHeap::with_capacity(items.len());
    for &item in items {
        heap.insert(item);
    }
    let mut acc = 0u64;
    while let Ok(item) = heap.extract_min() {
        acc = acc.wrapping_add(item);
    }
    acc
}

fn binary_insert_drain(items: &[u64]) -> u64 {
    let mut heap = BinaryHeap::with_capacity(items.len());
    for &item in items {
        heap.push(Reverse(item));
    }
    let mut acc = 0u64;
    while let Some(Reverse(item)) = heap.pop() {
        acc = acc.wrapping_add(item);
    }
    acc
}

/// Pairs of (distance, vertex) relaxed several times before draining
fn relaxations(n: usize, seed: u64) -> Vec<(usize, u64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n * 4)
        .map(|_| (rng.gen_range(0..n), rng.gen_range(1..64)))
        .collect()
}

fn strict_decrease_key(n: usize, relax: &[(usize, u64)]) -> u64 {
    let mut heap = StrictFibonacciHeap::with_capacity(n);
    let mut dist: Vec<u64> = (0..n as u64).map(|v| 1_000_000 + v).collect();
    for (v, &d) in dist.iter().enumerate() {
        heap.insert((d, v));
    }
    for &(v, by) in relax {
        let old = dist[v];
        let new = old.saturating_sub(by);
        if new < old && heap.decrease_key(&(old, v), (new, v)).is_ok() {
            dist[v] = new;
        }
    }
    let mut acc = 0u64;
    while let Ok((d, _)) = heap.extract_min() {
        acc = acc.wrapping_add(d);
    }
    acc
}

fn binary_lazy_decrease_key(n: usize, relax: &[(usize, u64)]) -> u64 {
    let mut heap = BinaryHeap::with_capacity(n + relax.len());
    let mut dist: Vec<u64> = (0..n as u64).map(|v| 1_000_000 + v).collect();
    for (v, &d) in dist.iter().enumerate() {
        heap.push(Reverse((d, v)));
    }
    for &(v, by) in relax {
        let new = dist[v].saturating_sub(by);
        if new < dist[v] {
            dist[v] = new;
            heap.push(Reverse((new, v)));
        }
    }
    let mut acc = 0u64;
    while let Some(Reverse((d, v))) = heap.pop() {
        if d == dist[v] {
            acc = acc.wrapping_add(d);
        }
    }
    acc
}

fn strict_meld_chunks(items: &[u64], chunk: usize) -> usize {
    let mut heap = StrictFibonacciHeap::new();
    for part in items.chunks(chunk) {
        heap.meld(StrictFibonacciHeap::from_items(part.iter().copied()));
    }
    heap.len()
}

fn binary_append_chunks(items: &[u64], chunk: usize) -> usize {
    let mut heap = BinaryHeap::new();
    for part in items.chunks(chunk) {
        let mut other: BinaryHeap<Reverse<u64>> = part.iter().copied().map(Reverse).collect();
        heap.append(&mut other);
    }
    heap.len()
}

fn bench_insert_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_drain");
    for n in SIZES {
        let items = shuffled(n, 1);
        group.bench_with_input(BenchmarkId::new("strict_fibonacci", n), &items, |b, items| {
            b.iter(|| black_box(strict_insert_drain(items)));
        });
        group.bench_with_input(BenchmarkId::new("binary_heap", n), &items, |b, items| {
            b.iter(|| black_box(binary_insert_drain(items)));
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for n in SIZES {
        let relax = relaxations(n, 2);
        group.bench_with_input(BenchmarkId::new("strict_fibonacci", n), &relax, |b, relax| {
            b.iter(|| black_box(strict_decrease_key(n, relax)));
        });
        group.bench_with_input(BenchmarkId::new("binary_heap_lazy", n), &relax, |b, relax| {
            b.iter(|| black_box(binary_lazy_decrease_key(n, relax)));
        });
    }
    group.finish();
}

fn bench_meld(c: &mut Criterion) {
    let mut group = c.benchmark_group("meld");
    for n in SIZES {
        let items = shuffled(n, 3);
        group.bench_with_input(BenchmarkId::new("strict_fibonacci", n), &items, |b, items| {
            b.iter(|| black_box(strict_meld_chunks(items, 16)));
        });
        group.bench_with_input(BenchmarkId::new("binary_heap", n), &items, |b, items| {
            b.iter(|| black_box(binary_append_chunks(items, 16)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert_drain, bench_decrease_key, bench_meld);
criterion_main!(benches);
