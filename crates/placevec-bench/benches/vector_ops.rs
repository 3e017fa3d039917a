//! Criterion micro-benchmarks for push, insert, and erase against std and smallvec baselines.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use placevec_bench::{front_insert_workload, push_workload, MoveVector};
use placevec_vector::Vector;
use smallvec::SmallVec;

const SIZES: [usize; 3] = [16, 1_024, 65_536];

/// Benchmark: `n` appends from empty, growing by doubling.
fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    for n in SIZES {
        group.bench_with_input(BenchmarkId::new("placevec", n), &n, |b, &n| {
            b.iter(|| {
                let v: MoveVector = push_workload(n, |i| i as u64).unwrap();
                black_box(v);
            });
        });
        group.bench_with_input(BenchmarkId::new("std_vec", n), &n, |b, &n| {
            b.iter(|| {
                let mut v = Vec::new();
                for i in 0..n {
                    v.push(i as u64);
                }
                black_box(v);
            });
        });
        group.bench_with_input(BenchmarkId::new("smallvec", n), &n, |b, &n| {
            b.iter(|| {
                let mut v: SmallVec<[u64; 16]> = SmallVec::new();
                for i in 0..n {
                    v.push(i as u64);
                }
                black_box(v);
            });
        });
    }
    group.finish();
}

/// Benchmark: `n` appends into a vector reserved up front.
fn bench_reserved_push(c: &mut Criterion) {
    let n = 65_536;
    c.bench_function("reserved_push_64k", |b| {
        b.iter(|| {
            let mut v: MoveVector = Vector::new();
            v.reserve(n).unwrap();
            for i in 0..n {
                v.push_back(i as u64).unwrap();
            }
            black_box(v);
        });
    });
}

/// Benchmark: 1K inserts at the front (quadratic tail shifting).
fn bench_front_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("front_insert_1k");
    group.bench_function("placevec", |b| {
        b.iter(|| {
            let v: MoveVector = front_insert_workload(1_024, |i| i as u64).unwrap();
            black_box(v);
        });
    });
    group.bench_function("std_vec", |b| {
        b.iter(|| {
            let mut v = Vec::new();
            for i in 0..1_024u64 {
                v.insert(0, i);
            }
            black_box(v);
        });
    });
    group.finish();
}

/// Benchmark: drain a 1K vector by erasing the front.
fn bench_erase_front(c: &mut Criterion) {
    let source: MoveVector = push_workload(1_024, |i| i as u64).unwrap();
    c.bench_function("erase_front_1k", |b| {
        b.iter(|| {
            let mut v = source.clone();
            while !v.is_empty() {
                v.erase(0);
            }
            black_box(v.capacity());
        });
    });
}

criterion_group!(
    benches,
    bench_push_back,
    bench_reserved_push,
    bench_front_insert,
    bench_erase_front
);
criterion_main!(benches);
