// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_interval::IntervalBox;
use understory_paving::{Paving, SetValue};

fn unit_cube(dim: usize) -> IntervalBox {
    IntervalBox::from_bounds(&vec![[0.0, 1.0]; dim])
}

/// Classify against the ball `|x|² <= 0.16` centred at `0.5`, refining undecided
/// boxes down to `depth`.
fn sivia_ball(dim: usize, depth: u32) -> Paving {
    let mut paving = Paving::new(unit_cube(dim));
    let mut pending = vec![(paving.root(), 0)];
    while let Some((leaf, level)) = pending.pop() {
        let (mut lo, mut hi) = (0.0, 0.0);
        for iv in paving.bounds(leaf) {
            let (a, b) = (iv.lb() - 0.5, iv.ub() - 0.5);
            hi += (a * a).max(b * b);
            if a > 0.0 || b < 0.0 {
                lo += (a * a).min(b * b);
            }
        }
        let value = if hi <= 0.16 {
            SetValue::IN
        } else if lo > 0.16 {
            SetValue::OUT
        } else if level == depth {
            SetValue::UNKNOWN
        } else {
            let [first, second] = paving.bisect_default(leaf).unwrap();
            pending.push((second, level + 1));
            pending.push((first, level + 1));
            continue;
        };
        paving.set_value(leaf, value).unwrap();
    }
    paving
}

fn bench_bisect_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("bisect_all");
    for &(dim, depth) in &[(2usize, 12u32), (3, 12), (4, 12)] {
        group.throughput(Throughput::Elements(1 << depth));
        group.bench_function(format!("dim{dim}_depth{depth}"), |b| {
            b.iter_batched(
                || Paving::new(unit_cube(dim)),
                |mut paving| {
                    let leaves = paving.bisect_all(paving.root(), depth, 0.5).unwrap();
                    black_box(leaves.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_sivia(c: &mut Criterion) {
    let mut group = c.benchmark_group("sivia_ball");
    for &(dim, depth) in &[(2usize, 14u32), (3, 15)] {
        group.bench_function(format!("dim{dim}_depth{depth}"), |b| {
            b.iter(|| {
                let paving = sivia_ball(dim, depth);
                black_box(paving.len());
            })
        });
    }
    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut group = c.benchmark_group("reset_paving");
    let base = sivia_ball(2, 14);
    group.bench_function("reset_then_refine", |b| {
        b.iter_batched(
            || base.clone(),
            |mut paving| {
                let root = paving.root();
                paving.reset_paving(root, SetValue::UNKNOWN).unwrap();
                // Reuses the freed slots.
                let leaves = paving.bisect_all(root, 10, 0.5).unwrap();
                black_box(leaves.len());
            },
            BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_bisect_all, bench_sivia, bench_reset);
criterion_main!(benches);
