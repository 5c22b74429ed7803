// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_interval::IntervalBox;
use understory_paving::{Paving, PavingId, SetValue};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// A 2D paving refined unevenly: random leaves are bisected at random ratios,
/// then classified at random.
fn random_paving(splits: usize) -> (Paving, Vec<PavingId>) {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 1000.0], [0.0, 1000.0]]));
    let mut leaves = vec![paving.root()];
    for _ in 0..splits {
        let i = (rng.next_u64() % leaves.len() as u64) as usize;
        let ratio = 0.2 + 0.6 * rng.next_f64();
        if let Ok([a, b]) = paving.bisect(leaves[i], ratio) {
            leaves.swap_remove(i);
            leaves.push(a);
            leaves.push(b);
        }
    }
    for &leaf in &leaves {
        let value = match rng.next_u64() % 3 {
            0 => SetValue::IN,
            1 => SetValue::OUT,
            _ => SetValue::UNKNOWN,
        };
        paving.set_value(leaf, value).unwrap();
    }
    (paving, leaves)
}

fn bench_neighbours(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbours");
    for &n in &[1_000usize, 10_000] {
        let (paving, leaves) = random_paving(n);
        group.throughput(Throughput::Elements(leaves.len() as u64));
        group.bench_function(format!("every_leaf_n{n}"), |b| {
            b.iter(|| {
                let total: usize = leaves
                    .iter()
                    .map(|&leaf| paving.neighbours_default(leaf).len())
                    .sum();
                black_box(total);
            })
        });
    }
    group.finish();
}

fn bench_connected_subsets(c: &mut Criterion) {
    let mut group = c.benchmark_group("connected_subsets");
    for &n in &[1_000usize, 10_000] {
        let (paving, _) = random_paving(n);
        group.bench_function(format!("in_n{n}"), |b| {
            b.iter(|| black_box(paving.connected_subsets(SetValue::IN, false).len()))
        });
        group.bench_function(format!("in_sorted_n{n}"), |b| {
            b.iter(|| black_box(paving.connected_subsets(SetValue::IN, true).len()))
        });
    }
    group.finish();
}

fn bench_boxes(c: &mut Criterion) {
    let mut group = c.benchmark_group("boxes");
    let (mut paving, _) = random_paving(10_000);
    // Make the right half uniformly OUT so the exclusion hint can prune it.
    let root = paving.root();
    let right = paving.second_subpaving(root).unwrap();
    paving.reset_paving(right, SetValue::OUT).unwrap();
    paving.bisect_all(right, 10, 0.5).unwrap();
    for leaf in paving.leaves(right, SetValue::DEFAULT) {
        paving.set_value(leaf, SetValue::OUT).unwrap();
    }
    group.bench_function("in_no_hint", |b| {
        b.iter(|| black_box(paving.boxes(root, SetValue::IN, SetValue::DEFAULT).len()))
    });
    group.bench_function("in_exclude_out", |b| {
        b.iter(|| black_box(paving.boxes(root, SetValue::IN, SetValue::OUT).len()))
    });
    group.finish();
}

fn bench_intersecting(c: &mut Criterion) {
    let mut group = c.benchmark_group("pavings_intersecting");
    let (paving, _) = random_paving(10_000);
    let mut rng = Rng::new(0xBADC_F00D_1234_5678);
    let queries: Vec<_> = (0..256)
        .map(|_| {
            let (x, y) = (rng.next_f64() * 900.0, rng.next_f64() * 900.0);
            IntervalBox::from_bounds(&[[x, x + 100.0], [y, y + 100.0]])
        })
        .collect();
    group.throughput(Throughput::Elements(queries.len() as u64));
    for no_degenerate in [false, true] {
        group.bench_function(format!("window_no_degenerate_{no_degenerate}"), |b| {
            b.iter(|| {
                let hits: usize = queries
                    .iter()
                    .map(|q| {
                        let root = paving.root();
                        paving
                            .pavings_intersecting(root, SetValue::DEFAULT, q, no_degenerate)
                            .map_or(0, |v| v.len())
                    })
                    .sum();
                black_box(hits);
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_neighbours,
    bench_connected_subsets,
    bench_boxes,
    bench_intersecting,
);
criterion_main!(benches);
