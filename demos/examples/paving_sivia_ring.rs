// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Set inversion over a ring.
//!
//! Approximates `{ (x, y) : 1 <= x² + y² <= 4 }` by bisecting undecided boxes until
//! they are thinner than `EPSILON`, then extracts connected subsets of the inside
//! and outside and prints an ASCII picture.
//!
//! The inclusion test below is a toy interval evaluation of `x² + y²`; real solvers
//! bring their own contractors and only use the paving to store their verdicts.
//!
//! Run:
//! - `cargo run -p understory_demos --example paving_sivia_ring`

use understory_interval::{Interval, IntervalBox};
use understory_paving::{Paving, SetValue, SpanningRecorder};

const EPSILON: f64 = 0.05;
const INNER: f64 = 1.0;
const OUTER: f64 = 4.0;

/// Range of `t²` over `t ∈ iv`.
fn square(iv: Interval) -> Interval {
    let (a, b) = (iv.lb() * iv.lb(), iv.ub() * iv.ub());
    if iv.contains(0.0) {
        Interval::new(0.0, a.max(b))
    } else {
        Interval::new(a.min(b), a.max(b))
    }
}

fn classify(b: &IntervalBox) -> Option<SetValue> {
    let r = b
        .iter()
        .map(|&iv| square(iv))
        .fold(Interval::point(0.0), |acc, s| {
            Interval::new(acc.lb() + s.lb(), acc.ub() + s.ub())
        });
    if INNER <= r.lb() && r.ub() <= OUTER {
        Some(SetValue::IN)
    } else if r.ub() < INNER || r.lb() > OUTER {
        Some(SetValue::OUT)
    } else {
        None
    }
}

fn sivia(paving: &mut Paving) {
    let mut pending = vec![paving.root()];
    while let Some(leaf) = pending.pop() {
        let b = paving.bounds(leaf);
        let value = match classify(b) {
            Some(value) => value,
            None if b.max_diam() < EPSILON => SetValue::UNKNOWN,
            None => {
                let [first, second] = paving.bisect_default(leaf).unwrap();
                pending.push(second);
                pending.push(first);
                continue;
            }
        };
        paving.set_value(leaf, value).unwrap();
    }
}

fn render(paving: &Paving, cols: usize, rows: usize) {
    let domain = paving.bounds(paving.root());
    let (x, y) = (domain[0], domain[1]);
    for row in (0..rows).rev() {
        let line: String = (0..cols)
            .map(|col| {
                let px = x.point_at((col as f64 + 0.5) / cols as f64);
                let py = y.point_at((row as f64 + 0.5) / rows as f64);
                let cell = IntervalBox::from_bounds(&[[px, px], [py, py]]);
                let hits = paving
                    .pavings_intersecting(paving.root(), SetValue::DEFAULT, &cell, false)
                    .unwrap_or_default();
                match hits.first().and_then(|&h| paving.value(h)) {
                    Some(v) if v == SetValue::IN => '#',
                    Some(v) if v == SetValue::OUT => ' ',
                    _ => '.',
                }
            })
            .collect();
        println!("|{line}|");
    }
}

fn main() {
    let mut paving = Paving::new(IntervalBox::from_bounds(&[[-3.0, 3.0], [-3.0, 3.0]]));
    sivia(&mut paving);

    let root = paving.root();
    println!("{paving:?}");
    println!(
        "leaves: {} ({} in, {} out, {} undecided)",
        paving.leaf_count(root),
        paving.leaves(root, SetValue::IN).len(),
        paving.leaves(root, SetValue::OUT).len(),
        paving.leaves(root, SetValue::UNKNOWN).len(),
    );
    render(&paving, 60, 30);

    let mut recorder = SpanningRecorder::new();
    let inside = paving.connected_subsets_with_trace(SetValue::IN, true, &mut recorder);
    println!("inside: {} component(s)", inside.len());
    if let Some(ring) = inside.first() {
        println!(
            "  largest: {} leaves, hull {}, strictly inside the domain: {}",
            ring.len(),
            ring.hull(&paving),
            ring.is_strictly_included_in_paving(&paving)
        );
        if let Some(path) = ring
            .items()
            .last()
            .and_then(|&leaf| recorder.path_from_seed(leaf))
        {
            println!("  last member reached in {} steps", path.len() - 1);
        }
    }

    let outside = paving.connected_subsets(SetValue::OUT, true);
    for subset in &outside {
        let kind = if subset.is_strictly_included_in_paving(&paving) {
            "hole"
        } else {
            "exterior"
        };
        println!("  {kind}: {} leaves, hull {}", subset.len(), subset.hull(&paving));
    }
}
