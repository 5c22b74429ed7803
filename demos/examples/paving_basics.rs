// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paving basics.
//!
//! Split a square into quadrants, classify them like a checkerboard, and show that
//! diagonal cells are not connected.
//!
//! Run:
//! - `cargo run -p understory_demos --example paving_basics`

use understory_interval::IntervalBox;
use understory_paving::{Paving, SetValue};

fn main() {
    let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 10.0], [0.0, 10.0]]));
    let root = paving.root();

    // Each bisection splits the widest axis: x first, then y in each half.
    let [left, right] = paving.bisect(root, 0.5).unwrap();
    let [a, b] = paving.bisect(left, 0.5).unwrap();
    let [c, d] = paving.bisect(right, 0.5).unwrap();
    for (name, id) in [("a", a), ("b", b), ("c", c), ("d", d)] {
        println!("{name} {id}: {}", paving.bounds(id));
    }

    paving.set_value(a, SetValue::IN).unwrap();
    paving.set_value(d, SetValue::IN).unwrap();
    paving.set_value(b, SetValue::OUT).unwrap();
    paving.set_value(c, SetValue::OUT).unwrap();

    println!("neighbours of a: {:?}", paving.neighbours_default(a));
    println!(
        "IN neighbours of a: {:?}",
        paving.neighbours(a, SetValue::IN, false)
    );

    let inside = paving.connected_subsets(SetValue::IN, false);
    println!("IN components: {}", inside.len());
    for (i, subset) in inside.iter().enumerate() {
        println!("  #{i}: {:?} hull {}", subset.items(), subset.hull(&paving));
    }
    assert_eq!(inside.len(), 2, "corner contact must not connect a and d");

    // Merging the right half back into one IN leaf joins everything IN along x = 5.
    paving.reset_paving(right, SetValue::IN).unwrap();
    let inside = paving.connected_subsets(SetValue::IN, true);
    println!(
        "after merging the right half: {} component(s), largest has {} leaves",
        inside.len(),
        inside[0].len()
    );
    assert!(!paving.is_alive(c), "reset frees the old children");
}
