// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visible cells of a paving.
//!
//! Uses a Kurbo viewport rectangle to select the leaves of a 2D paving that a
//! renderer would have to draw, and hit-tests a pointer against them.
//!
//! Run:
//! - `cargo run -p understory_demos --example paving_visible_cells`

use kurbo::{Point, Rect};
use understory_interval::IntervalBox;
use understory_paving::{Paving, SetValue};

fn main() {
    // A 16 x 16 grid of cells over a 1600 x 1600 canvas.
    let mut paving = Paving::new(IntervalBox::from(Rect::new(0.0, 0.0, 1600.0, 1600.0)));
    let cells = paving.bisect_all(paving.root(), 8, 0.5).unwrap();
    for (i, &cell) in cells.iter().enumerate() {
        let value = if i % 3 == 0 { SetValue::IN } else { SetValue::OUT };
        paving.set_value(cell, value).unwrap();
    }

    let viewport = Rect::new(200.0, 300.0, 600.0, 500.0);
    let query = IntervalBox::from(viewport);
    let visible = paving
        .pavings_intersecting(paving.root(), SetValue::DEFAULT, &query, true)
        .unwrap();
    println!("viewport {viewport:?}: {} visible cells", visible.len());
    for &id in visible.iter().take(5) {
        let rect = paving.bounds(id).to_rect().unwrap();
        println!("  {id}: {rect:?} {:?}", paving.value(id));
    }

    // Cells merely touching the viewport edge are dropped by the `no_degenerate` query.
    let touching = paving
        .pavings_intersecting(paving.root(), SetValue::DEFAULT, &query, false)
        .unwrap();
    println!("{} more cells only touch the viewport", touching.len() - visible.len());

    let pointer = Point::new(420.0, 310.0);
    let hit = visible
        .iter()
        .copied()
        .find(|&id| paving.bounds(id).contains_point(&[pointer.x, pointer.y]));
    if let Some(id) = hit {
        println!("pointer {pointer:?} is over {id} ({:?})", paving.value(id));
    }

    let highlighted = paving.pavings_intersecting(paving.root(), SetValue::IN, &query, true);
    println!("{} IN cells in view", highlighted.map_or(0, |v| v.len()));
}
