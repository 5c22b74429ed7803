// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_paving --heading-base-level=0

//! Understory Paving: binary-tree pavings of n-dimensional boxes.
//!
//! A paving covers a root box with a binary tree. Each internal node splits its box
//! in two along its widest axis; each leaf carries a classification ([`SetValue`])
//! such as `IN`, `OUT` or `UNKNOWN`. It is the data structure behind set-inversion
//! and constraint-propagation solvers, which repeatedly bisect undecided boxes and
//! classify the pieces.
//!
//! - Builds the tree by bisection and records classifications supplied by the caller.
//! - Searches leaves by value, enumerates their boxes, and answers box-intersection
//!   queries.
//! - Finds facet neighbours of a leaf anywhere in the tree.
//! - Extracts connected subsets: maximal groups of same-valued leaves linked by
//!   shared facets.
//!
//! ## Not a solver
//!
//! This crate does not evaluate constraints or perform interval arithmetic. Whatever
//! decides that a box is inside or outside a set calls [`Paving::bisect`] and
//! [`Paving::set_value`]; the paving only stores and queries the result.
//! Boxes come from [`understory_interval`].
//!
//! ## API overview
//!
//! - [`Paving`]: arena-backed tree of boxes.
//! - [`PavingId`]: generational handle of a node. Freed ids never alias live nodes.
//! - [`SetValue`]: classification flags, also used as query masks.
//! - [`ConnectedSubset`]: one connected component of leaves.
//! - [`PavingError`]: precondition violations of fallible operations.
//! - [`FloodTrace`] / [`SpanningRecorder`]: optional tracing of component extraction.
//!
//! Key operations:
//! - [`Paving::bisect`] / [`Paving::set_value`] / [`Paving::reset_paving`]
//! - [`Paving::first_leaf`], [`Paving::boxes`], [`Paving::pavings_intersecting`]
//! - [`Paving::neighbours`]
//! - [`Paving::connected_subsets`]
//!
//! ## Masks
//!
//! Searches take a [`SetValue`] mask: a leaf matches when its value shares a bit with
//! the mask. The empty mask [`SetValue::DEFAULT`] matches every leaf.
//!
//! ### Minimal usage
//!
//! ```
//! use understory_interval::IntervalBox;
//! use understory_paving::{Paving, SetValue};
//!
//! // Classify the unit square against the disc x² + y² <= 1, crudely.
//! let mut paving = Paving::new(IntervalBox::from_bounds(&[[-1.0, 1.0], [-1.0, 1.0]]));
//! let leaves = paving.bisect_all(paving.root(), 4, 0.5).unwrap();
//! for leaf in leaves {
//!     let b = paving.bounds(leaf);
//!     let far = b.iter().map(|iv| iv.lb().abs().max(iv.ub().abs()).powi(2)).sum::<f64>();
//!     let near = b.iter().map(|iv| {
//!         if iv.contains(0.0) { 0.0 } else { iv.lb().abs().min(iv.ub().abs()).powi(2) }
//!     }).sum::<f64>();
//!     let value = if far <= 1.0 {
//!         SetValue::IN
//!     } else if near > 1.0 {
//!         SetValue::OUT
//!     } else {
//!         SetValue::UNKNOWN
//!     };
//!     paving.set_value(leaf, value).unwrap();
//! }
//!
//! // The four central cells are inside and form a single component.
//! let inside = paving.connected_subsets(SetValue::IN, false);
//! assert_eq!(inside.len(), 1);
//! assert_eq!(inside[0].len(), 4);
//! assert!(inside[0].is_strictly_included_in_paving(&paving));
//! ```
//!
//! ## Flags and threads
//!
//! Nodes carry a scratch flag used by the searches as a visited marker. It is stored
//! in a `Cell`, so [`Paving`] is `Send` but not `Sync`.
//!
//! ## Features
//!
//! - `kurbo`: forwards to `understory_interval/kurbo` for 2D `kurbo::Rect` conversions.
//! - `std` (default) / `libm`: forwarded to the interval crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod connected;
mod error;
mod paving;
mod query;
mod search;
mod trace;
mod types;

pub use connected::ConnectedSubset;
pub use error::PavingError;
pub use paving::{DEFAULT_RATIO, Paving};
pub use query::ADJACENCY_MARGIN;
pub use trace::{Discovery, FloodTrace, SpanningRecorder};
pub use types::{PavingId, SetValue};

pub use understory_interval::{Interval, IntervalBox};
