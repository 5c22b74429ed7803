// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_interval --heading-base-level=0

//! Understory Interval: closed intervals and n-dimensional interval boxes.
//!
//! This crate supplies the box primitive consumed by `understory_paving`.
//!
//! - [`Interval`]: a closed `f64` interval with a normalized empty value.
//! - [`IntervalBox`]: one interval per axis, with intersection, hull, widest axis,
//!   midpoint, inflation, and degeneracy checks.
//! - Contact classification between boxes: overlap, shared facet, or edge/corner
//!   touch ([`IntervalBox::contact_axes`]).
//!
//! It does not implement interval arithmetic (`+`, `*`, functions of intervals);
//! higher layers that evaluate constraints over boxes bring their own.
//!
//! # Example
//!
//! ```rust
//! use understory_interval::{Interval, IntervalBox};
//!
//! let domain = IntervalBox::from_bounds(&[[0.0, 10.0], [0.0, 10.0]]);
//! let left = domain.with_axis(0, Interval::new(0.0, 5.0));
//! let right = domain.with_axis(0, Interval::new(5.0, 10.0));
//!
//! // The halves partition the domain and share one facet.
//! assert_eq!(left.hull(&right), domain);
//! assert!(left.is_facet_adjacent(&right));
//! assert_eq!(left.intersect(&right).volume(), 0.0);
//! ```
//!
//! ## Features
//!
//! - `kurbo`: conversions between 2D boxes and `kurbo::Rect`.
//! - `std` (default) / `libm`: forwarded to Kurbo when `kurbo` is enabled.
//!
//! ### Float semantics
//!
//! Bounds are `f64`. A NaN bound produces the empty interval.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod boxes;
pub mod interval;
#[cfg(feature = "kurbo")]
mod kurbo_bridge;

pub use boxes::{Coords, IntervalBox};
pub use interval::Interval;
