// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! n-dimensional interval boxes.

use core::fmt;
use core::ops::Index;

use smallvec::SmallVec;

use crate::interval::{Interval, le, lt};

/// Inline capacity of an [`IntervalBox`]; boxes of higher dimension spill to the heap.
const INLINE_DIMS: usize = 4;

/// Coordinates of a point, as returned by [`IntervalBox::mid`].
pub type Coords = SmallVec<[f64; INLINE_DIMS]>;

/// An axis-aligned box in `n` dimensions, stored as one [`Interval`] per axis.
///
/// The box is empty as soon as one of its intervals is empty. Binary operations
/// (`intersect`, `hull`, ...) require both operands to have the same dimension
/// and panic otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalBox {
    dims: SmallVec<[Interval; INLINE_DIMS]>,
}

impl IntervalBox {
    /// A box of dimension `dim` whose every axis is `interval`.
    pub fn new(dim: usize, interval: Interval) -> Self {
        Self {
            dims: SmallVec::from_elem(interval, dim),
        }
    }

    /// Build a box from one interval per axis.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> Self {
        Self {
            dims: intervals.into_iter().collect(),
        }
    }

    /// Build a box from `[lb, ub]` pairs, one per axis.
    ///
    /// ```
    /// use understory_interval::{Interval, IntervalBox};
    ///
    /// let b = IntervalBox::from_bounds(&[[0.0, 10.0], [-1.0, 1.0]]);
    /// assert_eq!(b.dim(), 2);
    /// assert_eq!(b[1], Interval::new(-1.0, 1.0));
    /// ```
    pub fn from_bounds(bounds: &[[f64; 2]]) -> Self {
        Self::from_intervals(bounds.iter().map(|&b| Interval::from(b)))
    }

    /// The empty box of dimension `dim`.
    pub fn empty(dim: usize) -> Self {
        Self::new(dim, Interval::EMPTY)
    }

    /// Number of axes.
    pub fn dim(&self) -> usize {
        self.dims.len()
    }

    /// Per-axis intervals.
    pub fn as_slice(&self) -> &[Interval] {
        &self.dims
    }

    /// Iterate over the per-axis intervals.
    pub fn iter(&self) -> core::slice::Iter<'_, Interval> {
        self.dims.iter()
    }

    /// A copy of this box with axis `axis` replaced by `interval`.
    pub fn with_axis(&self, axis: usize, interval: Interval) -> Self {
        let mut out = self.clone();
        out.dims[axis] = interval;
        out
    }

    /// True if some axis is empty.
    pub fn is_empty(&self) -> bool {
        self.dims.iter().any(Interval::is_empty)
    }

    /// True if the box is non-empty and has zero width along at least one axis.
    pub fn is_degenerate(&self) -> bool {
        !self.is_empty() && self.dims.iter().any(Interval::is_degenerate)
    }

    /// True if every axis has finite bounds.
    pub fn is_bounded(&self) -> bool {
        self.dims.iter().all(Interval::is_bounded)
    }

    /// Width of the widest axis, `0.0` for an empty or zero-dimensional box.
    pub fn max_diam(&self) -> f64 {
        self.max_diam_axis()
            .map(|axis| self.dims[axis].diam())
            .unwrap_or(0.0)
    }

    /// Index of the widest axis. Ties go to the lowest index.
    ///
    /// Returns `None` for an empty or zero-dimensional box.
    pub fn max_diam_axis(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let mut best: Option<(usize, f64)> = None;
        for (axis, iv) in self.dims.iter().enumerate() {
            let d = iv.diam();
            match best {
                Some((_, widest)) if !lt(widest, d) => {}
                _ => best = Some((axis, d)),
            }
        }
        best.map(|(axis, _)| axis)
    }

    /// Centre of the box.
    pub fn mid(&self) -> Coords {
        self.dims.iter().map(Interval::mid).collect()
    }

    /// Product of the axis widths; `0.0` when empty.
    pub fn volume(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        self.dims.iter().map(Interval::diam).product()
    }

    /// Widen every axis by `radius` on both sides.
    pub fn inflate(&self, radius: f64) -> Self {
        Self::from_intervals(self.dims.iter().map(|iv| iv.inflate(radius)))
    }

    /// Axis-wise intersection.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn intersect(&self, other: &Self) -> Self {
        self.assert_same_dim(other);
        Self::from_intervals(
            self.dims
                .iter()
                .zip(&other.dims)
                .map(|(a, b)| a.intersect(b)),
        )
    }

    /// Smallest box containing both boxes (the interval-vector union).
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn hull(&self, other: &Self) -> Self {
        self.assert_same_dim(other);
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::from_intervals(self.dims.iter().zip(&other.dims).map(|(a, b)| a.hull(b)))
    }

    /// Whether the boxes share at least one point, a common corner included.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn intersects(&self, other: &Self) -> bool {
        self.assert_same_dim(other);
        self.dims
            .iter()
            .zip(&other.dims)
            .all(|(a, b)| a.intersects(b))
    }

    /// Whether `self` lies entirely within `other`.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.assert_same_dim(other);
        self.is_empty()
            || self
                .dims
                .iter()
                .zip(&other.dims)
                .all(|(a, b)| a.is_subset(b))
    }

    /// Whether `self` lies within `outer` without reaching any of its faces.
    ///
    /// Axes along which `outer` is degenerate have no interior and are ignored.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn is_interior_subset(&self, outer: &Self) -> bool {
        self.assert_same_dim(outer);
        if self.is_empty() {
            return true;
        }
        self.dims.iter().zip(&outer.dims).all(|(a, o)| {
            if o.is_degenerate() {
                a.is_subset(o)
            } else {
                lt(o.lb(), a.lb()) && lt(a.ub(), o.ub())
            }
        })
    }

    /// Number of contact axes between two boxes, or `None` if they do not meet.
    ///
    /// A contact axis is one where the two boxes only touch: their intersection
    /// has zero width there while at least one of them is wider. Axes where both
    /// boxes are flat (a degenerate domain) are not contacts.
    ///
    /// - `Some(0)`: the boxes overlap with positive extent on every non-flat axis.
    /// - `Some(1)`: they share a facet.
    /// - `Some(k)` for `k >= 2`: they meet along an edge or a corner only.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions differ.
    pub fn contact_axes(&self, other: &Self) -> Option<usize> {
        self.assert_same_dim(other);
        let mut contacts = 0;
        for (a, b) in self.dims.iter().zip(&other.dims) {
            let meet = a.intersect(b);
            if meet.is_empty() {
                return None;
            }
            if meet.is_degenerate() && !(a.is_degenerate() && b.is_degenerate()) {
                contacts += 1;
            }
        }
        Some(contacts)
    }

    /// Whether the boxes overlap with positive extent (no contact axis).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.contact_axes(other) == Some(0)
    }

    /// Whether the boxes touch along exactly one shared facet.
    ///
    /// ```
    /// use understory_interval::IntervalBox;
    ///
    /// let a = IntervalBox::from_bounds(&[[0.0, 5.0], [0.0, 5.0]]);
    /// let right = IntervalBox::from_bounds(&[[5.0, 10.0], [0.0, 5.0]]);
    /// let diagonal = IntervalBox::from_bounds(&[[5.0, 10.0], [5.0, 10.0]]);
    /// assert!(a.is_facet_adjacent(&right));
    /// assert!(!a.is_facet_adjacent(&diagonal));
    /// ```
    pub fn is_facet_adjacent(&self, other: &Self) -> bool {
        self.contact_axes(other) == Some(1)
    }

    /// Whether `point` lies in the box.
    ///
    /// # Panics
    ///
    /// Panics if `point.len()` differs from the box dimension.
    pub fn contains_point(&self, point: &[f64]) -> bool {
        assert_eq!(
            self.dim(),
            point.len(),
            "dimension mismatch between box and point"
        );
        self.dims
            .iter()
            .zip(point)
            .all(|(iv, &x)| le(iv.lb(), x) && le(x, iv.ub()))
    }

    #[track_caller]
    fn assert_same_dim(&self, other: &Self) {
        assert_eq!(
            self.dim(),
            other.dim(),
            "dimension mismatch between interval boxes"
        );
    }
}

impl Index<usize> for IntervalBox {
    type Output = Interval;

    fn index(&self, axis: usize) -> &Interval {
        &self.dims[axis]
    }
}

impl<'a> IntoIterator for &'a IntervalBox {
    type Item = &'a Interval;
    type IntoIter = core::slice::Iter<'a, Interval>;

    fn into_iter(self) -> Self::IntoIter {
        self.dims.iter()
    }
}

impl FromIterator<Interval> for IntervalBox {
    fn from_iter<I: IntoIterator<Item = Interval>>(iter: I) -> Self {
        Self::from_intervals(iter)
    }
}

impl fmt::Display for IntervalBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, iv) in self.dims.iter().enumerate() {
            if i > 0 {
                f.write_str(" ; ")?;
            }
            write!(f, "{iv}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> IntervalBox {
        IntervalBox::from_bounds(&[[x0, x1], [y0, y1]])
    }

    #[test]
    fn widest_axis_prefers_lowest_index_on_ties() {
        let b = square(0.0, 0.0, 10.0, 10.0);
        assert_eq!(b.max_diam_axis(), Some(0));
        let tall = square(0.0, 0.0, 5.0, 10.0);
        assert_eq!(tall.max_diam_axis(), Some(1));
        assert_eq!(IntervalBox::empty(2).max_diam_axis(), None);
        assert_eq!(IntervalBox::from_intervals([]).max_diam_axis(), None);
    }

    #[test]
    fn contact_axes_classify_overlap_facet_and_corner() {
        let a = square(0.0, 0.0, 5.0, 5.0);
        assert_eq!(a.contact_axes(&square(2.0, 2.0, 8.0, 8.0)), Some(0));
        assert_eq!(a.contact_axes(&square(5.0, 1.0, 9.0, 4.0)), Some(1));
        assert_eq!(a.contact_axes(&square(5.0, 5.0, 9.0, 9.0)), Some(2));
        assert_eq!(a.contact_axes(&square(6.0, 0.0, 9.0, 5.0)), None);
    }

    #[test]
    fn facet_adjacency_in_three_dimensions() {
        let a = IntervalBox::from_bounds(&[[0.0, 1.0], [0.0, 1.0], [0.0, 1.0]]);
        let face = IntervalBox::from_bounds(&[[1.0, 2.0], [0.0, 1.0], [0.0, 1.0]]);
        let edge = IntervalBox::from_bounds(&[[1.0, 2.0], [1.0, 2.0], [0.0, 1.0]]);
        let corner = IntervalBox::from_bounds(&[[1.0, 2.0], [1.0, 2.0], [1.0, 2.0]]);
        assert!(a.is_facet_adjacent(&face));
        assert!(!a.is_facet_adjacent(&edge));
        assert!(!a.is_facet_adjacent(&corner));
    }

    #[test]
    fn flat_domain_axes_are_not_contacts() {
        // Both boxes live on the line y = 5.
        let a = square(0.0, 5.0, 5.0, 5.0);
        let b = square(5.0, 5.0, 10.0, 5.0);
        assert_eq!(a.contact_axes(&b), Some(1));
        assert!(a.is_facet_adjacent(&b));
        assert!(a.is_degenerate());
    }

    #[test]
    fn hull_and_intersection() {
        let a = square(0.0, 0.0, 5.0, 10.0);
        let b = square(5.0, 0.0, 10.0, 10.0);
        assert_eq!(a.hull(&b), square(0.0, 0.0, 10.0, 10.0));
        let meet = a.intersect(&b);
        assert_eq!(meet, square(5.0, 0.0, 5.0, 10.0));
        assert_eq!(meet.volume(), 0.0);
        assert_eq!(a.hull(&IntervalBox::empty(2)), a);
    }

    #[test]
    fn interior_subset_ignores_flat_axes() {
        let outer = square(0.0, 0.0, 10.0, 10.0);
        assert!(square(1.0, 1.0, 9.0, 9.0).is_interior_subset(&outer));
        assert!(!square(0.0, 1.0, 9.0, 9.0).is_interior_subset(&outer));

        let flat = square(0.0, 3.0, 10.0, 3.0);
        assert!(square(1.0, 3.0, 2.0, 3.0).is_interior_subset(&flat));
    }

    #[test]
    fn inflate_mid_volume() {
        let b = square(0.0, 0.0, 2.0, 4.0);
        assert_eq!(b.volume(), 8.0);
        assert_eq!(b.mid().as_slice(), &[1.0, 2.0]);
        assert_eq!(b.inflate(1.0), square(-1.0, -1.0, 3.0, 5.0));
        assert!(b.contains_point(&[2.0, 0.0]));
        assert!(!b.contains_point(&[2.5, 0.0]));
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn mismatched_dimensions_panic() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = IntervalBox::from_bounds(&[[0.0, 1.0]]);
        let _ = a.intersect(&b);
    }

    #[test]
    fn display_lists_axes() {
        let b = square(0.0, 1.0, 2.0, 3.0);
        assert_eq!(format!("{b}"), "([0, 2] ; [1, 3])");
    }
}
