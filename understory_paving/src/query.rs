// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric queries: intersection with arbitrary boxes and facet adjacency.

use alloc::vec;
use alloc::vec::Vec;

use understory_interval::IntervalBox;

use crate::error::PavingError;
use crate::paving::{Kind, Paving};
use crate::types::{PavingId, SetValue};

/// Margin by which a leaf's box is inflated to gather neighbour candidates.
///
/// Candidates are then filtered with the exact facet test on the original boxes,
/// so the margin only has to be small compared to the finest leaf.
pub const ADJACENCY_MARGIN: f64 = 1e-10;

impl Paving {
    /// Leaves below `id` whose value matches `value` and whose box meets `query`.
    ///
    /// With `no_degenerate`, leaves that only touch `query` (the intersection has zero
    /// width along an axis where one of the two boxes is wider) are left out, so only
    /// leaves overlapping `query` with positive extent are returned. Subtrees whose
    /// box misses `query` are not visited.
    ///
    /// # Errors
    ///
    /// - [`PavingError::DimensionMismatch`] if `query` is not of the paving's dimension.
    /// - [`PavingError::StaleId`] if `id` is not live.
    pub fn pavings_intersecting(
        &self,
        id: PavingId,
        value: SetValue,
        query: &IntervalBox,
        no_degenerate: bool,
    ) -> Result<Vec<PavingId>, PavingError> {
        if query.dim() != self.dim() {
            return Err(PavingError::DimensionMismatch {
                expected: self.dim(),
                found: query.dim(),
            });
        }
        if !self.is_alive(id) {
            return Err(PavingError::StaleId(id));
        }
        let mut out = Vec::new();
        self.collect_intersecting(id, value, query, no_degenerate, &mut out);
        Ok(out)
    }

    /// Facet neighbours of `id` whose value matches `value`.
    ///
    /// Neighbours are searched from the root, so they can live anywhere in the tree.
    /// Two leaves are neighbours when their boxes share a facet: they touch along
    /// exactly one axis and overlap with positive extent along the others. Leaves
    /// meeting only at an edge or a corner are not neighbours. `id` itself is never
    /// returned. With `without_flag`, flagged leaves are skipped.
    ///
    /// `id` must be a leaf. Internal nodes are rejected in debug builds; in release
    /// builds their result is unspecified.
    ///
    /// ```
    /// use understory_interval::IntervalBox;
    /// use understory_paving::{Paving, SetValue};
    ///
    /// let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 3.0]]));
    /// let [left, right] = paving.bisect(paving.root(), 0.5).unwrap();
    /// let [mid, far] = paving.bisect(right, 0.5).unwrap();
    /// assert_eq!(paving.neighbours(left, SetValue::ALL_CLASSIFIED, false), vec![mid]);
    /// assert_eq!(paving.neighbours_default(mid), vec![left, far]);
    /// ```
    pub fn neighbours(&self, id: PavingId, value: SetValue, without_flag: bool) -> Vec<PavingId> {
        debug_assert!(self.is_leaf(id), "neighbours are only defined for leaves");
        let bounds = &self.node(id).bounds;
        let reach = bounds.inflate(ADJACENCY_MARGIN);
        let mut candidates = Vec::new();
        self.collect_intersecting(self.root(), value, &reach, false, &mut candidates);
        candidates.retain(|&other| {
            let node = self.node(other);
            other != id
                && !(without_flag && node.flag.get())
                && node.bounds.is_facet_adjacent(bounds)
        });
        candidates
    }

    /// [`neighbours`](Self::neighbours) of any classified value, flags ignored.
    pub fn neighbours_default(&self, id: PavingId) -> Vec<PavingId> {
        self.neighbours(id, SetValue::ALL_CLASSIFIED, false)
    }

    /// Whether the boxes of `a` and `b` share a facet.
    pub fn are_neighbours(&self, a: PavingId, b: PavingId) -> bool {
        a != b && self.bounds(a).is_facet_adjacent(self.bounds(b))
    }

    fn collect_intersecting(
        &self,
        id: PavingId,
        value: SetValue,
        query: &IntervalBox,
        no_degenerate: bool,
        out: &mut Vec<PavingId>,
    ) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let node = self.node(cur);
            if !node.bounds.intersects(query) {
                continue;
            }
            match node.kind {
                Kind::Leaf { value: v } => {
                    if v.matches(value) && (!no_degenerate || node.bounds.overlaps(query)) {
                        out.push(cur);
                    }
                }
                Kind::Internal { first, second, .. } => {
                    stack.push(second);
                    stack.push(first);
                }
            }
        }
    }
}
