// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Connected-subset extraction over the leaf adjacency graph.
//!
//! Two leaves are adjacent when their boxes share a facet (see
//! [`Paving::neighbours`]). A connected subset is a maximal set of leaves of one
//! value that are pairwise linked by chains of adjacent leaves of that value.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cmp::Reverse;

use understory_interval::IntervalBox;

use crate::paving::Paving;
use crate::trace::FloodTrace;
use crate::types::{PavingId, SetValue};

/// One connected component of leaves.
///
/// Holds leaf ids only; the boxes stay in the [`Paving`] they were extracted from,
/// which must be passed back to the geometric accessors. Any structural change to
/// that paving may invalidate the ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConnectedSubset {
    items: Vec<PavingId>,
}

impl ConnectedSubset {
    /// Member leaves, in discovery order starting from the seed.
    pub fn items(&self) -> &[PavingId] {
        &self.items
    }

    /// Number of member leaves.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if there are no members. Extracted subsets are never empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether `id` is a member.
    pub fn contains(&self, id: PavingId) -> bool {
        self.items.contains(&id)
    }

    /// Smallest box enclosing every member.
    pub fn hull(&self, paving: &Paving) -> IntervalBox {
        self.items
            .iter()
            .fold(IntervalBox::empty(paving.dim()), |acc, &id| {
                acc.hull(paving.bounds(id))
            })
    }

    /// Boxes of the members, in member order.
    pub fn boxes(&self, paving: &Paving) -> Vec<IntervalBox> {
        self.items
            .iter()
            .map(|&id| paving.bounds(id).clone())
            .collect()
    }

    /// True if the subset stays away from every face of the paving's root box.
    ///
    /// A component touching the domain boundary may continue outside the domain;
    /// one strictly inside it is known to be a complete region.
    pub fn is_strictly_included_in_paving(&self, paving: &Paving) -> bool {
        let domain = paving.bounds(paving.root());
        self.hull(paving).is_interior_subset(domain)
    }

    /// Members with at least one facet neighbour of value `neighbour_value`.
    ///
    /// Pass `SetValue::OUT` on an `IN` component to get the leaves lining its
    /// outer boundary.
    pub fn boundary(&self, paving: &Paving, neighbour_value: SetValue) -> Vec<PavingId> {
        self.items
            .iter()
            .copied()
            .filter(|&id| !paving.neighbours(id, neighbour_value, false).is_empty())
            .collect()
    }
}

impl Paving {
    /// Partition the leaves matching `value` into connected subsets.
    ///
    /// Every matching leaf ends up in exactly one subset. Subsets come in extraction
    /// order (seeds in pre-order) unless `sort_by_size` is set, in which case they
    /// are stably sorted by decreasing size. The result is deterministic for an
    /// unchanged paving.
    ///
    /// The flags of the whole paving are reset first and used as the visited set;
    /// on return every matching leaf is flagged.
    ///
    /// ```
    /// use understory_interval::IntervalBox;
    /// use understory_paving::{Paving, SetValue};
    ///
    /// let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 4.0]]));
    /// let leaves = paving.bisect_all(paving.root(), 2, 0.5).unwrap();
    /// for &leaf in &[leaves[0], leaves[1], leaves[3]] {
    ///     paving.set_value(leaf, SetValue::IN).unwrap();
    /// }
    ///
    /// let parts = paving.connected_subsets(SetValue::IN, true);
    /// assert_eq!(parts.len(), 2);
    /// assert_eq!(parts[0].len(), 2);
    /// assert_eq!(parts[1].items(), &[leaves[3]]);
    /// ```
    pub fn connected_subsets(&self, value: SetValue, sort_by_size: bool) -> Vec<ConnectedSubset> {
        self.extract_components(value, sort_by_size, None)
    }

    /// [`connected_subsets`](Self::connected_subsets), reporting each flood-fill step
    /// to `trace`.
    pub fn connected_subsets_with_trace(
        &self,
        value: SetValue,
        sort_by_size: bool,
        trace: &mut dyn FloodTrace,
    ) -> Vec<ConnectedSubset> {
        self.extract_components(value, sort_by_size, Some(trace))
    }

    fn extract_components(
        &self,
        value: SetValue,
        sort_by_size: bool,
        mut trace: Option<&mut dyn FloodTrace>,
    ) -> Vec<ConnectedSubset> {
        let root = self.root();
        self.reset_flags(root);

        let mut subsets = Vec::new();
        let mut queue = VecDeque::new();
        while let Some(seed) = self.first_leaf(root, value, true) {
            let component = subsets.len();
            self.node(seed).flag.set(true);
            if let Some(t) = trace.as_deref_mut() {
                t.seed(seed, component);
            }
            queue.push_back(seed);

            let mut items = Vec::new();
            while let Some(leaf) = queue.pop_front() {
                items.push(leaf);
                for next in self.neighbours(leaf, value, true) {
                    self.node(next).flag.set(true);
                    if let Some(t) = trace.as_deref_mut() {
                        t.reached(next, leaf, component);
                    }
                    queue.push_back(next);
                }
            }

            if let Some(t) = trace.as_deref_mut() {
                t.finished(component, items.len());
            }
            subsets.push(ConnectedSubset { items });
        }

        if sort_by_size {
            subsets.sort_by_key(|s| Reverse(s.len()));
        }
        subsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// Four quadrants of `[0, 10]²`, in pre-order: lower-left, upper-left,
    /// lower-right, upper-right.
    fn quadrants() -> (Paving, [PavingId; 4]) {
        let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 10.0], [0.0, 10.0]]));
        let [left, right] = paving.bisect(paving.root(), 0.5).unwrap();
        let [ll, ul] = paving.bisect(left, 0.5).unwrap();
        let [lr, ur] = paving.bisect(right, 0.5).unwrap();
        (paving, [ll, ul, lr, ur])
    }

    #[test]
    fn diagonal_cells_are_separate_components() {
        let (mut paving, [ll, ul, lr, ur]) = quadrants();
        paving.set_value(ll, SetValue::IN).unwrap();
        paving.set_value(ur, SetValue::IN).unwrap();
        paving.set_value(ul, SetValue::OUT).unwrap();
        paving.set_value(lr, SetValue::OUT).unwrap();

        let inside = paving.connected_subsets(SetValue::IN, false);
        assert_eq!(inside.len(), 2, "corner contact does not connect");
        assert_eq!(inside[0].items(), &[ll]);
        assert_eq!(inside[1].items(), &[ur]);

        let outside = paving.connected_subsets(SetValue::OUT, false);
        assert_eq!(outside.len(), 2);
    }

    #[test]
    fn l_shape_is_one_component() {
        let (mut paving, [ll, ul, lr, ur]) = quadrants();
        for leaf in [ll, ul, lr] {
            paving.set_value(leaf, SetValue::IN).unwrap();
        }
        paving.set_value(ur, SetValue::OUT).unwrap();

        let inside = paving.connected_subsets(SetValue::IN, false);
        assert_eq!(inside.len(), 1);
        assert_eq!(inside[0].items(), &[ll, ul, lr]);
        assert!(inside.iter().all(|s| !s.contains(ur)));
        assert_eq!(
            inside[0].hull(&paving),
            IntervalBox::from_bounds(&[[0.0, 10.0], [0.0, 10.0]])
        );
        assert_eq!(inside[0].boundary(&paving, SetValue::OUT), vec![ul, lr]);
    }

    #[test]
    fn matching_leaves_are_flagged_afterwards() {
        let (mut paving, [ll, ul, lr, ur]) = quadrants();
        paving.set_value(ll, SetValue::IN).unwrap();
        paving.set_flag(ur);

        let inside = paving.connected_subsets(SetValue::IN, false);
        assert_eq!(inside.len(), 1);
        assert!(paving.flag(ll));
        assert!(!paving.flag(ul) && !paving.flag(lr) && !paving.flag(ur));
    }

    #[test]
    fn sorting_by_size_is_stable() {
        let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 8.0]]));
        let leaves = paving.bisect_all(paving.root(), 3, 0.5).unwrap();
        // IN pattern along the line: x . x x . x . x
        for i in [0, 2, 3, 5, 7] {
            paving.set_value(leaves[i], SetValue::IN).unwrap();
        }

        let plain = paving.connected_subsets(SetValue::IN, false);
        let sizes: Vec<_> = plain.iter().map(ConnectedSubset::len).collect();
        assert_eq!(sizes, vec![1, 2, 1, 1]);

        let sorted = paving.connected_subsets(SetValue::IN, true);
        assert_eq!(sorted[0].items(), &[leaves[2], leaves[3]]);
        assert_eq!(sorted[1].items(), &[leaves[0]]);
        assert_eq!(sorted[2].items(), &[leaves[5]]);
        assert_eq!(sorted[3].items(), &[leaves[7]]);
    }

    #[test]
    fn no_matching_leaf_gives_no_subsets() {
        let (paving, _) = quadrants();
        assert!(paving.connected_subsets(SetValue::IN, true).is_empty());
        let all = paving.connected_subsets(SetValue::UNKNOWN, false);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].len(), 4);
    }

    #[test]
    fn strict_inclusion_in_the_domain() {
        let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 3.0], [0.0, 3.0]]));
        // Refine to a 4x4 grid and mark one interior cell.
        let cells = paving.bisect_all(paving.root(), 4, 0.5).unwrap();
        let interior = cells
            .iter()
            .copied()
            .find(|&c| {
                let b = paving.bounds(c);
                b[0].lb() == 0.75 && b[1].lb() == 0.75
            })
            .unwrap();
        let corner = cells[0];
        paving.set_value(interior, SetValue::IN).unwrap();
        paving.set_value(corner, SetValue::OUT).unwrap();

        let inside = paving.connected_subsets(SetValue::IN, false);
        assert!(inside[0].is_strictly_included_in_paving(&paving));
        let outside = paving.connected_subsets(SetValue::OUT, false);
        assert!(!outside[0].is_strictly_included_in_paving(&paving));
        assert_eq!(outside[0].boxes(&paving), vec![paving.bounds(corner).clone()]);
    }
}
