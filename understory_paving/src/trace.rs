// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Explainability helpers for connected-subset extraction.
//!
//! [`Paving::connected_subsets`](crate::Paving::connected_subsets) only returns the
//! members of each component. When debugging a classification it is often useful to
//! answer "why are these two boxes in the same component?".
//!
//! [`Paving::connected_subsets_with_trace`](crate::Paving::connected_subsets_with_trace)
//! reports every step of the flood fill to a [`FloodTrace`] sink, and
//! [`SpanningRecorder`] keeps **one discovery parent** per leaf (a spanning forest),
//! from which an adjacency chain back to the component seed can be rebuilt.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::types::PavingId;

/// How a leaf joined its component.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Discovery {
    /// The leaf is the seed the component was grown from.
    Seed,
    /// The leaf was reached as a facet neighbour of `from`.
    From {
        /// The already-collected leaf whose neighbour query found this leaf.
        from: PavingId,
    },
}

/// A callback sink for flood-fill tracing.
///
/// Components are numbered in extraction order, starting at `0`, before any
/// sorting by size.
pub trait FloodTrace {
    /// Called when `leaf` starts component `component`.
    fn seed(&mut self, leaf: PavingId, component: usize);

    /// Called when `leaf` is discovered as a neighbour of `from`.
    fn reached(&mut self, leaf: PavingId, from: PavingId, component: usize);

    /// Called when component `component` is complete with `len` leaves.
    fn finished(&mut self, component: usize, len: usize) {
        let _ = (component, len);
    }
}

/// Records how each leaf was discovered (a spanning forest of the components).
///
/// Only the first report for a leaf is kept, and a [`reached`](FloodTrace::reached)
/// whose `from` has not been recorded yet is ignored.
#[derive(Debug, Default, Clone)]
pub struct SpanningRecorder {
    discoveries: HashMap<PavingId, (Discovery, usize)>,
    sizes: Vec<usize>,
}

impl SpanningRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears everything recorded.
    pub fn clear(&mut self) {
        self.discoveries.clear();
        self.sizes.clear();
    }

    /// How `leaf` was discovered, if it was.
    #[must_use]
    pub fn discovery(&self, leaf: PavingId) -> Option<Discovery> {
        self.discoveries.get(&leaf).map(|&(d, _)| d)
    }

    /// Extraction-order index of the component `leaf` belongs to.
    #[must_use]
    pub fn component_of(&self, leaf: PavingId) -> Option<usize> {
        self.discoveries.get(&leaf).map(|&(_, c)| c)
    }

    /// Sizes of the finished components, in extraction order.
    #[must_use]
    pub fn component_sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// A chain of facet neighbours from the seed of `leaf`'s component to `leaf`.
    ///
    /// The returned vector is ordered from seed to `leaf` (inclusive); consecutive
    /// entries are neighbours. A seed's path is just itself.
    #[must_use]
    pub fn path_from_seed(&self, leaf: PavingId) -> Option<Vec<PavingId>> {
        let mut path = vec![leaf];
        let mut current = leaf;
        // Parents are always recorded before their children, so this ends at a seed.
        while let Discovery::From { from } = self.discovery(current)? {
            path.push(from);
            current = from;
        }
        path.reverse();
        Some(path)
    }
}

impl FloodTrace for SpanningRecorder {
    fn seed(&mut self, leaf: PavingId, component: usize) {
        self.discoveries
            .entry(leaf)
            .or_insert((Discovery::Seed, component));
    }

    fn reached(&mut self, leaf: PavingId, from: PavingId, component: usize) {
        if !self.discoveries.contains_key(&from) {
            return;
        }
        self.discoveries
            .entry(leaf)
            .or_insert((Discovery::From { from }, component));
    }

    fn finished(&mut self, component: usize, len: usize) {
        if self.sizes.len() <= component {
            self.sizes.resize(component + 1, 0);
        }
        self.sizes[component] = len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Paving, SetValue};
    use alloc::vec;
    use understory_interval::IntervalBox;

    #[test]
    fn records_one_parent_path() {
        // A row of four cells, all IN.
        let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 4.0], [0.0, 1.0]]));
        let [left, right] = paving.bisect(paving.root(), 0.5).unwrap();
        let [a, b] = paving.bisect(left, 0.5).unwrap();
        let [c, d] = paving.bisect(right, 0.5).unwrap();
        for leaf in [a, b, c, d] {
            paving.set_value(leaf, SetValue::IN).unwrap();
        }

        let mut rec = SpanningRecorder::new();
        let subsets = paving.connected_subsets_with_trace(SetValue::IN, false, &mut rec);
        assert_eq!(subsets.len(), 1);
        assert_eq!(rec.component_sizes(), &[4]);
        assert_eq!(rec.discovery(a), Some(Discovery::Seed));
        assert_eq!(rec.path_from_seed(d).unwrap(), vec![a, b, c, d]);
        assert_eq!(rec.component_of(c), Some(0));
    }

    #[test]
    fn paths_stop_at_each_component_seed() {
        // IN, OUT, IN, IN along a row: two IN components.
        let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 4.0], [0.0, 1.0]]));
        let [left, right] = paving.bisect(paving.root(), 0.5).unwrap();
        let [a, b] = paving.bisect(left, 0.5).unwrap();
        let [c, d] = paving.bisect(right, 0.5).unwrap();
        for leaf in [a, c, d] {
            paving.set_value(leaf, SetValue::IN).unwrap();
        }
        paving.set_value(b, SetValue::OUT).unwrap();

        let mut rec = SpanningRecorder::new();
        paving.connected_subsets_with_trace(SetValue::IN, false, &mut rec);
        assert_eq!(rec.component_sizes(), &[1, 2]);
        assert_eq!(rec.path_from_seed(a).unwrap(), vec![a]);
        assert_eq!(rec.path_from_seed(d).unwrap(), vec![c, d]);
        assert_eq!(rec.path_from_seed(b), None);

        // A second run into a cleared recorder starts from scratch.
        rec.clear();
        paving.connected_subsets_with_trace(SetValue::OUT, false, &mut rec);
        assert_eq!(rec.path_from_seed(b).unwrap(), vec![b]);
        assert_eq!(rec.path_from_seed(d), None);
    }

    #[test]
    fn reports_from_unrecorded_leaves_are_ignored() {
        let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 2.0]]));
        let [a, b] = paving.bisect(paving.root(), 0.5).unwrap();

        let mut rec = SpanningRecorder::new();
        rec.reached(a, b, 0);
        rec.reached(b, a, 0);
        assert_eq!(rec.discovery(a), None);
        assert_eq!(rec.discovery(b), None);

        rec.seed(a, 0);
        rec.reached(b, a, 0);
        rec.reached(a, b, 0);
        assert_eq!(rec.discovery(a), Some(Discovery::Seed));
        assert_eq!(rec.path_from_seed(b).unwrap(), vec![a, b]);
        assert_eq!(rec.path_from_seed(a).unwrap(), vec![a]);
    }

    #[test]
    fn unknown_leaves_have_no_path() {
        let rec = SpanningRecorder::new();
        let paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 1.0]]));
        assert_eq!(rec.path_from_seed(paving.root()), None);
        assert!(rec.component_sizes().is_empty());
    }
}
