// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first leaf searches.
//!
//! All searches visit a subtree in pre-order, first child before second, so their
//! results are reproducible for an unchanged paving.

use alloc::vec;
use alloc::vec::Vec;

use understory_interval::IntervalBox;

use crate::paving::{Kind, Paving};
use crate::types::{PavingId, SetValue};

impl Paving {
    /// First leaf below `id` (inclusive) whose value matches `value`.
    ///
    /// With `without_flag`, flagged leaves are skipped.
    pub fn first_leaf(
        &self,
        id: PavingId,
        value: SetValue,
        without_flag: bool,
    ) -> Option<PavingId> {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let node = self.node(cur);
            match node.kind {
                Kind::Leaf { value: v } => {
                    if v.matches(value) && !(without_flag && node.flag.get()) {
                        return Some(cur);
                    }
                }
                Kind::Internal { first, second, .. } => {
                    stack.push(second);
                    stack.push(first);
                }
            }
        }
        None
    }

    /// Boxes of the leaves below `id` whose value matches `value`.
    ///
    /// `exclude` is a pruning hint: a subtree whose leaves all share a value that lies
    /// in `exclude` and does not match `value` is skipped without being visited.
    /// It never changes the result, only the number of nodes visited; pass
    /// [`SetValue::DEFAULT`] for no hint.
    ///
    /// ```
    /// use understory_interval::IntervalBox;
    /// use understory_paving::{Paving, SetValue};
    ///
    /// let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 2.0]]));
    /// let [a, b] = paving.bisect(paving.root(), 0.5).unwrap();
    /// paving.set_value(a, SetValue::IN).unwrap();
    /// paving.set_value(b, SetValue::OUT).unwrap();
    ///
    /// let inside = paving.boxes(paving.root(), SetValue::IN, SetValue::OUT);
    /// assert_eq!(inside, vec![IntervalBox::from_bounds(&[[0.0, 1.0]])]);
    /// ```
    pub fn boxes(&self, id: PavingId, value: SetValue, exclude: SetValue) -> Vec<IntervalBox> {
        let mut out = Vec::new();
        self.visit_leaves(id, value, exclude, |node_id| {
            out.push(self.node(node_id).bounds.clone());
        });
        out
    }

    /// Ids of the leaves below `id` whose value matches `value`.
    pub fn leaves(&self, id: PavingId, value: SetValue) -> Vec<PavingId> {
        let mut out = Vec::new();
        self.visit_leaves(id, value, SetValue::DEFAULT, |leaf| out.push(leaf));
        out
    }

    /// Number of leaves below `id`, whatever their value.
    pub fn leaf_count(&self, id: PavingId) -> usize {
        let mut count = 0;
        self.visit_leaves(id, SetValue::DEFAULT, SetValue::DEFAULT, |_| count += 1);
        count
    }

    /// Call `f` on every matching leaf below `id`, in pre-order.
    ///
    /// Returns the number of nodes looked at, pruned subtrees counting as one.
    fn visit_leaves(
        &self,
        id: PavingId,
        value: SetValue,
        exclude: SetValue,
        mut f: impl FnMut(PavingId),
    ) -> usize {
        let mut visited = 0;
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            visited += 1;
            match self.node(cur).kind {
                Kind::Leaf { value: v } => {
                    if v.matches(value) {
                        f(cur);
                    }
                }
                Kind::Internal {
                    first,
                    second,
                    uniform,
                } => {
                    if !exclude.is_empty()
                        && uniform.is_some_and(|u| exclude.contains(u) && !u.matches(value))
                    {
                        continue;
                    }
                    stack.push(second);
                    stack.push(first);
                }
            }
        }
        visited
    }
}
