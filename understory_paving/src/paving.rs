// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core paving implementation: node storage, bisection, classification, flags.

use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use understory_interval::{Interval, IntervalBox};

use crate::error::PavingError;
use crate::types::{PavingId, SetValue};

/// Bisection ratio used by [`Paving::bisect_default`].
///
/// Slightly off-centre so that repeated bisections do not align split points
/// across neighbouring boxes.
pub const DEFAULT_RATIO: f64 = 0.49;

/// A binary-tree paving of an n-dimensional box.
///
/// Every node covers a box. A leaf carries a [`SetValue`]; an internal node has
/// exactly two children whose boxes split its own box along one axis.
/// Nodes live in an arena owned by the paving and are addressed by [`PavingId`].
///
/// The paving is built by a caller that alternates [`bisect`](Self::bisect) and
/// [`set_value`](Self::set_value); it never decides a classification on its own.
///
/// ## Flags
///
/// Each node also holds a transient flag, used as "visited" scratch state by search
/// algorithms. Flags live in a `Cell` so they can be set through `&Paving`;
/// consequently the paving is not `Sync`. Flag-based algorithms such as
/// [`connected_subsets`](Self::connected_subsets) reset the flags they rely on
/// and claim them for the duration of the call.
#[derive(Clone)]
pub struct Paving {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: PavingId,
    dim: usize,
}

impl core::fmt::Debug for Paving {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("Paving")
            .field("dim", &self.dim)
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .field("root_bounds", &self.node(self.root).bounds)
            .finish_non_exhaustive()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Kind {
    Leaf {
        value: SetValue,
    },
    Internal {
        first: PavingId,
        second: PavingId,
        /// Value shared by every leaf below, if there is one.
        uniform: Option<SetValue>,
    },
}

impl Kind {
    pub(crate) fn children(self) -> Option<[PavingId; 2]> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal { first, second, .. } => Some([first, second]),
        }
    }

    /// Leaf value, or the aggregate value of an internal node.
    pub(crate) fn summary(self) -> Option<SetValue> {
        match self {
            Self::Leaf { value } => Some(value),
            Self::Internal { uniform, .. } => uniform,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<PavingId>,
    pub(crate) bounds: IntervalBox,
    pub(crate) kind: Kind,
    pub(crate) flag: Cell<bool>,
}

impl Node {
    fn leaf(
        generation: u32,
        parent: Option<PavingId>,
        bounds: IntervalBox,
        value: SetValue,
    ) -> Self {
        Self {
            generation,
            parent,
            bounds,
            kind: Kind::Leaf { value },
            flag: Cell::new(false),
        }
    }
}

impl Paving {
    /// Create a paving made of a single `UNKNOWN` leaf covering `bounds`.
    ///
    /// The dimension of `bounds` becomes the dimension of the paving; every query
    /// box must match it. A degenerate box (zero width along some axis) is a valid
    /// domain.
    pub fn new(bounds: IntervalBox) -> Self {
        Self::with_value(bounds, SetValue::UNKNOWN)
    }

    /// Create a paving made of a single leaf of value `value` covering `bounds`.
    pub fn with_value(bounds: IntervalBox, value: SetValue) -> Self {
        let generation = 1_u32;
        let dim = bounds.dim();
        Self {
            nodes: vec![Some(Node::leaf(generation, None, bounds, value))],
            generations: vec![generation],
            free_list: Vec::new(),
            root: PavingId::new(0, generation),
            dim,
        }
    }

    /// Dimension of every box of the paving.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Root node of the paving.
    pub fn root(&self) -> PavingId {
        self.root
    }

    /// Root of the tree `id` belongs to, found by following parent links.
    ///
    /// Always equal to [`root`](Self::root) for a live id.
    pub fn root_of(&self, mut id: PavingId) -> PavingId {
        while let Some(parent) = self.node(id).parent {
            id = parent;
        }
        id
    }

    /// Number of live nodes, leaves and internal nodes together.
    pub fn len(&self) -> usize {
        self.nodes.len() - self.free_list.len()
    }

    /// Always false: a paving has at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `PavingId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`PavingId`] docs for the generational semantics.
    pub fn is_alive(&self, id: PavingId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Box covered by `id`.
    pub fn bounds(&self, id: PavingId) -> &IntervalBox {
        &self.node(id).bounds
    }

    /// Parent of `id`, `None` for the root.
    pub fn parent(&self, id: PavingId) -> Option<PavingId> {
        self.node(id).parent
    }

    /// True if `id` has no children.
    pub fn is_leaf(&self, id: PavingId) -> bool {
        matches!(self.node(id).kind, Kind::Leaf { .. })
    }

    /// Both children of `id`, `None` for a leaf.
    pub fn children(&self, id: PavingId) -> Option<[PavingId; 2]> {
        self.node(id).kind.children()
    }

    /// First child of `id` (the lower part of the split axis), `None` for a leaf.
    pub fn first_subpaving(&self, id: PavingId) -> Option<PavingId> {
        self.children(id).map(|[first, _]| first)
    }

    /// Second child of `id` (the upper part of the split axis), `None` for a leaf.
    pub fn second_subpaving(&self, id: PavingId) -> Option<PavingId> {
        self.children(id).map(|[_, second]| second)
    }

    /// Classification of `id`.
    ///
    /// For a leaf this is its value. For an internal node it is the value shared by
    /// every leaf below it, or `None` when the leaves disagree.
    pub fn value(&self, id: PavingId) -> Option<SetValue> {
        self.node(id).kind.summary()
    }

    /// Classify the leaf `id`.
    ///
    /// This is how external refinement algorithms (contractors, set inversion)
    /// record their verdict after subdividing the domain.
    pub fn set_value(&mut self, id: PavingId, value: SetValue) -> Result<(), PavingError> {
        let node = self.node_opt_mut(id).ok_or(PavingError::StaleId(id))?;
        let Kind::Leaf { value: current } = &mut node.kind else {
            return Err(PavingError::NotALeaf(id));
        };
        if *current == value {
            return Ok(());
        }
        *current = value;
        let parent = node.parent;
        self.refresh_uniform(parent);
        Ok(())
    }

    /// Bisect the leaf `id` at `ratio` along its widest axis.
    ///
    /// The first child spans from the lower bound to the split point
    /// `lb + ratio * (ub - lb)`, the second from the split point to the upper bound;
    /// other axes are copied. Both children are `UNKNOWN` leaves and `id` becomes
    /// an internal node. Returns `[first, second]`.
    ///
    /// # Errors
    ///
    /// - [`PavingError::InvalidRatio`] unless `0 < ratio < 1`.
    /// - [`PavingError::StaleId`] if `id` is not live.
    /// - [`PavingError::NotALeaf`] if `id` already has children.
    /// - [`PavingError::Unsplittable`] if the box has no finite positive width to split.
    ///
    /// ```
    /// use understory_interval::IntervalBox;
    /// use understory_paving::Paving;
    ///
    /// let mut paving = Paving::new(IntervalBox::from_bounds(&[[0.0, 10.0], [0.0, 4.0]]));
    /// let [a, b] = paving.bisect(paving.root(), 0.5).unwrap();
    /// assert_eq!(paving.bounds(a), &IntervalBox::from_bounds(&[[0.0, 5.0], [0.0, 4.0]]));
    /// assert_eq!(paving.bounds(b), &IntervalBox::from_bounds(&[[5.0, 10.0], [0.0, 4.0]]));
    /// assert!(paving.bisect(paving.root(), 0.5).is_err());
    /// ```
    pub fn bisect(&mut self, id: PavingId, ratio: f64) -> Result<[PavingId; 2], PavingError> {
        self.bisect_with_value(id, ratio, SetValue::UNKNOWN)
    }

    /// [`bisect`](Self::bisect), with both children classified as `value`.
    ///
    /// Useful when the caller already knows the verdict for the whole box, for
    /// instance when refining an `IN` leaf for display.
    ///
    /// # Errors
    ///
    /// Same as [`bisect`](Self::bisect).
    pub fn bisect_with_value(
        &mut self,
        id: PavingId,
        ratio: f64,
        value: SetValue,
    ) -> Result<[PavingId; 2], PavingError> {
        check_ratio(ratio)?;
        let node = self.node_opt(id).ok_or(PavingError::StaleId(id))?;
        if !matches!(node.kind, Kind::Leaf { .. }) {
            return Err(PavingError::NotALeaf(id));
        }
        let (lower, upper) =
            split_box(&node.bounds, ratio).ok_or(PavingError::Unsplittable(id))?;
        let parent = node.parent;

        let first = self.alloc(Some(id), lower, value);
        let second = self.alloc(Some(id), upper, value);
        self.node_mut(id).kind = Kind::Internal {
            first,
            second,
            uniform: Some(value),
        };
        self.refresh_uniform(parent);
        Ok([first, second])
    }

    /// [`bisect`](Self::bisect) with [`DEFAULT_RATIO`].
    pub fn bisect_default(&mut self, id: PavingId) -> Result<[PavingId; 2], PavingError> {
        self.bisect(id, DEFAULT_RATIO)
    }

    /// Bisect every leaf below `id`, `depth` times, breadth-first, at `ratio`.
    ///
    /// A leaf bisected `d` times this way yields `2^d` leaves. Returns every leaf
    /// below `id` once the last round is done, in breadth-first order.
    ///
    /// Every split is checked before the first one is made, so on error the paving
    /// is unchanged.
    ///
    /// # Errors
    ///
    /// - [`PavingError::InvalidRatio`] unless `0 < ratio < 1`.
    /// - [`PavingError::StaleId`] if `id` is not live.
    /// - [`PavingError::Unsplittable`] naming the current leaf whose box, or one of
    ///   whose future pieces, cannot be split.
    pub fn bisect_all(
        &mut self,
        id: PavingId,
        depth: u32,
        ratio: f64,
    ) -> Result<Vec<PavingId>, PavingError> {
        check_ratio(ratio)?;
        if !self.is_alive(id) {
            return Err(PavingError::StaleId(id));
        }
        let mut frontier = self.leaves(id, SetValue::DEFAULT);

        // Dry run on the boxes alone, remembering which leaf each piece comes from.
        let mut pieces: Vec<(PavingId, IntervalBox)> = frontier
            .iter()
            .map(|&leaf| (leaf, self.node(leaf).bounds.clone()))
            .collect();
        for _ in 0..depth {
            let mut next = Vec::with_capacity(pieces.len() * 2);
            for (origin, bounds) in pieces {
                let (lower, upper) =
                    split_box(&bounds, ratio).ok_or(PavingError::Unsplittable(origin))?;
                next.push((origin, lower));
                next.push((origin, upper));
            }
            pieces = next;
        }

        for _ in 0..depth {
            let mut next = Vec::with_capacity(frontier.len() * 2);
            for leaf in frontier {
                next.extend(self.bisect(leaf, ratio)?);
            }
            frontier = next;
        }
        Ok(frontier)
    }

    /// Discard every node below `id` and turn `id` back into a leaf of value `value`.
    ///
    /// Freed ids become stale. Resetting the root is the same as building a new
    /// paving over the same box, except that the root id is preserved.
    pub fn reset_paving(&mut self, id: PavingId, value: SetValue) -> Result<(), PavingError> {
        let node = self.node_opt_mut(id).ok_or(PavingError::StaleId(id))?;
        let children = node.kind.children();
        node.kind = Kind::Leaf { value };
        node.flag.set(false);
        let parent = node.parent;
        if let Some(children) = children {
            for child in children {
                self.release(child);
            }
        }
        self.refresh_uniform(parent);
        Ok(())
    }

    /// Whether `id` is flagged.
    pub fn flag(&self, id: PavingId) -> bool {
        self.node(id).flag.get()
    }

    /// Flag `id` and every node below it.
    pub fn set_flag(&self, id: PavingId) {
        self.fill_flags(id, true);
    }

    /// Clear the flag of `id` and of every node below it.
    pub fn reset_flags(&self, id: PavingId) {
        self.fill_flags(id, false);
    }

    fn fill_flags(&self, id: PavingId, flag: bool) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            let node = self.node(cur);
            node.flag.set(flag);
            if let Some(children) = node.kind.children() {
                stack.extend(children);
            }
        }
    }

    // --- internals ---

    /// Access a node; panics if `id` is stale.
    #[track_caller]
    pub(crate) fn node(&self, id: PavingId) -> &Node {
        self.node_opt(id).expect("dangling PavingId")
    }

    #[track_caller]
    fn node_mut(&mut self, id: PavingId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling PavingId")
    }

    pub(crate) fn node_opt(&self, id: PavingId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: PavingId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn alloc(
        &mut self,
        parent: Option<PavingId>,
        bounds: IntervalBox,
        value: SetValue,
    ) -> PavingId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::leaf(generation, parent, bounds, value));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::leaf(generation, parent, bounds, value)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "PavingId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        PavingId::new(idx, generation)
    }

    /// Free `id` and its whole subtree.
    fn release(&mut self, id: PavingId) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(children) = self.node(cur).kind.children() {
                stack.extend(children);
            }
            self.nodes[cur.idx()] = None;
            self.free_list.push(cur.idx());
        }
    }

    /// Recompute the aggregate value of `start` and its ancestors after a change below.
    ///
    /// Stops as soon as an aggregate is unchanged: nodes further up only depend on it.
    fn refresh_uniform(&mut self, start: Option<PavingId>) {
        let mut cursor = start;
        while let Some(id) = cursor {
            let node = self.node(id);
            let Kind::Internal {
                first,
                second,
                uniform,
            } = node.kind
            else {
                unreachable!("a parent is always an internal node");
            };
            let a = self.node(first).kind.summary();
            let b = self.node(second).kind.summary();
            let fresh = match (a, b) {
                (Some(a), Some(b)) if a == b => Some(a),
                _ => None,
            };
            if fresh == uniform {
                return;
            }
            cursor = node.parent;
            self.node_mut(id).kind = Kind::Internal {
                first,
                second,
                uniform: fresh,
            };
        }
    }
}

fn check_ratio(ratio: f64) -> Result<(), PavingError> {
    if ratio > 0.0 && ratio < 1.0 {
        Ok(())
    } else {
        Err(PavingError::InvalidRatio(ratio))
    }
}

/// Split `bounds` along its widest axis at `ratio`.
///
/// Returns `None` when the split point is not strictly inside that axis.
fn split_box(bounds: &IntervalBox, ratio: f64) -> Option<(IntervalBox, IntervalBox)> {
    let axis = bounds.max_diam_axis()?;
    let iv = bounds[axis];
    let cut = iv.point_at(ratio);
    if !(iv.lb() < cut && cut < iv.ub()) {
        return None;
    }
    Some((
        bounds.with_axis(axis, Interval::new(iv.lb(), cut)),
        bounds.with_axis(axis, Interval::new(cut, iv.ub())),
    ))
}
