// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the paving: node identifiers and classification values.

use core::fmt;

/// Identifier for a node of a [`Paving`](crate::Paving).
///
/// This is a small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - Nodes created by [`Paving::new`](crate::Paving::new) or
///   [`Paving::bisect`](crate::Paving::bisect) get a fresh slot, or a freed one
///   with its generation incremented.
/// - [`Paving::reset_paving`](crate::Paving::reset_paving) frees every node below the
///   reset node; ids that pointed into that subtree become stale.
///
/// ### Liveness
///
/// Use [`Paving::is_alive`](crate::Paving::is_alive) to check whether a `PavingId`
/// still refers to a live node.
/// Stale ids never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - `u32` is ample for practical lifetimes; behavior on generation overflow is unspecified.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct PavingId(pub(crate) u32, pub(crate) u32);

impl PavingId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PavingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.0, self.1)
    }
}

bitflags::bitflags! {
    /// Classification of a box with respect to the set described by a paving.
    ///
    /// Values combine with `|` so that one query can accept several statuses,
    /// for example `SetValue::IN | SetValue::UNKNOWN`.
    /// The empty value, [`SetValue::DEFAULT`], is the "no restriction" sentinel:
    /// as a value mask it matches every leaf, as an exclusion mask it excludes nothing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SetValue: u8 {
        /// Not yet classified, or impossible to classify at this resolution.
        const UNKNOWN  = 0b0000_0001;
        /// Guaranteed inside the set.
        const IN       = 0b0000_0010;
        /// Guaranteed outside the set.
        const OUT      = 0b0000_0100;
        /// Straddles the boundary of the set.
        const PENUMBRA = 0b0000_1000;
    }
}

impl SetValue {
    /// No restriction: matches any value, excludes nothing.
    pub const DEFAULT: Self = Self::empty();

    /// Every value a leaf usually carries: `IN | OUT | UNKNOWN`.
    pub const ALL_CLASSIFIED: Self = Self::IN.union(Self::OUT).union(Self::UNKNOWN);

    /// Whether a leaf of value `self` is accepted by `mask`.
    ///
    /// ```
    /// use understory_paving::SetValue;
    ///
    /// assert!(SetValue::IN.matches(SetValue::IN | SetValue::UNKNOWN));
    /// assert!(!SetValue::OUT.matches(SetValue::IN));
    /// assert!(SetValue::OUT.matches(SetValue::DEFAULT));
    /// ```
    pub const fn matches(self, mask: Self) -> bool {
        mask.is_empty() || self.intersects(mask)
    }
}
