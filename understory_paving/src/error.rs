// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for paving operations.

use core::fmt;

use crate::types::PavingId;

/// Precondition violations reported by [`Paving`](crate::Paving) operations.
///
/// None of these leave the paving modified: the operation is rejected before
/// any node is touched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PavingError {
    /// The node has children; only leaves can be bisected or classified.
    NotALeaf(PavingId),
    /// The bisection ratio is not in the open interval `(0, 1)`.
    InvalidRatio(f64),
    /// The node's box cannot be split: it is a point, unbounded, or so thin
    /// that the split point rounds onto one of its bounds.
    Unsplittable(PavingId),
    /// A query box does not have the dimension of the paving.
    DimensionMismatch {
        /// Dimension of the paving.
        expected: usize,
        /// Dimension of the offending box.
        found: usize,
    },
    /// The id refers to a node that no longer exists.
    StaleId(PavingId),
}

impl fmt::Display for PavingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotALeaf(id) => write!(f, "paving node {id} is not a leaf"),
            Self::InvalidRatio(ratio) => {
                write!(f, "bisection ratio {ratio} is not strictly between 0 and 1")
            }
            Self::Unsplittable(id) => write!(f, "box of paving node {id} cannot be bisected"),
            Self::DimensionMismatch { expected, found } => {
                write!(f, "expected a box of dimension {expected}, found {found}")
            }
            Self::StaleId(id) => write!(f, "paving node {id} no longer exists"),
        }
    }
}

impl core::error::Error for PavingError {}
