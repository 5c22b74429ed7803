// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Closed real intervals.

use core::cmp::Ordering;
use core::fmt;

/// A closed interval `[lb, ub]` of `f64`, possibly empty.
///
/// Every empty interval is normalized to [`Interval::EMPTY`], so two empty
/// intervals always compare equal.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Interval {
    lb: f64,
    ub: f64,
}

impl Interval {
    /// The empty interval.
    pub const EMPTY: Self = Self {
        lb: f64::INFINITY,
        ub: f64::NEG_INFINITY,
    };

    /// The whole real line.
    pub const ALL_REALS: Self = Self {
        lb: f64::NEG_INFINITY,
        ub: f64::INFINITY,
    };

    /// Create `[lb, ub]`.
    ///
    /// Inverted bounds or a NaN bound yield [`Interval::EMPTY`].
    pub fn new(lb: f64, ub: f64) -> Self {
        if le(lb, ub) { Self { lb, ub } } else { Self::EMPTY }
    }

    /// The degenerate interval `[x, x]`.
    pub fn point(x: f64) -> Self {
        Self::new(x, x)
    }

    /// Lower bound. `+inf` for the empty interval.
    pub const fn lb(&self) -> f64 {
        self.lb
    }

    /// Upper bound. `-inf` for the empty interval.
    pub const fn ub(&self) -> f64 {
        self.ub
    }

    /// True if the interval contains no point.
    pub fn is_empty(&self) -> bool {
        lt(self.ub, self.lb)
    }

    /// True if the interval is a single point.
    pub fn is_degenerate(&self) -> bool {
        !self.is_empty() && self.lb == self.ub
    }

    /// True if both bounds are finite.
    pub fn is_bounded(&self) -> bool {
        !self.is_empty() && self.lb.is_finite() && self.ub.is_finite()
    }

    /// Width `ub - lb`, or `0.0` for the empty interval.
    pub fn diam(&self) -> f64 {
        if self.is_empty() {
            0.0
        } else {
            self.ub - self.lb
        }
    }

    /// Midpoint. NaN for the empty interval.
    pub fn mid(&self) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        // Halving first keeps wide finite intervals from overflowing.
        0.5 * self.lb + 0.5 * self.ub
    }

    /// The point located at `ratio` of the way from `lb` to `ub`.
    ///
    /// `ratio = 0.5` is the midpoint. NaN for the empty interval.
    pub fn point_at(&self, ratio: f64) -> f64 {
        if self.is_empty() {
            return f64::NAN;
        }
        self.lb + ratio * (self.ub - self.lb)
    }

    /// Whether `x` lies in the interval.
    pub fn contains(&self, x: f64) -> bool {
        le(self.lb, x) && le(x, self.ub)
    }

    /// Intersection of two intervals.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(max_t(self.lb, other.lb), min_t(self.ub, other.ub))
    }

    /// Smallest interval containing both (the interval union).
    pub fn hull(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            lb: min_t(self.lb, other.lb),
            ub: max_t(self.ub, other.ub),
        }
    }

    /// Whether the two intervals share at least one point.
    pub fn intersects(&self, other: &Self) -> bool {
        !self.intersect(other).is_empty()
    }

    /// Whether every point of `self` lies in `other`. The empty interval is a
    /// subset of everything.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.is_empty() || (le(other.lb, self.lb) && le(self.ub, other.ub))
    }

    /// Widen by `radius` on both sides. The empty interval stays empty.
    pub fn inflate(&self, radius: f64) -> Self {
        if self.is_empty() {
            return Self::EMPTY;
        }
        Self::new(self.lb - radius, self.ub + radius)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<[f64; 2]> for Interval {
    fn from([lb, ub]: [f64; 2]) -> Self {
        Self::new(lb, ub)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("[ empty ]")
        } else {
            write!(f, "[{}, {}]", self.lb, self.ub)
        }
    }
}

pub(crate) fn min_t(a: f64, b: f64) -> f64 {
    match a.partial_cmp(&b) {
        Some(Ordering::Greater) => b,
        _ => a,
    }
}

pub(crate) fn max_t(a: f64, b: f64) -> f64 {
    match a.partial_cmp(&b) {
        Some(Ordering::Less) => b,
        _ => a,
    }
}

pub(crate) fn le(a: f64, b: f64) -> bool {
    a.partial_cmp(&b)
        .map(|o| o != Ordering::Greater)
        .unwrap_or(false)
}

pub(crate) fn lt(a: f64, b: f64) -> bool {
    a.partial_cmp(&b)
        .map(|o| o == Ordering::Less)
        .unwrap_or(false)
}
