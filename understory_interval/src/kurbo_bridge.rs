// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between 2D boxes and [`kurbo::Rect`].

use kurbo::Rect;

use crate::{Interval, IntervalBox};

impl From<Rect> for IntervalBox {
    /// Axis 0 is `x`, axis 1 is `y`. Non-normalized rectangles are normalized first.
    fn from(rect: Rect) -> Self {
        Self::from_intervals([
            Interval::new(rect.min_x(), rect.max_x()),
            Interval::new(rect.min_y(), rect.max_y()),
        ])
    }
}

impl IntervalBox {
    /// The rectangle covered by a 2D box, or `None` if the box is empty or not 2D.
    pub fn to_rect(&self) -> Option<Rect> {
        if self.dim() != 2 || self.is_empty() {
            return None;
        }
        let (x, y) = (self[0], self[1]);
        Some(Rect::new(x.lb(), y.lb(), x.ub(), y.ub()))
    }
}
