// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::number::FuzzyEq;
use super::Transform;

/// An axis-aligned rectangle.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Constructs a new rectangle.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect { x, y, width, height }
    }

    /// Constructs a zero-sized rectangle at the point.
    #[inline]
    pub fn from_point(x: f64, y: f64) -> Rect {
        Rect::new(x, y, 0.0, 0.0)
    }

    /// Returns the right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Extends the rectangle to include the point.
    pub fn include_point(&mut self, x: f64, y: f64) {
        let left = self.x.min(x);
        let top = self.y.min(y);
        let right = self.right().max(x);
        let bottom = self.bottom().max(y);
        *self = Rect::new(left, top, right - left, bottom - top);
    }

    /// Returns a rectangle that contains both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        let mut r = *self;
        r.include_point(other.x, other.y);
        r.include_point(other.right(), other.bottom());
        r
    }

    /// Returns a bounding box of the transformed rectangle.
    pub fn transform(&self, ts: &Transform) -> Rect {
        let (x1, y1) = ts.apply(self.x, self.y);
        let mut r = Rect::from_point(x1, y1);
        let (x, y) = ts.apply(self.right(), self.y);
        r.include_point(x, y);
        let (x, y) = ts.apply(self.x, self.bottom());
        r.include_point(x, y);
        let (x, y) = ts.apply(self.right(), self.bottom());
        r.include_point(x, y);
        r
    }
}

impl FuzzyEq for Rect {
    fn fuzzy_eq(&self, other: &Self) -> bool {
           self.x.fuzzy_eq(&other.x)
        && self.y.fuzzy_eq(&other.y)
        && self.width.fuzzy_eq(&other.width)
        && self.height.fuzzy_eq(&other.height)
    }
}
