// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! This module contains all struct's for manipulating SVG [path data].
//!
//! Paths are always stored in a normalized form: absolute coordinates
//! and only `MoveTo`, `LineTo`, `CurveTo` and `ClosePath` segments.
//!
//! [path data]: https://www.w3.org/TR/SVG/paths.html#PathData

use std::slice;

use super::number::{FuzzyEq, FuzzyZero};
use super::{Rect, Transform};

mod arc;
mod bbox;
mod parser;
mod writer;

/// A normalized path segment.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum PathSegment {
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    CurveTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    ClosePath,
}

impl PathSegment {
    /// Returns the segment's end point.
    ///
    /// `ClosePath` has no explicit end point.
    pub fn end_point(&self) -> Option<(f64, f64)> {
        match *self {
            PathSegment::MoveTo { x, y }
            | PathSegment::LineTo { x, y }
            | PathSegment::CurveTo { x, y, .. } => Some((x, y)),
            PathSegment::ClosePath => None,
        }
    }

    fn transform(&mut self, ts: &Transform) {
        match *self {
            PathSegment::MoveTo { ref mut x, ref mut y }
            | PathSegment::LineTo { ref mut x, ref mut y } => {
                let (nx, ny) = ts.apply(*x, *y);
                *x = nx;
                *y = ny;
            }
            PathSegment::CurveTo { ref mut x1, ref mut y1, ref mut x2, ref mut y2,
                                   ref mut x, ref mut y } => {
                let p1 = ts.apply(*x1, *y1);
                let p2 = ts.apply(*x2, *y2);
                let p = ts.apply(*x, *y);
                *x1 = p1.0;
                *y1 = p1.1;
                *x2 = p2.0;
                *y2 = p2.1;
                *x = p.0;
                *y = p.1;
            }
            PathSegment::ClosePath => {}
        }
    }
}

/// Representation of SVG path data.
///
/// The first segment is always a `MoveTo`.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Path {
    /// List of segments.
    pub segments: Vec<PathSegment>,
}

impl Path {
    /// Constructs a new path.
    #[inline]
    pub fn new() -> Path {
        Path { segments: Vec::new() }
    }

    /// Constructs a new path with a specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Path {
        Path { segments: Vec::with_capacity(capacity) }
    }

    /// Parses path data.
    ///
    /// Never fails. Parsing stops on the first malformed token and
    /// the valid prefix is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgscene::{Path, PathSegment};
    ///
    /// let path = Path::from_data("M 0 0 L abc");
    /// assert_eq!(path.segments, vec![PathSegment::MoveTo { x: 0.0, y: 0.0 }]);
    /// ```
    pub fn from_data(text: &str) -> Path {
        parser::parse(text)
    }

    /// Returns `true` if the path has no segments.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a number of segments.
    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns an iterator over segments.
    #[inline]
    pub fn iter(&self) -> slice::Iter<PathSegment> {
        self.segments.iter()
    }

    /// Returns `true` if the path has at least one drawing segment.
    pub fn has_drawing_segments(&self) -> bool {
        self.segments.iter().any(|seg| match *seg {
            PathSegment::LineTo { .. } | PathSegment::CurveTo { .. } => true,
            _ => false,
        })
    }

    /// Appends a `MoveTo` segment.
    pub fn push_move_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::MoveTo { x, y });
    }

    /// Appends a `LineTo` segment.
    pub fn push_line_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::LineTo { x, y });
    }

    /// Appends a `CurveTo` segment.
    pub fn push_curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
        self.segments.push(PathSegment::CurveTo { x1, y1, x2, y2, x, y });
    }

    /// Appends a `ClosePath` segment.
    pub fn push_close_path(&mut self) {
        self.segments.push(PathSegment::ClosePath);
    }

    /// Appends an elliptical arc from the current point as cubic curves.
    ///
    /// Follows the SVG rules: zero radii produce a line
    /// and an arc to the current point is ignored.
    pub fn push_arc_to(
        &mut self,
        rx: f64,
        ry: f64,
        x_axis_rotation: f64,
        large_arc: bool,
        sweep: bool,
        x: f64,
        y: f64,
    ) {
        let (x1, y1) = match self.current_point() {
            Some(p) => p,
            None => {
                self.push_move_to(x, y);
                return;
            }
        };

        if x1.fuzzy_eq(&x) && y1.fuzzy_eq(&y) {
            return;
        }

        if rx.is_fuzzy_zero() || ry.is_fuzzy_zero() {
            self.push_line_to(x, y);
            return;
        }

        let arc = arc::EllipticalArc {
            x1,
            y1,
            rx,
            ry,
            x_axis_rotation,
            large_arc,
            sweep,
            x2: x,
            y2: y,
        };
        arc.to_curves(self);
    }

    /// Returns the current pen position.
    ///
    /// After `ClosePath` it's the start of the closed subpath.
    pub fn current_point(&self) -> Option<(f64, f64)> {
        let mut closed = false;
        for seg in self.segments.iter().rev() {
            match *seg {
                PathSegment::ClosePath => closed = true,
                PathSegment::MoveTo { x, y } => return Some((x, y)),
                _ if !closed => return seg.end_point(),
                _ => {}
            }
        }

        None
    }

    /// Transforms all path points.
    pub fn transform(&mut self, ts: &Transform) {
        for seg in &mut self.segments {
            seg.transform(ts);
        }
    }

    /// Calculates an exact bounding box, including curve extremes.
    ///
    /// Returns `None` for an empty path.
    pub fn bounding_box(&self) -> Option<Rect> {
        bbox::calc(self)
    }
}
