// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Path, PathSegment};
use crate::types::number::FuzzyZero;
use crate::types::Rect;

pub(super) fn calc(path: &Path) -> Option<Rect> {
    let mut rect: Option<Rect> = None;
    let mut include = |x: f64, y: f64| match rect {
        Some(ref mut r) => r.include_point(x, y),
        None => rect = Some(Rect::from_point(x, y)),
    };

    let mut prev = (0.0, 0.0);
    for seg in path.iter() {
        match *seg {
            PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => {
                include(x, y);
                prev = (x, y);
            }
            PathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                include(x, y);

                for t in extremes(prev.0, x1, x2, x).iter().chain(&extremes(prev.1, y1, y2, y)) {
                    if let Some(t) = *t {
                        include(eval(prev.0, x1, x2, x, t), eval(prev.1, y1, y2, y, t));
                    }
                }

                prev = (x, y);
            }
            PathSegment::ClosePath => {}
        }
    }

    rect
}

fn eval(p0: f64, p1: f64, p2: f64, p3: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

// Roots of the cubic derivative inside (0, 1).
fn extremes(p0: f64, p1: f64, p2: f64, p3: f64) -> [Option<f64>; 2] {
    let a = 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3);
    let b = 6.0 * (p0 - 2.0 * p1 + p2);
    let c = 3.0 * (p1 - p0);

    let in_range = |t: f64| if t > 0.0 && t < 1.0 { Some(t) } else { None };

    if a.is_fuzzy_zero() {
        if b.is_fuzzy_zero() {
            return [None, None];
        }

        return [in_range(-c / b), None];
    }

    let d = b * b - 4.0 * a * c;
    if d < 0.0 {
        return [None, None];
    }

    let sq = d.sqrt();
    [in_range((-b + sq) / (2.0 * a)), in_range((-b - sq) / (2.0 * a))]
}
