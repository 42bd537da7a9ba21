// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64::consts::{FRAC_PI_2, PI};

use super::Path;

/// An elliptical arc in the endpoint parameterization.
///
/// <https://www.w3.org/TR/SVG11/implnote.html#ArcImplementationNotes>
#[derive(Clone, Copy, Debug)]
pub(super) struct EllipticalArc {
    pub x1: f64,
    pub y1: f64,
    pub rx: f64,
    pub ry: f64,
    pub x_axis_rotation: f64,
    pub large_arc: bool,
    pub sweep: bool,
    pub x2: f64,
    pub y2: f64,
}

// The arc in the center parameterization.
struct CenterArc {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    sin_phi: f64,
    cos_phi: f64,
    theta: f64,
    delta: f64,
}

impl CenterArc {
    fn point(&self, t: f64) -> (f64, f64) {
        let (sin_t, cos_t) = t.sin_cos();
        let x = self.rx * cos_t;
        let y = self.ry * sin_t;
        (self.cx + x * self.cos_phi - y * self.sin_phi,
         self.cy + x * self.sin_phi + y * self.cos_phi)
    }

    fn derivative(&self, t: f64) -> (f64, f64) {
        let (sin_t, cos_t) = t.sin_cos();
        let x = -self.rx * sin_t;
        let y = self.ry * cos_t;
        (x * self.cos_phi - y * self.sin_phi,
         x * self.sin_phi + y * self.cos_phi)
    }
}

impl EllipticalArc {
    /// Appends the arc to the path as cubic curves,
    /// each one spanning at most 90 degrees.
    ///
    /// The radii must be non-zero and the endpoints must not coincide.
    pub fn to_curves(&self, path: &mut Path) {
        let arc = self.to_center();

        let count = (arc.delta.abs() / FRAC_PI_2 - 1e-7).ceil().max(1.0) as usize;
        let step = arc.delta / count as f64;
        let k = 4.0 / 3.0 * (step / 4.0).tan();

        let mut t1 = arc.theta;
        let (mut px, mut py) = (self.x1, self.y1);
        for i in 0..count {
            let t2 = t1 + step;

            let (dx1, dy1) = arc.derivative(t1);
            let (dx2, dy2) = arc.derivative(t2);
            let (x, y) = if i + 1 == count {
                (self.x2, self.y2)
            } else {
                arc.point(t2)
            };

            path.push_curve_to(px + k * dx1, py + k * dy1, x - k * dx2, y - k * dy2, x, y);

            px = x;
            py = y;
            t1 = t2;
        }
    }

    fn to_center(&self) -> CenterArc {
        let (sin_phi, cos_phi) = self.x_axis_rotation.to_radians().sin_cos();

        // Step 1: compute (x1', y1').
        let dx2 = (self.x1 - self.x2) / 2.0;
        let dy2 = (self.y1 - self.y2) / 2.0;
        let x1p = cos_phi * dx2 + sin_phi * dy2;
        let y1p = -sin_phi * dx2 + cos_phi * dy2;

        // Scale up radii that are too small to reach the endpoint.
        let mut rx = self.rx.abs();
        let mut ry = self.ry.abs();
        let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
        if lambda > 1.0 {
            let s = lambda.sqrt();
            rx *= s;
            ry *= s;
        }

        // Step 2: compute (cx', cy').
        let rx2 = rx * rx;
        let ry2 = ry * ry;
        let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
        let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
        let sign = if self.large_arc == self.sweep { -1.0 } else { 1.0 };
        let coef = sign * (num / den).max(0.0).sqrt();
        let cxp = coef * rx * y1p / ry;
        let cyp = coef * -(ry * x1p / rx);

        // Step 3: compute (cx, cy) from (cx', cy').
        let cx = cos_phi * cxp - sin_phi * cyp + (self.x1 + self.x2) / 2.0;
        let cy = sin_phi * cxp + cos_phi * cyp + (self.y1 + self.y2) / 2.0;

        // Step 4: compute the start angle and the sweep.
        let ux = (x1p - cxp) / rx;
        let uy = (y1p - cyp) / ry;
        let vx = (-x1p - cxp) / rx;
        let vy = (-y1p - cyp) / ry;

        let theta = uy.atan2(ux);
        let mut delta = (ux * vy - uy * vx).atan2(ux * vx + uy * vy);
        if !self.sweep && delta > 0.0 {
            delta -= 2.0 * PI;
        } else if self.sweep && delta < 0.0 {
            delta += 2.0 * PI;
        }

        CenterArc { cx, cy, rx, ry, sin_phi, cos_phi, theta, delta }
    }
}
