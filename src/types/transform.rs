// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::f64;

use log::{debug, warn};

use svgtypes::{Stream, TransformListParser, TransformListToken};

use super::number::{write_num, FuzzyEq, FuzzyZero};
use crate::{WriteBuffer, WriteOptions};

/// Representation of the [`<transform>`] type.
///
/// [`<transform>`]: https://www.w3.org/TR/SVG11/coords.html#TransformAttribute
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    /// Constructs a new transform.
    #[inline]
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Transform {
        Transform { a, b, c, d, e, f }
    }

    /// Constructs a new translate transform.
    #[inline]
    pub fn from_translate(x: f64, y: f64) -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, x, y)
    }

    /// Constructs a new scale transform.
    #[inline]
    pub fn from_scale(sx: f64, sy: f64) -> Transform {
        Transform::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Constructs a new rotate transform. The angle is in degrees.
    pub fn from_rotate(angle: f64) -> Transform {
        let v = angle.to_radians();
        let a = v.cos();
        let b = v.sin();
        Transform::new(a, b, -b, a, 0.0, 0.0)
    }

    /// Constructs a new rotate transform around the `cx`, `cy` point.
    pub fn from_rotate_at(angle: f64, cx: f64, cy: f64) -> Transform {
        Transform::from_translate(cx, cy)
            .rotate(angle)
            .translate(-cx, -cy)
    }

    /// Constructs a new skew transform along the X axis. The angle is in degrees.
    #[inline]
    pub fn from_skew_x(angle: f64) -> Transform {
        Transform::new(1.0, 0.0, angle.to_radians().tan(), 1.0, 0.0, 0.0)
    }

    /// Constructs a new skew transform along the Y axis. The angle is in degrees.
    #[inline]
    pub fn from_skew_y(angle: f64) -> Transform {
        Transform::new(1.0, angle.to_radians().tan(), 0.0, 1.0, 0.0, 0.0)
    }

    /// Translates the current transform.
    pub fn translate(mut self, x: f64, y: f64) -> Transform {
        self.append(&Transform::from_translate(x, y));
        self
    }

    /// Scales the current transform.
    pub fn scale(mut self, sx: f64, sy: f64) -> Transform {
        self.append(&Transform::from_scale(sx, sy));
        self
    }

    /// Rotates the current transform. The angle is in degrees.
    pub fn rotate(mut self, angle: f64) -> Transform {
        self.append(&Transform::from_rotate(angle));
        self
    }

    /// Appends transform to the current transform.
    ///
    /// The result is `self × t`: the appended transform is applied first.
    pub fn append(&mut self, t: &Transform) {
        *self = multiply(self, t);
    }

    /// Prepends transform to the current transform.
    ///
    /// The result is `t × self`: the prepended transform is applied last.
    pub fn prepend(&mut self, t: &Transform) {
        *self = multiply(t, self);
    }

    /// Maps a point.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.a * x + self.c * y + self.e, self.b * x + self.d * y + self.f)
    }

    /// Returns an inverted transform.
    ///
    /// Returns `None` when the transform is not invertible.
    pub fn invert(&self) -> Option<Transform> {
        let det = self.a * self.d - self.b * self.c;
        if det.is_fuzzy_zero() {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(Transform::new(
            self.d * inv_det,
            -self.b * inv_det,
            -self.c * inv_det,
            self.a * inv_det,
            (self.c * self.f - self.d * self.e) * inv_det,
            (self.b * self.e - self.a * self.f) * inv_det,
        ))
    }

    /// Returns transform's scale part.
    pub fn get_scale(&self) -> (f64, f64) {
        let sx = (self.a * self.a + self.b * self.b).sqrt();
        let sy = (self.c * self.c + self.d * self.d).sqrt();
        (sx, sy)
    }

    /// Returns `true` if the current transform is default, aka (1 0 0 1 0 0).
    pub fn is_default(&self) -> bool {
           self.a == 1.0
        && self.b == 0.0
        && self.c == 0.0
        && self.d == 1.0
        && self.e == 0.0
        && self.f == 0.0
    }

    /// Returns `true` if the current transform contains only translate part.
    pub fn is_translate(&self) -> bool {
           self.a == 1.0
        && self.b == 0.0
        && self.c == 0.0
        && self.d == 1.0
        && (self.e != 0.0 || self.f != 0.0)
    }

    /// Returns `true` if the current transform contains only scale part.
    pub fn is_scale(&self) -> bool {
           (self.a != 1.0 || self.d != 1.0)
        && self.b == 0.0
        && self.c == 0.0
        && self.e == 0.0
        && self.f == 0.0
    }

    /// Parses a transform list.
    ///
    /// Never fails. Unknown functions and functions with an invalid
    /// number of arguments are skipped. On a syntax error, parsing stops
    /// and the already composed part is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use svgscene::Transform;
    ///
    /// let ts = Transform::parse("translate(10,10) scale(2)");
    /// assert_eq!(ts.apply(1.0, 0.0), (12.0, 10.0));
    /// ```
    pub fn parse(text: &str) -> Transform {
        let mut ts = Transform::default();
        let mut s = Stream::from(text);

        loop {
            skip_separators(&mut s);
            if s.at_end() {
                break;
            }

            // Each call is parsed separately, so an unknown function
            // does not discard the rest of the list.
            let start = s.pos();
            let name = s.consume_ident();
            s.skip_spaces();
            if name.is_empty() || s.consume_byte(b'(').is_err() {
                warn!("Invalid transform list at position {}.", s.pos());
                break;
            }

            s.skip_bytes(|_, c| c != b')');
            if s.consume_byte(b')').is_err() {
                warn!("Invalid transform list at position {}.", s.pos());
                break;
            }

            match function_transform(s.slice_back(start)) {
                Some(t) => ts.append(&t),
                None => debug!("Transform function '{}' is skipped.", s.slice_back(start)),
            }
        }

        ts
    }
}

fn skip_separators(s: &mut Stream) {
    s.skip_spaces();
    while s.is_curr_byte_eq(b',') {
        s.advance(1);
        s.skip_spaces();
    }
}

fn function_transform(call: &str) -> Option<Transform> {
    let mut ts = Transform::default();
    for token in TransformListParser::from(call) {
        let t = match token.ok()? {
            TransformListToken::Matrix { a, b, c, d, e, f } => Transform::new(a, b, c, d, e, f),
            TransformListToken::Translate { tx, ty } => Transform::from_translate(tx, ty),
            TransformListToken::Scale { sx, sy } => Transform::from_scale(sx, sy),
            TransformListToken::Rotate { angle } => Transform::from_rotate(angle),
            TransformListToken::SkewX { angle } => Transform::from_skew_x(angle),
            TransformListToken::SkewY { angle } => Transform::from_skew_y(angle),
        };

        ts.append(&t);
    }

    Some(ts)
}

#[inline]
fn multiply(ts1: &Transform, ts2: &Transform) -> Transform {
    Transform {
        a: ts1.a * ts2.a + ts1.c * ts2.b,
        b: ts1.b * ts2.a + ts1.d * ts2.b,
        c: ts1.a * ts2.c + ts1.c * ts2.d,
        d: ts1.b * ts2.c + ts1.d * ts2.d,
        e: ts1.a * ts2.e + ts1.c * ts2.f + ts1.e,
        f: ts1.b * ts2.e + ts1.d * ts2.f + ts1.f,
    }
}

impl Default for Transform {
    fn default() -> Transform {
        Transform::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)
    }
}

impl FuzzyEq for Transform {
    fn fuzzy_eq(&self, other: &Self) -> bool {
           self.a.fuzzy_eq(&other.a)
        && self.b.fuzzy_eq(&other.b)
        && self.c.fuzzy_eq(&other.c)
        && self.d.fuzzy_eq(&other.d)
        && self.e.fuzzy_eq(&other.e)
        && self.f.fuzzy_eq(&other.f)
    }
}

impl WriteBuffer for Transform {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        if self.is_default() {
            return;
        }

        if opt.simplify_transform_matrices {
            write_simplified_transform(self, opt, buf);
        } else {
            write_matrix_transform(self, opt, buf);
        }
    }
}

fn write_matrix_transform(ts: &Transform, opt: &WriteOptions, out: &mut Vec<u8>) {
    let pt = opt.precision_transforms;
    let pc = opt.precision_coordinates;
    let rm = opt.remove_leading_zero;

    out.extend_from_slice(b"matrix(");
    write_num(ts.a, pt, rm, out);
    out.push(b' ');
    write_num(ts.b, pt, rm, out);
    out.push(b' ');
    write_num(ts.c, pt, rm, out);
    out.push(b' ');
    write_num(ts.d, pt, rm, out);
    out.push(b' ');
    write_num(ts.e, pc, rm, out);
    out.push(b' ');
    write_num(ts.f, pc, rm, out);
    out.push(b')');
}

fn write_simplified_transform(ts: &Transform, opt: &WriteOptions, out: &mut Vec<u8>) {
    let pt = opt.precision_transforms;
    let pc = opt.precision_coordinates;
    let rm = opt.remove_leading_zero;

    if ts.is_translate() {
        out.extend_from_slice(b"translate(");
        write_num(ts.e, pc, rm, out);

        if ts.f != 0.0 {
            out.push(b' ');
            write_num(ts.f, pc, rm, out);
        }

        out.push(b')');
    } else if ts.is_scale() {
        out.extend_from_slice(b"scale(");
        write_num(ts.a, pt, rm, out);

        if ts.a != ts.d {
            out.push(b' ');
            write_num(ts.d, pt, rm, out);
        }

        out.push(b')');
    } else {
        write_matrix_transform(ts, opt, out);
    }
}

impl_display!(Transform);
