// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::warn;
use svgtypes::{PathParser, PathSegment as Token};

use super::arc;
use super::{Path, PathSegment};
use crate::types::number::{FuzzyEq, FuzzyZero};

/// Returns raw path data tokens, as written in the source.
///
/// Stops at the first malformed token.
pub(crate) fn tokens(text: &str) -> impl Iterator<Item = Token> + '_ {
    PathParser::from(text).map_while(|token| match token {
        Ok(token) => Some(token),
        Err(e) => {
            warn!("Path data is malformed: {}. Only the valid prefix is kept.", e);
            None
        }
    })
}

// Tracks the pen state while converting tokens into normalized segments.
struct Normalizer {
    path: Path,
    // Current point.
    x: f64,
    y: f64,
    // Current subpath start.
    start_x: f64,
    start_y: f64,
    // Second control point of the previous cubic.
    prev_cubic: Option<(f64, f64)>,
    // Control point of the previous quadratic.
    prev_quad: Option<(f64, f64)>,
    // A drawing command after ClosePath must start a new subpath.
    need_move: bool,
    degenerate_arc: Option<(f64, f64)>,
}

pub(super) fn parse(text: &str) -> Path {
    let mut n = Normalizer {
        path: Path::with_capacity(text.len() / 8),
        x: 0.0,
        y: 0.0,
        start_x: 0.0,
        start_y: 0.0,
        prev_cubic: None,
        prev_quad: None,
        need_move: false,
        degenerate_arc: None,
    };

    for token in tokens(text) {
        n.process(token);
    }

    if let Some((x, y)) = n.degenerate_arc {
        if !n.path.has_drawing_segments() {
            n.path.push_line_to(x, y);
        }
    }

    n.path
}

impl Normalizer {
    fn abs_point(&self, abs: bool, x: f64, y: f64) -> (f64, f64) {
        if abs { (x, y) } else { (self.x + x, self.y + y) }
    }

    fn reflect(&self, p: Option<(f64, f64)>) -> (f64, f64) {
        match p {
            Some((px, py)) => (self.x * 2.0 - px, self.y * 2.0 - py),
            None => (self.x, self.y),
        }
    }

    fn start_subpath_if_needed(&mut self) {
        if self.need_move {
            self.path.push_move_to(self.start_x, self.start_y);
            self.need_move = false;
        }
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push_line_to(x, y);
        self.x = x;
        self.y = y;
    }

    fn quad_to(&mut self, qx: f64, qy: f64, x: f64, y: f64) {
        // Elevate a quadratic to a cubic.
        let x1 = self.x + 2.0 / 3.0 * (qx - self.x);
        let y1 = self.y + 2.0 / 3.0 * (qy - self.y);
        let x2 = x + 2.0 / 3.0 * (qx - x);
        let y2 = y + 2.0 / 3.0 * (qy - y);
        self.path.push_curve_to(x1, y1, x2, y2, x, y);
        self.x = x;
        self.y = y;
    }

    fn process(&mut self, token: Token) {
        let mut prev_cubic = None;
        let mut prev_quad = None;

        if !matches!(token, Token::MoveTo { .. } | Token::ClosePath { .. }) {
            self.start_subpath_if_needed();
        }

        match token {
            Token::MoveTo { abs, x, y } => {
                let (x, y) = self.abs_point(abs, x, y);
                self.path.push_move_to(x, y);
                self.x = x;
                self.y = y;
                self.start_x = x;
                self.start_y = y;
                self.need_move = false;
            }
            Token::LineTo { abs, x, y } => {
                let (x, y) = self.abs_point(abs, x, y);
                self.line_to(x, y);
            }
            Token::HorizontalLineTo { abs, x } => {
                let x = if abs { x } else { self.x + x };
                let y = self.y;
                self.line_to(x, y);
            }
            Token::VerticalLineTo { abs, y } => {
                let y = if abs { y } else { self.y + y };
                let x = self.x;
                self.line_to(x, y);
            }
            Token::CurveTo { abs, x1, y1, x2, y2, x, y } => {
                let (x1, y1) = self.abs_point(abs, x1, y1);
                let (x2, y2) = self.abs_point(abs, x2, y2);
                let (x, y) = self.abs_point(abs, x, y);
                self.path.push_curve_to(x1, y1, x2, y2, x, y);
                self.x = x;
                self.y = y;
                prev_cubic = Some((x2, y2));
            }
            Token::SmoothCurveTo { abs, x2, y2, x, y } => {
                let (x1, y1) = self.reflect(self.prev_cubic);
                let (x2, y2) = self.abs_point(abs, x2, y2);
                let (x, y) = self.abs_point(abs, x, y);
                self.path.push_curve_to(x1, y1, x2, y2, x, y);
                self.x = x;
                self.y = y;
                prev_cubic = Some((x2, y2));
            }
            Token::Quadratic { abs, x1, y1, x, y } => {
                let (qx, qy) = self.abs_point(abs, x1, y1);
                let (x, y) = self.abs_point(abs, x, y);
                self.quad_to(qx, qy, x, y);
                prev_quad = Some((qx, qy));
            }
            Token::SmoothQuadratic { abs, x, y } => {
                let (qx, qy) = self.reflect(self.prev_quad);
                let (x, y) = self.abs_point(abs, x, y);
                self.quad_to(qx, qy, x, y);
                prev_quad = Some((qx, qy));
            }
            Token::EllipticalArc { abs, rx, ry, x_axis_rotation, large_arc, sweep, x, y } => {
                let (x, y) = self.abs_point(abs, x, y);
                if self.x.fuzzy_eq(&x) && self.y.fuzzy_eq(&y) {
                    // An arc to the current point draws nothing.
                    self.degenerate_arc = Some((x, y));
                } else if rx.is_fuzzy_zero() || ry.is_fuzzy_zero() {
                    self.line_to(x, y);
                } else {
                    let arc = arc::EllipticalArc {
                        x1: self.x,
                        y1: self.y,
                        rx,
                        ry,
                        x_axis_rotation,
                        large_arc,
                        sweep,
                        x2: x,
                        y2: y,
                    };
                    arc.to_curves(&mut self.path);
                    self.x = x;
                    self.y = y;
                }
            }
            Token::ClosePath { .. } => {
                if self.path.segments.last() != Some(&PathSegment::ClosePath)
                    && !self.path.is_empty()
                {
                    self.path.push_close_path();
                }

                self.x = self.start_x;
                self.y = self.start_y;
                self.need_move = true;
            }
        }

        self.prev_cubic = prev_cubic;
        self.prev_quad = prev_quad;
    }
}
