// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::ops::{Deref, DerefMut};

use svgtypes::PointsParser;

use super::number::write_num;
use super::{Path, Transform};
use crate::{WriteBuffer, WriteOptions};

/// Representation of the SVG `points` attribute data.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Points(pub Vec<(f64, f64)>);

impl Points {
    /// Constructs a new points container.
    pub fn new() -> Self {
        Points(Vec::new())
    }

    /// Parses a list of coordinate pairs.
    ///
    /// Parsing stops on the first invalid number.
    /// An odd trailing coordinate is ignored.
    pub fn parse(text: &str) -> Points {
        Points(PointsParser::from(text).collect())
    }

    /// Transforms all points.
    pub fn transform(&mut self, ts: &Transform) {
        for p in &mut self.0 {
            *p = ts.apply(p.0, p.1);
        }
    }

    /// Converts points into a path. Closes the path when `closed` is set.
    pub fn to_path(&self, closed: bool) -> Path {
        let mut path = Path::with_capacity(self.len() + 1);
        for (i, &(x, y)) in self.iter().enumerate() {
            if i == 0 {
                path.push_move_to(x, y);
            } else {
                path.push_line_to(x, y);
            }
        }

        if closed && !path.is_empty() {
            path.push_close_path();
        }

        path
    }
}

impl WriteBuffer for Points {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        for (i, &(x, y)) in self.iter().enumerate() {
            if i != 0 {
                buf.push(b' ');
            }

            write_num(x, opt.precision_coordinates, opt.remove_leading_zero, buf);
            buf.push(b',');
            write_num(y, opt.precision_coordinates, opt.remove_leading_zero, buf);
        }
    }
}

impl_display!(Points);

impl Deref for Points {
    type Target = Vec<(f64, f64)>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Points {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
