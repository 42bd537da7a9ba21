// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use super::{Path, PathSegment};
use crate::types::number::write_num;
use crate::{WriteBuffer, WriteOptions};

impl WriteBuffer for Path {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        if self.is_empty() {
            return;
        }

        let mut prev_cmd: Option<u8> = None;
        for seg in self.iter() {
            let cmd = match *seg {
                PathSegment::MoveTo { .. } => b'M',
                PathSegment::LineTo { .. } => b'L',
                PathSegment::CurveTo { .. } => b'C',
                PathSegment::ClosePath => b'Z',
            };

            // MoveTo commands can't be skipped.
            let skip_cmd = opt.remove_duplicated_path_commands
                && cmd != b'M'
                && cmd != b'Z'
                && prev_cmd == Some(cmd);

            if !skip_cmd {
                buf.push(cmd);
                buf.push(b' ');
            }

            let mut write_coords = |coords: &[f64]| {
                for n in coords {
                    write_num(*n, opt.precision_coordinates, opt.remove_leading_zero, buf);
                    buf.push(b' ');
                }
            };

            match *seg {
                PathSegment::MoveTo { x, y } | PathSegment::LineTo { x, y } => {
                    write_coords(&[x, y]);
                }
                PathSegment::CurveTo { x1, y1, x2, y2, x, y } => {
                    write_coords(&[x1, y1, x2, y2, x, y]);
                }
                PathSegment::ClosePath => {}
            }

            prev_cmd = Some(cmd);
        }

        // Remove the trailing space.
        buf.pop();
    }
}

impl_display!(Path);
