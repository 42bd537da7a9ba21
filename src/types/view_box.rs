// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::str::FromStr;

use log::warn;

use super::number::write_num;
use super::Rect;
use crate::{WriteBuffer, WriteOptions};

/// Representation of the `viewBox` attribute.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBox {
    /// Constructs a new view box.
    #[inline]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> ViewBox {
        ViewBox { x, y, width, height }
    }

    /// Parses a view box.
    ///
    /// Four numbers separated by spaces and/or commas are expected.
    /// Returns `None` for an invalid list or a non-positive size.
    pub fn parse(text: &str) -> Option<ViewBox> {
        match svgtypes::ViewBox::from_str(text) {
            Ok(vb) => Some(ViewBox::new(vb.x, vb.y, vb.w, vb.h)),
            Err(_) => {
                warn!("Invalid 'viewBox' value: '{}'.", text);
                None
            }
        }
    }

    /// Returns the view box as a rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl WriteBuffer for ViewBox {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        let nums = [self.x, self.y, self.width, self.height];
        for (i, n) in nums.iter().enumerate() {
            if i != 0 {
                buf.push(b' ');
            }

            write_num(*n, opt.precision_coordinates, opt.remove_leading_zero, buf);
        }
    }
}

impl_display!(ViewBox);

/// An alignment part of the `preserveAspectRatio` attribute.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Align {
    None,
    XMinYMin,
    XMidYMin,
    XMaxYMin,
    XMinYMid,
    XMidYMid,
    XMaxYMid,
    XMinYMax,
    XMidYMax,
    XMaxYMax,
}

impl From<svgtypes::Align> for Align {
    fn from(align: svgtypes::Align) -> Self {
        match align {
            svgtypes::Align::None => Align::None,
            svgtypes::Align::XMinYMin => Align::XMinYMin,
            svgtypes::Align::XMidYMin => Align::XMidYMin,
            svgtypes::Align::XMaxYMin => Align::XMaxYMin,
            svgtypes::Align::XMinYMid => Align::XMinYMid,
            svgtypes::Align::XMidYMid => Align::XMidYMid,
            svgtypes::Align::XMaxYMid => Align::XMaxYMid,
            svgtypes::Align::XMinYMax => Align::XMinYMax,
            svgtypes::Align::XMidYMax => Align::XMidYMax,
            svgtypes::Align::XMaxYMax => Align::XMaxYMax,
        }
    }
}

impl Align {
    /// Returns alignment factors: 0 for min, 0.5 for mid and 1 for max.
    pub fn factors(self) -> (f64, f64) {
        match self {
            Align::None | Align::XMinYMin => (0.0, 0.0),
            Align::XMidYMin => (0.5, 0.0),
            Align::XMaxYMin => (1.0, 0.0),
            Align::XMinYMid => (0.0, 0.5),
            Align::XMidYMid => (0.5, 0.5),
            Align::XMaxYMid => (1.0, 0.5),
            Align::XMinYMax => (0.0, 1.0),
            Align::XMidYMax => (0.5, 1.0),
            Align::XMaxYMax => (1.0, 1.0),
        }
    }
}

/// Representation of the `preserveAspectRatio` attribute.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct AspectRatio {
    /// Alignment. `Align::None` scales each axis independently.
    pub align: Align,
    /// Use `slice` instead of `meet`.
    pub slice: bool,
}

impl Default for AspectRatio {
    fn default() -> AspectRatio {
        AspectRatio {
            align: Align::XMidYMid,
            slice: false,
        }
    }
}

impl AspectRatio {
    /// Parses a `preserveAspectRatio` value.
    ///
    /// The `none` keyword is accepted both in the alignment
    /// and in the fit position. An invalid value falls back to `xMidYMid meet`.
    pub fn parse(text: &str) -> AspectRatio {
        let text = text.trim();
        if text.is_empty() {
            return AspectRatio::default();
        }

        if let Ok(ratio) = svgtypes::AspectRatio::from_str(text) {
            return AspectRatio {
                align: Align::from(ratio.align),
                slice: ratio.slice,
            };
        }

        let mut parts = text.split_whitespace();
        if parts.next_back() == Some("none") && parts.next().is_some() {
            return AspectRatio {
                align: Align::None,
                slice: false,
            };
        }

        warn!("Invalid 'preserveAspectRatio' value: '{}'.", text);
        AspectRatio::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_view_box {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(ViewBox::parse($text), $result);
            }
        )
    }

    test_view_box!(parse_vb_1, "0 0 100 50", Some(ViewBox::new(0.0, 0.0, 100.0, 50.0)));
    test_view_box!(parse_vb_2, "-10,-20, 100,50", Some(ViewBox::new(-10.0, -20.0, 100.0, 50.0)));
    test_view_box!(parse_vb_3, "0 0 100", None);
    test_view_box!(parse_vb_5, "0 0 0 50", None);
    test_view_box!(parse_vb_6, "0 0 100 -5", None);

    macro_rules! test_aspect {
        ($name:ident, $text:expr, $align:expr, $slice:expr) => (
            #[test]
            fn $name() {
                assert_eq!(AspectRatio::parse($text), AspectRatio { align: $align, slice: $slice });
            }
        )
    }

    test_aspect!(parse_ar_1, "", Align::XMidYMid, false);
    test_aspect!(parse_ar_2, "xMinYMax slice", Align::XMinYMax, true);
    test_aspect!(parse_ar_3, "none", Align::None, false);
    test_aspect!(parse_ar_4, "xMidYMid none", Align::None, false);
    test_aspect!(parse_ar_5, "defer xMaxYMin", Align::XMaxYMin, false);
    test_aspect!(parse_ar_6, "qwe", Align::XMidYMid, false);
    test_aspect!(parse_ar_7, "defer xMinYMin none", Align::None, false);
}
