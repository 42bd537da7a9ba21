// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! This module contains submodules which represent SVG value types.
//!
//! All parsers here are lenient: they never return an error
//! and fall back to a default value instead.

pub use self::color::Color;
pub use self::length::{parse_length, parse_length_with_reference, Length, LengthUnit};
pub use self::number::{FuzzyEq, FuzzyZero};
pub use self::path::{Path, PathSegment};
pub use self::points::Points;
pub use self::rect::Rect;
pub use self::transform::Transform;
pub use self::view_box::{Align, AspectRatio, ViewBox};

pub(crate) use self::number::write_num;

pub mod path;
mod color;
mod length;
mod number;
mod points;
mod rect;
pub(crate) mod style;
mod transform;
mod view_box;
