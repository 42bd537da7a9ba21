// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Paint servers and other referenced definitions.

use std::rc::Rc;

use crate::shape::{ShapeKind, Style};
use crate::types::{Color, Length, Rect, Transform, ViewBox};

/// A paint.
#[derive(Clone, PartialEq, Debug)]
pub enum Paint {
    /// An explicit `none`.
    None,
    /// A `currentColor` reference.
    CurrentColor,
    /// A plain color.
    Color(Color),
    /// A linear gradient reference.
    LinearGradient(Rc<LinearGradient>),
    /// A radial gradient reference.
    RadialGradient(Rc<RadialGradient>),
    /// A pattern reference.
    Pattern(Rc<Pattern>),
}

impl Paint {
    /// Returns the referenced definition id, if any.
    pub fn link_id(&self) -> Option<&str> {
        match *self {
            Paint::LinearGradient(ref lg) => Some(&lg.id),
            Paint::RadialGradient(ref rg) => Some(&rg.id),
            Paint::Pattern(ref p) => Some(&p.id),
            _ => None,
        }
    }
}

/// A coordinate system of a paint server.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum Units {
    UserSpaceOnUse,
    ObjectBoundingBox,
}

impl Units {
    pub(crate) fn parse(text: &str) -> Option<Units> {
        match text {
            "userSpaceOnUse" => Some(Units::UserSpaceOnUse),
            "objectBoundingBox" => Some(Units::ObjectBoundingBox),
            _ => None,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match *self {
            Units::UserSpaceOnUse => "userSpaceOnUse",
            Units::ObjectBoundingBox => "objectBoundingBox",
        }
    }
}

/// A gradient spread method.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum SpreadMethod {
    Pad,
    Reflect,
    Repeat,
}

impl SpreadMethod {
    pub(crate) fn parse(text: &str) -> Option<SpreadMethod> {
        match text {
            "pad" => Some(SpreadMethod::Pad),
            "reflect" => Some(SpreadMethod::Reflect),
            "repeat" => Some(SpreadMethod::Repeat),
            _ => None,
        }
    }

    pub(crate) fn as_str(&self) -> &'static str {
        match *self {
            SpreadMethod::Pad => "pad",
            SpreadMethod::Reflect => "reflect",
            SpreadMethod::Repeat => "repeat",
        }
    }
}

/// A gradient stop.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Stop {
    /// An offset in the 0..1 range.
    pub offset: f64,
    /// A stop color.
    pub color: Color,
    /// A stop opacity in the 0..1 range.
    pub opacity: f64,
}

/// Attributes shared by all gradients.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct BaseGradient {
    pub units: Units,
    pub transform: Transform,
    pub spread_method: SpreadMethod,
    pub stops: Vec<Stop>,
}

/// A linear gradient.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct LinearGradient {
    pub id: String,
    pub x1: Length,
    pub y1: Length,
    pub x2: Length,
    pub y2: Length,
    pub base: BaseGradient,
}

/// A radial gradient.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct RadialGradient {
    pub id: String,
    pub cx: Length,
    pub cy: Length,
    pub r: Length,
    pub fx: Length,
    pub fy: Length,
    pub base: BaseGradient,
}

/// A filter primitive.
#[derive(Clone, PartialEq, Debug)]
pub enum FilterPrimitive {
    /// A Gaussian blur.
    GaussianBlur {
        /// Standard deviation along the X axis.
        std_dev_x: f64,
        /// Standard deviation along the Y axis.
        std_dev_y: f64,
    },
    /// A drop shadow.
    DropShadow {
        /// An offset along the X axis.
        dx: f64,
        /// An offset along the Y axis.
        dy: f64,
        /// Standard deviation.
        std_dev: f64,
        /// A shadow color.
        color: Color,
    },
}

/// A filter.
#[derive(Clone, PartialEq, Debug)]
pub struct Filter {
    /// Element's ID.
    pub id: String,
    /// Primitives in document order.
    pub primitives: Vec<FilterPrimitive>,
}

/// A shape inside a pattern or a marker.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Graphic {
    pub kind: ShapeKind,
    pub style: Style,
    pub transform: Transform,
}

/// A pattern.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Pattern {
    pub id: String,
    pub rect: Rect,
    pub units: Units,
    pub content_units: Units,
    pub transform: Transform,
    pub view_box: Option<ViewBox>,
    pub children: Vec<Graphic>,
}

/// A marker orientation.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum MarkerOrient {
    Auto,
    AutoStartReverse,
    Angle(f64),
}

/// A marker.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Marker {
    pub id: String,
    pub ref_x: f64,
    pub ref_y: f64,
    pub width: f64,
    pub height: f64,
    pub orient: MarkerOrient,
    pub view_box: Option<ViewBox>,
    pub children: Vec<Graphic>,
}
