// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::rc::Rc;

use crate::paint::{Filter, Marker, Paint};
use crate::types::{Path, Points, Rect};

/// A text anchor.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl Default for TextAnchor {
    fn default() -> Self {
        TextAnchor::Start
    }
}

/// A font description.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Font {
    pub family: String,
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
}

impl Default for Font {
    fn default() -> Font {
        Font {
            family: "Arial".to_string(),
            size: 12.0,
            bold: false,
            italic: false,
        }
    }
}

/// A single-line text item.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Text {
    pub x: f64,
    pub y: f64,
    pub content: String,
    pub font: Font,
    pub anchor: TextAnchor,
}

impl Text {
    /// Returns an approximate text bounding box.
    ///
    /// Glyph metrics are unknown, so an average glyph width of 0.6 em is assumed.
    pub fn approx_bounding_box(&self) -> Rect {
        let width = self.content.chars().count() as f64 * self.font.size * 0.6;
        let x = match self.anchor {
            TextAnchor::Start => self.x,
            TextAnchor::Middle => self.x - width / 2.0,
            TextAnchor::End => self.x - width,
        };

        // `y` is a baseline.
        Rect::new(x, self.y - self.font.size, width, self.font.size)
    }
}

/// A layer description.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub locked: bool,
}

/// A shape geometry.
///
/// All coordinates are in the shape's own coordinate system,
/// before its transform is applied.
#[derive(Clone, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum ShapeKind {
    Path(Path),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        rx: f64,
        ry: f64,
    },
    Ellipse {
        cx: f64,
        cy: f64,
        rx: f64,
        ry: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
    Polyline(Points),
    Polygon(Points),
    Text(Text),
    /// A plain container.
    Group,
    /// A named container.
    Layer(Layer),
}

impl ShapeKind {
    /// Returns a short kind name, like `path` or `layer`.
    pub fn name(&self) -> &'static str {
        match *self {
            ShapeKind::Path(_) => "path",
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Line { .. } => "line",
            ShapeKind::Polyline(_) => "polyline",
            ShapeKind::Polygon(_) => "polygon",
            ShapeKind::Text(_) => "text",
            ShapeKind::Group => "group",
            ShapeKind::Layer(_) => "layer",
        }
    }

    /// Returns `true` for groups and layers.
    pub fn is_container(&self) -> bool {
        match *self {
            ShapeKind::Group | ShapeKind::Layer(_) => true,
            _ => false,
        }
    }

    /// Converts the geometry into a path.
    ///
    /// Returns `None` for text and containers.
    pub fn to_path(&self) -> Option<Path> {
        let path = match *self {
            ShapeKind::Path(ref path) => path.clone(),
            ShapeKind::Rect { x, y, width, height, rx, ry } => {
                rect_to_path(x, y, width, height, rx, ry)
            }
            ShapeKind::Ellipse { cx, cy, rx, ry } => {
                let mut p = Path::with_capacity(6);
                p.push_move_to(cx + rx, cy);
                p.push_arc_to(rx, ry, 0.0, false, true, cx, cy + ry);
                p.push_arc_to(rx, ry, 0.0, false, true, cx - rx, cy);
                p.push_arc_to(rx, ry, 0.0, false, true, cx, cy - ry);
                p.push_arc_to(rx, ry, 0.0, false, true, cx + rx, cy);
                p.push_close_path();
                p
            }
            ShapeKind::Line { x1, y1, x2, y2 } => {
                let mut p = Path::with_capacity(2);
                p.push_move_to(x1, y1);
                p.push_line_to(x2, y2);
                p
            }
            ShapeKind::Polyline(ref points) => points.to_path(false),
            ShapeKind::Polygon(ref points) => points.to_path(true),
            ShapeKind::Text(_) | ShapeKind::Group | ShapeKind::Layer(_) => return None,
        };

        Some(path)
    }
}

fn rect_to_path(x: f64, y: f64, width: f64, height: f64, rx: f64, ry: f64) -> Path {
    let mut p = Path::with_capacity(10);
    if rx > 0.0 && ry > 0.0 {
        p.push_move_to(x + rx, y);
        p.push_line_to(x + width - rx, y);
        p.push_arc_to(rx, ry, 0.0, false, true, x + width, y + ry);
        p.push_line_to(x + width, y + height - ry);
        p.push_arc_to(rx, ry, 0.0, false, true, x + width - rx, y + height);
        p.push_line_to(x + rx, y + height);
        p.push_arc_to(rx, ry, 0.0, false, true, x, y + height - ry);
        p.push_line_to(x, y + ry);
        p.push_arc_to(rx, ry, 0.0, false, true, x + rx, y);
    } else {
        p.push_move_to(x, y);
        p.push_line_to(x + width, y);
        p.push_line_to(x + width, y + height);
        p.push_line_to(x, y + height);
    }
    p.push_close_path();
    p
}

/// Presentation attributes of a shape.
///
/// `None` means that a property is not specified.
#[derive(Clone, PartialEq, Debug, Default)]
#[allow(missing_docs)]
pub struct Style {
    pub fill: Option<Paint>,
    pub fill_opacity: Option<f64>,
    pub stroke: Option<Paint>,
    pub stroke_opacity: Option<f64>,
    pub stroke_width: Option<f64>,
    pub stroke_dasharray: Option<Vec<f64>>,
    pub opacity: Option<f64>,
    pub filter: Option<Rc<Filter>>,
    pub marker_start: Option<Rc<Marker>>,
    pub marker_mid: Option<Rc<Marker>>,
    pub marker_end: Option<Rc<Marker>>,
}

macro_rules! override_props {
    ($dst:expr, $src:expr, $($prop:ident),+) => (
        $(
            if $src.$prop.is_some() {
                $dst.$prop = $src.$prop.clone();
            }
        )+
    )
}

impl Style {
    /// Returns `true` if no properties are specified.
    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }

    /// Overrides properties with the ones specified in `other`.
    pub fn override_with(&mut self, other: &Style) {
        override_props!(self, other,
            fill, fill_opacity, stroke, stroke_opacity, stroke_width, stroke_dasharray,
            opacity, filter, marker_start, marker_mid, marker_end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FuzzyEq;
    use crate::Color;

    #[test]
    fn ellipse_path_bbox() {
        let kind = ShapeKind::Ellipse { cx: 10.0, cy: 20.0, rx: 5.0, ry: 3.0 };
        let bbox = kind.to_path().unwrap().bounding_box().unwrap();
        assert!(bbox.fuzzy_eq(&Rect::new(5.0, 17.0, 10.0, 6.0)));
    }

    #[test]
    fn rounded_rect_path_bbox() {
        let kind = ShapeKind::Rect { x: 0.0, y: 0.0, width: 20.0, height: 10.0, rx: 2.0, ry: 2.0 };
        let bbox = kind.to_path().unwrap().bounding_box().unwrap();
        assert!(bbox.fuzzy_eq(&Rect::new(0.0, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn style_override() {
        let mut base = Style::default();
        base.fill = Some(Paint::Color(Color::black()));
        base.stroke_width = Some(2.0);

        let mut other = Style::default();
        other.fill = Some(Paint::None);

        base.override_with(&other);
        assert_eq!(base.fill, Some(Paint::None));
        assert_eq!(base.stroke_width, Some(2.0));
        assert!(!base.is_empty());
        assert!(Style::default().is_empty());
    }

    #[test]
    fn text_bbox() {
        let text = Text {
            x: 10.0,
            y: 20.0,
            content: "abcd".to_string(),
            font: Font::default(),
            anchor: TextAnchor::Middle,
        };
        let r = text.approx_bounding_box();
        assert!((r.width - 28.8).abs() < 1e-9);
        assert!((r.x - (10.0 - 14.4)).abs() < 1e-9);
        assert_eq!(r.y, 8.0);
    }
}
