// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::warn;

use super::style::Properties;
use crate::collector::ShapeElementKind;
use crate::shape::{Font, ShapeKind, Text, TextAnchor};
use crate::tree::Element;
use crate::types::{Length, LengthUnit, Path, Points};

/// A reference size for percent values.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A reference for values that are neither horizontal nor vertical.
    pub fn diagonal(&self) -> f64 {
        ((self.width * self.width + self.height * self.height) / 2.0).sqrt()
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
    Diagonal,
}

fn length(elem: &Element, name: &str, axis: Axis, vp: &Viewport) -> Option<f64> {
    let text = elem.attribute(name)?;
    let reference = match axis {
        Axis::X => vp.width,
        Axis::Y => vp.height,
        Axis::Diagonal => vp.diagonal(),
    };

    Some(Length::parse(text).to_px(reference))
}

fn length_or_zero(elem: &Element, name: &str, axis: Axis, vp: &Viewport) -> f64 {
    length(elem, name, axis, vp).unwrap_or(0.0)
}

/// Converts an element into a shape geometry.
///
/// Returns `None` for an invalid geometry and for `use`.
pub(crate) fn convert(elem: &Element, kind: ShapeElementKind, vp: &Viewport) -> Option<ShapeKind> {
    match kind {
        ShapeElementKind::Path => convert_path(elem),
        ShapeElementKind::Rect => convert_rect(elem, vp),
        ShapeElementKind::Circle => {
            let cx = length_or_zero(elem, "cx", Axis::X, vp);
            let cy = length_or_zero(elem, "cy", Axis::Y, vp);
            let r = length_or_zero(elem, "r", Axis::Diagonal, vp);
            if !(r > 0.0) {
                warn!("Circle '{}' has an invalid 'r' value. Skipped.", elem_id(elem));
                return None;
            }

            Some(ShapeKind::Ellipse { cx, cy, rx: r, ry: r })
        }
        ShapeElementKind::Ellipse => {
            let cx = length_or_zero(elem, "cx", Axis::X, vp);
            let cy = length_or_zero(elem, "cy", Axis::Y, vp);
            let rx = length_or_zero(elem, "rx", Axis::X, vp);
            let ry = length_or_zero(elem, "ry", Axis::Y, vp);
            if !(rx > 0.0 && ry > 0.0) {
                warn!("Ellipse '{}' has an invalid radius. Skipped.", elem_id(elem));
                return None;
            }

            Some(ShapeKind::Ellipse { cx, cy, rx, ry })
        }
        ShapeElementKind::Line => {
            Some(ShapeKind::Line {
                x1: length_or_zero(elem, "x1", Axis::X, vp),
                y1: length_or_zero(elem, "y1", Axis::Y, vp),
                x2: length_or_zero(elem, "x2", Axis::X, vp),
                y2: length_or_zero(elem, "y2", Axis::Y, vp),
            })
        }
        ShapeElementKind::Polyline | ShapeElementKind::Polygon => {
            let points = elem.attribute("points").map(Points::parse).unwrap_or_default();
            if points.len() < 2 {
                warn!("{} '{}' has less than 2 points. Skipped.", elem.name, elem_id(elem));
                return None;
            }

            if kind == ShapeElementKind::Polyline {
                Some(ShapeKind::Polyline(points))
            } else {
                Some(ShapeKind::Polygon(points))
            }
        }
        ShapeElementKind::Text => convert_text(elem, vp),
        ShapeElementKind::Use => None,
    }
}

fn elem_id(elem: &Element) -> &str {
    elem.id().unwrap_or("")
}

fn convert_path(elem: &Element) -> Option<ShapeKind> {
    if elem.attribute("sodipodi:type") == Some("arc") {
        if let Some(ellipse) = convert_sodipodi_arc(elem) {
            return Some(ellipse);
        }
    }

    let path = elem.attribute("d").map(Path::from_data).unwrap_or_default();
    if !path.has_drawing_segments() {
        warn!("Path '{}' has no drawing segments. Skipped.", elem_id(elem));
        return None;
    }

    Some(ShapeKind::Path(path))
}

// Inkscape stores circles and ellipses as paths with extra attributes.
// Only full ellipses are converted; partial arcs stay paths.
fn convert_sodipodi_arc(elem: &Element) -> Option<ShapeKind> {
    let num = |name: &str| elem.attribute(name).map(|v| Length::parse(v).num);

    if let (Some(start), Some(end)) = (num("sodipodi:start"), num("sodipodi:end")) {
        if (end - start).abs() < 2.0 * std::f64::consts::PI - 1e-6 {
            return None;
        }
    }

    let rx = num("sodipodi:rx")?;
    let ry = num("sodipodi:ry")?;
    if !(rx > 0.0 && ry > 0.0) {
        return None;
    }

    Some(ShapeKind::Ellipse {
        cx: num("sodipodi:cx").unwrap_or(0.0),
        cy: num("sodipodi:cy").unwrap_or(0.0),
        rx,
        ry,
    })
}

fn convert_rect(elem: &Element, vp: &Viewport) -> Option<ShapeKind> {
    let width = length_or_zero(elem, "width", Axis::X, vp);
    let height = length_or_zero(elem, "height", Axis::Y, vp);
    if !(width > 0.0 && height > 0.0) {
        warn!("Rect '{}' has an invalid size. Skipped.", elem_id(elem));
        return None;
    }

    // A missing radius is equal to the other one.
    let (rx, ry) = match (length(elem, "rx", Axis::X, vp), length(elem, "ry", Axis::Y, vp)) {
        (None, None) => (0.0, 0.0),
        (Some(rx), None) => (rx, rx),
        (None, Some(ry)) => (ry, ry),
        (Some(rx), Some(ry)) => (rx, ry),
    };

    let rx = rx.max(0.0).min(width / 2.0);
    let ry = ry.max(0.0).min(height / 2.0);

    Some(ShapeKind::Rect {
        x: length_or_zero(elem, "x", Axis::X, vp),
        y: length_or_zero(elem, "y", Axis::Y, vp),
        width,
        height,
        rx,
        ry,
    })
}

fn first_coordinate(elem: &Element, name: &str, axis: Axis, vp: &Viewport) -> f64 {
    let text = match elem.attribute(name) {
        Some(v) => v,
        None => return 0.0,
    };

    let first = text.split(|c: char| c == ',' || c.is_ascii_whitespace())
        .find(|s| !s.is_empty())
        .unwrap_or("");
    let reference = match axis {
        Axis::X => vp.width,
        _ => vp.height,
    };

    Length::parse(first).to_px(reference)
}

fn convert_text(elem: &Element, vp: &Viewport) -> Option<ShapeKind> {
    let content = elem.text_content()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if content.is_empty() {
        warn!("Text '{}' is empty. Skipped.", elem_id(elem));
        return None;
    }

    let props = Properties::from_element(elem);
    let mut font = Font::default();

    if let Some(family) = props.get("font-family") {
        let family = family.split(',').next().unwrap_or("").trim();
        let family = family.trim_matches(|c| c == '\'' || c == '"');
        if !family.is_empty() {
            font.family = family.to_string();
        }
    }

    if let Some(size) = props.get("font-size") {
        let len = Length::parse(size);
        let size = match len.unit {
            LengthUnit::Percent => font.size * len.num / 100.0,
            _ => len.to_px(0.0),
        };

        if size > 0.0 {
            font.size = size;
        } else {
            warn!("Invalid 'font-size' value: '{}'. Skipped.", size);
        }
    }

    font.bold = match props.get("font-weight") {
        Some("bold") | Some("bolder") => true,
        Some(v) => v.parse::<u32>().map(|n| n >= 600).unwrap_or(false),
        None => false,
    };

    font.italic = match props.get("font-style") {
        Some("italic") | Some("oblique") => true,
        _ => false,
    };

    let anchor = match props.get("text-anchor") {
        Some("middle") => TextAnchor::Middle,
        Some("end") => TextAnchor::End,
        _ => TextAnchor::Start,
    };

    Some(ShapeKind::Text(Text {
        x: first_coordinate(elem, "x", Axis::X, vp),
        y: first_coordinate(elem, "y", Axis::Y, vp),
        content,
        font,
        anchor,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;
    use crate::XmlReader;

    const VP: Viewport = Viewport { width: 200.0, height: 100.0 };

    fn convert_str(text: &str) -> Option<ShapeKind> {
        let svg = format!("<svg xmlns='http://www.w3.org/2000/svg' \
                           xmlns:sodipodi='http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd'>{}</svg>",
                          text);
        let root = tree::read(&svg, XmlReader::Tree).unwrap();
        let elem = &root.children[0];
        let kind = ShapeElementKind::from_name(&elem.name).unwrap();
        convert(elem, kind, &VP)
    }

    macro_rules! test_convert {
        ($name:ident, $text:expr, $result:expr) => (
            #[test]
            fn $name() {
                assert_eq!(convert_str($text), $result);
            }
        )
    }

    test_convert!(rect_1, "<rect x='1' y='2' width='10' height='20'/>",
        Some(ShapeKind::Rect { x: 1.0, y: 2.0, width: 10.0, height: 20.0, rx: 0.0, ry: 0.0 }));

    test_convert!(rect_percent, "<rect width='50%' height='50%'/>",
        Some(ShapeKind::Rect { x: 0.0, y: 0.0, width: 100.0, height: 50.0, rx: 0.0, ry: 0.0 }));

    test_convert!(rect_radius, "<rect width='10' height='20' rx='8'/>",
        Some(ShapeKind::Rect { x: 0.0, y: 0.0, width: 10.0, height: 20.0, rx: 5.0, ry: 8.0 }));

    test_convert!(rect_zero_size, "<rect width='0' height='20'/>", None);

    test_convert!(circle_1, "<circle cx='5' cy='6' r='2'/>",
        Some(ShapeKind::Ellipse { cx: 5.0, cy: 6.0, rx: 2.0, ry: 2.0 }));

    test_convert!(circle_negative, "<circle r='-2'/>", None);

    test_convert!(ellipse_zero, "<ellipse rx='2'/>", None);

    test_convert!(line_1, "<line x1='1' y1='2' x2='3' y2='4'/>",
        Some(ShapeKind::Line { x1: 1.0, y1: 2.0, x2: 3.0, y2: 4.0 }));

    test_convert!(polyline_1, "<polyline points='1'/>", None);

    test_convert!(path_empty, "<path d='M 0 0 L abc'/>", None);

    test_convert!(path_sodipodi_arc,
        "<path sodipodi:type='arc' sodipodi:cx='10' sodipodi:cy='10' sodipodi:rx='5' sodipodi:ry='4' \
         d='M 15 10 A 5 4 0 1 1 15 10.1 Z'/>",
        Some(ShapeKind::Ellipse { cx: 10.0, cy: 10.0, rx: 5.0, ry: 4.0 }));

    test_convert!(text_empty, "<text x='1' y='2'>  </text>", None);

    #[test]
    fn text_1() {
        let kind = convert_str("<text x='1 5' y='2' font-family=\"'Times', serif\" \
                                font-weight='700' style='font-size:20px; text-anchor:end'>\
                                Hello <tspan>World</tspan></text>");
        match kind {
            Some(ShapeKind::Text(text)) => {
                assert_eq!(text.x, 1.0);
                assert_eq!(text.y, 2.0);
                assert_eq!(text.content, "Hello World");
                assert_eq!(text.font.family, "Times");
                assert_eq!(text.font.size, 20.0);
                assert!(text.font.bold);
                assert!(!text.font.italic);
                assert_eq!(text.anchor, TextAnchor::End);
            }
            _ => panic!("invalid shape"),
        }
    }
}
