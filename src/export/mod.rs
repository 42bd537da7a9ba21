// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SVG export.

use self::defs::DefsWriter;
use crate::scene::{Scene, ShapeId};
use crate::shape::{ShapeKind, Style, TextAnchor};
use crate::tree::{Element, INKSCAPE_NS, SODIPODI_NS, SVG_NS, XLINK_NS};
use crate::types::{write_num, FuzzyEq, Transform};
use crate::{ToStringWithOptions, WriteBuffer, WriteOptions};

mod defs;

const DEFAULT_WIDTH: f64 = 800.0;
const DEFAULT_HEIGHT: f64 = 600.0;

fn fmt_num(num: f64, opt: &WriteOptions) -> String {
    let mut buf = Vec::with_capacity(16);
    write_num(num, opt.precision_coordinates, opt.remove_leading_zero, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Converts a scene into an element tree.
pub fn export(scene: &Scene, opt: &WriteOptions) -> Element {
    let (width, height) = document_size(scene, opt);

    let mut svg = Element::new("svg");
    svg.set_attribute("xmlns", SVG_NS);
    svg.set_attribute("xmlns:xlink", XLINK_NS);
    svg.set_attribute("xmlns:inkscape", INKSCAPE_NS);
    svg.set_attribute("xmlns:sodipodi", SODIPODI_NS);
    svg.set_attribute("version", "1.1");
    svg.set_attribute("width", fmt_num(width, opt));
    svg.set_attribute("height", fmt_num(height, opt));
    svg.set_attribute("viewBox", format!("0 0 {} {}", fmt_num(width, opt), fmt_num(height, opt)));

    let mut defs = DefsWriter::new(opt);
    let mut content = Vec::with_capacity(scene.roots().len());
    for id in scene.roots() {
        content.push(scene_element(scene, *id, &mut defs));
    }

    if !defs.elements.is_empty() {
        let mut defs_elem = Element::new("defs");
        defs_elem.children = defs.elements;
        svg.append(defs_elem);
    }

    svg.children.extend(content);
    svg
}

fn document_size(scene: &Scene, opt: &WriteOptions) -> (f64, f64) {
    if let Some(canvas) = scene.canvas() {
        if canvas.width > 0.0 && canvas.height > 0.0 {
            return (canvas.width, canvas.height);
        }
    }

    match scene.content_bounds() {
        Some(r) if r.right() > 0.0 && r.bottom() > 0.0 => {
            (r.right() + opt.content_margin, r.bottom() + opt.content_margin)
        }
        _ => (DEFAULT_WIDTH, DEFAULT_HEIGHT),
    }
}

fn scene_element(scene: &Scene, id: ShapeId, defs: &mut DefsWriter) -> Element {
    let shape = scene.shape(id);
    let mut elem = shape_element(&shape.kind, &shape.style, &shape.transform, defs);
    for child in scene.children(id) {
        elem.append(scene_element(scene, *child, defs));
    }

    elem
}

/// Converts a single shape, without children.
fn shape_element(kind: &ShapeKind, style: &Style, ts: &Transform, defs: &mut DefsWriter) -> Element {
    let opt = defs.opt();
    let num = |n: f64| fmt_num(n, opt);

    let mut elem = match *kind {
        ShapeKind::Path(ref path) => {
            let mut e = Element::new("path");
            e.set_attribute("d", path.to_string_with_opt(opt));
            e
        }
        ShapeKind::Rect { x, y, width, height, rx, ry } => {
            let mut e = Element::new("rect");
            e.set_attribute("x", num(x));
            e.set_attribute("y", num(y));
            e.set_attribute("width", num(width));
            e.set_attribute("height", num(height));
            // A missing radius is equal to the other one on import.
            if rx > 0.0 || ry > 0.0 {
                e.set_attribute("rx", num(rx));
                e.set_attribute("ry", num(ry));
            }
            e
        }
        ShapeKind::Ellipse { cx, cy, rx, ry } => {
            if rx.fuzzy_eq(&ry) {
                let mut e = Element::new("circle");
                e.set_attribute("cx", num(cx));
                e.set_attribute("cy", num(cy));
                e.set_attribute("r", num(rx));
                e
            } else {
                let mut e = Element::new("ellipse");
                e.set_attribute("cx", num(cx));
                e.set_attribute("cy", num(cy));
                e.set_attribute("rx", num(rx));
                e.set_attribute("ry", num(ry));
                e
            }
        }
        ShapeKind::Line { x1, y1, x2, y2 } => {
            let mut e = Element::new("line");
            e.set_attribute("x1", num(x1));
            e.set_attribute("y1", num(y1));
            e.set_attribute("x2", num(x2));
            e.set_attribute("y2", num(y2));
            e
        }
        ShapeKind::Polyline(ref points) => {
            let mut e = Element::new("polyline");
            e.set_attribute("points", points.to_string_with_opt(opt));
            e
        }
        ShapeKind::Polygon(ref points) => {
            let mut e = Element::new("polygon");
            e.set_attribute("points", points.to_string_with_opt(opt));
            e
        }
        ShapeKind::Text(ref text) => {
            let mut e = Element::new("text");
            e.set_attribute("x", num(text.x));
            e.set_attribute("y", num(text.y));
            e.set_attribute("font-family", text.font.family.as_str());
            e.set_attribute("font-size", num(text.font.size));
            if text.font.bold {
                e.set_attribute("font-weight", "bold");
            }
            if text.font.italic {
                e.set_attribute("font-style", "italic");
            }
            match text.anchor {
                TextAnchor::Start => {}
                TextAnchor::Middle => e.set_attribute("text-anchor", "middle"),
                TextAnchor::End => e.set_attribute("text-anchor", "end"),
            }
            e.text = text.content.clone();
            e
        }
        ShapeKind::Group => Element::new("g"),
        ShapeKind::Layer(ref layer) => {
            let mut e = Element::new("g");
            e.set_attribute("inkscape:groupmode", "layer");
            e.set_attribute("inkscape:label", layer.name.as_str());
            if !layer.visible {
                e.set_attribute("style", "display:none");
            }
            if layer.locked {
                e.set_attribute("sodipodi:insensitive", "true");
            }
            e
        }
    };

    write_style(&mut elem, style, defs);

    if !ts.is_default() {
        elem.set_attribute("transform", ts.to_string_with_opt(opt));
    }

    elem
}

fn write_style(elem: &mut Element, style: &Style, defs: &mut DefsWriter) {
    let opt = defs.opt();

    if let Some(ref fill) = style.fill {
        let value = defs.paint(fill);
        elem.set_attribute("fill", value);
    }

    if let Some(n) = style.fill_opacity {
        elem.set_attribute("fill-opacity", fmt_num(n, opt));
    }

    if let Some(ref stroke) = style.stroke {
        let value = defs.paint(stroke);
        elem.set_attribute("stroke", value);
    }

    if let Some(n) = style.stroke_opacity {
        elem.set_attribute("stroke-opacity", fmt_num(n, opt));
    }

    if let Some(n) = style.stroke_width {
        elem.set_attribute("stroke-width", fmt_num(n, opt));
    }

    if let Some(ref list) = style.stroke_dasharray {
        let value: Vec<String> = list.iter().map(|n| fmt_num(*n, opt)).collect();
        elem.set_attribute("stroke-dasharray", value.join(","));
    }

    if let Some(n) = style.opacity {
        elem.set_attribute("opacity", fmt_num(n, opt));
    }

    if let Some(ref filter) = style.filter {
        let value = defs.filter(filter);
        elem.set_attribute("filter", value);
    }

    let markers = [
        ("marker-start", &style.marker_start),
        ("marker-mid", &style.marker_mid),
        ("marker-end", &style.marker_end),
    ];

    for &(name, marker) in markers.iter() {
        if let Some(ref marker) = *marker {
            let value = defs.marker(marker);
            elem.set_attribute(name, value);
        }
    }
}

impl WriteBuffer for Scene {
    fn write_buf_opt(&self, opt: &WriteOptions, buf: &mut Vec<u8>) {
        export(self, opt).write_buf_opt(opt, buf);
    }
}

impl_display!(Scene);
