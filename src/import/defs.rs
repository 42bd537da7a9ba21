// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashMap;
use std::ptr;
use std::rc::Rc;

use log::{debug, warn};

use super::shapes::{self, Viewport};
use super::style::{parse_opacity, resolve_style, Properties};
use crate::collector::{CollectedElements, ShapeElementKind};
use crate::paint::*;
use crate::tree::Element;
use crate::types::style::{parse_iri, parse_number_list};
use crate::types::{Color, Length, LengthUnit, Rect, Transform, ViewBox};

// Limits `href` chains, which can be cyclic.
const MAX_HREF_DEPTH: usize = 16;

/// Definitions referenced by shapes, built once per import.
#[derive(Default)]
pub(crate) struct Definitions {
    pub linear_gradients: HashMap<String, Rc<LinearGradient>>,
    pub radial_gradients: HashMap<String, Rc<RadialGradient>>,
    pub filters: HashMap<String, Rc<Filter>>,
    pub patterns: HashMap<String, Rc<Pattern>>,
    pub markers: HashMap<String, Rc<Marker>>,
}

impl Definitions {
    pub fn build(c: &CollectedElements, vp: &Viewport) -> Definitions {
        let mut defs = Definitions::default();

        for &elem in &c.linear_gradients {
            if owns_id(elem, c) {
                if let Some(lg) = convert_linear(elem, c) {
                    defs.linear_gradients.insert(lg.id.clone(), Rc::new(lg));
                }
            }
        }

        for &elem in &c.radial_gradients {
            if owns_id(elem, c) {
                if let Some(rg) = convert_radial(elem, c) {
                    defs.radial_gradients.insert(rg.id.clone(), Rc::new(rg));
                }
            }
        }

        convert_filters(c, &mut defs);

        // Patterns and markers are resolved in document order,
        // so only already converted ones can be referenced by their content.
        for &elem in &c.patterns {
            if owns_id(elem, c) {
                if let Some(pattern) = convert_pattern(elem, &defs, vp) {
                    defs.patterns.insert(pattern.id.clone(), Rc::new(pattern));
                }
            }
        }

        for &elem in &c.markers {
            if owns_id(elem, c) {
                if let Some(marker) = convert_marker(elem, &defs, vp) {
                    defs.markers.insert(marker.id.clone(), Rc::new(marker));
                }
            }
        }

        defs
    }

    /// Returns a paint server by id.
    pub fn paint(&self, id: &str) -> Option<Paint> {
        if let Some(lg) = self.linear_gradients.get(id) {
            return Some(Paint::LinearGradient(lg.clone()));
        }

        if let Some(rg) = self.radial_gradients.get(id) {
            return Some(Paint::RadialGradient(rg.clone()));
        }

        self.patterns.get(id).map(|p| Paint::Pattern(p.clone()))
    }
}

/// Checks that the element is the first one in the document with its id.
///
/// Elements without an id pass, so they can be reported by the converters.
fn owns_id(elem: &Element, c: &CollectedElements) -> bool {
    let id = match elem.id() {
        Some(id) => id,
        None => return true,
    };

    match c.element_by_id(id) {
        Some(first) if ptr::eq(first, elem) => true,
        _ => {
            warn!("Duplicated id '{}' on '{}'. Skipped.", id, elem.name);
            false
        }
    }
}

fn href<'a>(elem: &Element, c: &CollectedElements<'a>) -> Option<&'a Element> {
    let link = elem.attribute("xlink:href").or_else(|| elem.attribute("href"))?;
    let id = parse_iri(link)?;
    let linked = c.element_by_id(id);
    if linked.is_none() {
        debug!("Referenced element '{}' is not found.", id);
    }

    linked
}

fn is_gradient(elem: &Element) -> bool {
    elem.has_name("linearGradient") || elem.has_name("radialGradient")
}

/// Resolves an attribute through the gradient `href` chain.
fn gradient_attribute<'a>(elem: &'a Element, name: &str, c: &CollectedElements<'a>) -> Option<&'a str> {
    let mut curr = elem;
    for _ in 0..MAX_HREF_DEPTH {
        if let Some(value) = curr.attribute(name) {
            return Some(value);
        }

        match href(curr, c) {
            Some(linked) if is_gradient(linked) => curr = linked,
            _ => return None,
        }
    }

    None
}

fn gradient_length(elem: &Element, name: &str, def: Length, c: &CollectedElements) -> Length {
    match gradient_attribute(elem, name, c) {
        Some(value) => Length::parse(value),
        None => def,
    }
}

/// Finds the first gradient in the `href` chain that has stops.
fn stops_element<'a>(elem: &'a Element, c: &CollectedElements<'a>) -> Option<&'a Element> {
    let mut curr = elem;
    for _ in 0..MAX_HREF_DEPTH {
        if curr.children.iter().any(|child| child.has_name("stop")) {
            return Some(curr);
        }

        match href(curr, c) {
            Some(linked) if is_gradient(linked) => curr = linked,
            _ => return None,
        }
    }

    None
}

fn convert_stops(elem: &Element) -> Vec<Stop> {
    let mut stops: Vec<Stop> = Vec::new();
    let mut prev_offset = 0.0;

    for child in elem.children.iter().filter(|e| e.has_name("stop")) {
        let offset = match child.attribute("offset") {
            Some(value) => {
                let len = Length::parse(value);
                match len.unit {
                    LengthUnit::Percent => len.num / 100.0,
                    _ => len.num,
                }
            }
            None => 0.0,
        };

        // Offsets are clamped and must not decrease.
        let offset = offset.max(0.0).min(1.0).max(prev_offset);
        prev_offset = offset;

        let props = Properties::from_element(child);
        let color = match props.get("stop-color") {
            Some(value) => Color::parse(value).unwrap_or_else(|| {
                if value != "currentColor" {
                    warn!("Invalid 'stop-color' value: '{}'. Fallback to black.", value);
                }
                Color::black()
            }),
            None => Color::black(),
        };

        let opacity = props.get("stop-opacity")
            .and_then(|v| parse_opacity("stop-opacity", v))
            .unwrap_or(1.0);

        stops.push(Stop { offset, color, opacity });
    }

    stops
}

fn convert_base(elem: &Element, c: &CollectedElements) -> BaseGradient {
    let units = gradient_attribute(elem, "gradientUnits", c)
        .and_then(Units::parse)
        .unwrap_or(Units::ObjectBoundingBox);

    let transform = gradient_attribute(elem, "gradientTransform", c)
        .map(Transform::parse)
        .unwrap_or_default();

    let spread_method = gradient_attribute(elem, "spreadMethod", c)
        .and_then(SpreadMethod::parse)
        .unwrap_or(SpreadMethod::Pad);

    let stops = stops_element(elem, c).map(convert_stops).unwrap_or_default();

    BaseGradient {
        units,
        transform,
        spread_method,
        stops,
    }
}

fn convert_linear(elem: &Element, c: &CollectedElements) -> Option<LinearGradient> {
    let id = match elem.id() {
        Some(id) => id,
        None => {
            debug!("A linearGradient without an id. Skipped.");
            return None;
        }
    };

    let zero = Length::new(0.0, LengthUnit::Percent);
    let full = Length::new(100.0, LengthUnit::Percent);

    Some(LinearGradient {
        id: id.to_string(),
        x1: gradient_length(elem, "x1", zero, c),
        y1: gradient_length(elem, "y1", zero, c),
        x2: gradient_length(elem, "x2", full, c),
        y2: gradient_length(elem, "y2", zero, c),
        base: convert_base(elem, c),
    })
}

fn convert_radial(elem: &Element, c: &CollectedElements) -> Option<RadialGradient> {
    let id = match elem.id() {
        Some(id) => id,
        None => {
            debug!("A radialGradient without an id. Skipped.");
            return None;
        }
    };

    let half = Length::new(50.0, LengthUnit::Percent);
    let cx = gradient_length(elem, "cx", half, c);
    let cy = gradient_length(elem, "cy", half, c);
    let r = gradient_length(elem, "r", half, c);
    if !(r.num > 0.0) {
        warn!("Radial gradient '{}' has an invalid radius. Skipped.", id);
        return None;
    }

    Some(RadialGradient {
        id: id.to_string(),
        cx,
        cy,
        r,
        fx: gradient_length(elem, "fx", cx, c),
        fy: gradient_length(elem, "fy", cy, c),
        base: convert_base(elem, c),
    })
}

fn number_attribute(elem: &Element, name: &str, def: f64) -> f64 {
    elem.attribute(name).map(|v| Length::parse(v).num).unwrap_or(def)
}

fn convert_filters(c: &CollectedElements, defs: &mut Definitions) {
    for item in &c.filter_primitives {
        if !c.element_by_id(item.filter_id).map_or(false, |first| ptr::eq(first, item.filter)) {
            debug!("A primitive of a duplicated filter '{}'. Skipped.", item.filter_id);
            continue;
        }

        let elem = item.element;
        let primitive = match elem.name.as_str() {
            "feGaussianBlur" => {
                let list = elem.attribute("stdDeviation")
                    .map(parse_number_list)
                    .unwrap_or_default();

                let (std_dev_x, std_dev_y) = match list.as_slice() {
                    [] => (1.0, 1.0),
                    [n] => (*n, *n),
                    [x, y] => (*x, *y),
                    _ => {
                        warn!("Invalid 'stdDeviation' value in filter '{}'. Skipped.",
                              item.filter_id);
                        continue;
                    }
                };

                if std_dev_x < 0.0 || std_dev_y < 0.0 {
                    warn!("A negative 'stdDeviation' in filter '{}'. Skipped.", item.filter_id);
                    continue;
                }

                FilterPrimitive::GaussianBlur { std_dev_x, std_dev_y }
            }
            "feDropShadow" => {
                let props = Properties::from_element(elem);
                let mut color = match props.get("flood-color") {
                    Some(value) => Color::parse(value).unwrap_or_else(Color::black),
                    None => Color::new_rgba(63, 63, 63, 180),
                };

                if let Some(opacity) = props.get("flood-opacity")
                    .and_then(|v| parse_opacity("flood-opacity", v))
                {
                    color.alpha = (f64::from(color.alpha) * opacity).round() as u8;
                }

                FilterPrimitive::DropShadow {
                    dx: number_attribute(elem, "dx", 2.0),
                    dy: number_attribute(elem, "dy", 2.0),
                    std_dev: number_attribute(elem, "stdDeviation", 3.0).max(0.0),
                    color,
                }
            }
            name => {
                debug!("Filter primitive '{}' is not supported.", name);
                continue;
            }
        };

        let filter = defs.filters.entry(item.filter_id.to_string())
            .or_insert_with(|| Rc::new(Filter {
                id: item.filter_id.to_string(),
                primitives: Vec::new(),
            }));

        // Filters are not shared until all primitives are collected.
        if let Some(filter) = Rc::get_mut(filter) {
            filter.primitives.push(primitive);
        }
    }
}

/// Converts shape children of a pattern or a marker.
fn convert_graphics(
    parent: &Element,
    ts: Transform,
    defs: &Definitions,
    vp: &Viewport,
    graphics: &mut Vec<Graphic>,
) {
    for child in &parent.children {
        let mut child_ts = ts;
        if let Some(value) = child.attribute("transform") {
            child_ts.append(&Transform::parse(value));
        }

        if child.has_name("g") {
            convert_graphics(child, child_ts, defs, vp, graphics);
            continue;
        }

        let kind = match ShapeElementKind::from_name(&child.name) {
            Some(ShapeElementKind::Use) | None => {
                debug!("'{}' is not supported inside '{}'.", child.name, parent.name);
                continue;
            }
            Some(kind) => kind,
        };

        if let Some(kind) = shapes::convert(child, kind, vp) {
            graphics.push(Graphic {
                kind,
                style: resolve_style(child, defs, vp.diagonal()),
                transform: child_ts,
            });
        }
    }
}

fn convert_pattern(elem: &Element, defs: &Definitions, vp: &Viewport) -> Option<Pattern> {
    let id = elem.id()?;

    let rect = Rect::new(
        number_attribute(elem, "x", 0.0),
        number_attribute(elem, "y", 0.0),
        number_attribute(elem, "width", 10.0),
        number_attribute(elem, "height", 10.0),
    );

    if !(rect.width > 0.0 && rect.height > 0.0) {
        warn!("Pattern '{}' has an invalid size. Skipped.", id);
        return None;
    }

    let mut children = Vec::new();
    convert_graphics(elem, Transform::default(), defs, vp, &mut children);

    Some(Pattern {
        id: id.to_string(),
        rect,
        units: elem.attribute("patternUnits")
            .and_then(Units::parse)
            .unwrap_or(Units::ObjectBoundingBox),
        content_units: elem.attribute("patternContentUnits")
            .and_then(Units::parse)
            .unwrap_or(Units::UserSpaceOnUse),
        transform: elem.attribute("patternTransform")
            .map(Transform::parse)
            .unwrap_or_default(),
        view_box: elem.attribute("viewBox").and_then(ViewBox::parse),
        children,
    })
}

fn convert_marker(elem: &Element, defs: &Definitions, vp: &Viewport) -> Option<Marker> {
    let id = elem.id()?;

    let orient = match elem.attribute("orient").map(str::trim) {
        Some("auto") => MarkerOrient::Auto,
        Some("auto-start-reverse") => MarkerOrient::AutoStartReverse,
        Some(value) => MarkerOrient::Angle(Length::parse(value).num),
        None => MarkerOrient::Angle(0.0),
    };

    let mut children = Vec::new();
    convert_graphics(elem, Transform::default(), defs, vp, &mut children);

    // Marker content is black and not stroked by default.
    for graphic in &mut children {
        if graphic.style.fill.is_none() {
            graphic.style.fill = Some(Paint::Color(Color::black()));
        }

        if graphic.style.stroke.is_none() {
            graphic.style.stroke = Some(Paint::None);
        }

        if graphic.style.stroke_width.is_none() {
            graphic.style.stroke_width = Some(1.0);
        }
    }

    Some(Marker {
        id: id.to_string(),
        ref_x: number_attribute(elem, "refX", 0.0),
        ref_y: number_attribute(elem, "refY", 0.0),
        width: number_attribute(elem, "markerWidth", 3.0),
        height: number_attribute(elem, "markerHeight", 3.0),
        orient,
        view_box: elem.attribute("viewBox").and_then(ViewBox::parse),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector;
    use crate::tree;
    use crate::XmlReader;

    const VP: Viewport = Viewport { width: 100.0, height: 100.0 };

    fn build(text: &str) -> Definitions {
        let root = tree::read(text, XmlReader::Tree).unwrap();
        let c = collector::collect(&root);
        Definitions::build(&c, &VP)
    }

    #[test]
    fn linear_gradient_defaults() {
        let defs = build("
<svg xmlns='http://www.w3.org/2000/svg'>
    <linearGradient id='lg1'>
        <stop offset='0' stop-color='red'/>
        <stop offset='50%' style='stop-color:#00f; stop-opacity:0.5'/>
    </linearGradient>
</svg>");

        let lg = &defs.linear_gradients["lg1"];
        assert_eq!(lg.x1, Length::new(0.0, LengthUnit::Percent));
        assert_eq!(lg.x2, Length::new(100.0, LengthUnit::Percent));
        assert_eq!(lg.base.units, Units::ObjectBoundingBox);
        assert_eq!(lg.base.spread_method, SpreadMethod::Pad);
        assert_eq!(lg.base.stops, vec![
            Stop { offset: 0.0, color: Color::new_rgb(255, 0, 0), opacity: 1.0 },
            Stop { offset: 0.5, color: Color::new_rgb(0, 0, 255), opacity: 0.5 },
        ]);
    }

    #[test]
    fn gradient_href_inheritance() {
        let defs = build("
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
    <linearGradient id='base' gradientUnits='userSpaceOnUse'>
        <stop offset='1' stop-color='green'/>
    </linearGradient>
    <radialGradient id='rg1' xlink:href='#base' r='10'/>
</svg>");

        let rg = &defs.radial_gradients["rg1"];
        assert_eq!(rg.base.units, Units::UserSpaceOnUse);
        assert_eq!(rg.base.stops.len(), 1);
        assert_eq!(rg.r, Length::new_number(10.0));
        assert_eq!(rg.fx, rg.cx);
    }

    #[test]
    fn cyclic_href() {
        let defs = build("
<svg xmlns='http://www.w3.org/2000/svg'>
    <linearGradient id='lg1' href='#lg2'/>
    <linearGradient id='lg2' href='#lg1'/>
</svg>");

        assert!(defs.linear_gradients["lg1"].base.stops.is_empty());
    }

    #[test]
    fn stop_offsets_are_monotonic() {
        let defs = build("
<svg xmlns='http://www.w3.org/2000/svg'>
    <linearGradient id='lg1'>
        <stop offset='0.8'/>
        <stop offset='0.2'/>
        <stop offset='2'/>
    </linearGradient>
</svg>");

        let offsets: Vec<f64> = defs.linear_gradients["lg1"].base.stops.iter()
            .map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.8, 0.8, 1.0]);
    }

    #[test]
    fn duplicated_ids() {
        let defs = build("
<svg xmlns='http://www.w3.org/2000/svg'>
    <radialGradient id='g'><stop stop-color='red'/></radialGradient>
    <linearGradient id='g'><stop stop-color='blue'/></linearGradient>
    <filter id='f'><feGaussianBlur stdDeviation='1'/></filter>
    <filter id='f'><feGaussianBlur stdDeviation='5'/></filter>
</svg>");

        assert!(defs.linear_gradients.is_empty());
        match defs.paint("g") {
            Some(Paint::RadialGradient(rg)) => {
                assert_eq!(rg.base.stops[0].color, Color::new_rgb(255, 0, 0));
            }
            paint => panic!("unexpected paint: {:?}", paint),
        }

        assert_eq!(defs.filters["f"].primitives,
                   vec![FilterPrimitive::GaussianBlur { std_dev_x: 1.0, std_dev_y: 1.0 }]);
    }

    #[test]
    fn filters() {
        let defs = build("
<svg xmlns='http://www.w3.org/2000/svg'>
    <filter id='f1'>
        <feGaussianBlur stdDeviation='2 3'/>
        <feOffset dx='1'/>
        <feDropShadow dx='4'/>
    </filter>
</svg>");

        assert_eq!(defs.filters["f1"].primitives, vec![
            FilterPrimitive::GaussianBlur { std_dev_x: 2.0, std_dev_y: 3.0 },
            FilterPrimitive::DropShadow {
                dx: 4.0,
                dy: 2.0,
                std_dev: 3.0,
                color: Color::new_rgba(63, 63, 63, 180),
            },
        ]);
    }

    #[test]
    fn pattern_and_marker() {
        let defs = build("
<svg xmlns='http://www.w3.org/2000/svg'>
    <pattern id='p1' width='20' height='20' patternUnits='userSpaceOnUse'>
        <rect width='10' height='10' fill='red'/>
    </pattern>
    <marker id='m1' orient='auto' refX='1'>
        <path d='M 0 0 L 3 1.5 L 0 3 Z'/>
    </marker>
</svg>");

        let p = &defs.patterns["p1"];
        assert_eq!(p.rect, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(p.units, Units::UserSpaceOnUse);
        assert_eq!(p.children.len(), 1);
        assert!(defs.paint("p1").is_some());

        let m = &defs.markers["m1"];
        assert_eq!(m.orient, MarkerOrient::Auto);
        assert_eq!(m.ref_x, 1.0);
        assert_eq!(m.width, 3.0);
        assert_eq!(m.children[0].style.fill, Some(Paint::Color(Color::black())));
        assert_eq!(m.children[0].style.stroke, Some(Paint::None));
    }
}
