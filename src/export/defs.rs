// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::collections::HashSet;
use std::rc::Rc;

use super::{fmt_num, shape_element};
use crate::paint::*;
use crate::tree::Element;
use crate::{ToStringWithOptions, WriteOptions};

// A written definition. Holds a reference, so definitions are compared by identity.
enum Written {
    LinearGradient(Rc<LinearGradient>),
    RadialGradient(Rc<RadialGradient>),
    Pattern(Rc<Pattern>),
    Filter(Rc<Filter>),
    Marker(Rc<Marker>),
}

impl Written {
    fn is_same(&self, other: &Written) -> bool {
        match (self, other) {
            (Written::LinearGradient(a), Written::LinearGradient(b)) => Rc::ptr_eq(a, b),
            (Written::RadialGradient(a), Written::RadialGradient(b)) => Rc::ptr_eq(a, b),
            (Written::Pattern(a), Written::Pattern(b)) => Rc::ptr_eq(a, b),
            (Written::Filter(a), Written::Filter(b)) => Rc::ptr_eq(a, b),
            (Written::Marker(a), Written::Marker(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Accumulates referenced definitions.
///
/// Each definition is written once, no matter how many shapes reference it.
pub(super) struct DefsWriter<'a> {
    opt: &'a WriteOptions,
    // Assigned ids of written definitions.
    written: Vec<(Written, String)>,
    used_ids: HashSet<String>,
    pub elements: Vec<Element>,
}

impl<'a> DefsWriter<'a> {
    pub fn new(opt: &'a WriteOptions) -> DefsWriter<'a> {
        DefsWriter {
            opt,
            written: Vec::new(),
            used_ids: HashSet::new(),
            elements: Vec::new(),
        }
    }

    pub fn opt(&self) -> &'a WriteOptions {
        self.opt
    }

    /// Returns an id for a definition and `true` if it was not registered yet.
    fn register(&mut self, def: Written, id: &str, prefix: &str) -> (String, bool) {
        if let Some((_, id)) = self.written.iter().find(|(d, _)| d.is_same(&def)) {
            return (id.clone(), false);
        }

        let mut new_id = id.to_string();
        if new_id.is_empty() || self.used_ids.contains(&new_id) {
            let mut n = 1;
            loop {
                new_id = format!("{}{}", prefix, n);
                if !self.used_ids.contains(&new_id) {
                    break;
                }
                n += 1;
            }
        }

        self.used_ids.insert(new_id.clone());
        self.written.push((def, new_id.clone()));
        (new_id, true)
    }

    /// Converts a paint into an attribute value.
    pub fn paint(&mut self, paint: &Paint) -> String {
        match *paint {
            Paint::None => "none".to_string(),
            Paint::CurrentColor => "currentColor".to_string(),
            Paint::Color(ref c) => c.to_string_with_opt(self.opt),
            Paint::LinearGradient(ref lg) => {
                let (id, is_new) = self.register(Written::LinearGradient(lg.clone()), &lg.id, "linearGradient");
                if is_new {
                    let elem = self.linear_gradient(lg, &id);
                    self.elements.push(elem);
                }
                func_iri(&id)
            }
            Paint::RadialGradient(ref rg) => {
                let (id, is_new) = self.register(Written::RadialGradient(rg.clone()), &rg.id, "radialGradient");
                if is_new {
                    let elem = self.radial_gradient(rg, &id);
                    self.elements.push(elem);
                }
                func_iri(&id)
            }
            Paint::Pattern(ref p) => {
                let (id, is_new) = self.register(Written::Pattern(p.clone()), &p.id, "pattern");
                if is_new {
                    // Registered before the content, so self-references terminate.
                    let elem = self.pattern(p, &id);
                    self.elements.push(elem);
                }
                func_iri(&id)
            }
        }
    }

    pub fn filter(&mut self, filter: &Rc<Filter>) -> String {
        let (id, is_new) = self.register(Written::Filter(filter.clone()), &filter.id, "filter");
        if is_new {
            let elem = self.filter_element(filter, &id);
            self.elements.push(elem);
        }
        func_iri(&id)
    }

    pub fn marker(&mut self, marker: &Rc<Marker>) -> String {
        let (id, is_new) = self.register(Written::Marker(marker.clone()), &marker.id, "marker");
        if is_new {
            let elem = self.marker_element(marker, &id);
            self.elements.push(elem);
        }
        func_iri(&id)
    }

    fn base_gradient(&self, elem: &mut Element, base: &BaseGradient) {
        elem.set_attribute("gradientUnits", base.units.as_str());

        if !base.transform.is_default() {
            elem.set_attribute("gradientTransform", base.transform.to_string_with_opt(self.opt));
        }

        if base.spread_method != SpreadMethod::Pad {
            elem.set_attribute("spreadMethod", base.spread_method.as_str());
        }

        for stop in &base.stops {
            let mut e = Element::new("stop");
            e.set_attribute("offset", fmt_num(stop.offset, self.opt));
            e.set_attribute("stop-color", stop.color.to_string_with_opt(self.opt));
            if stop.opacity != 1.0 {
                e.set_attribute("stop-opacity", fmt_num(stop.opacity, self.opt));
            }
            elem.append(e);
        }
    }

    fn linear_gradient(&self, lg: &LinearGradient, id: &str) -> Element {
        let mut elem = Element::new("linearGradient");
        elem.set_attribute("id", id);
        elem.set_attribute("x1", lg.x1.to_string_with_opt(self.opt));
        elem.set_attribute("y1", lg.y1.to_string_with_opt(self.opt));
        elem.set_attribute("x2", lg.x2.to_string_with_opt(self.opt));
        elem.set_attribute("y2", lg.y2.to_string_with_opt(self.opt));
        self.base_gradient(&mut elem, &lg.base);
        elem
    }

    fn radial_gradient(&self, rg: &RadialGradient, id: &str) -> Element {
        let mut elem = Element::new("radialGradient");
        elem.set_attribute("id", id);
        elem.set_attribute("cx", rg.cx.to_string_with_opt(self.opt));
        elem.set_attribute("cy", rg.cy.to_string_with_opt(self.opt));
        elem.set_attribute("r", rg.r.to_string_with_opt(self.opt));
        if rg.fx != rg.cx {
            elem.set_attribute("fx", rg.fx.to_string_with_opt(self.opt));
        }
        if rg.fy != rg.cy {
            elem.set_attribute("fy", rg.fy.to_string_with_opt(self.opt));
        }
        self.base_gradient(&mut elem, &rg.base);
        elem
    }

    fn filter_element(&self, filter: &Filter, id: &str) -> Element {
        let mut elem = Element::new("filter");
        elem.set_attribute("id", id);

        for primitive in &filter.primitives {
            let child = match *primitive {
                FilterPrimitive::GaussianBlur { std_dev_x, std_dev_y } => {
                    let mut e = Element::new("feGaussianBlur");
                    let value = if std_dev_x == std_dev_y {
                        fmt_num(std_dev_x, self.opt)
                    } else {
                        format!("{} {}", fmt_num(std_dev_x, self.opt), fmt_num(std_dev_y, self.opt))
                    };
                    e.set_attribute("stdDeviation", value);
                    e
                }
                FilterPrimitive::DropShadow { dx, dy, std_dev, color } => {
                    let mut e = Element::new("feDropShadow");
                    e.set_attribute("dx", fmt_num(dx, self.opt));
                    e.set_attribute("dy", fmt_num(dy, self.opt));
                    e.set_attribute("stdDeviation", fmt_num(std_dev, self.opt));

                    let mut opaque = color;
                    opaque.alpha = 255;
                    e.set_attribute("flood-color", opaque.to_string_with_opt(self.opt));
                    if !color.is_opaque() {
                        let opacity = f64::from(color.alpha) / 255.0;
                        e.set_attribute("flood-opacity", fmt_num(opacity, self.opt));
                    }
                    e
                }
            };

            elem.append(child);
        }

        elem
    }

    fn graphics(&mut self, elem: &mut Element, children: &[Graphic]) {
        for g in children {
            let child = shape_element(&g.kind, &g.style, &g.transform, self);
            elem.append(child);
        }
    }

    fn pattern(&mut self, p: &Pattern, id: &str) -> Element {
        let opt = self.opt;
        let mut elem = Element::new("pattern");
        elem.set_attribute("id", id);
        elem.set_attribute("x", fmt_num(p.rect.x, opt));
        elem.set_attribute("y", fmt_num(p.rect.y, opt));
        elem.set_attribute("width", fmt_num(p.rect.width, opt));
        elem.set_attribute("height", fmt_num(p.rect.height, opt));
        elem.set_attribute("patternUnits", p.units.as_str());
        elem.set_attribute("patternContentUnits", p.content_units.as_str());

        if !p.transform.is_default() {
            elem.set_attribute("patternTransform", p.transform.to_string_with_opt(opt));
        }

        if let Some(vb) = p.view_box {
            elem.set_attribute("viewBox", vb.to_string_with_opt(opt));
        }

        self.graphics(&mut elem, &p.children);
        elem
    }

    fn marker_element(&mut self, m: &Marker, id: &str) -> Element {
        let opt = self.opt;
        let mut elem = Element::new("marker");
        elem.set_attribute("id", id);
        elem.set_attribute("refX", fmt_num(m.ref_x, opt));
        elem.set_attribute("refY", fmt_num(m.ref_y, opt));
        elem.set_attribute("markerWidth", fmt_num(m.width, opt));
        elem.set_attribute("markerHeight", fmt_num(m.height, opt));

        let orient = match m.orient {
            MarkerOrient::Auto => "auto".to_string(),
            MarkerOrient::AutoStartReverse => "auto-start-reverse".to_string(),
            MarkerOrient::Angle(a) => fmt_num(a, opt),
        };
        elem.set_attribute("orient", orient);

        if let Some(vb) = m.view_box {
            elem.set_attribute("viewBox", vb.to_string_with_opt(opt));
        }

        self.graphics(&mut elem, &m.children);
        elem
    }
}

fn func_iri(id: &str) -> String {
    format!("url(#{})", id)
}
