// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use log::{debug, warn};
use svgtypes::PaintFallback;

use super::defs::Definitions;
use crate::paint::Paint;
use crate::shape::Style;
use crate::tree::Element;
use crate::types::style::{parse_declarations, parse_func_iri, parse_number_list};
use crate::types::{Color, Length, LengthUnit};

/// Element properties: presentation attributes overridden by the inline `style`.
pub(crate) struct Properties<'a> {
    list: Vec<(&'a str, &'a str)>,
}

impl<'a> Properties<'a> {
    pub fn from_element(elem: &'a Element) -> Properties<'a> {
        let mut list: Vec<(&str, &str)> = elem.attributes()
            .filter(|&(name, _)| name != "style")
            .collect();

        if let Some(style) = elem.attribute("style") {
            for (name, value) in parse_declarations(style) {
                match list.iter_mut().find(|(n, _)| *n == name) {
                    Some(prop) => prop.1 = value,
                    None => list.push((name, value)),
                }
            }
        }

        Properties { list }
    }

    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.list.iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .filter(|v| *v != "inherit")
    }

    /// Returns `false` for `visibility:hidden|collapse` and `display:none`.
    pub fn is_visible(&self) -> bool {
        match self.get("visibility") {
            Some("hidden") | Some("collapse") => return false,
            _ => {}
        }

        self.get("display") != Some("none")
    }
}

/// Resolves element's style.
///
/// `diagonal` is a reference for percent stroke widths.
pub(crate) fn resolve_style(elem: &Element, defs: &Definitions, diagonal: f64) -> Style {
    let props = Properties::from_element(elem);
    let mut style = Style::default();

    style.fill = props.get("fill").and_then(|v| parse_paint("fill", v, defs));
    style.stroke = props.get("stroke").and_then(|v| parse_paint("stroke", v, defs));
    style.fill_opacity = props.get("fill-opacity").and_then(|v| parse_opacity("fill-opacity", v));
    style.stroke_opacity = props.get("stroke-opacity")
        .and_then(|v| parse_opacity("stroke-opacity", v));
    style.opacity = props.get("opacity").and_then(|v| parse_opacity("opacity", v));

    if let Some(value) = props.get("stroke-width") {
        let width = Length::parse(value).to_px(diagonal);
        if width >= 0.0 {
            style.stroke_width = Some(width);
        } else {
            warn!("Invalid 'stroke-width' value: '{}'. Skipped.", value);
        }
    }

    style.stroke_dasharray = props.get("stroke-dasharray").and_then(parse_dasharray);

    if let Some(value) = props.get("filter") {
        if let Some((id, _)) = parse_func_iri(value) {
            style.filter = defs.filters.get(id).cloned();
            if style.filter.is_none() {
                debug!("Filter '{}' is not found.", id);
            }
        }
    }

    macro_rules! resolve_marker {
        ($prop:ident, $name:expr) => (
            if let Some(value) = props.get($name) {
                if let Some((id, _)) = parse_func_iri(value) {
                    style.$prop = defs.markers.get(id).cloned();
                    if style.$prop.is_none() {
                        debug!("Marker '{}' is not found.", id);
                    }
                }
            }
        )
    }

    resolve_marker!(marker_start, "marker-start");
    resolve_marker!(marker_mid, "marker-mid");
    resolve_marker!(marker_end, "marker-end");

    style
}

/// Parses a paint.
///
/// Returns `None` when the paint is invalid or references an unknown
/// paint server without a fallback.
pub(crate) fn parse_paint(prop: &str, value: &str, defs: &Definitions) -> Option<Paint> {
    let value = value.trim();
    match svgtypes::Paint::from_str(value) {
        Ok(svgtypes::Paint::None) => Some(Paint::None),
        Ok(svgtypes::Paint::CurrentColor) => Some(Paint::CurrentColor),
        Ok(svgtypes::Paint::FuncIRI(id, fallback)) => {
            if let Some(paint) = defs.paint(id) {
                return Some(paint);
            }

            match fallback {
                Some(PaintFallback::None) => Some(Paint::None),
                Some(PaintFallback::CurrentColor) => Some(Paint::CurrentColor),
                Some(PaintFallback::Color(c)) => {
                    Some(Paint::Color(Color::new_rgba(c.red, c.green, c.blue, c.alpha)))
                }
                None => {
                    debug!("Paint server '{}' is not found.", id);
                    None
                }
            }
        }
        _ => match Color::parse(value) {
            Some(c) => Some(Paint::Color(c)),
            None => {
                warn!("Invalid '{}' value: '{}'. Skipped.", prop, value);
                None
            }
        },
    }
}

/// Parses an opacity: a number or a percentage, clamped to the 0..1 range.
pub(crate) fn parse_opacity(prop: &str, value: &str) -> Option<f64> {
    let len = Length::parse(value);
    let n = match len.unit {
        LengthUnit::None => len.num,
        LengthUnit::Percent => len.num / 100.0,
        _ => {
            warn!("Invalid '{}' value: '{}'. Skipped.", prop, value);
            return None;
        }
    };

    Some(n.max(0.0).min(1.0))
}

fn parse_dasharray(value: &str) -> Option<Vec<f64>> {
    if value.trim() == "none" {
        return None;
    }

    let mut list = parse_number_list(value);
    if list.iter().any(|n| *n < 0.0) {
        warn!("Invalid 'stroke-dasharray' value: '{}'. Skipped.", value);
        return None;
    }

    if list.iter().all(|n| *n == 0.0) {
        return None;
    }

    // An odd list is repeated to yield an even one.
    if list.len() % 2 != 0 {
        let copy = list.clone();
        list.extend_from_slice(&copy);
    }

    Some(list)
}
