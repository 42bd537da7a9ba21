// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sorts document elements into categories in a single pass.

use std::collections::HashMap;

use log::debug;

use crate::tree::Element;

/// A kind of a shape element.
#[derive(Clone, Copy, PartialEq, Debug)]
#[allow(missing_docs)]
pub enum ShapeElementKind {
    Path,
    Rect,
    Circle,
    Ellipse,
    Line,
    Polyline,
    Polygon,
    Text,
    Use,
}

impl ShapeElementKind {
    /// Returns a kind by an element name.
    pub fn from_name(name: &str) -> Option<ShapeElementKind> {
        let kind = match name {
            "path" => ShapeElementKind::Path,
            "rect" => ShapeElementKind::Rect,
            "circle" => ShapeElementKind::Circle,
            "ellipse" => ShapeElementKind::Ellipse,
            "line" => ShapeElementKind::Line,
            "polyline" => ShapeElementKind::Polyline,
            "polygon" => ShapeElementKind::Polygon,
            "text" => ShapeElementKind::Text,
            "use" => ShapeElementKind::Use,
            _ => return None,
        };

        Some(kind)
    }
}

/// A filter primitive element stamped with its filter id.
#[derive(Clone, Copy, Debug)]
pub struct CollectedPrimitive<'a> {
    /// The owning filter id.
    pub filter_id: &'a str,
    /// The owning filter element.
    pub filter: &'a Element,
    /// A primitive element.
    pub element: &'a Element,
}

/// A top-level shape element.
#[derive(Clone, Copy, Debug)]
pub struct CollectedShape<'a> {
    /// A shape kind.
    pub kind: ShapeElementKind,
    /// A shape element.
    pub element: &'a Element,
    /// A pre-order traversal index.
    pub index: usize,
    /// An index of the owning layer in `CollectedElements::layers`.
    pub layer: Option<usize>,
}

/// A group element.
#[derive(Clone, Copy, Debug)]
pub struct CollectedGroup<'a> {
    /// A group element.
    pub element: &'a Element,
    /// A pre-order traversal index.
    pub index: usize,
    /// An index of the owning layer in `CollectedElements::layers`.
    pub layer: Option<usize>,
    /// The group is inside another group.
    pub nested: bool,
}

/// A layer element.
#[derive(Clone, Copy, Debug)]
pub struct CollectedLayer<'a> {
    /// A layer element.
    pub element: &'a Element,
    /// A pre-order traversal index.
    pub index: usize,
    /// An index of the parent layer.
    pub layer: Option<usize>,
    /// The layer is inside a group.
    pub in_group: bool,
}

/// Categorized document elements.
#[derive(Clone, Default, Debug)]
#[allow(missing_docs)]
pub struct CollectedElements<'a> {
    pub linear_gradients: Vec<&'a Element>,
    pub radial_gradients: Vec<&'a Element>,
    pub filter_primitives: Vec<CollectedPrimitive<'a>>,
    pub patterns: Vec<&'a Element>,
    pub markers: Vec<&'a Element>,
    pub shapes: Vec<CollectedShape<'a>>,
    pub groups: Vec<CollectedGroup<'a>>,
    pub layers: Vec<CollectedLayer<'a>>,
    /// An id to element map. The first element with a given id wins.
    pub ids: HashMap<&'a str, &'a Element>,
}

impl<'a> CollectedElements<'a> {
    /// Returns an element by id.
    pub fn element_by_id(&self, id: &str) -> Option<&'a Element> {
        self.ids.get(id).cloned()
    }
}

#[derive(Clone, Copy)]
struct Scope<'a> {
    in_defs: bool,
    in_group: bool,
    layer: Option<usize>,
    filter: Option<(&'a str, &'a Element)>,
}

/// Returns `true` when the element is an Inkscape layer.
pub fn is_layer(elem: &Element) -> bool {
    if !elem.has_name("g") {
        return false;
    }

    if elem.attribute("inkscape:groupmode") == Some("layer") {
        return true;
    }

    match elem.attribute("inkscape:label") {
        Some(label) => !label.is_empty(),
        None => false,
    }
}

// Elements whose content is never rendered directly.
fn is_definition_scope(name: &str) -> bool {
    match name {
        "defs" | "symbol" | "clipPath" | "mask" | "pattern" | "marker"
        | "linearGradient" | "radialGradient" | "filter" => true,
        _ => false,
    }
}

/// Collects elements of the whole tree.
pub fn collect(root: &Element) -> CollectedElements {
    let mut c = CollectedElements::default();
    let mut index = 0;
    let scope = Scope {
        in_defs: false,
        in_group: false,
        layer: None,
        filter: None,
    };

    // The root is not classified, but can be referenced.
    if let Some(id) = root.id() {
        c.ids.insert(id, root);
    }

    for child in &root.children {
        collect_element(child, scope, &mut index, &mut c);
    }

    c
}

fn collect_element<'a>(
    elem: &'a Element,
    scope: Scope<'a>,
    index: &mut usize,
    c: &mut CollectedElements<'a>,
) {
    let curr_index = *index;
    *index += 1;

    if let Some(id) = elem.id() {
        if c.ids.contains_key(id) {
            debug!("Duplicated id '{}'. Only the first one will be used.", id);
        } else {
            c.ids.insert(id, elem);
        }
    }

    let mut child_scope = scope;

    match elem.name.as_str() {
        "linearGradient" => c.linear_gradients.push(elem),
        "radialGradient" => c.radial_gradients.push(elem),
        "pattern" => c.patterns.push(elem),
        "marker" => c.markers.push(elem),
        "filter" => child_scope.filter = elem.id().map(|id| (id, elem)),
        "g" => {
            if is_layer(elem) {
                if !scope.in_defs {
                    c.layers.push(CollectedLayer {
                        element: elem,
                        index: curr_index,
                        layer: scope.layer,
                        in_group: scope.in_group,
                    });
                    child_scope.layer = Some(c.layers.len() - 1);
                }
            } else {
                if !scope.in_defs {
                    c.groups.push(CollectedGroup {
                        element: elem,
                        index: curr_index,
                        layer: scope.layer,
                        nested: scope.in_group,
                    });
                }

                child_scope.in_group = true;
            }
        }
        name => {
            if let Some((filter_id, filter)) = scope.filter {
                if name.starts_with("fe") {
                    c.filter_primitives.push(CollectedPrimitive { filter_id, filter, element: elem });
                }
            } else if let Some(kind) = ShapeElementKind::from_name(name) {
                if !scope.in_defs && !scope.in_group {
                    c.shapes.push(CollectedShape {
                        kind,
                        element: elem,
                        index: curr_index,
                        layer: scope.layer,
                    });
                }
            }
        }
    }

    if is_definition_scope(&elem.name) {
        child_scope.in_defs = true;
    }

    for child in &elem.children {
        collect_element(child, child_scope, index, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree;
    use crate::XmlReader;

    fn parse(text: &str) -> Element {
        tree::read(text, XmlReader::Tree).unwrap()
    }

    #[test]
    fn filter_primitives_are_stamped() {
        let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'>
    <defs>
        <filter id='f1'>
            <feGaussianBlur stdDeviation='2'/>
            <feDropShadow dx='1'/>
        </filter>
    </defs>
</svg>");

        let c = collect(&root);
        assert_eq!(c.filter_primitives.len(), 2);
        assert_eq!(c.filter_primitives[0].filter_id, "f1");
        assert_eq!(c.filter_primitives[1].element.name, "feDropShadow");
    }

    #[test]
    fn layer_detection() {
        let mut g = Element::new("g");
        assert!(!is_layer(&g));
        g.set_attribute("inkscape:label", "");
        assert!(!is_layer(&g));
        g.set_attribute("inkscape:label", "Layer 1");
        assert!(is_layer(&g));

        let mut g = Element::new("g");
        g.set_attribute("inkscape:groupmode", "layer");
        assert!(is_layer(&g));
    }

    #[test]
    fn traversal_indexes() {
        let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'>
    <rect/>
    <g><rect/></g>
    <path/>
</svg>");

        let c = collect(&root);
        assert_eq!(c.shapes.len(), 2);
        assert_eq!(c.shapes[0].index, 0);
        assert_eq!(c.groups[0].index, 1);
        assert_eq!(c.shapes[1].index, 3);
    }
}
