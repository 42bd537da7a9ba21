// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! SVG import.
//!
//! The import is done in three phases: elements are collected and classified,
//! referenced definitions are converted, and then shapes are built
//! through a [`ShapeSink`] in the document order.
//!
//! [`ShapeSink`]: ../trait.ShapeSink.html

use log::{debug, warn};

use self::defs::Definitions;
use self::shapes::Viewport;
use self::style::{resolve_style, Properties};
use crate::collector::{self, is_layer, CollectedElements, ShapeElementKind};
use crate::error::Result;
use crate::metadata::DocumentMetadata;
use crate::scene::ShapeSink;
use crate::shape::{Layer, ShapeKind, Style};
use crate::tree::{self, Element};
use crate::types::style::parse_iri;
use crate::types::{Length, Transform};
use crate::ImportOptions;

mod defs;
mod shapes;
mod style;

/// Imports an SVG text into a shape sink.
///
/// Fails only when the document itself is malformed. Invalid elements
/// and attribute values are skipped or replaced with defaults.
pub fn import<S: ShapeSink>(text: &str, opt: &ImportOptions, sink: &mut S) -> Result<()> {
    let root = tree::read(text, opt.reader)?;

    let meta = DocumentMetadata::from_element(&root);
    let canvas = meta.canvas();
    sink.set_canvas(canvas);

    let vp = match meta.view_box {
        Some(vb) => Viewport { width: vb.width, height: vb.height },
        None => Viewport { width: canvas.width, height: canvas.height },
    };

    let collected = collector::collect(&root);
    let defs = Definitions::build(&collected, &vp);

    let root_ts = if opt.apply_root_transform {
        meta.root_transform()
    } else {
        Transform::default()
    };

    let mut importer = Importer {
        opt,
        collected: &collected,
        defs: &defs,
        vp,
        root_ts,
        use_stack: Vec::new(),
    };

    importer.run(sink);
    Ok(())
}

#[derive(Clone, Copy)]
enum Item {
    Layer(usize),
    Group(usize),
    Shape(usize),
}

// Properties inherited from a `use` element.
struct UseContext {
    transform: Transform,
    style: Style,
}

struct Importer<'a, 'b> {
    opt: &'b ImportOptions,
    collected: &'b CollectedElements<'a>,
    defs: &'b Definitions,
    vp: Viewport,
    root_ts: Transform,
    // Ids of elements referenced by the `use` elements being processed.
    use_stack: Vec<&'a str>,
}

fn element_transform(elem: &Element) -> Transform {
    elem.attribute("transform").map(Transform::parse).unwrap_or_default()
}

impl<'a, 'b> Importer<'a, 'b> {
    fn run<S: ShapeSink>(&mut self, sink: &mut S) {
        let c = self.collected;

        let mut items = Vec::with_capacity(c.layers.len() + c.groups.len() + c.shapes.len());
        items.extend(c.layers.iter().enumerate()
            .filter(|(_, l)| !l.in_group)
            .map(|(i, l)| (l.index, Item::Layer(i))));
        items.extend(c.groups.iter().enumerate()
            .filter(|(_, g)| !g.nested)
            .map(|(i, g)| (g.index, Item::Group(i))));
        items.extend(c.shapes.iter().enumerate()
            .map(|(i, s)| (s.index, Item::Shape(i))));
        items.sort_by_key(|&(index, _)| index);

        let mut layers: Vec<Option<(S::Handle, usize)>> = vec![None; c.layers.len()];

        for (_, item) in items {
            let owner = match item {
                Item::Layer(i) => c.layers[i].layer,
                Item::Group(i) => c.groups[i].layer,
                Item::Shape(i) => c.shapes[i].layer,
            };

            let parent = match owner {
                Some(idx) => match layers[idx] {
                    Some(p) => Some(p),
                    // The owning layer was skipped.
                    None => continue,
                },
                None => None,
            };

            match item {
                Item::Layer(i) => {
                    layers[i] = self.build_layer(c.layers[i].element, parent, false, sink);
                }
                Item::Group(i) => {
                    self.build_group(c.groups[i].element, parent, sink);
                }
                Item::Shape(i) => {
                    let shape = c.shapes[i];
                    self.build_shape(shape.element, shape.kind, parent, None, sink);
                }
            }
        }
    }

    fn add<S: ShapeSink>(
        &self,
        kind: ShapeKind,
        style: Style,
        ts: &Transform,
        parent: Option<(S::Handle, usize)>,
        sink: &mut S,
    ) -> (S::Handle, usize) {
        let id = sink.create(kind);
        sink.set_style(id, style);
        sink.apply_transform(id, ts);

        match parent {
            Some((parent, level)) => {
                sink.place(id, Some(parent), level + 1);
                (id, level + 1)
            }
            None => {
                sink.apply_transform(id, &self.root_ts);
                sink.place(id, None, 0);
                (id, 0)
            }
        }
    }

    fn build_children<S: ShapeSink>(
        &mut self,
        elem: &'a Element,
        parent: (S::Handle, usize),
        sink: &mut S,
    ) {
        for child in &elem.children {
            self.build_node(child, Some(parent), sink);
        }
    }

    fn build_node<S: ShapeSink>(
        &mut self,
        elem: &'a Element,
        parent: Option<(S::Handle, usize)>,
        sink: &mut S,
    ) {
        if elem.has_name("g") {
            if is_layer(elem) {
                self.build_layer(elem, parent, true, sink);
            } else {
                self.build_group(elem, parent, sink);
            }

            return;
        }

        if let Some(kind) = ShapeElementKind::from_name(&elem.name) {
            self.build_shape(elem, kind, parent, None, sink);
        }
    }

    fn build_layer<S: ShapeSink>(
        &mut self,
        elem: &'a Element,
        parent: Option<(S::Handle, usize)>,
        with_children: bool,
        sink: &mut S,
    ) -> Option<(S::Handle, usize)> {
        let visible = Properties::from_element(elem).is_visible();
        if !visible && self.opt.skip_hidden {
            debug!("Hidden layer '{}' is skipped.", elem.id().unwrap_or(""));
            return None;
        }

        let name = elem.attribute("inkscape:label")
            .filter(|s| !s.is_empty())
            .or_else(|| elem.id())
            .unwrap_or("Layer")
            .to_string();

        let layer = Layer {
            name,
            visible,
            locked: elem.attribute("sodipodi:insensitive") == Some("true"),
        };

        let style = resolve_style(elem, self.defs, self.vp.diagonal());
        let handle = self.add(ShapeKind::Layer(layer), style, &element_transform(elem), parent, sink);

        if with_children {
            self.build_children(elem, handle, sink);
        }

        Some(handle)
    }

    fn build_group<S: ShapeSink>(
        &mut self,
        elem: &'a Element,
        parent: Option<(S::Handle, usize)>,
        sink: &mut S,
    ) {
        if self.opt.skip_hidden && !Properties::from_element(elem).is_visible() {
            debug!("Hidden group '{}' is skipped.", elem.id().unwrap_or(""));
            return;
        }

        let style = resolve_style(elem, self.defs, self.vp.diagonal());
        let handle = self.add(ShapeKind::Group, style, &element_transform(elem), parent, sink);
        self.build_children(elem, handle, sink);
    }

    fn build_shape<S: ShapeSink>(
        &mut self,
        elem: &'a Element,
        kind: ShapeElementKind,
        parent: Option<(S::Handle, usize)>,
        ctx: Option<&UseContext>,
        sink: &mut S,
    ) {
        if kind == ShapeElementKind::Use {
            self.build_use(elem, parent, ctx, sink);
            return;
        }

        let shape = match shapes::convert(elem, kind, &self.vp) {
            Some(shape) => shape,
            None => return,
        };

        let mut style = resolve_style(elem, self.defs, self.vp.diagonal());
        let mut ts = element_transform(elem);
        if let Some(ctx) = ctx {
            style.override_with(&ctx.style);
            ts.prepend(&ctx.transform);
        }

        self.add(shape, style, &ts, parent, sink);
    }

    fn build_use<S: ShapeSink>(
        &mut self,
        elem: &'a Element,
        parent: Option<(S::Handle, usize)>,
        outer: Option<&UseContext>,
        sink: &mut S,
    ) {
        let link = elem.attribute("xlink:href").or_else(|| elem.attribute("href"));
        let id = match link.and_then(parse_iri) {
            Some(id) => id,
            None => {
                warn!("A 'use' element without a valid link. Skipped.");
                return;
            }
        };

        let target = match self.collected.element_by_id(id) {
            Some(target) => target,
            None => {
                debug!("Element '{}' referenced by 'use' is not found.", id);
                return;
            }
        };

        if self.use_stack.contains(&id) {
            warn!("Recursive 'use' of '{}'. Skipped.", id);
            return;
        }

        let x = elem.attribute("x").map(|v| Length::parse(v).to_px(self.vp.width)).unwrap_or(0.0);
        let y = elem.attribute("y").map(|v| Length::parse(v).to_px(self.vp.height)).unwrap_or(0.0);

        // use_ts × translate(x, y), applied on top of the outer `use`.
        let mut ts = element_transform(elem);
        ts.append(&Transform::from_translate(x, y));

        let mut style = resolve_style(elem, self.defs, self.vp.diagonal());
        if let Some(outer) = outer {
            ts.prepend(&outer.transform);
            style.override_with(&outer.style);
        }

        let ctx = UseContext { transform: ts, style };

        self.use_stack.push(id);

        if target.has_name("g") || target.has_name("symbol") {
            let mut style = resolve_style(target, self.defs, self.vp.diagonal());
            style.override_with(&ctx.style);
            let mut ts = element_transform(target);
            ts.prepend(&ctx.transform);

            let handle = self.add(ShapeKind::Group, style, &ts, parent, sink);
            self.build_children(target, handle, sink);
        } else if let Some(kind) = ShapeElementKind::from_name(&target.name) {
            self.build_shape(target, kind, parent, Some(&ctx), sink);
        } else {
            debug!("'use' of '{}' is not supported.", target.name);
        }

        self.use_stack.pop();
    }
}
