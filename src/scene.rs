// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use std::fs;
use std::path;

use slab::Slab;

use crate::error::Result;
use crate::shape::{ShapeKind, Style};
use crate::types::{Rect, Transform};
use crate::{ImportOptions, WriteBuffer, WriteOptions};

/// A shape construction interface used by the importer.
///
/// An implementation owns shape storage. The importer only creates shapes,
/// assigns their properties and places them into a hierarchy.
pub trait ShapeSink {
    /// A shape handle.
    type Handle: Copy;

    /// Creates a new detached shape.
    fn create(&mut self, kind: ShapeKind) -> Self::Handle;

    /// Sets shape's style.
    fn set_style(&mut self, shape: Self::Handle, style: Style);

    /// Applies a transform on top of the current one.
    ///
    /// The new transform is `ts × current`.
    fn apply_transform(&mut self, shape: Self::Handle, ts: &Transform);

    /// Places a shape into a container, or at the top level when `parent` is `None`.
    ///
    /// `level` is a nesting depth, starting from 0.
    fn place(&mut self, shape: Self::Handle, parent: Option<Self::Handle>, level: usize);

    /// Sets the document canvas.
    fn set_canvas(&mut self, _rect: Rect) {}
}

/// A shape ID inside a `Scene`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ShapeId(usize);

/// A shape record.
#[derive(Clone, Debug)]
pub struct Shape {
    /// Shape geometry.
    pub kind: ShapeKind,
    /// Shape style.
    pub style: Style,
    /// A transform relative to the parent.
    pub transform: Transform,
    /// A nesting depth.
    pub level: usize,
    parent: Option<ShapeId>,
    children: Vec<ShapeId>,
}

/// A minimal in-memory shape container.
///
/// # Examples
///
/// ```
/// use svgscene::Scene;
///
/// let scene = Scene::from_str("<svg xmlns='http://www.w3.org/2000/svg'>
///     <rect width='10' height='20'/>
/// </svg>").unwrap();
///
/// assert_eq!(scene.roots().len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Scene {
    shapes: Slab<Shape>,
    roots: Vec<ShapeId>,
    canvas: Option<Rect>,
}

impl Scene {
    /// Constructs a new, empty scene.
    pub fn new() -> Scene {
        Scene::default()
    }

    /// Parses a scene from an SVG text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Scene> {
        Scene::from_str_with_opt(text, &ImportOptions::default())
    }

    /// Parses a scene from an SVG text using the specified options.
    pub fn from_str_with_opt(text: &str, opt: &ImportOptions) -> Result<Scene> {
        let mut scene = Scene::new();
        crate::import::import(text, opt, &mut scene)?;
        Ok(scene)
    }

    /// Loads a scene from an SVG file.
    pub fn from_file<P: AsRef<path::Path>>(path: P, opt: &ImportOptions) -> Result<Scene> {
        let text = fs::read_to_string(path)?;
        Scene::from_str_with_opt(&text, opt)
    }

    /// Saves a scene to an SVG file.
    pub fn write_to_file<P: AsRef<path::Path>>(&self, path: P, opt: &WriteOptions) -> Result<()> {
        let mut buf = Vec::new();
        self.write_buf_opt(opt, &mut buf);
        fs::write(path, buf)?;
        Ok(())
    }

    /// Appends a shape.
    pub fn append(&mut self, kind: ShapeKind, parent: Option<ShapeId>) -> ShapeId {
        let id = self.create(kind);
        let level = match parent {
            Some(p) => self.shape(p).level + 1,
            None => 0,
        };
        self.place(id, parent, level);
        id
    }

    /// Returns top-level shapes in insertion order.
    pub fn roots(&self) -> &[ShapeId] {
        &self.roots
    }

    /// Returns the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the scene has no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Returns a shape by ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID does not belong to this scene.
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }

    /// Returns a mutable shape by ID.
    ///
    /// # Panics
    ///
    /// Panics if the ID does not belong to this scene.
    pub fn shape_mut(&mut self, id: ShapeId) -> &mut Shape {
        &mut self.shapes[id.0]
    }

    /// Returns the shape's parent.
    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.shape(id).parent
    }

    /// Returns the shape's children.
    pub fn children(&self, id: ShapeId) -> &[ShapeId] {
        &self.shape(id).children
    }

    /// Returns all shapes in depth-first order.
    pub fn descendants(&self) -> Vec<ShapeId> {
        let mut list = Vec::with_capacity(self.shapes.len());
        let mut stack: Vec<ShapeId> = self.roots.iter().rev().cloned().collect();
        while let Some(id) = stack.pop() {
            list.push(id);
            stack.extend(self.children(id).iter().rev());
        }

        list
    }

    /// Returns the document canvas, if set.
    pub fn canvas(&self) -> Option<Rect> {
        self.canvas
    }

    /// Returns a shape transform in the scene coordinates.
    pub fn world_transform(&self, id: ShapeId) -> Transform {
        let mut ts = self.shape(id).transform;
        let mut parent = self.parent(id);
        while let Some(p) = parent {
            ts.prepend(&self.shape(p).transform);
            parent = self.parent(p);
        }

        ts
    }

    /// Returns a shape bounding box in the scene coordinates.
    ///
    /// A container's box is the union of its children.
    /// Returns `None` for an empty container.
    pub fn bounding_box(&self, id: ShapeId) -> Option<Rect> {
        let shape = self.shape(id);
        match shape.kind {
            ShapeKind::Group | ShapeKind::Layer(_) => {
                self.children(id).iter()
                    .filter_map(|child| self.bounding_box(*child))
                    .fold(None, |acc: Option<Rect>, r| Some(match acc {
                        Some(acc) => acc.union(&r),
                        None => r,
                    }))
            }
            ShapeKind::Text(ref text) => {
                Some(text.approx_bounding_box().transform(&self.world_transform(id)))
            }
            ref kind => {
                let mut path = kind.to_path()?;
                path.transform(&self.world_transform(id));
                path.bounding_box()
            }
        }
    }

    /// Returns a union of all top-level shape bounding boxes.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.roots.iter()
            .filter_map(|id| self.bounding_box(*id))
            .fold(None, |acc: Option<Rect>, r| Some(match acc {
                Some(acc) => acc.union(&r),
                None => r,
            }))
    }
}

impl ShapeSink for Scene {
    type Handle = ShapeId;

    fn create(&mut self, kind: ShapeKind) -> ShapeId {
        ShapeId(self.shapes.insert(Shape {
            kind,
            style: Style::default(),
            transform: Transform::default(),
            level: 0,
            parent: None,
            children: Vec::new(),
        }))
    }

    fn set_style(&mut self, shape: ShapeId, style: Style) {
        self.shape_mut(shape).style = style;
    }

    fn apply_transform(&mut self, shape: ShapeId, ts: &Transform) {
        self.shape_mut(shape).transform.prepend(ts);
    }

    fn place(&mut self, shape: ShapeId, parent: Option<ShapeId>, level: usize) {
        {
            let s = self.shape_mut(shape);
            s.parent = parent;
            s.level = level;
        }

        match parent {
            Some(p) => self.shape_mut(p).children.push(shape),
            None => self.roots.push(shape),
        }
    }

    fn set_canvas(&mut self, rect: Rect) {
        self.canvas = Some(rect);
    }
}
