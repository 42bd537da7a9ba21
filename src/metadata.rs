// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::tree::Element;
use crate::types::{Align, AspectRatio, Length, Rect, Transform, ViewBox};

const DEFAULT_WIDTH: f64 = 1000.0;
const DEFAULT_HEIGHT: f64 = 800.0;

/// Document size and coordinate system, as declared by the root element.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct DocumentMetadata {
    /// The resolved document size. `None` when neither the size nor the view box is set.
    pub size: Option<(f64, f64)>,
    /// Was the size declared explicitly.
    pub has_declared_size: bool,
    /// A view box.
    pub view_box: Option<ViewBox>,
    /// An aspect ratio policy.
    pub aspect: AspectRatio,
}

impl DocumentMetadata {
    /// Reads metadata from the root `svg` element.
    ///
    /// Percent sizes are resolved against the view box. A missing
    /// dimension falls back to the view box dimension.
    pub fn from_element(root: &Element) -> DocumentMetadata {
        let view_box = root.attribute("viewBox").and_then(ViewBox::parse);
        let aspect = root.attribute("preserveAspectRatio")
            .map(AspectRatio::parse)
            .unwrap_or_default();

        let (vb_w, vb_h) = match view_box {
            Some(vb) => (Some(vb.width), Some(vb.height)),
            None => (None, None),
        };

        let width = resolve_dimension(root.attribute("width"), vb_w);
        let height = resolve_dimension(root.attribute("height"), vb_h);
        let has_declared_size = root.has_attribute("width") || root.has_attribute("height");

        let size = match (width, height) {
            (Some(w), Some(h)) => Some((w, h)),
            (Some(w), None) => Some((w, DEFAULT_HEIGHT)),
            (None, Some(h)) => Some((DEFAULT_WIDTH, h)),
            (None, None) => None,
        };

        DocumentMetadata { size, has_declared_size, view_box, aspect }
    }

    /// Calculates a transform from the document coordinates into the scene coordinates.
    pub fn root_transform(&self) -> Transform {
        let vb = match self.view_box {
            Some(vb) => vb,
            None => return Transform::default(),
        };

        let (width, height) = match self.size {
            Some(size) if self.has_declared_size => size,
            _ => return Transform::from_translate(-vb.x, -vb.y),
        };

        let mut sx = width / vb.width;
        let mut sy = height / vb.height;

        if self.aspect.align != Align::None {
            let s = if self.aspect.slice { sx.max(sy) } else { sx.min(sy) };
            sx = s;
            sy = s;
        }

        let (fx, fy) = self.aspect.align.factors();
        let dx = (width - vb.width * sx) * fx;
        let dy = (height - vb.height * sy) * fy;

        Transform::from_translate(dx, dy)
            .scale(sx, sy)
            .translate(-vb.x, -vb.y)
    }

    /// Returns a scene canvas.
    pub fn canvas(&self) -> Rect {
        let (w, h) = self.size.unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
        Rect::new(0.0, 0.0, w, h)
    }
}

fn resolve_dimension(value: Option<&str>, view_box_dim: Option<f64>) -> Option<f64> {
    match value {
        Some(text) => {
            let len = Length::parse(text);
            let n = len.to_px(view_box_dim.unwrap_or(0.0));
            if n > 0.0 {
                Some(n)
            } else {
                view_box_dim
            }
        }
        None => view_box_dim,
    }
}
