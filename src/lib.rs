// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
This library imports SVG data into a flat shape model and exports it back.

Here is a simple overview of the import pipeline:

- the text is read into an [`Element`] tree, either with `roxmltree`
  or directly from an `xmlparser` token stream
- elements are classified into gradients, filters, patterns, markers,
  layers, groups and shapes in a single pass
- referenced definitions are converted
- shapes are built through a [`ShapeSink`] in the document order,
  with the document coordinates mapped into the scene coordinates

The [`Scene`] is the bundled [`ShapeSink`] implementation.
It's just a container of shape records, without any editing or rendering logic.

Export is the structural inverse: each [`Scene`] shape is converted into
an SVG element and all referenced definitions are written once into `defs`.

All value parsers are lenient. A malformed attribute never fails the import,
it's replaced with a default value or skipped with a warning,
which is reported through the `log` crate.

&nbsp;

# Example

```
use svgscene::Scene;

let scene = Scene::from_str("
<svg xmlns='http://www.w3.org/2000/svg' width='200' height='200' viewBox='0 0 100 100'>
    <rect x='10' y='10' width='20' height='10' fill='#ff0000'/>
</svg>").unwrap();

let id = scene.roots()[0];
assert_eq!(scene.shape(id).kind.name(), "rect");

let bbox = scene.bounding_box(id).unwrap();
assert_eq!((bbox.x, bbox.width), (20.0, 40.0));
```

[`Element`]: struct.Element.html
[`Scene`]: struct.Scene.html
[`ShapeSink`]: trait.ShapeSink.html
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod traits;

#[macro_export]
#[doc(hidden)]
macro_rules! assert_eq_text {
    ($left:expr, $right:expr) => ({
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val == *right_val) {
                    panic!("assertion failed: `(left == right)` \
                           \nleft:  `{}`\nright: `{}`",
                           left_val, right_val)
                }
            }
        }
    })
}

pub mod collector;
mod error;
mod export;
mod import;
mod metadata;
mod options;
pub mod paint;
mod scene;
mod shape;
mod tree;
pub mod types;

pub use crate::error::{Error, Result};
pub use crate::export::export;
pub use crate::import::import;
pub use crate::metadata::DocumentMetadata;
pub use crate::options::{ImportOptions, Indent, WriteOptions, XmlReader};
pub use crate::paint::Paint;
pub use crate::scene::{Scene, Shape, ShapeId, ShapeSink};
pub use crate::shape::{Font, Layer, ShapeKind, Style, Text, TextAnchor};
pub use crate::traits::{ToStringWithOptions, WriteBuffer};
pub use crate::tree::{read, Attributes, Descendants, Element};
pub use crate::types::{
    parse_length,
    parse_length_with_reference,
    Align,
    AspectRatio,
    Color,
    FuzzyEq,
    FuzzyZero,
    Length,
    LengthUnit,
    Path,
    PathSegment,
    Points,
    Rect,
    Transform,
    ViewBox,
};
