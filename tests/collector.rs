// Copyright 2018 Evgeniy Reizner
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use] extern crate pretty_assertions;

use svgscene::collector::{collect, ShapeElementKind};
use svgscene::{read, Element, XmlReader};

fn parse(text: &str) -> Element {
    read(text, XmlReader::Tree).unwrap()
}

#[test]
fn duplicated_id() {
    let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'>
    <rect id='r1' width='1' height='1'/>
    <circle id='r1' r='1'/>
</svg>");

    let c = collect(&root);
    assert_eq!(c.shapes.len(), 2);
    assert_eq!(c.element_by_id("r1").map(|e| e.name.as_str()), Some("rect"));
}

#[test]
fn root_id() {
    let root = parse("
<svg xmlns='http://www.w3.org/2000/svg' id='svg1'>
    <rect id='svg1' width='1' height='1'/>
</svg>");

    let c = collect(&root);
    assert_eq!(c.element_by_id("svg1").map(|e| e.name.as_str()), Some("svg"));
    assert_eq!(c.shapes[0].index, 0);
}

#[test]
fn shapes_in_defs() {
    let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'>
    <defs>
        <rect id='r1' width='1' height='1'/>
        <symbol id='s1'><circle r='1'/></symbol>
    </defs>
    <path d='M 0 0 L 10 10'/>
</svg>");

    let c = collect(&root);
    assert_eq!(c.shapes.len(), 1);
    assert_eq!(c.shapes[0].kind, ShapeElementKind::Path);
    assert!(c.element_by_id("r1").is_some());
    assert!(c.element_by_id("s1").is_some());
}

#[test]
fn nested_groups() {
    let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'>
    <g id='g1'>
        <g id='g2'>
            <rect id='r1' width='1' height='1'/>
        </g>
    </g>
    <line x2='1'/>
</svg>");

    let c = collect(&root);
    assert_eq!(c.groups.len(), 2);
    assert!(!c.groups[0].nested);
    assert!(c.groups[1].nested);

    // Only the top-level shape is in the flat list.
    assert_eq!(c.shapes.len(), 1);
    assert_eq!(c.shapes[0].kind, ShapeElementKind::Line);
    assert!(c.element_by_id("r1").is_some());
}

#[test]
fn definitions() {
    let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'>
    <defs>
        <linearGradient id='lg1'/>
        <radialGradient id='rg1'/>
        <pattern id='p1'><rect width='1' height='1'/></pattern>
        <marker id='m1'><path d='M 0 0 L 1 1'/></marker>
        <filter id='f1'><feGaussianBlur/></filter>
    </defs>
    <linearGradient id='lg2'/>
</svg>");

    let c = collect(&root);
    assert_eq!(c.linear_gradients.len(), 2);
    assert_eq!(c.radial_gradients.len(), 1);
    assert_eq!(c.patterns.len(), 1);
    assert_eq!(c.markers.len(), 1);
    assert_eq!(c.filter_primitives.len(), 1);
    assert_eq!(c.filter_primitives[0].filter_id, "f1");
    assert!(c.shapes.is_empty());
}

#[test]
fn layers() {
    let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'
     xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'>
    <g inkscape:groupmode='layer' inkscape:label='L1'>
        <rect width='1' height='1'/>
        <g inkscape:label='L2'>
            <circle r='1'/>
        </g>
        <g>
            <g inkscape:groupmode='layer'/>
        </g>
    </g>
    <ellipse rx='1' ry='2'/>
</svg>");

    let c = collect(&root);
    assert_eq!(c.layers.len(), 3);
    assert_eq!(c.layers[0].layer, None);
    assert_eq!(c.layers[1].layer, Some(0));
    assert!(!c.layers[1].in_group);
    assert!(c.layers[2].in_group);

    assert_eq!(c.groups.len(), 1);
    assert_eq!(c.groups[0].layer, Some(0));

    let kinds: Vec<_> = c.shapes.iter().map(|s| (s.kind, s.layer)).collect();
    assert_eq!(kinds, vec![
        (ShapeElementKind::Rect, Some(0)),
        (ShapeElementKind::Circle, Some(1)),
        (ShapeElementKind::Ellipse, None),
    ]);
}

#[test]
fn document_order() {
    let root = parse("
<svg xmlns='http://www.w3.org/2000/svg'>
    <rect/>
    <g/>
    <text>a</text>
    <use/>
</svg>");

    let c = collect(&root);
    let mut indexes: Vec<_> = c.shapes.iter().map(|s| s.index).collect();
    indexes.extend(c.groups.iter().map(|g| g.index));
    indexes.sort();
    assert_eq!(indexes, vec![0, 1, 2, 3]);
    assert_eq!(c.shapes[2].kind, ShapeElementKind::Use);
}

#[test]
fn same_records_for_both_readers() {
    let text = "
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
    <defs><rect id='r1' width='1' height='1'/></defs>
    <use xlink:href='#r1'/>
    <g><path d='M 0 0'/></g>
</svg>";

    let tree_root = read(text, XmlReader::Tree).unwrap();
    let stream_root = read(text, XmlReader::Stream).unwrap();
    assert_eq!(tree_root, stream_root);

    let c1 = collect(&tree_root);
    let c2 = collect(&stream_root);
    assert_eq!(c1.shapes.len(), c2.shapes.len());
    assert_eq!(c1.groups.len(), c2.groups.len());
    assert_eq!(c1.ids.len(), c2.ids.len());
}
