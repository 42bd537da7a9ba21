// Copyright 2018 Evgeniy Reizner
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use] extern crate pretty_assertions;

use svgscene::{
    import,
    Color,
    Error,
    FuzzyEq,
    ImportOptions,
    Paint,
    Rect,
    Scene,
    ShapeKind,
    ShapeSink,
    Style,
    Transform,
    XmlReader,
};

fn import_str(text: &str) -> Scene {
    Scene::from_str(text).unwrap()
}

fn kinds(scene: &Scene) -> Vec<(&'static str, usize)> {
    scene.descendants().iter()
        .map(|id| {
            let shape = scene.shape(*id);
            (shape.kind.name(), shape.level)
        })
        .collect()
}

// Records every sink call as a string.
#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
    count: usize,
}

impl ShapeSink for Recorder {
    type Handle = usize;

    fn create(&mut self, kind: ShapeKind) -> usize {
        self.count += 1;
        self.calls.push(format!("create {} {}", self.count, kind.name()));
        self.count
    }

    fn set_style(&mut self, shape: usize, _style: Style) {
        self.calls.push(format!("style {}", shape));
    }

    fn apply_transform(&mut self, shape: usize, ts: &Transform) {
        self.calls.push(format!("transform {} {} {}", shape, ts.e, ts.f));
    }

    fn place(&mut self, shape: usize, parent: Option<usize>, level: usize) {
        self.calls.push(format!("place {} {:?} {}", shape, parent, level));
    }

    fn set_canvas(&mut self, rect: Rect) {
        self.calls.push(format!("canvas {} {}", rect.width, rect.height));
    }
}

#[test]
fn sink_calls() {
    let mut sink = Recorder::default();
    import("
<svg xmlns='http://www.w3.org/2000/svg' width='100' height='50'>
    <g transform='translate(1 2)'>
        <rect width='10' height='10'/>
    </g>
</svg>", &ImportOptions::default(), &mut sink).unwrap();

    assert_eq!(sink.calls, vec![
        "canvas 100 50",
        "create 1 group",
        "style 1",
        "transform 1 1 2",
        "transform 1 0 0",
        "place 1 None 0",
        "create 2 rect",
        "style 2",
        "transform 2 0 0",
        "place 2 Some(1) 1",
    ]);
}

#[test]
fn empty_document() {
    match Scene::from_str("  ") {
        Err(Error::EmptyDocument) => {}
        _ => panic!("expected an error"),
    }
}

#[test]
fn not_svg() {
    match Scene::from_str("<html/>") {
        Err(Error::NoSvgElement) => {}
        _ => panic!("expected an error"),
    }
}

#[test]
fn malformed_xml() {
    assert!(Scene::from_str("<svg xmlns='http://www.w3.org/2000/svg'><rect></svg>").is_err());
}

#[test]
fn no_shapes() {
    let scene = import_str("<svg xmlns='http://www.w3.org/2000/svg' width='10' height='20'/>");
    assert!(scene.is_empty());
    assert_eq!(scene.canvas(), Some(Rect::new(0.0, 0.0, 10.0, 20.0)));
}

#[test]
fn invalid_shapes_are_skipped() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg'>
    <rect width='0' height='10'/>
    <circle r='-1'/>
    <ellipse rx='5'/>
    <polyline points='1 2'/>
    <path d='M 10 10'/>
    <text> </text>
    <line x2='10'/>
</svg>");

    assert_eq!(kinds(&scene), vec![("line", 0)]);
}

#[test]
fn hierarchy() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg'
     xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'
     xmlns:sodipodi='http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd'>
    <g inkscape:groupmode='layer' inkscape:label='Background' sodipodi:insensitive='true'>
        <rect width='10' height='10'/>
        <g>
            <circle r='5'/>
            <g><line x2='1'/></g>
        </g>
    </g>
    <g id='l2' inkscape:groupmode='layer'>
        <g inkscape:label='Sublayer'><path d='M 0 0 L 1 1'/></g>
    </g>
    <ellipse rx='1' ry='2'/>
</svg>");

    assert_eq!(kinds(&scene), vec![
        ("layer", 0),
        ("rect", 1),
        ("group", 1),
        ("ellipse", 2),
        ("group", 2),
        ("line", 3),
        ("layer", 0),
        ("layer", 1),
        ("path", 2),
        ("ellipse", 0),
    ]);

    let roots = scene.roots();
    match scene.shape(roots[0]).kind {
        ShapeKind::Layer(ref layer) => {
            assert_eq!(layer.name, "Background");
            assert!(layer.visible);
            assert!(layer.locked);
        }
        _ => panic!("invalid shape"),
    }

    match scene.shape(roots[1]).kind {
        ShapeKind::Layer(ref layer) => assert_eq!(layer.name, "l2"),
        _ => panic!("invalid shape"),
    }
}

#[test]
fn nested_group_transforms() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg'>
    <g transform='translate(10 0)'>
        <g transform='scale(2)'>
            <rect x='1' y='1' width='1' height='1'/>
        </g>
    </g>
</svg>");

    let rect = scene.descendants()[2];
    let bbox = scene.bounding_box(rect).unwrap();
    assert!(bbox.fuzzy_eq(&Rect::new(12.0, 2.0, 2.0, 2.0)));
}

#[test]
fn root_transform_is_applied_once() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg' width='200' height='100' viewBox='0 0 100 100'>
    <g><rect width='10' height='10'/></g>
</svg>");

    let group = scene.roots()[0];
    let rect = scene.children(group)[0];
    assert!(scene.shape(group).transform.fuzzy_eq(&Transform::from_translate(50.0, 0.0)));
    assert!(scene.shape(rect).transform.is_default());
    assert!(scene.bounding_box(rect).unwrap().fuzzy_eq(&Rect::new(50.0, 0.0, 10.0, 10.0)));
}

#[test]
fn use_element() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
    <defs>
        <symbol id='s1'>
            <rect width='10' height='10'/>
            <circle r='5'/>
        </symbol>
        <rect id='r1' width='5' height='5' fill='red'/>
    </defs>
    <use xlink:href='#s1' x='100'/>
    <use href='#r1' y='50' fill='blue' stroke='green'/>
    <use href='#unknown'/>
</svg>");

    assert_eq!(kinds(&scene), vec![
        ("group", 0),
        ("rect", 1),
        ("ellipse", 1),
        ("rect", 0),
    ]);

    let roots = scene.roots();
    assert!(scene.shape(roots[0]).transform.fuzzy_eq(&Transform::from_translate(100.0, 0.0)));

    let rect = scene.shape(roots[1]);
    assert!(rect.transform.fuzzy_eq(&Transform::from_translate(0.0, 50.0)));
    // The `use` properties override the referenced ones.
    assert_eq!(rect.style.fill, Some(Paint::Color(Color::new_rgb(0, 0, 255))));
    assert_eq!(rect.style.stroke, Some(Paint::Color(Color::new_rgb(0, 128, 0))));
}

#[test]
fn style_properties() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'>
    <rect width='10' height='10' fill='#ff0000' stroke-width='10%'
          style='fill:none;stroke:currentColor;opacity:50%;stroke-dasharray:1 2 3'/>
</svg>");

    let style = &scene.shape(scene.roots()[0]).style;
    assert_eq!(style.fill, Some(Paint::None));
    assert_eq!(style.stroke, Some(Paint::CurrentColor));
    assert_eq!(style.opacity, Some(0.5));
    assert_eq!(style.stroke_width, Some(10.0));
    assert_eq!(style.stroke_dasharray, Some(vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]));
    assert_eq!(style.fill_opacity, None);
}

#[test]
fn gradient_paint() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'>
    <defs>
        <linearGradient id='lg1'>
            <stop offset='0' stop-color='red'/>
            <stop offset='1' stop-color='blue' stop-opacity='0.5'/>
        </linearGradient>
        <linearGradient id='lg2' xlink:href='#lg1' x2='50%'/>
        <radialGradient id='rg1' r='0'/>
    </defs>
    <rect width='10' height='10' fill='url(#lg2)' stroke='url(#rg1) green'/>
    <rect width='10' height='10' fill='url(#missing)'/>
</svg>");

    let roots = scene.roots();
    let style = &scene.shape(roots[0]).style;
    match style.fill {
        Some(Paint::LinearGradient(ref lg)) => {
            assert_eq!(lg.id, "lg2");
            assert_eq!(lg.base.stops.len(), 2);
            assert_eq!(lg.base.stops[1].opacity, 0.5);
        }
        _ => panic!("invalid paint"),
    }

    // A degenerate gradient falls back to the color.
    assert_eq!(style.stroke, Some(Paint::Color(Color::new_rgb(0, 128, 0))));
    assert_eq!(scene.shape(roots[1]).style.fill, None);
}

#[test]
fn duplicated_paint_server_id() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg'>
    <linearGradient id='g'><stop offset='0' stop-color='red'/></linearGradient>
    <linearGradient id='g'><stop offset='0' stop-color='blue'/></linearGradient>
    <rect width='10' height='10' fill='url(#g)'/>
</svg>");

    match scene.shape(scene.roots()[0]).style.fill {
        Some(Paint::LinearGradient(ref lg)) => {
            assert_eq!(lg.base.stops[0].color, Color::new_rgb(255, 0, 0));
        }
        _ => panic!("invalid paint"),
    }
}

#[test]
fn filter_and_markers() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg'>
    <defs>
        <filter id='f1'><feGaussianBlur stdDeviation='2 3'/></filter>
        <marker id='m1'><path d='M 0 0 L 2 2'/></marker>
    </defs>
    <path d='M 0 0 L 10 10' filter='url(#f1)' marker-end='url(#m1)' marker-start='url(#m2)'/>
</svg>");

    let style = &scene.shape(scene.roots()[0]).style;
    assert_eq!(style.filter.as_ref().map(|f| f.primitives.len()), Some(1));
    assert_eq!(style.marker_end.as_ref().map(|m| m.id.as_str()), Some("m1"));
    assert!(style.marker_start.is_none());
}

#[test]
fn text() {
    let scene = import_str("
<svg xmlns='http://www.w3.org/2000/svg'>
    <text x='10 20' y='30' font-family=\"'Open Sans', sans-serif\" font-size='20'
          font-weight='700' text-anchor='middle'>
        Hello,
        <tspan>World</tspan>
    </text>
</svg>");

    match scene.shape(scene.roots()[0]).kind {
        ShapeKind::Text(ref text) => {
            assert_eq!(text.content, "Hello, World");
            assert_eq!((text.x, text.y), (10.0, 30.0));
            assert_eq!(text.font.family, "Open Sans");
            assert_eq!(text.font.size, 20.0);
            assert!(text.font.bold);
            assert!(!text.font.italic);
        }
        _ => panic!("invalid shape"),
    }
}

#[test]
fn both_readers() {
    let text = "
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'
     xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'
     width='200' height='200' viewBox='0 0 100 100'>
    <defs>
        <linearGradient id='lg1'><stop offset='0.5' stop-color='red'/></linearGradient>
        <rect id='r1' width='5' height='5'/>
    </defs>
    <g inkscape:groupmode='layer' inkscape:label='L1'>
        <path d='M 10 10 A 5 5 0 0 1 20 20 z' fill='url(#lg1)'/>
        <use xlink:href='#r1' x='3'/>
    </g>
    <text x='1' y='2'>a &amp; b</text>
</svg>";

    let mut opt = ImportOptions::default();
    let tree = Scene::from_str_with_opt(text, &opt).unwrap();
    opt.reader = XmlReader::Stream;
    let stream = Scene::from_str_with_opt(text, &opt).unwrap();

    assert_eq!(kinds(&tree), kinds(&stream));
    for (a, b) in tree.descendants().iter().zip(stream.descendants().iter()) {
        let a = tree.shape(*a);
        let b = stream.shape(*b);
        assert_eq!(a.kind, b.kind);
        assert_eq!(a.style, b.style);
        assert!(a.transform.fuzzy_eq(&b.transform));
    }
}

#[test]
fn both_readers_reject_malformed_xml() {
    let list = [
        "<svg xmlns='http://www.w3.org/2000/svg'><g><rect/></svg></g>",
        "<svg xmlns='http://www.w3.org/2000/svg'><g></rect></svg>",
        "<svg xmlns='http://www.w3.org/2000/svg'><g>",
    ];

    for text in &list {
        for reader in &[XmlReader::Tree, XmlReader::Stream] {
            let mut opt = ImportOptions::default();
            opt.reader = *reader;
            assert!(Scene::from_str_with_opt(text, &opt).is_err(), "{:?}: {}", reader, text);
        }
    }
}
