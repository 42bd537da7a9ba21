// Copyright 2018 Evgeniy Reizner
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use] extern crate svgscene;
#[macro_use] extern crate pretty_assertions;

use std::rc::Rc;

use svgscene::paint::{BaseGradient, LinearGradient, SpreadMethod, Units};
use svgscene::{
    export,
    Color,
    Indent,
    Length,
    LengthUnit,
    Paint,
    Path,
    Rect,
    Scene,
    ShapeKind,
    ToStringWithOptions,
    Transform,
    WriteOptions,
};

fn write_options() -> WriteOptions {
    let mut opt = WriteOptions::default();
    opt.use_single_quote = true;
    opt.write_declaration = false;
    opt.indent = Indent::None;
    opt
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-4
}

fn rect_approx_eq(a: &Rect, b: &Rect) -> bool {
    approx_eq(a.x, b.x)
        && approx_eq(a.y, b.y)
        && approx_eq(a.width, b.width)
        && approx_eq(a.height, b.height)
}

#[test]
fn write_path() {
    let mut scene = Scene::new();
    let id = scene.append(ShapeKind::Path(Path::from_data("M 10 20 L 30 40")), None);
    scene.shape_mut(id).style.fill = Some(Paint::Color(Color::new_rgb(255, 0, 0)));

    assert_eq_text!(scene.to_string_with_opt(&write_options()),
"<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink' \
xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape' \
xmlns:sodipodi='http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd' \
version='1.1' width='50' height='60' viewBox='0 0 50 60'>\
<path d='M 10 20 L 30 40' fill='#ff0000'/>\
</svg>");
}

#[test]
fn write_indented() {
    let mut scene = Scene::from_str("
<svg xmlns='http://www.w3.org/2000/svg' width='10' height='10'>
    <g><line x2='5'/></g>
</svg>").unwrap();

    let id = scene.roots()[0];
    scene.shape_mut(id).transform = Transform::from_translate(1.0, 2.0);

    let mut opt = WriteOptions::default();
    opt.write_declaration = false;
    opt.indent = Indent::Spaces(2);
    opt.simplify_transform_matrices = true;

    assert_eq_text!(scene.to_string_with_opt(&opt).trim_end(),
"<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
xmlns:inkscape=\"http://www.inkscape.org/namespaces/inkscape\" \
xmlns:sodipodi=\"http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd\" \
version=\"1.1\" width=\"10\" height=\"10\" viewBox=\"0 0 10 10\">
  <g transform=\"translate(1 2)\">
    <line x1=\"0\" y1=\"0\" x2=\"5\" y2=\"0\"/>
  </g>
</svg>");
}

#[test]
fn shared_definitions_are_written_once() {
    let scene = Scene::from_str("
<svg xmlns='http://www.w3.org/2000/svg'>
    <defs>
        <linearGradient id='lg1'><stop offset='1' stop-color='red'/></linearGradient>
        <filter id='f1'><feGaussianBlur stdDeviation='2'/></filter>
    </defs>
    <rect width='10' height='10' fill='url(#lg1)' filter='url(#f1)'/>
    <rect width='10' height='10' stroke='url(#lg1)' filter='url(#f1)'/>
</svg>").unwrap();

    let root = export(&scene, &write_options());
    let defs = &root.children[0];
    assert_eq!(defs.name, "defs");

    let names: Vec<_> = defs.children.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["linearGradient", "filter"]);
    assert_eq!(defs.children[0].attribute("id"), Some("lg1"));

    assert_eq!(root.children[1].attribute("fill"), Some("url(#lg1)"));
    assert_eq!(root.children[2].attribute("stroke"), Some("url(#lg1)"));
    assert_eq!(root.children[2].attribute("filter"), Some("url(#f1)"));
}

fn gradient(id: &str, color: Color) -> Paint {
    Paint::LinearGradient(Rc::new(LinearGradient {
        id: id.to_string(),
        x1: Length::new(0.0, LengthUnit::Percent),
        y1: Length::new(0.0, LengthUnit::Percent),
        x2: Length::new(100.0, LengthUnit::Percent),
        y2: Length::new(0.0, LengthUnit::Percent),
        base: BaseGradient {
            units: Units::ObjectBoundingBox,
            transform: Transform::default(),
            spread_method: SpreadMethod::Pad,
            stops: vec![svgscene::paint::Stop { offset: 0.0, color, opacity: 1.0 }],
        },
    }))
}

#[test]
fn clashing_ids() {
    let mut scene = Scene::new();
    for (id, color) in &[("lg", Color::black()), ("lg", Color::white()), ("", Color::black())] {
        let shape = scene.append(ShapeKind::Line { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 }, None);
        scene.shape_mut(shape).style.stroke = Some(gradient(id, *color));
    }

    let root = export(&scene, &write_options());
    let ids: Vec<_> = root.children[0].children.iter()
        .map(|e| e.attribute("id").unwrap_or(""))
        .collect();
    assert_eq!(ids, vec!["lg", "linearGradient1", "linearGradient2"]);
    assert_eq!(root.children[2].attribute("stroke"), Some("url(#linearGradient1)"));
}

#[test]
fn shared_paint_is_written_once() {
    let paint = gradient("lg", Color::black());
    let mut scene = Scene::new();
    for _ in 0..3 {
        let shape = scene.append(ShapeKind::Line { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 }, None);
        scene.shape_mut(shape).style.stroke = Some(paint.clone());
        scene.shape_mut(shape).style.fill = Some(paint.clone());
    }

    let root = export(&scene, &write_options());
    assert_eq!(root.children[0].children.len(), 1);
    assert_eq!(root.children[3].attribute("fill"), Some("url(#lg)"));
}

#[test]
fn canvas_size() {
    let scene = Scene::from_str("
<svg xmlns='http://www.w3.org/2000/svg' width='300' height='200' viewBox='0 0 30 20'>
    <rect width='10' height='10'/>
</svg>").unwrap();

    let root = export(&scene, &write_options());
    assert_eq!(root.attribute("width"), Some("300"));
    assert_eq!(root.attribute("height"), Some("200"));
    assert_eq!(root.attribute("viewBox"), Some("0 0 300 200"));
    assert_eq!(root.children[0].attribute("transform"), Some("matrix(10 0 0 10 0 0)"));
}

#[test]
fn rect_radii_round_trip() {
    let mut scene = Scene::new();
    let kinds = [
        ShapeKind::Rect { x: 0.0, y: 0.0, width: 20.0, height: 20.0, rx: 5.0, ry: 0.0 },
        ShapeKind::Rect { x: 0.0, y: 0.0, width: 20.0, height: 20.0, rx: 0.0, ry: 4.0 },
        ShapeKind::Rect { x: 0.0, y: 0.0, width: 20.0, height: 20.0, rx: 3.0, ry: 3.0 },
        ShapeKind::Rect { x: 0.0, y: 0.0, width: 20.0, height: 20.0, rx: 0.0, ry: 0.0 },
    ];
    for kind in &kinds {
        scene.append(kind.clone(), None);
    }

    let saved = scene.to_string_with_opt(&write_options());
    let scene2 = Scene::from_str(&saved).unwrap();
    let kinds2: Vec<_> = scene2.roots().iter().map(|id| scene2.shape(*id).kind.clone()).collect();
    assert_eq!(kinds2, kinds.to_vec());

    let root = export(&scene, &write_options());
    assert_eq!(root.children[3].attribute("rx"), None);
}

#[test]
fn round_trip() {
    let text = "
<svg xmlns='http://www.w3.org/2000/svg' xmlns:xlink='http://www.w3.org/1999/xlink'
     xmlns:inkscape='http://www.inkscape.org/namespaces/inkscape'
     width='400' height='300' viewBox='0 0 200 150'>
    <defs>
        <radialGradient id='rg1' cx='0.5' fx='0.2'>
            <stop offset='0' stop-color='#fff'/>
            <stop offset='1' stop-color='#000' stop-opacity='0.3'/>
        </radialGradient>
        <marker id='m1' orient='auto'><path d='M 0 0 L 3 1.5 L 0 3 z'/></marker>
        <filter id='f1'><feDropShadow dx='1' dy='1' stdDeviation='1'/></filter>
        <symbol id='s1'><circle r='4'/></symbol>
    </defs>
    <g inkscape:groupmode='layer' inkscape:label='Main'>
        <rect x='10' y='10' width='40' height='20' rx='3' fill='url(#rg1)'/>
        <g transform='rotate(30 50 50)' opacity='0.5'>
            <ellipse cx='50' cy='50' rx='20' ry='10' stroke='blue' stroke-dasharray='2 1'/>
            <path d='M 10 80 Q 40 20 70 80 T 130 80' marker-end='url(#m1)'/>
        </g>
    </g>
    <g inkscape:groupmode='layer' inkscape:label='Hidden' style='display:none'>
        <polygon points='0,0 10,0 5,8' filter='url(#f1)'/>
    </g>
    <polyline points='100,100 120,110 140,100' transform='skewX(10)'/>
    <line x1='0' y1='140' x2='200' y2='140' stroke-width='2'/>
    <use xlink:href='#s1' x='180' y='20'/>
    <text x='20' y='120' font-size='10' font-style='italic'>Label</text>
</svg>";

    let scene1 = Scene::from_str(text).unwrap();
    let saved = scene1.to_string_with_opt(&WriteOptions::default());
    let scene2 = Scene::from_str(&saved).unwrap();

    let ids1 = scene1.descendants();
    let ids2 = scene2.descendants();
    assert_eq!(ids1.len(), ids2.len());

    for (id1, id2) in ids1.iter().zip(ids2.iter()) {
        let s1 = scene1.shape(*id1);
        let s2 = scene2.shape(*id2);
        assert_eq!(s1.kind.name(), s2.kind.name());
        assert_eq!(s1.level, s2.level);

        match (scene1.bounding_box(*id1), scene2.bounding_box(*id2)) {
            (Some(r1), Some(r2)) => {
                assert!(rect_approx_eq(&r1, &r2), "{:?} != {:?}", r1, r2);
            }
            (None, None) => {}
            (r1, r2) => panic!("{:?} != {:?}", r1, r2),
        }

        assert_eq!(s1.style.fill.as_ref().and_then(|p| p.link_id().map(|_| ())),
                   s2.style.fill.as_ref().and_then(|p| p.link_id().map(|_| ())));
        assert_eq!(s1.style.filter.is_some(), s2.style.filter.is_some());
        assert_eq!(s1.style.marker_end.is_some(), s2.style.marker_end.is_some());
        assert_eq!(s1.style.stroke_dasharray, s2.style.stroke_dasharray);
    }

    let layer_flags = |scene: &Scene| -> Vec<bool> {
        scene.descendants().iter()
            .filter_map(|id| match scene.shape(*id).kind {
                ShapeKind::Layer(ref layer) => Some(layer.visible),
                _ => None,
            })
            .collect()
    };
    assert_eq!(layer_flags(&scene1), vec![true, false]);
    assert_eq!(layer_flags(&scene2), vec![true, false]);
    assert_eq!(scene1.canvas(), scene2.canvas());
}
