// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_pattern_fill` crate.
//!
//! These drive fills through [`Chart`] and [`PatternRenderer`] the way chart
//! series code does, and check the definitions and attributes that end up in
//! the scene.

use kurbo::Rect;
use understory_pattern_fill::{
    Chart, ChartOptions, DEFAULT_COLORS, DEFAULT_PATTERN_PATHS, FillValue, IdSource,
    NEUTRAL_GRAY, PatternDeclaration, PatternDescriptor, PatternRenderer, RendererCapabilities,
};
use understory_vector_scene::{NodeId, Scene};

fn bar(scene: &mut Scene) -> NodeId {
    let bar = scene.rect(Rect::new(0.0, 0.0, 20.0, 80.0));
    scene.append(scene.root(), bar);
    bar
}

fn chart_bar(chart: &mut Chart) -> NodeId {
    bar(chart.renderer_mut().scene_mut())
}

/// Returns the `<pattern>` node referenced by `element`'s fill.
fn referenced_pattern(scene: &Scene, element: NodeId) -> NodeId {
    let fill = scene.attr(element, "fill").expect("element has a fill");
    let id = fill
        .strip_prefix("url(#")
        .and_then(|s| s.strip_suffix(')'))
        .expect("fill is a local reference");
    scene.find_by_id(id).expect("referenced pattern exists")
}

#[test]
fn plain_colors_match_the_primitive() {
    let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::SVG);
    let before = chart.renderer().store().len();
    let element = chart_bar(&mut chart);

    chart.set_fill(element, "#7cb5ec");
    assert_eq!(chart.renderer().scene().attr(element, "fill"), Some("#7cb5ec"));

    chart.set_fill(element, FillValue::None);
    assert_eq!(chart.renderer().scene().attr(element, "fill"), Some("none"));

    assert_eq!(chart.renderer().store().len(), before);
}

#[test]
fn pattern_fills_reference_new_definitions() {
    let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::SVG);
    let element = chart_bar(&mut chart);
    chart.set_fill(element, PatternDescriptor::path("M 0 0 L 10 10"));

    let scene = chart.renderer().scene();
    let pattern = referenced_pattern(scene, element);
    assert_eq!(scene.parent(pattern), scene.existing_defs());
    assert_eq!(scene.attr(pattern, "id"), Some("understory-pattern-0"));
    assert_eq!(scene.attr(pattern, "patternUnits"), Some("userSpaceOnUse"));
}

#[test]
fn identifiers_increase_and_never_repeat() {
    let mut renderer = PatternRenderer::new(RendererCapabilities::SVG, "n");
    let elements: Vec<NodeId> = (0..5).map(|_| bar(renderer.scene_mut())).collect();
    for element in &elements {
        renderer.set_fill(*element, PatternDescriptor::solid("#f7a35c"));
    }

    let fills: Vec<&str> = elements
        .iter()
        .filter_map(|e| renderer.scene().attr(*e, "fill"))
        .collect();
    assert_eq!(
        fills,
        [
            "url(#n-pattern-0)",
            "url(#n-pattern-1)",
            "url(#n-pattern-2)",
            "url(#n-pattern-3)",
            "url(#n-pattern-4)",
        ]
    );
}

#[test]
fn charts_sharing_a_source_never_collide() {
    let ids = IdSource::new();
    let options = ChartOptions::default();
    let mut first = Chart::with_id_source(&options, RendererCapabilities::SVG, ids.clone());
    let mut second = Chart::with_id_source(&options, RendererCapabilities::SVG, ids.clone());
    let a = chart_bar(&mut first);
    let b = chart_bar(&mut second);

    first.set_fill(a, PatternDescriptor::image("a.png"));
    second.set_fill(b, PatternDescriptor::image("b.png"));
    first.set_fill(a, PatternDescriptor::image("c.png"));

    assert_eq!(first.renderer().scene().attr(a, "fill"), Some("url(#understory-pattern-2)"));
    assert_eq!(second.renderer().scene().attr(b, "fill"), Some("url(#understory-pattern-1)"));
    assert_eq!(ids.issued(), 3);
}

#[test]
fn setup_installs_ten_palette_patterns() {
    let chart = Chart::new(&ChartOptions::default(), RendererCapabilities::SVG);
    let scene = chart.renderer().scene();

    assert_eq!(chart.default_pattern_ids().len(), 10);
    for (i, id) in chart.default_pattern_ids().iter().enumerate() {
        assert_eq!(*id, format!("understory-default-pattern-{i}"));
        let pattern = scene.find_by_id(id).expect("built-in pattern exists");
        let [path] = scene.children(pattern) else {
            panic!("built-in patterns have a single path");
        };
        assert_eq!(scene.attr(*path, "d"), Some(DEFAULT_PATTERN_PATHS[i]));
        assert_eq!(scene.attr(*path, "stroke"), Some(DEFAULT_COLORS[i]));
        assert_eq!(scene.attr(*path, "fill"), Some("transparent"));
    }
}

#[test]
fn built_in_patterns_use_the_chart_palette() {
    let options = ChartOptions {
        colors: Some(vec![String::from("#010101"), String::from("#020202")]),
        namespace: Some(String::from("p")),
        ..Default::default()
    };
    let chart = Chart::new(&options, RendererCapabilities::SVG);
    let scene = chart.renderer().scene();
    let stroke = |i: usize| {
        let pattern = scene
            .find_by_id(&format!("p-default-pattern-{i}"))
            .expect("built-in pattern exists");
        scene.attr(scene.children(pattern)[0], "stroke")
    };
    assert_eq!(stroke(0), Some("#010101"));
    assert_eq!(stroke(1), Some("#020202"));
    assert_eq!(stroke(2), Some("#010101"));
}

#[test]
fn content_precedence() {
    let declared = |declaration: PatternDeclaration| {
        let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::SVG);
        let element = chart_bar(&mut chart);
        chart.set_fill(element, declaration.to_descriptor());
        let scene = chart.renderer().scene();
        let pattern = referenced_pattern(scene, element);
        let tags: Vec<String> = scene
            .children(pattern)
            .iter()
            .filter_map(|c| scene.tag(*c).map(String::from))
            .collect();
        tags
    };

    let everything = PatternDeclaration {
        path: Some(understory_pattern_fill::PathDeclaration::Data(String::from("M 0 0"))),
        image: Some(String::from("tile.png")),
        color: Some(String::from("red")),
        ..Default::default()
    };
    assert_eq!(declared(everything.clone()), ["path"]);

    let no_path = PatternDeclaration {
        path: None,
        ..everything.clone()
    };
    assert_eq!(declared(no_path.clone()), ["image"]);

    let color_only = PatternDeclaration {
        image: None,
        ..no_path
    };
    assert_eq!(declared(color_only), ["rect"]);

    assert!(declared(PatternDeclaration::default()).is_empty());
}

#[test]
fn legacy_surfaces_tile_and_recolor_images() {
    let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::LEGACY);
    let element = chart_bar(&mut chart);

    chart.set_fill(
        element,
        PatternDescriptor::image("tile.png").with_recolor("#fff", "#000"),
    );
    let scene = chart.renderer().scene();
    let node = scene.find_child(element, "fill").expect("override attached");
    assert_eq!(scene.attr(node, "type"), Some("pattern"));
    assert_eq!(scene.attr(node, "color"), Some("#fff"));
    assert_eq!(scene.attr(node, "color2"), Some("#000"));
    assert_eq!(scene.attr(node, "src"), Some("tile.png"));

    chart.set_fill(element, PatternDescriptor::image("tile.png"));
    let scene = chart.renderer().scene();
    assert_eq!(scene.children(element).len(), 1);
    let node = scene.find_child(element, "fill").expect("override attached");
    assert_eq!(scene.attr(node, "type"), Some("tile"));
    assert_eq!(scene.attr(node, "color"), None);
}

#[test]
fn legacy_surfaces_degrade_unrenderable_patterns() {
    let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::LEGACY);
    let element = chart_bar(&mut chart);
    assert_eq!(chart.renderer().scene().existing_defs(), None);
    assert_eq!(chart.renderer().store().len(), 10);

    chart.set_fill(element, "url(#understory-default-pattern-3)");
    assert_eq!(
        chart.renderer().scene().attr(element, "fillcolor"),
        Some(DEFAULT_COLORS[3])
    );

    chart.set_fill(element, PatternDescriptor::path("M 0 0"));
    assert_eq!(
        chart.renderer().scene().attr(element, "fillcolor"),
        Some(NEUTRAL_GRAY)
    );
}

#[test]
fn image_opacity_must_be_in_range() {
    let mut renderer = PatternRenderer::new(RendererCapabilities::SVG, "o");
    let half = bar(renderer.scene_mut());
    let over = bar(renderer.scene_mut());
    renderer.set_fill(half, PatternDescriptor::image("x.png").with_opacity(0.5));
    renderer.set_fill(over, PatternDescriptor::image("x.png").with_opacity(1.5));

    let scene = renderer.scene();
    let image = |element| scene.children(referenced_pattern(scene, element))[0];
    assert_eq!(scene.attr(image(half), "opacity"), Some("0.5"));
    assert_eq!(scene.attr(image(over), "opacity"), None);
}

#[test]
fn identical_descriptors_are_not_deduplicated() {
    let mut renderer = PatternRenderer::new(RendererCapabilities::SVG, "d");
    let descriptor = PatternDescriptor::path("M 0 0 L 10 10").with_background("#ffffff");
    let first = renderer.add_pattern(None, &descriptor);
    let second = renderer.add_pattern(None, &descriptor);

    assert_ne!(first, second);
    assert_eq!(renderer.store().len(), 2);
    let defs = renderer.scene().existing_defs().expect("defs created");
    assert_eq!(renderer.scene().children(defs).len(), 2);
}

#[test]
fn serialized_documents_put_definitions_first() {
    let mut renderer = PatternRenderer::new(RendererCapabilities::SVG, "s");
    let element = bar(renderer.scene_mut());
    renderer.set_fill(element, PatternDescriptor::solid("#90ed7d").with_size(4.0, 4.0));

    let svg = renderer.to_svg(100, 100);
    let defs = svg.find("<defs>").expect("defs serialized");
    let rect = svg.find("fill=\"url(#s-pattern-0)\"").expect("reference serialized");
    assert!(defs < rect);
    assert!(svg.contains(
        "<pattern id=\"s-pattern-0\" patternUnits=\"userSpaceOnUse\" width=\"4\" height=\"4\">"
    ));
}

#[cfg(feature = "serde")]
#[test]
fn options_from_json() {
    let options: ChartOptions = serde_json::from_str(
        r##"{
            "namespace": "json",
            "defs": { "patterns": [
                { "id": "dots", "path": "M 5 5 m -1 0 a 1 1 0 1 1 2 0 a 1 1 0 1 1 -2 0" },
                { "image": "tile.png", "opacity": 0.5, "background": "#ffffff" }
            ] }
        }"##,
    )
    .expect("valid options");
    let chart = Chart::new(&options, RendererCapabilities::SVG);
    assert_eq!(chart.declared_pattern_ids(), ["dots", "json-pattern-0"]);

    let scene = chart.renderer().scene();
    let tile = scene.find_by_id("json-pattern-0").expect("declared pattern exists");
    let tags: Vec<&str> = scene
        .children(tile)
        .iter()
        .filter_map(|c| scene.tag(*c))
        .collect();
    assert_eq!(tags, ["rect", "image"]);
}

#[test]
fn repeated_ids_resolve_to_the_first_definition() {
    let options = ChartOptions {
        namespace: Some(String::from("c")),
        defs: Some(understory_pattern_fill::DefsOptions {
            patterns: vec![PatternDeclaration {
                id: Some(String::from("c-default-pattern-0")),
                image: Some(String::from("tile.png")),
                ..Default::default()
            }],
        }),
        ..Default::default()
    };

    let svg = Chart::new(&options, RendererCapabilities::SVG);
    let first = svg
        .renderer()
        .store()
        .get("c-default-pattern-0")
        .and_then(|def| def.node());
    assert!(first.is_some());
    assert_eq!(first, svg.renderer().scene().find_by_id("c-default-pattern-0"));

    let mut legacy = Chart::new(&options, RendererCapabilities::LEGACY);
    let element = chart_bar(&mut legacy);
    legacy.set_fill(element, "url(#c-default-pattern-0)");
    let scene = legacy.renderer().scene();
    assert_eq!(scene.attr(element, "fillcolor"), Some(DEFAULT_COLORS[0]));
    assert!(scene.find_child(element, "fill").is_none());
}

#[test]
fn legacy_plain_colors_replace_tiles() {
    let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::LEGACY);
    let element = chart_bar(&mut chart);
    chart.set_fill(element, PatternDescriptor::image("tile.png"));
    chart.set_fill(element, "red");

    let scene = chart.renderer().scene();
    assert!(scene.find_child(element, "fill").is_none());
    assert_eq!(scene.attr(element, "fillcolor"), Some("red"));
}

#[cfg(feature = "serde")]
#[test]
fn legacy_recolor_from_json() {
    let value: FillValue =
        serde_json::from_str(r##"{ "pattern": "tile.png", "color1": "#fff", "color2": "#000" }"##)
            .expect("valid fill value");
    let mut chart = Chart::new(&ChartOptions::default(), RendererCapabilities::LEGACY);
    let element = chart_bar(&mut chart);
    chart.set_fill(element, value);

    let scene = chart.renderer().scene();
    let node = scene.find_child(element, "fill").expect("override attached");
    assert_eq!(scene.attr(node, "type"), Some("pattern"));
    assert_eq!(scene.attr(node, "src"), Some("tile.png"));
    assert_eq!(scene.attr(element, "fillcolor"), None);
}
