//! Dispatcher and builder behaviour as seen from the SVG output.

use geofig::{Container, Figure, parse_spec, render};
use glam::{DVec2, dvec2};
use regex_lite::Regex;

/// Render a spec and return its figure plus the SVG of the one surface.
fn draw(source: &str) -> (Figure, String) {
    let spec = parse_spec("<test>", source).unwrap();
    let mut container = Container::new();
    let figure = render(&mut container, Some(&spec)).expect("figure");
    assert_eq!(container.figures().count(), 1);
    let svg = figure.surface().borrow().to_svg();
    (figure, svg)
}

fn attr(element: &str, name: &str) -> Option<String> {
    let re = Regex::new(&format!(r#"\s{name}="([^"]*)""#)).unwrap();
    re.captures(element).map(|c| c[1].to_string())
}

/// `(name, centre)` of every hit-region in document order.
fn targets(svg: &str) -> Vec<(String, DVec2)> {
    let circle = Regex::new(r#"<circle[^>]*class="geo-target"[^>]*>"#).unwrap();
    circle
        .find_iter(svg)
        .map(|m| {
            let el = m.as_str();
            let num = |n: &str| attr(el, n).unwrap().parse::<f64>().unwrap();
            (attr(el, "data-name").unwrap(), dvec2(num("cx"), num("cy")))
        })
        .collect()
}

fn count(svg: &str, needle: &str) -> usize {
    svg.matches(needle).count()
}

#[test]
fn every_type_routes_to_its_builder() {
    let cases = [
        r#"{"type": "right-triangle", "vertices": {"A": [0, 0], "B": [3, 0], "C": [0, 2]}}"#,
        r#"{"type": "parallel-lines", "lines": [{"y": 1}, {"y": -1}]}"#,
        r#"{"type": "thales", "vertices": {"A": [0, 3], "B": [-2, 0], "C": [2, 0]}}"#,
        r#"{"type": "symmetry", "center": [0, 0], "points": {"A": [1, 1]}}"#,
        r#"{"type": "coordinate-plane", "points": {"A": [1, 1]}}"#,
        r#"{"type": "grid-place", "bounds": {"xMin": 0, "xMax": 4, "yMin": 0, "yMax": 4}}"#,
        r#"{"type": "volume", "shape": "cylinder"}"#,
    ];
    for source in cases {
        let (figure, svg) = draw(source);
        assert!(svg.starts_with("<svg"), "{source}");
        let solid = source.contains("volume");
        assert_eq!(figure.context().is_none(), solid, "{source}");
    }
}

#[test]
fn unknown_solid_draws_nothing() {
    let spec = parse_spec("<test>", r#"{"type": "volume", "shape": "torus"}"#).unwrap();
    let mut container = Container::new();
    assert!(render(&mut container, Some(&spec)).is_none());
    assert!(container.is_empty());
}

#[test]
fn frame_options_size_the_surface() {
    let (figure, svg) = draw(
        r#"{"type": "symmetry", "center": [0, 0], "points": {"A": [2, 1]},
            "width": 400, "height": 200, "padding": 10}"#,
    );
    let ctx = figure.context().unwrap();
    assert_eq!(ctx.viewport().size(), dvec2(400.0, 200.0));
    assert!(svg.contains(r#"width="400""#));
    assert!(svg.contains(r#"height="200""#));
}

#[test]
fn right_triangle_targets_sit_on_vertices_and_edges() {
    let (figure, svg) = draw(
        r#"{"type": "right-triangle",
            "vertices": {"A": [0, 0], "B": [4, 0], "C": [0, 3]},
            "rightAngle": "A",
            "labels": {"BC": "5"},
            "targets": [
                {"name": "hyp", "kind": "edge", "edge": ["B", "C"]},
                {"name": "A", "kind": "vertex", "vertex": "A"}
            ]}"#,
    );
    let ctx = figure.context().unwrap();
    let found = targets(&svg);
    assert_eq!(found.len(), 2);
    assert_eq!(found[0].0, "hyp");
    assert!((found[0].1 - ctx.to_device(dvec2(2.0, 1.5))).length() < 0.01);
    assert!((found[1].1 - ctx.to_device(dvec2(0.0, 0.0))).length() < 0.01);
    assert_eq!(count(&svg, r#"class="geo-point""#), 3);
    assert_eq!(count(&svg, "<polyline"), 1);
}

#[test]
fn unresolvable_targets_are_skipped() {
    let (_, svg) = draw(
        r#"{"type": "right-triangle",
            "vertices": {"A": [0, 0], "B": [4, 0], "C": [0, 3]},
            "targets": [
                {"name": "ghost", "kind": "vertex", "vertex": "Z"},
                {"name": "B", "kind": "vertex", "vertex": "B"}
            ]}"#,
    );
    let names: Vec<String> = targets(&svg).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names, ["B"]);
}

#[test]
fn parallel_lines_mark_angles_and_crossings() {
    let (_, svg) = draw(
        r#"{"type": "parallel-lines",
            "lines": [{"y": 2, "label": "d1"}, {"y": -2, "label": "d2"}],
            "points": ["A", "B"],
            "angles": [{"at": "A", "side": "right", "label": "40°"},
                       {"at": "B", "side": "left", "vertical": "below"}],
            "showParallelMarks": true,
            "targets": [{"name": "x", "kind": "angle-region", "at": "B", "side": "right"}]}"#,
    );
    assert_eq!(count(&svg, r#"class="geo-angle""#), 2);
    assert_eq!(count(&svg, r#"class="geo-parallel""#), 2);
    assert_eq!(count(&svg, r#"class="geo-point""#), 2);
    assert_eq!(targets(&svg).len(), 1);
}

#[test]
fn thales_cut_points_follow_their_ratio() {
    let (figure, svg) = draw(
        r#"{"type": "thales",
            "vertices": {"A": [0, 4], "B": [-4, 0], "C": [4, 0]},
            "cuts": {"M": {"on": ["A", "B"], "ratio": 0.25},
                     "N": {"on": ["A", "C"], "ratio": 0.25}},
            "targets": [{"name": "M", "kind": "vertex", "vertex": "M"}]}"#,
    );
    let ctx = figure.context().unwrap();
    let found = targets(&svg);
    assert!((found[0].1 - ctx.to_device(dvec2(-1.0, 3.0))).length() < 0.01);
    // three vertices and two cut points
    assert_eq!(count(&svg, r#"class="geo-point""#), 5);
}

#[test]
fn symmetry_images_are_point_reflections() {
    let (figure, svg) = draw(
        r#"{"type": "symmetry", "center": [1, 1], "points": {"A": [3, 2]},
            "targets": [{"name": "img", "kind": "vertex", "vertex": "A'"}]}"#,
    );
    let ctx = figure.context().unwrap();
    let found = targets(&svg);
    assert_eq!(found.len(), 1);
    assert!((found[0].1 - ctx.to_device(dvec2(-1.0, 0.0))).length() < 0.01);
}

#[test]
fn coordinate_plane_draws_grid_vectors_and_lines() {
    let (_, svg) = draw(
        r#"{"type": "coordinate-plane",
            "bounds": {"xMin": -3, "xMax": 3, "yMin": -3, "yMax": 3},
            "points": {"A": [0, 1], "B": [2, 2]},
            "vectors": [{"from": "A", "to": "B", "label": "v"}],
            "lineEqs": [{"slope": 1, "intercept": 0}]}"#,
    );
    assert_eq!(count(&svg, r#"class="geo-grid""#), 1);
    assert_eq!(count(&svg, "<marker"), 1);
    assert!(svg.contains("marker-end"));
    assert_eq!(count(&svg, r#"class="geo-point""#), 2);
}

#[test]
fn coordinate_plane_without_grid() {
    let (_, svg) = draw(
        r#"{"type": "coordinate-plane", "showGrid": false, "points": {"A": [1, 1]}}"#,
    );
    assert_eq!(count(&svg, r#"class="geo-grid""#), 0);
}

#[test]
fn solids_draw_hidden_edges_dashed() {
    for shape in ["cylinder", "cone", "pyramid", "prism"] {
        let (_, svg) = draw(&format!(
            r#"{{"type": "volume", "shape": "{shape}", "dimensions": {{"h": 4, "r": 2, "a": 3}}}}"#
        ));
        assert!(svg.contains("stroke-dasharray"), "{shape}");
    }
}
