//! Right triangle with an optional right-angle mark, highlighted angle and
//! side labels.

use crate::container::Container;
use crate::log::{debug, warn};
use crate::render::bounds::fit;
use crate::render::context::Context;
use crate::render::defaults;
use crate::render::geometry::split_edge_key;
use crate::spec::RightTriangleSpec;
use crate::types::ContextOptions;

use super::{centre_of, draw_outline, draw_points_around, targets};

pub fn build(container: &mut Container, spec: &RightTriangleSpec) -> Context {
    let vertices = &spec.vertices;
    let bounds = fit(vertices.values().copied(), defaults::FIT_MARGIN);
    let mut ctx = Context::create(container, bounds, spec.frame.options(ContextOptions::default()));
    let centroid = centre_of(vertices);

    let names: Vec<&str> = vertices.names().collect();
    let points: Vec<_> = vertices.values().copied().collect();
    let n = points.len();

    if n >= 3 {
        draw_outline(&mut ctx, &points);

        // the corner at index i is bounded by its two neighbours in vertex order
        let corner = |name: &str| {
            let i = names.iter().position(|&v| v == name)?;
            Some((points[i], points[(i + n - 1) % n], points[(i + 1) % n]))
        };

        if let Some(name) = &spec.right_angle {
            match corner(name) {
                Some((v, a, b)) => {
                    ctx.right_angle_mark(v, a, b);
                }
                None => warn!(vertex = %name, "right angle at unknown vertex"),
            }
        }
        if let Some(name) = &spec.highlight_angle {
            match corner(name) {
                Some((v, a, b)) => {
                    ctx.angle_mark(
                        v,
                        a,
                        b,
                        defaults::ANGLE_RADIUS,
                        spec.angle_label.as_deref(),
                        defaults::ANGLE_COLOR,
                    );
                }
                None => warn!(vertex = %name, "highlighted angle at unknown vertex"),
            }
        }
    } else {
        warn!(count = n, "right triangle needs three vertices; drawing points only");
    }

    for (key, text) in spec.labels.iter() {
        match split_edge_key(key, |name| vertices.contains(name)) {
            Some((a, b)) => {
                if let (Some(pa), Some(pb)) = (vertices.point(a), vertices.point(b)) {
                    ctx.side_label(pa, pb, text, centroid);
                }
            }
            None => warn!(edge = %key, "side label on unknown edge"),
        }
    }

    draw_points_around(&mut ctx, vertices, centroid);
    targets::register(&mut ctx, &spec.targets, vertices);
    debug!(vertices = n, "right triangle");
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::Node;
    use crate::spec::{DiagramSpec, parse_spec};

    fn spec(json: &str) -> RightTriangleSpec {
        match parse_spec("<test>", json).unwrap() {
            DiagramSpec::RightTriangle(spec) => spec,
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn marks_and_labels_are_drawn() {
        let spec = spec(
            r#"{"type": "right-triangle",
                "vertices": {"A": [0, 0], "B": [4, 0], "C": [0, 3]},
                "rightAngle": "A", "highlightAngle": "B", "angleLabel": "β",
                "labels": {"AB": "4", "BC": "5"}}"#,
        );
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let svg = ctx.surface().borrow().to_svg();
        assert!(svg.contains("<polygon"));
        assert!(svg.contains("<polyline"), "right-angle mark");
        assert!(svg.contains("class=\"geo-angle\""));
        for text in [">A<", ">B<", ">C<", ">4<", ">5<", ">β<"] {
            assert!(svg.contains(text), "missing {text}");
        }
    }

    #[test]
    fn vertex_labels_point_away_from_centroid() {
        let spec = spec(
            r#"{"type": "right-triangle", "vertices": {"A": [0, 0], "B": [4, 0], "C": [0, 3]}}"#,
        );
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let a = ctx.to_device(glam::dvec2(0.0, 0.0));
        let surface = ctx.surface();
        let surface = surface.borrow();
        let label_a = surface
            .ids()
            .into_iter()
            .filter_map(|id| surface.node(id).cloned())
            .find_map(|node| match node {
                Node::Group { children, .. } => children.into_iter().find_map(|c| match c {
                    Node::Text { at, content, .. } if content == "A" => Some(at),
                    _ => None,
                }),
                _ => None,
            })
            .unwrap();
        // A is the bottom-left corner: its label goes left and down on screen
        assert!(label_a.x < a.x && label_a.y > a.y);
    }

    #[test]
    fn two_vertices_draw_points_only() {
        let spec = spec(r#"{"type": "right-triangle", "vertices": {"A": [0, 0], "B": [4, 0]}}"#);
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let svg = ctx.surface().borrow().to_svg();
        assert!(!svg.contains("<polygon"));
        assert_eq!(svg.matches("class=\"geo-point\"").count(), 2);
    }
}
