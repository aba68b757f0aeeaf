//! Central symmetry: points, their images through a centre, and the
//! segments joining them.

use glam::{DVec2, dvec2};

use crate::container::Container;
use crate::log::debug;
use crate::render::bounds::fit;
use crate::render::context::{Context, PointStyle};
use crate::render::defaults;
use crate::render::geometry::reflect;
use crate::render::surface::Style;
use crate::spec::{NamedPoints, SymmetrySpec};
use crate::types::ContextOptions;

use super::{radial_offset, targets};

/// Images of every point, named `P'`.
pub fn images(points: &NamedPoints, center: DVec2) -> NamedPoints {
    points
        .iter()
        .map(|(name, &p)| (format!("{name}'"), reflect(p, center)))
        .collect()
}

pub fn build(container: &mut Container, spec: &SymmetrySpec) -> Context {
    let o = spec.center;
    let images = images(&spec.points, o);

    // hidden images still count, so the figure keeps room for the answer
    let mut extent: Vec<DVec2> = spec.points.values().copied().collect();
    extent.extend(images.values().copied());
    extent.push(o);
    let bounds = fit(extent, defaults::FIT_MARGIN);
    let mut ctx = Context::create(container, bounds, spec.frame.options(ContextOptions::default()));

    if spec.show_image && spec.show_segment {
        let dashed = Style::stroked(defaults::AXIS_COLOR, defaults::THIN_STROKE_WIDTH * 1.5);
        for (&p, &q) in spec.points.values().zip(images.values()) {
            ctx.dashed_line(p, q, &dashed);
        }
    }

    if spec.show_midpoint {
        // a cross at O, one stroke along P-P' and one across it, sized in pixels
        let s = defaults::MIDPOINT_CROSS / ctx.scale();
        let along = spec
            .points
            .values()
            .find_map(|&p| (o - p).try_normalize())
            .unwrap_or(dvec2(1.0, 1.0).normalize());
        let across = along.perp();
        let style = Style::stroked(defaults::ANGLE_COLOR, defaults::STROKE_WIDTH);
        ctx.segment(o - along * s, o + along * s, &style);
        ctx.segment(o - across * s, o + across * s, &style);
    }

    for (name, &p) in spec.points.iter() {
        let style = PointStyle::default().with_centered_label(radial_offset(&ctx, p, o));
        ctx.point(p, Some(name), &style);
    }
    if spec.show_image {
        for (name, &q) in images.iter() {
            let style = PointStyle::colored(defaults::VECTOR_COLOR)
                .with_centered_label(radial_offset(&ctx, q, o));
            ctx.point(q, Some(name), &style);
        }
    }
    let centre_style = PointStyle::colored(defaults::ANGLE_COLOR)
        .with_centered_label(dvec2(0.0, defaults::VERTEX_LABEL_DISTANCE));
    ctx.point(o, Some(spec.center_label.as_str()), &centre_style);

    let mut known = spec.points.clone();
    if spec.show_image {
        for (name, &q) in images.iter() {
            known.insert(name, q);
        }
    }
    known.insert(spec.center_label.as_str(), o);
    targets::register(&mut ctx, &spec.targets, &known);
    debug!(points = spec.points.len(), "symmetry");
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::Node;
    use crate::spec::{DiagramSpec, parse_spec};

    #[test]
    fn images_reflect_through_the_centre() {
        let points: NamedPoints = [("P", dvec2(5.0, 3.0))].into_iter().collect();
        let images = images(&points, dvec2(2.0, 3.0));
        assert_eq!(images.point("P'"), Some(dvec2(-1.0, 3.0)));
        let back = super::images(&images, dvec2(2.0, 3.0));
        assert_eq!(back.point("P''"), Some(dvec2(5.0, 3.0)));
    }

    #[test]
    fn bounds_cover_images() {
        let DiagramSpec::Symmetry(spec) = parse_spec(
            "<test>",
            r#"{"type": "symmetry", "center": [2, 3], "points": {"P": [5, 3]},
                "showMidpoint": true,
                "targets": [{"name": "img", "kind": "vertex", "vertex": "P'"}]}"#,
        )
        .unwrap() else {
            panic!("wrong variant");
        };
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let b = ctx.bounds();
        assert!(b.contains(dvec2(-1.0, 3.0)) && b.contains(dvec2(5.0, 3.0)));
        let svg = ctx.surface().borrow().to_svg();
        assert!(svg.contains("stroke-dasharray=\"6,4\""));
        assert_eq!(svg.matches("class=\"geo-point\"").count(), 3);
        assert!(svg.contains(">O<"));
        assert_eq!(ctx.surface().borrow().hit_regions().len(), 1);
    }

    #[test]
    fn images_can_be_hidden() {
        let DiagramSpec::Symmetry(spec) = parse_spec(
            "<test>",
            r#"{"type": "symmetry", "center": [0, 0], "points": {"A": [1, 1]}, "showImage": false}"#,
        )
        .unwrap() else {
            panic!("wrong variant");
        };
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let svg = ctx.surface().borrow().to_svg();
        assert_eq!(svg.matches("class=\"geo-point\"").count(), 2);
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn hidden_images_still_fit() {
        let DiagramSpec::Symmetry(spec) = parse_spec(
            "<test>",
            r#"{"type": "symmetry", "center": [0, 0], "points": {"A": [3, 0]}, "showImage": false}"#,
        )
        .unwrap() else {
            panic!("wrong variant");
        };
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        assert!(ctx.bounds().contains(dvec2(-3.0, 0.0)));
    }

    #[test]
    fn midpoint_cross_follows_the_segment() {
        let DiagramSpec::Symmetry(spec) = parse_spec(
            "<test>",
            r#"{"type": "symmetry", "center": [0, 0], "points": {"A": [3, 0]},
                "showSegment": false, "showMidpoint": true}"#,
        )
        .unwrap() else {
            panic!("wrong variant");
        };
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let surface = ctx.surface();
        let surface = surface.borrow();
        let strokes: Vec<DVec2> = surface
            .ids()
            .into_iter()
            .filter_map(|id| match surface.node(id)? {
                Node::Line { from, to, .. } => Some(*to - *from),
                _ => None,
            })
            .collect();
        assert_eq!(strokes.len(), 2);
        assert!(strokes[0].y.abs() < 1e-9 && strokes[0].x.abs() > 1.0);
        assert!(strokes[1].x.abs() < 1e-9 && strokes[1].y.abs() > 1.0);
    }
}
