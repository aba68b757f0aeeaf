//! Thalès configurations: a triangle cut parallel to one side, or the
//! butterfly of two chords crossing between parallel sides.

use glam::DVec2;

use crate::container::Container;
use crate::log::{debug, warn};
use crate::render::bounds::fit;
use crate::render::context::Context;
use crate::render::defaults;
use crate::render::geometry::{lerp, line_intersection, split_edge_key};
use crate::render::surface::Style;
use crate::spec::{NamedMap, NamedPoints, ThalesConfig, ThalesSpec};
use crate::types::ContextOptions;

use super::{centre_of, draw_outline, draw_points_around, edge_style, targets};

pub fn build(container: &mut Container, spec: &ThalesSpec) -> Context {
    match spec.config {
        ThalesConfig::Butterfly => butterfly(container, spec),
        ThalesConfig::Triangle => triangle_cut(container, spec),
    }
}

/// Whichever of `primary` / `fallback` actually has points.
fn points_or<'a>(primary: &'a NamedPoints, fallback: &'a NamedPoints) -> &'a NamedPoints {
    if primary.is_empty() { fallback } else { primary }
}

fn side_labels(ctx: &mut Context, labels: &NamedMap<String>, known: &NamedPoints, reference: DVec2) {
    for (key, text) in labels.iter() {
        let ends = split_edge_key(key, |name| known.contains(name))
            .and_then(|(a, b)| Some((known.point(a)?, known.point(b)?)));
        match ends {
            Some((a, b)) => {
                ctx.side_label(a, b, text, reference);
            }
            None => warn!(edge = %key, "side label on unknown edge"),
        }
    }
}

/// Cut points `from + (to - from) * ratio`, in spec order.
fn cut_points(spec: &ThalesSpec, vertices: &NamedPoints) -> NamedPoints {
    let mut cuts = NamedPoints::new();
    for (name, cut) in spec.cuts.iter() {
        let [from, to] = &cut.on;
        match (vertices.point(from), vertices.point(to)) {
            (Some(a), Some(b)) => cuts.insert(name, lerp(a, b, cut.ratio)),
            _ => warn!(cut = %name, "cut on unknown vertices, skipped"),
        }
    }
    cuts
}

/// The side opposite the vertex both cuts start from: `[B, C]` for cuts on
/// `A→B` and `A→C`.
fn cut_base(spec: &ThalesSpec) -> Option<[&str; 2]> {
    let mut cuts = spec.cuts.values();
    let [a1, b1] = cuts.next()?.on.each_ref().map(String::as_str);
    let [a2, b2] = cuts.next()?.on.each_ref().map(String::as_str);
    if a1 == a2 {
        Some([b1, b2])
    } else if a1 == b2 {
        Some([b1, a2])
    } else if b1 == a2 {
        Some([a1, b2])
    } else if b1 == b2 {
        Some([a1, a2])
    } else {
        None
    }
}

fn triangle_cut(container: &mut Container, spec: &ThalesSpec) -> Context {
    let vertices = points_or(&spec.vertices, &spec.points);
    let cuts = cut_points(spec, vertices);
    let bounds = fit(
        vertices.values().chain(cuts.values()).copied(),
        defaults::FIT_MARGIN,
    );
    let mut ctx = Context::create(container, bounds, spec.frame.options(ContextOptions::default()));
    let centroid = centre_of(vertices);

    let corners: Vec<DVec2> = vertices.values().copied().collect();
    if corners.len() >= 3 {
        draw_outline(&mut ctx, &corners);
    } else {
        warn!(count = corners.len(), "thales triangle needs three vertices");
    }

    let cut: Vec<DVec2> = cuts.values().copied().take(2).collect();
    if let [p, q] = cut[..] {
        ctx.segment(p, q, &Style::stroked(defaults::ANGLE_COLOR, defaults::STROKE_WIDTH));
        if spec.show_parallel.unwrap_or(false) {
            ctx.parallel_marks(p, q, 1);
            let base = cut_base(spec).and_then(|[b, c]| Some((vertices.point(b)?, vertices.point(c)?)));
            match base {
                Some((b, c)) => {
                    ctx.parallel_marks(b, c, 1);
                }
                None => warn!("cuts share no vertex; base side not marked"),
            }
        }
    }

    let mut known = vertices.clone();
    for (name, &p) in cuts.iter() {
        known.insert(name, p);
    }
    side_labels(&mut ctx, &spec.labels, &known, centroid);
    draw_points_around(&mut ctx, &known, centroid);

    targets::register(&mut ctx, &spec.targets, &known);
    debug!(cuts = cuts.len(), "thales triangle");
    ctx
}

fn butterfly(container: &mut Container, spec: &ThalesSpec) -> Context {
    let given = points_or(&spec.points, &spec.vertices);
    let center_name = spec.center.as_deref().unwrap_or("O");
    let outer: Vec<(&str, DVec2)> = given
        .iter()
        .filter(|(name, _)| *name != center_name)
        .map(|(name, &p)| (name, p))
        .take(4)
        .collect();

    let center = match given.point(center_name) {
        Some(o) => Some(o),
        None => match outer[..] {
            [(_, p0), (_, p1), (_, p2), (_, p3)] => line_intersection(p0, p2, p1, p3),
            _ => None,
        },
    };

    let mut known: NamedPoints = outer.iter().map(|&(n, p)| (n, p)).collect();
    if let Some(o) = center {
        known.insert(center_name, o);
    }

    let bounds = fit(known.values().copied(), defaults::FIT_MARGIN);
    let mut ctx = Context::create(container, bounds, spec.frame.options(ContextOptions::default()));
    let reference = center.unwrap_or_else(|| centre_of(&known));

    if let [(_, p0), (_, p1), (_, p2), (_, p3)] = outer[..] {
        let edge = edge_style();
        ctx.segment(p0, p2, &edge);
        ctx.segment(p1, p3, &edge);
        ctx.segment(p0, p1, &edge);
        ctx.segment(p2, p3, &edge);
        if spec.show_parallel.unwrap_or(true) {
            ctx.parallel_marks(p0, p1, 1);
            ctx.parallel_marks(p2, p3, 1);
        }
    } else {
        warn!(count = outer.len(), "butterfly needs four points besides the centre");
    }

    side_labels(&mut ctx, &spec.labels, &known, reference);
    draw_points_around(&mut ctx, &known, reference);

    targets::register(&mut ctx, &spec.targets, &known);
    debug!(points = known.len(), "thales butterfly");
    ctx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::surface::Node;
    use crate::spec::{DiagramSpec, parse_spec};
    use glam::dvec2;

    fn spec(json: &str) -> ThalesSpec {
        match parse_spec("<test>", json).unwrap() {
            DiagramSpec::Thales(spec) => spec,
            other => panic!("wrong variant: {other:?}"),
        }
    }

    fn target_centers(ctx: &Context) -> Vec<(String, DVec2)> {
        ctx.surface()
            .borrow()
            .hit_regions()
            .into_iter()
            .map(|(_, r)| (r.name, ctx.to_math(r.center)))
            .collect()
    }

    #[test]
    fn cut_point_interpolates() {
        let spec = spec(
            r#"{"type": "thales",
                "vertices": {"A": [0, 0], "B": [10, 0], "C": [0, 8]},
                "cuts": {"M": {"on": ["A", "B"], "ratio": 0.3}, "N": {"on": ["A", "C"], "ratio": 0.3}},
                "showParallel": true,
                "labels": {"AM": "3"},
                "targets": [{"name": "M", "kind": "vertex", "vertex": "M"}]}"#,
        );
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let centers = target_centers(&ctx);
        assert_eq!(centers.len(), 1);
        assert!((centers[0].1 - dvec2(3.0, 0.0)).length() < 1e-9);
        let svg = ctx.surface().borrow().to_svg();
        assert_eq!(svg.matches("class=\"geo-parallel\"").count(), 2);
        assert!(svg.contains(">3<"));
    }

    #[test]
    fn base_is_opposite_the_shared_vertex() {
        let spec = spec(
            r#"{"type": "thales",
                "vertices": {"A": [0, 0], "B": [10, 0], "C": [0, 8]},
                "cuts": {"M": {"on": ["B", "A"], "ratio": 0.5}, "N": {"on": ["A", "C"], "ratio": 0.5}}}"#,
        );
        assert_eq!(cut_base(&spec), Some(["B", "C"]));
    }

    #[test]
    fn butterfly_centre_is_the_chord_crossing() {
        let spec = spec(
            r#"{"type": "thales", "config": "butterfly",
                "points": {"A": [-2, 2], "B": [2, 2], "C": [4, -4], "D": [-4, -4]},
                "targets": [{"name": "O", "kind": "vertex", "vertex": "O"}]}"#,
        );
        let mut container = Container::new();
        let ctx = build(&mut container, &spec);
        let centers = target_centers(&ctx);
        // chords A–C and B–D lie on y = -x and y = x
        assert!((centers[0].1 - dvec2(0.0, 0.0)).length() < 1e-9);
        let surface = ctx.surface();
        let groups = surface
            .borrow()
            .ids()
            .into_iter()
            .filter(|&id| matches!(surface.borrow().node(id), Some(Node::Group { .. })))
            .count();
        // two parallel-mark groups plus five points
        assert_eq!(groups, 7);
    }
}
