//! General plotter: grid, named points, segments, vectors and lines given
//! by slope and intercept.

use glam::{DVec2, dvec2};

use crate::container::Container;
use crate::log::{debug, warn};
use crate::render::bounds::fit;
use crate::render::context::{Context, GridOptions, PointStyle};
use crate::render::defaults;
use crate::render::surface::{Style, TextAnchor};
use crate::spec::{CoordinatePlaneSpec, LineEqSpec, NamedPoints, SegmentSpec, VectorSpec};
use crate::types::{Bounds, ContextOptions};

use super::targets;

/// Draw segments between named points; unknown names skip the segment.
pub(crate) fn draw_segments(ctx: &mut Context, segments: &[SegmentSpec], points: &NamedPoints) {
    let reference = ctx.bounds().center();
    for seg in segments {
        let (Some(a), Some(b)) = (points.point(&seg.from), points.point(&seg.to)) else {
            warn!(from = %seg.from, to = %seg.to, "segment between unknown points, skipped");
            continue;
        };
        let style = Style::stroked(
            seg.color.as_deref().unwrap_or(defaults::STROKE),
            defaults::STROKE_WIDTH,
        );
        if seg.dashed {
            ctx.dashed_line(a, b, &style);
        } else {
            ctx.segment(a, b, &style);
        }
        if let Some(text) = &seg.label {
            ctx.side_label(a, b, text, reference);
        }
    }
}

/// Draw vectors as arrows between named points, labelled at the midpoint.
pub(crate) fn draw_vectors(ctx: &mut Context, vectors: &[VectorSpec], points: &NamedPoints) {
    let reference = ctx.bounds().center();
    for vector in vectors {
        let (Some(a), Some(b)) = (points.point(&vector.from), points.point(&vector.to)) else {
            warn!(from = %vector.from, to = %vector.to, "vector between unknown points, skipped");
            continue;
        };
        let style = Style::stroked(
            vector.color.as_deref().unwrap_or(defaults::VECTOR_COLOR),
            defaults::STROKE_WIDTH,
        );
        ctx.arrow(a, b, &style);
        if let Some(text) = &vector.label {
            ctx.side_label(a, b, text, reference);
        }
    }
}

/// The part of `y = slope * x + intercept` inside `bounds`.
fn clip_line(eq: &LineEqSpec, bounds: Bounds) -> Option<(DVec2, DVec2)> {
    let (mut x0, mut x1) = (bounds.x_min, bounds.x_max);
    if eq.slope == 0.0 {
        if eq.intercept < bounds.y_min || eq.intercept > bounds.y_max {
            return None;
        }
    } else {
        let at_bottom = (bounds.y_min - eq.intercept) / eq.slope;
        let at_top = (bounds.y_max - eq.intercept) / eq.slope;
        x0 = x0.max(at_bottom.min(at_top));
        x1 = x1.min(at_bottom.max(at_top));
    }
    let y = |x: f64| eq.slope * x + eq.intercept;
    (x0 < x1).then(|| (dvec2(x0, y(x0)), dvec2(x1, y(x1))))
}

pub fn build(container: &mut Container, spec: &CoordinatePlaneSpec) -> Context {
    let bounds = spec.bounds.unwrap_or_else(|| {
        fit(
            spec.points.values().copied().chain([DVec2::ZERO]),
            defaults::FIT_MARGIN,
        )
    });
    let mut ctx = Context::create(container, bounds, spec.frame.options(ContextOptions::default()));

    if spec.show_grid {
        ctx.grid(&GridOptions::default());
    }

    let label_style = Style::text(defaults::LABEL_COLOR, defaults::FONT_SIZE, TextAnchor::End);
    for eq in &spec.line_eqs {
        let Some((a, b)) = clip_line(eq, bounds) else {
            warn!(slope = eq.slope, intercept = eq.intercept, "line misses the visible area");
            continue;
        };
        let style = Style::stroked(
            eq.color.as_deref().unwrap_or(defaults::VECTOR_COLOR),
            defaults::STROKE_WIDTH,
        );
        if eq.dashed {
            ctx.dashed_line(a, b, &style);
        } else {
            ctx.segment(a, b, &style);
        }
        if let Some(text) = &eq.label {
            ctx.label(b, text, dvec2(-4.0, -10.0), &label_style);
        }
    }

    draw_segments(&mut ctx, &spec.segments, &spec.points);
    draw_vectors(&mut ctx, &spec.vectors, &spec.points);

    // points go last so they sit on top
    for (name, &p) in spec.points.iter() {
        ctx.point(p, Some(name), &PointStyle::default());
    }

    targets::register(&mut ctx, &spec.targets, &spec.points);
    debug!(points = spec.points.len(), "coordinate plane");
    ctx
}
