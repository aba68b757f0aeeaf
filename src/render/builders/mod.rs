//! Shape builders, one module per diagram type.
//!
//! A builder reads its spec, derives whatever geometry the spec leaves
//! implicit, creates a [`Context`] sized for the figure and issues primitive
//! draws. Builders that support click questions finish by registering their
//! targets. Missing references skip the element they belong to, never the
//! whole figure.

pub mod coordinate_plane;
pub mod grid_place;
pub mod parallel_lines;
pub mod right_triangle;
pub mod symmetry;
pub mod targets;
pub mod thales;
pub mod volume;

use glam::DVec2;

use crate::spec::NamedPoints;

use super::context::{Context, PointStyle};
use super::defaults;
use super::geometry::{centroid, unit};
use super::surface::Style;

/// Stroke used for figure edges.
pub(crate) fn edge_style() -> Style {
    Style::stroked(defaults::STROKE, defaults::STROKE_WIDTH)
}

/// Label offset pushing a point's label away from `reference`.
///
/// Computed in device space so the distance is the same at every scale;
/// a point on top of the reference gets its label straight above.
pub(crate) fn radial_offset(ctx: &Context, p: DVec2, reference: DVec2) -> DVec2 {
    let dir = unit(ctx.to_device(p) - ctx.to_device(reference)).unwrap_or(DVec2::NEG_Y);
    dir * defaults::VERTEX_LABEL_DISTANCE
}

/// Draw named points with labels pushed radially away from `reference`.
pub(crate) fn draw_points_around(ctx: &mut Context, points: &NamedPoints, reference: DVec2) {
    for (name, &p) in points.iter() {
        let style = PointStyle::default().with_centered_label(radial_offset(ctx, p, reference));
        ctx.point(p, Some(name), &style);
    }
}

/// Centroid of a point map, or the origin when it is empty.
pub(crate) fn centre_of(points: &NamedPoints) -> DVec2 {
    centroid(&points.values().copied().collect::<Vec<_>>()).unwrap_or(DVec2::ZERO)
}

/// Draw the closed outline of `points` as a filled polygon and its edges.
pub(crate) fn draw_outline(ctx: &mut Context, points: &[DVec2]) {
    ctx.polygon(points, &Style::filled(defaults::FILL));
    let edge = edge_style();
    for (i, &a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        ctx.segment(a, b, &edge);
    }
}
