//! Plain grid with styleable named points: the backdrop of placement
//! questions.

use crate::container::Container;
use crate::log::debug;
use crate::render::context::{Context, GridOptions, PointStyle};
use crate::spec::GridPlaceSpec;
use crate::types::ContextOptions;

use super::coordinate_plane::{draw_segments, draw_vectors};
use super::targets;

pub fn build(container: &mut Container, spec: &GridPlaceSpec) -> Context {
    let mut ctx = Context::create(
        container,
        spec.bounds,
        spec.frame.options(ContextOptions::default()),
    );
    ctx.grid(&GridOptions::default());
    draw_segments(&mut ctx, &spec.segments, &spec.points);
    draw_vectors(&mut ctx, &spec.vectors, &spec.points);

    for (name, &p) in spec.points.iter() {
        let custom = spec.point_styles.get(name).cloned().unwrap_or_default();
        let mut style = PointStyle::default();
        if let Some(color) = custom.color {
            style.color = color;
        }
        if let Some(radius) = custom.radius {
            style.radius = radius;
        }
        let label = custom.show_label.unwrap_or(true).then_some(name);
        ctx.point(p, label, &style);
    }

    targets::register(&mut ctx, &spec.targets, &spec.points);
    debug!(points = spec.points.len(), "grid place");
    ctx
}
