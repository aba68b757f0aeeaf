//! Figure rendering
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes, colours and offsets
//! - `surface`: The `DrawingSurface` contract and the SVG node list
//! - `svg`: SVG serialization
//! - `viewport`: The math ↔ device transform
//! - `context`: Coordinate Context, the math-space drawing API
//! - `bounds`: Bounding boxes for builders without explicit bounds
//! - `geometry`: Pure geometry helpers
//! - `builders`: One builder per diagram type

pub mod bounds;
pub mod builders;
pub mod context;
pub mod defaults;
pub mod geometry;
pub mod surface;
pub mod svg;
pub mod viewport;

pub use context::{Context, GridOptions, PointStyle};
pub use surface::{DrawingSurface, NodeId, SurfaceRef, SvgSurface};
pub use viewport::Viewport;

use crate::container::Container;
use crate::log::{debug, warn};
use crate::spec::DiagramSpec;

use builders::{
    coordinate_plane, grid_place, parallel_lines, right_triangle, symmetry, thales, volume,
};

/// What a builder hands back.
#[derive(Debug, Clone)]
pub enum Figure {
    /// Drawn through a Coordinate Context; the context stays usable for input
    /// mapping and further drawing.
    Plane(Context),
    /// Drawn straight onto a surface (3-D solids).
    Solid(SurfaceRef),
}

impl Figure {
    pub fn context(&self) -> Option<&Context> {
        match self {
            Figure::Plane(ctx) => Some(ctx),
            Figure::Solid(_) => None,
        }
    }

    pub fn into_context(self) -> Option<Context> {
        match self {
            Figure::Plane(ctx) => Some(ctx),
            Figure::Solid(_) => None,
        }
    }

    /// The surface the figure was drawn on.
    pub fn surface(&self) -> SurfaceRef {
        match self {
            Figure::Plane(ctx) => ctx.surface(),
            Figure::Solid(surface) => surface.clone(),
        }
    }
}

/// Route a diagram spec to its builder.
///
/// Returns `None` (and appends nothing) when there is no spec or its type
/// has no builder; callers treat that as "no figure", not as a failure.
pub fn render(container: &mut Container, spec: Option<&DiagramSpec>) -> Option<Figure> {
    let Some(spec) = spec else {
        warn!("no diagram spec to render");
        return None;
    };
    debug!(kind = spec.type_name(), "render");
    let figure = match spec {
        DiagramSpec::RightTriangle(s) => Figure::Plane(right_triangle::build(container, s)),
        DiagramSpec::ParallelLines(s) => Figure::Plane(parallel_lines::build(container, s)),
        DiagramSpec::Thales(s) => Figure::Plane(thales::build(container, s)),
        DiagramSpec::Symmetry(s) => Figure::Plane(symmetry::build(container, s)),
        DiagramSpec::CoordinatePlane(s) => Figure::Plane(coordinate_plane::build(container, s)),
        DiagramSpec::GridPlace(s) => Figure::Plane(grid_place::build(container, s)),
        DiagramSpec::Volume(s) => Figure::Solid(volume::build(container, s)?),
        DiagramSpec::Unknown => {
            warn!("unknown diagram type; nothing drawn");
            return None;
        }
    };
    Some(figure)
}
