//! Hit-region anchors: turn a target's feature reference into a math point.

use glam::DVec2;

use crate::log::{debug, warn};
use crate::render::context::Context;
use crate::render::geometry::{bisector, midpoint};
use crate::spec::{Anchor, NamedPoints, Side, TargetSpec, Vertical};

/// The resolved geometry a builder exposes to its targets.
pub(crate) trait AnchorSource {
    fn point(&self, name: &str) -> Option<DVec2>;

    /// Rays bounding one of the four angles at a named crossing.
    fn region_rays(&self, _at: &str, _side: Side, _vertical: Vertical) -> Option<(DVec2, DVec2)> {
        None
    }
}

impl AnchorSource for NamedPoints {
    fn point(&self, name: &str) -> Option<DVec2> {
        NamedPoints::point(self, name)
    }
}

/// Math-space centre of an anchor, if everything it names exists.
pub(crate) fn resolve(anchor: &Anchor, source: &impl AnchorSource) -> Option<DVec2> {
    match anchor {
        Anchor::Vertex { vertex } => source.point(vertex),
        Anchor::Edge { edge: [a, b] } | Anchor::Vector { vector: [a, b] } => {
            Some(midpoint(source.point(a)?, source.point(b)?))
        }
        Anchor::Angle {
            vertex,
            rays: [a, b],
            offset,
        } => {
            let v = source.point(vertex)?;
            let dir = bisector(source.point(a)? - v, source.point(b)? - v)?;
            Some(v + dir * *offset)
        }
        Anchor::AngleRegion {
            at,
            side,
            vertical,
            offset,
        } => {
            let v = source.point(at)?;
            let (h, t) = source.region_rays(at, *side, *vertical)?;
            Some(v + bisector(h, t)? * *offset)
        }
        Anchor::Point { at } => Some(*at),
    }
}

/// Register every resolvable target as a hit region; returns how many were.
pub(crate) fn register(ctx: &mut Context, targets: &[TargetSpec], source: &impl AnchorSource) -> usize {
    let mut count = 0;
    for target in targets {
        match resolve(&target.anchor, source) {
            Some(center) => {
                debug!(name = %target.name, x = center.x, y = center.y, "target");
                ctx.hit_target(&target.name, center, target.radius());
                count += 1;
            }
            None => warn!(name = %target.name, "target anchor does not resolve, skipped"),
        }
    }
    debug!(registered = count, requested = targets.len(), "targets");
    count
}
