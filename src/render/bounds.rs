//! Bounding boxes for builders that are not given explicit bounds.

use glam::DVec2;

use crate::types::Bounds;

/// Smallest box around `points`, grown by `margin` on every side.
///
/// With no points the box is centred on the origin, `margin` wide each way.
pub fn fit<I>(points: I, margin: f64) -> Bounds
where
    I: IntoIterator<Item = DVec2>,
{
    let mut iter = points.into_iter();
    let Some(first) = iter.next() else {
        return Bounds::new(-margin, margin, -margin, margin);
    };
    let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
    Bounds::new(min.x - margin, max.x + margin, min.y - margin, max.y + margin)
}
