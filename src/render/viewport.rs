//! Math-space ↔ device-space affine map.

use glam::{DVec2, dvec2};

use crate::types::{Bounds, ContextOptions};

/// Uniform-scale fit of math bounds into a padded device frame.
///
/// One scale factor serves both axes so figures are never stretched; the
/// scaled bounds are centred inside the padded area. Device y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    bounds: Bounds,
    options: ContextOptions,
    scale: f64,
    offset: DVec2,
}

impl Viewport {
    pub fn new(bounds: Bounds, options: ContextOptions) -> Self {
        let inner_w = options.width - 2.0 * options.padding;
        let inner_h = options.height - 2.0 * options.padding;
        let scale_x = inner_w / bounds.width();
        let scale_y = inner_h / bounds.height();
        let scale = scale_x.min(scale_y);
        let offset = dvec2(
            options.padding + (inner_w - bounds.width() * scale) / 2.0,
            options.padding + (inner_h - bounds.height() * scale) / 2.0,
        );

        crate::log::debug!(scale, offset_x = offset.x, offset_y = offset.y, "viewport");

        Self {
            bounds,
            options,
            scale,
            offset,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn options(&self) -> ContextOptions {
        self.options
    }

    /// Device pixels per math unit, identical on both axes.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Device position of the bounds' top-left corner.
    pub fn offset(&self) -> DVec2 {
        self.offset
    }

    pub fn size(&self) -> DVec2 {
        dvec2(self.options.width, self.options.height)
    }

    /// Forward map, math → device.
    pub fn to_device(&self, m: DVec2) -> DVec2 {
        dvec2(
            self.offset.x + (m.x - self.bounds.x_min) * self.scale,
            self.offset.y + (self.bounds.y_max - m.y) * self.scale,
        )
    }

    /// Inverse map, device → math.
    pub fn to_math(&self, d: DVec2) -> DVec2 {
        dvec2(
            self.bounds.x_min + (d.x - self.offset.x) / self.scale,
            self.bounds.y_max - (d.y - self.offset.y) / self.scale,
        )
    }

    /// Convert a math-space length to pixels.
    pub fn px(&self, math_len: f64) -> f64 {
        math_len * self.scale
    }
}
