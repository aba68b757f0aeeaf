//! Shared value types: math-space bounds and device frame options.
//!
//! Points are `glam::DVec2` throughout. Math space is y-up, device space is
//! y-down pixels; which one a `DVec2` lives in is carried by the name
//! (`math`, `device`) rather than by a wrapper type.

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::render::defaults;

/// Axis-aligned rectangle in math space.
///
/// `x_max > x_min` and `y_max > y_min` are expected but not checked: a
/// degenerate extent shows up as non-finite device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    pub const fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn min(&self) -> DVec2 {
        dvec2(self.x_min, self.y_min)
    }

    pub fn max(&self) -> DVec2 {
        dvec2(self.x_max, self.y_max)
    }

    pub fn center(&self) -> DVec2 {
        (self.min() + self.max()) * 0.5
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    /// Clamp both axes into the bounds.
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        dvec2(
            p.x.clamp(self.x_min, self.x_max),
            p.y.clamp(self.y_min, self.y_max),
        )
    }
}

/// Output frame of a Coordinate Context, in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContextOptions {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            padding: defaults::PADDING,
        }
    }
}

/// Per-spec overrides of the output frame.
///
/// Flattened into every diagram spec, so `{"type": "symmetry", "width": 400,
/// ...}` widens the surface without touching the other defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
}

impl Frame {
    /// Resolve against a builder's own defaults.
    pub fn options(&self, base: ContextOptions) -> ContextOptions {
        ContextOptions {
            width: self.width.unwrap_or(base.width),
            height: self.height.unwrap_or(base.height),
            padding: self.padding.unwrap_or(base.padding),
        }
    }
}

/// Format a coordinate the way answers are written: `3`, `-1.5`, never `-0`.
pub fn fmt_coord(value: f64) -> String {
    let tidy = (value * 1e9).round() / 1e9;
    // `+ 0.0` folds negative zero into zero
    format!("{}", tidy + 0.0)
}

/// Format a point as an answer pair, `"x,y"`.
pub fn fmt_pair(p: DVec2) -> String {
    format!("{},{}", fmt_coord(p.x), fmt_coord(p.y))
}

/// Format a point as `"x,y"` with no rounding; parsing it back gives `p`.
pub fn fmt_pair_exact(p: DVec2) -> String {
    format!("{},{}", p.x + 0.0, p.y + 0.0)
}
