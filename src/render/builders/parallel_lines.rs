//! Two horizontal parallels cut by a transversal.
//!
//! The transversal passes through `(x, y_mid)` where `y_mid` is halfway
//! between the lines, so its crossings have the closed form
//! `x_i = x + (y_i - y_mid) / slope`.

use glam::{DVec2, dvec2};

use crate::container::Container;
use crate::log::{debug, warn};
use crate::render::bounds::fit;
use crate::render::context::{Context, PointStyle};
use crate::render::defaults;
use crate::render::geometry::x_at_height;
use crate::render::surface::{Style, TextAnchor};
use crate::spec::{ParallelLinesSpec, Side, Vertical};
use crate::types::ContextOptions;

use super::edge_style;
use super::targets::{self, AnchorSource};

/// How far the parallels run past the outermost crossing, in math units.
const LINE_OVERHANG: f64 = 3.0;
/// How far the transversal runs past the outer parallels, in math units.
const TRANSVERSAL_OVERHANG: f64 = 1.5;
/// Names used for the crossings when the spec names none.
const DEFAULT_NAMES: [&str; 2] = ["A", "B"];

/// Resolved crossings and ray directions, shared with the targets.
struct Crossings {
    names: Vec<String>,
    points: Vec<DVec2>,
    /// Unit direction of the transversal, pointing up.
    up: Option<DVec2>,
}

impl Crossings {
    fn rays(&self, side: Side, vertical: Vertical) -> Option<(DVec2, DVec2)> {
        let up = self.up?;
        let h = match side {
            Side::Left => DVec2::NEG_X,
            Side::Right => DVec2::X,
        };
        let t = match vertical {
            Vertical::Above => up,
            Vertical::Below => -up,
        };
        Some((h, t))
    }
}

impl AnchorSource for Crossings {
    fn point(&self, name: &str) -> Option<DVec2> {
        let i = self.names.iter().position(|n| n == name)?;
        self.points.get(i).copied()
    }

    fn region_rays(&self, at: &str, side: Side, vertical: Vertical) -> Option<(DVec2, DVec2)> {
        self.point(at)?;
        self.rays(side, vertical)
    }
}

pub fn build(container: &mut Container, spec: &ParallelLinesSpec) -> Context {
    if spec.lines.len() != 2 {
        warn!(count = spec.lines.len(), "parallel lines expects exactly two lines");
    }
    let ys: Vec<f64> = spec.lines.iter().take(2).map(|l| l.y).collect();
    let t = &spec.transversal;
    let y_mid = if ys.is_empty() {
        0.0
    } else {
        ys.iter().sum::<f64>() / ys.len() as f64
    };
    let anchor = dvec2(t.x, y_mid);

    let xs: Vec<f64> = ys
        .iter()
        .filter_map(|&y| x_at_height(anchor, t.slope, y))
        .collect();
    let crossings = Crossings {
        names: if spec.points.len() >= 2 {
            spec.points.clone()
        } else {
            DEFAULT_NAMES.iter().map(|n| n.to_string()).collect()
        },
        points: if xs.len() == ys.len() {
            xs.iter().zip(&ys).map(|(&x, &y)| dvec2(x, y)).collect()
        } else {
            Vec::new()
        },
        up: dvec2(1.0, t.slope)
            .try_normalize()
            .filter(|_| t.slope != 0.0)
            .map(|d| if d.y < 0.0 { -d } else { d }),
    };

    let x_lo = xs.iter().copied().fold(t.x, f64::min) - LINE_OVERHANG;
    let x_hi = xs.iter().copied().fold(t.x, f64::max) + LINE_OVERHANG;
    let y_lo = ys.iter().copied().fold(y_mid, f64::min) - TRANSVERSAL_OVERHANG;
    let y_hi = ys.iter().copied().fold(y_mid, f64::max) + TRANSVERSAL_OVERHANG;

    // transversal end points, present only for a non-horizontal slope
    let ends = x_at_height(anchor, t.slope, y_lo)
        .zip(x_at_height(anchor, t.slope, y_hi))
        .map(|(x0, x1)| (dvec2(x0, y_lo), dvec2(x1, y_hi)));

    let mut extent = vec![dvec2(x_lo, y_lo), dvec2(x_hi, y_hi)];
    if let Some((a, b)) = ends {
        extent.extend([a, b]);
    }
    let bounds = fit(extent, defaults::FIT_MARGIN * 0.5);
    let mut ctx = Context::create(container, bounds, spec.frame.options(ContextOptions::default()));

    let edge = edge_style();
    let label_style = Style::text(defaults::LABEL_COLOR, defaults::FONT_SIZE, TextAnchor::Start);
    for (i, line) in spec.lines.iter().take(2).enumerate() {
        let (a, b) = (dvec2(x_lo, line.y), dvec2(x_hi, line.y));
        ctx.segment(a, b, &edge);
        if let Some(text) = &line.label {
            ctx.label(b, text, dvec2(6.0, 0.0), &label_style);
        }
        if spec.show_parallel_marks {
            // ticks on the left part, clear of the crossing
            let stop = crossings.points.get(i).map_or(b.x, |p| p.x);
            ctx.parallel_marks(a, dvec2(stop, line.y), 2);
        }
    }

    match ends {
        Some((bottom, top)) => {
            ctx.segment(bottom, top, &edge);
            if let Some(text) = &t.label {
                ctx.label(top, text, dvec2(6.0, 4.0), &label_style);
            }
        }
        None => warn!(slope = t.slope, "horizontal transversal never crosses; not drawn"),
    }

    for angle in &spec.angles {
        let Some(p) = crossings.point(&angle.at) else {
            warn!(at = %angle.at, "angle at unknown crossing");
            continue;
        };
        let Some((h, v)) = crossings.rays(angle.side, angle.vertical) else {
            continue;
        };
        ctx.angle_mark(
            p,
            p + h,
            p + v,
            defaults::ANGLE_RADIUS,
            angle.label.as_deref(),
            angle.color.as_deref().unwrap_or(defaults::ANGLE_COLOR),
        );
    }

    let named = spec.points.len() >= 2;
    for (name, &p) in crossings.names.iter().zip(&crossings.points) {
        let label = named.then_some(name.as_str());
        let offset = dvec2(-10.0, if p.y > y_mid { -12.0 } else { 14.0 });
        ctx.point(p, label, &PointStyle::default().with_centered_label(offset));
    }

    targets::register(&mut ctx, &spec.targets, &crossings);
    debug!(y_mid, crossings = crossings.points.len(), "parallel lines");
    ctx
}
