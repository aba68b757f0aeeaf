//! Geometry helpers shared by the builders.
//!
//! Everything here is pure and works on `DVec2` in whichever space the
//! caller is in; nothing knows about surfaces or styles.

use std::f64::consts::{PI, TAU};

use glam::DVec2;

/// Point at `ratio` along `from → to` (`ratio` may leave `[0, 1]`).
pub fn lerp(from: DVec2, to: DVec2, ratio: f64) -> DVec2 {
    from + (to - from) * ratio
}

/// Image of `point` through the point reflection of centre `center`.
pub fn reflect(point: DVec2, center: DVec2) -> DVec2 {
    2.0 * center - point
}

pub fn midpoint(a: DVec2, b: DVec2) -> DVec2 {
    (a + b) * 0.5
}

pub fn centroid(points: &[DVec2]) -> Option<DVec2> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().copied().sum::<DVec2>() / points.len() as f64)
}

/// Unit vector, or `None` for a zero-length input.
pub fn unit(v: DVec2) -> Option<DVec2> {
    v.try_normalize()
}

/// x where the line of `slope` through `anchor` crosses height `y`.
///
/// A horizontal line never crosses another height, hence `None`.
pub fn x_at_height(anchor: DVec2, slope: f64, y: f64) -> Option<f64> {
    if slope == 0.0 || !slope.is_finite() {
        return None;
    }
    Some(anchor.x + (y - anchor.y) / slope)
}

/// Intersection of the infinite lines `a1a2` and `b1b2`; `None` if parallel.
pub fn line_intersection(a1: DVec2, a2: DVec2, b1: DVec2, b2: DVec2) -> Option<DVec2> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.perp_dot(s);
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = (b1 - a1).perp_dot(s) / denom;
    Some(a1 + r * t)
}

/// Signed sweep from angle `from` to angle `to`, folded into `(-π, π]`.
///
/// The fold picks the rotation that subtends at most a half turn.
pub fn minor_sweep(from: f64, to: f64) -> f64 {
    let mut sweep = (to - from) % TAU;
    if sweep > PI {
        sweep -= TAU;
    } else if sweep <= -PI {
        sweep += TAU;
    }
    sweep
}

/// Unit normal of segment `ab`, flipped to point away from `reference`.
pub fn outward_normal(a: DVec2, b: DVec2, reference: DVec2) -> Option<DVec2> {
    let n = unit(b - a)?.perp();
    if n.dot(midpoint(a, b) - reference) < 0.0 {
        Some(-n)
    } else {
        Some(n)
    }
}

/// Unit bisector of the angle between directions `u` and `v`.
pub fn bisector(u: DVec2, v: DVec2) -> Option<DVec2> {
    let (u, v) = (unit(u)?, unit(v)?);
    // opposite rays: any perpendicular works, take the left-hand one
    unit(u + v).or(Some(u.perp()))
}

/// Split an edge key such as `"AB"` or `"AM1"` into two known point names.
///
/// Every split position is tried; the first where both halves are known
/// wins, so single-letter names resolve without a separator.
pub fn split_edge_key<'k>(key: &'k str, known: impl Fn(&str) -> bool) -> Option<(&'k str, &'k str)> {
    let key = key.trim();
    if let Some((a, b)) = key.split_once(['-', ' ']) {
        let (a, b) = (a.trim(), b.trim());
        return (known(a) && known(b)).then_some((a, b));
    }
    key.char_indices()
        .skip(1)
        .map(|(i, _)| key.split_at(i))
        .find(|(a, b)| known(a) && known(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn thales_cut_point() {
        let p = lerp(dvec2(0.0, 0.0), dvec2(10.0, 0.0), 0.3);
        assert!((p - dvec2(3.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn point_reflection() {
        let o = dvec2(2.0, 3.0);
        let p = dvec2(5.0, 3.0);
        assert_eq!(reflect(p, o), dvec2(-1.0, 3.0));
        assert_eq!(reflect(reflect(p, o), o), p);
    }

    #[test]
    fn transversal_crossing() {
        // slope 2 through (0, 1.5): crosses y=3 at x=0.75, y=0 at x=-0.75
        let anchor = dvec2(0.0, 1.5);
        assert_eq!(x_at_height(anchor, 2.0, 3.0), Some(0.75));
        assert_eq!(x_at_height(anchor, 2.0, 0.0), Some(-0.75));
        assert_eq!(x_at_height(anchor, 0.0, 3.0), None);
    }

    #[test]
    fn chords_cross() {
        let o = line_intersection(
            dvec2(-2.0, 2.0),
            dvec2(2.0, -2.0),
            dvec2(2.0, 2.0),
            dvec2(-2.0, -2.0),
        );
        assert!(o.is_some_and(|o| o.length() < 1e-12));
        assert!(line_intersection(DVec2::ZERO, DVec2::X, DVec2::Y, dvec2(1.0, 1.0)).is_none());
    }

    #[test]
    fn sweep_stays_within_half_turn() {
        assert!((minor_sweep(0.0, 0.5 * PI) - 0.5 * PI).abs() < 1e-12);
        assert!((minor_sweep(0.0, 1.5 * PI) + 0.5 * PI).abs() < 1e-12);
        assert!((minor_sweep(0.9 * PI, -0.9 * PI) - 0.2 * PI).abs() < 1e-12);
    }

    #[test]
    fn normal_points_away_from_reference() {
        let n = outward_normal(dvec2(0.0, 0.0), dvec2(4.0, 0.0), dvec2(2.0, 1.0));
        assert_eq!(n, Some(dvec2(0.0, -1.0)));
        let n = outward_normal(dvec2(0.0, 0.0), dvec2(4.0, 0.0), dvec2(2.0, -1.0));
        assert_eq!(n, Some(dvec2(0.0, 1.0)));
    }

    #[test]
    fn edge_keys_split_on_known_names() {
        let names = ["A", "B", "M1"];
        let known = |n: &str| names.contains(&n);
        assert_eq!(split_edge_key("AB", known), Some(("A", "B")));
        assert_eq!(split_edge_key("AM1", known), Some(("A", "M1")));
        assert_eq!(split_edge_key("M1-B", known), Some(("M1", "B")));
        assert_eq!(split_edge_key("AX", known), None);
    }
}
