//! SVG generation
//!
//! Turns surface nodes into an `svg` element tree. Numbers go through
//! [`fmt_num`] so output stays short and stable across platforms.

use glam::DVec2;
use svg::Node as _;
use svg::node::Text as TextNode;
use svg::node::element::Element;

use super::defaults;
use super::surface::{HitRegion, HitState, MarkerDef, Node, PathData, Style};

/// Format a number with 6 significant figures, trailing zeros trimmed (C `%g`).
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return format!("{value}");
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn points_attr(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_style(el: &mut Element, style: &Style) {
    if let Some(class) = &style.class {
        el.assign("class", class.clone());
    }
    if let Some(stroke) = &style.stroke {
        el.assign("stroke", stroke.clone());
    }
    if let Some(width) = style.stroke_width {
        el.assign("stroke-width", fmt_num(width));
    }
    if let Some(fill) = &style.fill {
        el.assign("fill", fill.clone());
    }
    if let Some(dash) = &style.dash {
        el.assign("stroke-dasharray", dash.clone());
    }
    if let Some(opacity) = style.opacity {
        el.assign("opacity", fmt_num(opacity));
    }
    if let Some(marker) = &style.marker_end {
        el.assign("marker-end", format!("url(#{marker})"));
    }
    if let Some(size) = style.font_size {
        el.assign("font-size", fmt_num(size));
    }
    if style.bold {
        el.assign("font-weight", "bold");
    }
    if let Some(anchor) = style.anchor {
        el.assign("text-anchor", anchor.as_str());
    }
}

fn hit_element(region: &HitRegion) -> Element {
    let mut el = Element::new("circle");
    el.assign("class", "geo-target");
    el.assign("data-name", region.name.clone());
    el.assign("cx", fmt_num(region.center.x));
    el.assign("cy", fmt_num(region.center.y));
    el.assign("r", fmt_num(region.radius));
    let (fill, stroke, pointer) = match region.state {
        HitState::Armed => ("transparent", None, true),
        HitState::Disabled => ("transparent", None, false),
        HitState::Correct => (defaults::CORRECT_COLOR, None, false),
        HitState::Wrong => (defaults::WRONG_COLOR, None, false),
        HitState::Revealed => ("none", Some(defaults::REVEAL_COLOR), false),
    };
    el.assign("fill", fill);
    if matches!(region.state, HitState::Correct | HitState::Wrong) {
        el.assign("fill-opacity", "0.35");
    }
    if let Some(stroke) = stroke {
        el.assign("stroke", stroke);
        el.assign("stroke-width", "2");
        el.assign("stroke-dasharray", "4,3");
    }
    el.assign(
        "style",
        if pointer {
            "cursor: pointer"
        } else {
            "pointer-events: none"
        },
    );
    el
}

/// Convert one surface node to an SVG element.
pub fn node_element(node: &Node) -> Element {
    match node {
        Node::Circle { center, r, style } => {
            let mut el = Element::new("circle");
            el.assign("cx", fmt_num(center.x));
            el.assign("cy", fmt_num(center.y));
            el.assign("r", fmt_num(*r));
            apply_style(&mut el, style);
            el
        }
        Node::Ellipse {
            center,
            radii,
            style,
        } => {
            let mut el = Element::new("ellipse");
            el.assign("cx", fmt_num(center.x));
            el.assign("cy", fmt_num(center.y));
            el.assign("rx", fmt_num(radii.x));
            el.assign("ry", fmt_num(radii.y));
            apply_style(&mut el, style);
            el
        }
        Node::Line { from, to, style } => {
            let mut el = Element::new("line");
            el.assign("x1", fmt_num(from.x));
            el.assign("y1", fmt_num(from.y));
            el.assign("x2", fmt_num(to.x));
            el.assign("y2", fmt_num(to.y));
            apply_style(&mut el, style);
            el
        }
        Node::Polyline { points, style } => {
            let mut el = Element::new("polyline");
            el.assign("points", points_attr(points));
            apply_style(&mut el, style);
            el
        }
        Node::Polygon { points, style } => {
            let mut el = Element::new("polygon");
            el.assign("points", points_attr(points));
            apply_style(&mut el, style);
            el
        }
        Node::Path { data, style } => {
            let mut el = Element::new("path");
            el.assign("d", data.to_string());
            apply_style(&mut el, style);
            el
        }
        Node::Text { at, content, style } => {
            let mut el = Element::new("text");
            el.assign("x", fmt_num(at.x));
            el.assign("y", fmt_num(at.y));
            el.assign("dominant-baseline", "middle");
            apply_style(&mut el, style);
            el.append(TextNode::new(content.clone()));
            el
        }
        Node::Group { children, style } => {
            let mut el = Element::new("g");
            apply_style(&mut el, style);
            for child in children {
                el.append(node_element(child));
            }
            el
        }
        Node::Hit(region) => hit_element(region),
    }
}

fn marker_element(marker: &MarkerDef) -> Element {
    let mut el = Element::new("marker");
    el.assign("id", marker.id.clone());
    el.assign("markerWidth", fmt_num(marker.length));
    el.assign("markerHeight", fmt_num(marker.width));
    el.assign("refX", fmt_num(marker.length));
    el.assign("refY", fmt_num(marker.width / 2.0));
    el.assign("orient", "auto");
    el.assign("markerUnits", "userSpaceOnUse");
    let head = PathData::new()
        .move_to(DVec2::ZERO)
        .line_to(DVec2::new(marker.length, marker.width / 2.0))
        .line_to(DVec2::new(0.0, marker.width))
        .close();
    let mut path = Element::new("path");
    path.assign("d", head.to_string());
    path.assign("fill", marker.color.clone());
    el.append(path);
    el
}

/// Serialize a whole surface.
pub fn surface_to_svg<'a>(
    size: DVec2,
    markers: &[MarkerDef],
    nodes: impl Iterator<Item = &'a Node>,
) -> String {
    let mut root = Element::new("svg");
    root.assign("xmlns", "http://www.w3.org/2000/svg");
    root.assign("width", fmt_num(size.x));
    root.assign("height", fmt_num(size.y));
    root.assign("viewBox", format!("0 0 {} {}", fmt_num(size.x), fmt_num(size.y)));
    root.assign("font-family", "sans-serif");

    if !markers.is_empty() {
        let mut defs = Element::new("defs");
        for marker in markers {
            defs.append(marker_element(marker));
        }
        root.append(defs);
    }
    for node in nodes {
        root.append(node_element(node));
    }
    root.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec2;

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(fmt_num(150.0), "150");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_num(-0.0000001), "-0.0000001");
        assert_eq!(fmt_num(1234567.0), "1234570");
        assert_eq!(fmt_num(0.0), "0");
    }

    #[test]
    fn armed_targets_are_invisible_and_clickable() {
        let el = hit_element(&HitRegion {
            name: "M".into(),
            center: dvec2(10.0, 20.0),
            radius: 16.0,
            state: HitState::Armed,
        });
        let out = el.to_string();
        assert!(out.contains("data-name=\"M\""));
        assert!(out.contains("fill=\"transparent\""));
        assert!(out.contains("cursor: pointer"));
    }

    #[test]
    fn empty_surface_is_a_bare_document() {
        let out = surface_to_svg(dvec2(300.0, 250.0), &[], std::iter::empty());
        assert!(out.starts_with("<svg"));
        assert!(out.contains("viewBox=\"0 0 300 250\""));
        assert!(!out.contains("<defs"));
    }
}
