//! Declarative geometry figures rendered to SVG.
//!
//! A [`DiagramSpec`] (usually read from JSON) names a diagram type and its
//! data. [`render`] routes it to the matching builder, which draws into a
//! [`Container`] through a Coordinate [`Context`]. On top of that,
//! [`geo_click`] and [`geo_place`] turn a rendered figure into a graded
//! question.

pub mod container;
pub mod errors;
pub mod interact;
mod log;
pub mod render;
pub mod spec;
pub mod types;

pub use container::{Container, Widget, WidgetKind, WidgetRef};
pub use errors::{Abandoned, AnswerError, SpecError};
pub use interact::{ClickSession, Outcome, OutcomeReceiver, PlaceSession, geo_click, geo_place};
pub use render::{Context, Figure, render};
pub use spec::{DiagramSpec, Item, parse_item, parse_spec};
pub use types::{Bounds, ContextOptions};

/// Render a JSON diagram spec to SVG.
///
/// Returns the SVG string on success, or an error with diagnostics. A spec
/// whose type has no builder renders as an empty comment.
pub fn render_svg(source: &str) -> Result<String, miette::Report> {
    let spec = parse_spec("<input>", source)?;
    let mut container = Container::new();
    match render(&mut container, Some(&spec)) {
        Some(figure) => Ok(figure.surface().borrow().to_svg()),
        None => Ok(String::from("<!-- empty geofig diagram -->")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_triangle() {
        let svg = render_svg(
            r#"{"type": "right-triangle",
                "vertices": {"A": [0, 0], "B": [4, 0], "C": [0, 3]},
                "rightAngle": "A"}"#,
        )
        .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn unknown_type_is_empty() {
        let svg = render_svg(r#"{"type": "hexagon"}"#).unwrap();
        assert_eq!(svg, "<!-- empty geofig diagram -->");
    }

    #[test]
    fn malformed_json_reports() {
        let err = render_svg(r#"{"type": "symmetry", "#).unwrap_err();
        assert!(err.to_string().contains("unexpected end"));
    }
}
