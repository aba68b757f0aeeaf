//! 3-D solid wireframes.
//!
//! Solids are drawn straight in device space with fixed proportions of the
//! output frame: the oblique projection used here is not a bounds fit, so
//! this builder does not go through a [`Context`](crate::render::context::Context).
//! Circular sections are ellipses whose back half is dashed; hidden edges of
//! the pyramid and prism are dashed too.

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::container::Container;
use crate::log::{debug, warn};
use crate::render::defaults;
use crate::render::surface::{DrawingSurface, Node, PathData, Style, SurfaceRef, TextAnchor};
use crate::spec::{SolidKind, VolumeSpec};
use crate::types::{ContextOptions, fmt_coord};

/// A dimension that can carry a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Height,
    Radius,
    BaseEdge,
}

/// Where a dimension label goes, in device space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub dimension: Dimension,
    pub at: DVec2,
    pub anchor: TextAnchor,
}

#[enum_dispatch]
pub trait Wireframe {
    /// Draw the outline and guide lines.
    fn draw(&self, surface: &mut dyn DrawingSurface);

    /// Label positions for the dimensions this solid has.
    fn label_anchors(&self) -> Vec<LabelAnchor>;
}

#[enum_dispatch(Wireframe)]
#[derive(Debug, Clone, PartialEq)]
pub enum Solid {
    Cylinder,
    Cone,
    Sphere,
    Pyramid,
    Prism,
}

impl Solid {
    /// Lay out a solid of `kind` in a frame of `size` pixels.
    pub fn new(kind: SolidKind, size: DVec2) -> Option<Self> {
        let (w, h) = (size.x, size.y);
        let cx = w / 2.0;
        let solid: Solid = match kind {
            SolidKind::Cylinder => Cylinder {
                top: dvec2(cx, h * 0.22),
                bottom: dvec2(cx, h * 0.78),
                radii: dvec2(w * 0.22, w * 0.07),
            }
            .into(),
            SolidKind::Cone => Cone {
                apex: dvec2(cx, h * 0.16),
                base: dvec2(cx, h * 0.78),
                radii: dvec2(w * 0.24, w * 0.07),
            }
            .into(),
            SolidKind::Sphere => {
                let r = w.min(h) * 0.34;
                Sphere {
                    center: dvec2(cx, h / 2.0),
                    radius: r,
                    flatten: 0.28,
                }
                .into()
            }
            SolidKind::Pyramid => {
                let edge = w * 0.42;
                let depth = dvec2(edge * 0.35, -edge * 0.25);
                let a = dvec2(cx - (edge + depth.x) / 2.0, h * 0.8);
                Pyramid {
                    base: base_corners(a, edge, depth),
                    apex_y: h * 0.15,
                }
                .into()
            }
            SolidKind::Prism => {
                let edge = w * 0.4;
                let depth = dvec2(edge * 0.35, -edge * 0.3);
                let a = dvec2(cx - (edge + depth.x) / 2.0, h * 0.8);
                Prism {
                    base: base_corners(a, edge, depth),
                    height: h * 0.45,
                }
                .into()
            }
            SolidKind::Unknown => return None,
        };
        Some(solid)
    }
}

/// Front-left, front-right, back-right, back-left.
fn base_corners(front_left: DVec2, edge: f64, depth: DVec2) -> [DVec2; 4] {
    let front_right = front_left + dvec2(edge, 0.0);
    [front_left, front_right, front_right + depth, front_left + depth]
}

fn edge(surface: &mut dyn DrawingSurface, from: DVec2, to: DVec2, hidden: bool) {
    let mut style = Style::stroked(defaults::STROKE, defaults::STROKE_WIDTH);
    if hidden {
        style = style
            .with_dash(defaults::DASH)
            .with_opacity(0.7);
        style.stroke_width = Some(defaults::THIN_STROKE_WIDTH);
    }
    surface.append(Node::Line { from, to, style });
}

/// Horizontal ellipse split at its widest point: front half solid, back
/// half dashed.
fn section(surface: &mut dyn DrawingSurface, center: DVec2, radii: DVec2) {
    let left = center - dvec2(radii.x, 0.0);
    let right = center + dvec2(radii.x, 0.0);
    // y grows downward, so sweep 0 from the left passes below the centre
    let front = PathData::new().move_to(left).arc_to(radii, false, false, right);
    let back = PathData::new().move_to(left).arc_to(radii, false, true, right);
    surface.append(Node::Path {
        data: front,
        style: Style::stroked(defaults::STROKE, defaults::STROKE_WIDTH),
    });
    surface.append(Node::Path {
        data: back,
        style: Style::stroked(defaults::STROKE, defaults::THIN_STROKE_WIDTH)
            .with_dash(defaults::DASH)
            .with_opacity(0.7),
    });
}

fn centre_dot(surface: &mut dyn DrawingSurface, at: DVec2) {
    surface.append(Node::Circle {
        center: at,
        r: 2.5,
        style: Style::filled(defaults::STROKE),
    });
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    top: DVec2,
    bottom: DVec2,
    radii: DVec2,
}

impl Wireframe for Cylinder {
    fn draw(&self, surface: &mut dyn DrawingSurface) {
        let rx = dvec2(self.radii.x, 0.0);
        surface.append(Node::Ellipse {
            center: self.top,
            radii: self.radii,
            style: Style::stroked(defaults::STROKE, defaults::STROKE_WIDTH)
                .with_fill(defaults::FILL),
        });
        section(surface, self.bottom, self.radii);
        edge(surface, self.top - rx, self.bottom - rx, false);
        edge(surface, self.top + rx, self.bottom + rx, false);
        edge(surface, self.bottom, self.bottom + rx, true);
        centre_dot(surface, self.bottom);
    }

    fn label_anchors(&self) -> Vec<LabelAnchor> {
        vec![
            LabelAnchor {
                dimension: Dimension::Height,
                at: dvec2(self.top.x + self.radii.x + 10.0, (self.top.y + self.bottom.y) / 2.0),
                anchor: TextAnchor::Start,
            },
            LabelAnchor {
                dimension: Dimension::Radius,
                at: self.bottom + dvec2(self.radii.x / 2.0, -9.0),
                anchor: TextAnchor::Middle,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cone {
    apex: DVec2,
    base: DVec2,
    radii: DVec2,
}

impl Wireframe for Cone {
    fn draw(&self, surface: &mut dyn DrawingSurface) {
        let rx = dvec2(self.radii.x, 0.0);
        section(surface, self.base, self.radii);
        edge(surface, self.apex, self.base - rx, false);
        edge(surface, self.apex, self.base + rx, false);
        edge(surface, self.apex, self.base, true);
        edge(surface, self.base, self.base + rx, true);
        centre_dot(surface, self.base);
    }

    fn label_anchors(&self) -> Vec<LabelAnchor> {
        vec![
            LabelAnchor {
                dimension: Dimension::Height,
                at: dvec2(self.apex.x + 6.0, (self.apex.y + self.base.y) / 2.0),
                anchor: TextAnchor::Start,
            },
            LabelAnchor {
                dimension: Dimension::Radius,
                at: self.base + dvec2(self.radii.x / 2.0, -9.0),
                anchor: TextAnchor::Middle,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: DVec2,
    radius: f64,
    /// Equator height as a fraction of the radius.
    flatten: f64,
}

impl Wireframe for Sphere {
    fn draw(&self, surface: &mut dyn DrawingSurface) {
        surface.append(Node::Circle {
            center: self.center,
            r: self.radius,
            style: Style::stroked(defaults::STROKE, defaults::STROKE_WIDTH)
                .with_fill(defaults::FILL),
        });
        section(
            surface,
            self.center,
            dvec2(self.radius, self.radius * self.flatten),
        );
        edge(surface, self.center, self.center + dvec2(self.radius, 0.0), true);
        centre_dot(surface, self.center);
    }

    fn label_anchors(&self) -> Vec<LabelAnchor> {
        vec![LabelAnchor {
            dimension: Dimension::Radius,
            at: self.center + dvec2(self.radius / 2.0, -9.0),
            anchor: TextAnchor::Middle,
        }]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pyramid {
    /// Front-left, front-right, back-right, back-left.
    base: [DVec2; 4],
    apex_y: f64,
}

impl Pyramid {
    fn foot(&self) -> DVec2 {
        (self.base[0] + self.base[2]) / 2.0
    }

    fn apex(&self) -> DVec2 {
        dvec2(self.foot().x, self.apex_y)
    }
}

impl Wireframe for Pyramid {
    fn draw(&self, surface: &mut dyn DrawingSurface) {
        let [a, b, c, d] = self.base;
        let apex = self.apex();
        for (from, to) in [(a, b), (b, c), (apex, a), (apex, b), (apex, c)] {
            edge(surface, from, to, false);
        }
        for (from, to) in [(a, d), (d, c), (apex, d), (apex, self.foot())] {
            edge(surface, from, to, true);
        }
    }

    fn label_anchors(&self) -> Vec<LabelAnchor> {
        let [a, b, ..] = self.base;
        vec![
            LabelAnchor {
                dimension: Dimension::Height,
                at: dvec2(self.foot().x + 6.0, (self.apex_y + self.foot().y) / 2.0),
                anchor: TextAnchor::Start,
            },
            LabelAnchor {
                dimension: Dimension::BaseEdge,
                at: (a + b) / 2.0 + dvec2(0.0, 16.0),
                anchor: TextAnchor::Middle,
            },
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prism {
    /// Bottom face: front-left, front-right, back-right, back-left.
    base: [DVec2; 4],
    height: f64,
}

impl Wireframe for Prism {
    fn draw(&self, surface: &mut dyn DrawingSurface) {
        let [a, b, c, d] = self.base;
        let up = dvec2(0.0, -self.height);
        let [a2, b2, c2, d2] = [a + up, b + up, c + up, d + up];
        surface.append(Node::Polygon {
            points: vec![a, b, b2, a2],
            style: Style::filled(defaults::FILL),
        });
        let visible = [
            (a, b),
            (b, b2),
            (b2, a2),
            (a2, a),
            (a2, d2),
            (d2, c2),
            (c2, b2),
            (b, c),
            (c, c2),
        ];
        for (from, to) in visible {
            edge(surface, from, to, false);
        }
        for (from, to) in [(a, d), (d, c), (d, d2)] {
            edge(surface, from, to, true);
        }
    }

    fn label_anchors(&self) -> Vec<LabelAnchor> {
        let [a, b, ..] = self.base;
        vec![
            LabelAnchor {
                dimension: Dimension::Height,
                at: dvec2(a.x - 8.0, a.y - self.height / 2.0),
                anchor: TextAnchor::End,
            },
            LabelAnchor {
                dimension: Dimension::BaseEdge,
                at: (a + b) / 2.0 + dvec2(0.0, 16.0),
                anchor: TextAnchor::Middle,
            },
        ]
    }
}

/// Label text: the explicit label, else the measured value with its unit.
fn dimension_text(spec: &VolumeSpec, dimension: Dimension) -> Option<String> {
    let (label, value) = match dimension {
        Dimension::Height => (&spec.labels.h, spec.dimensions.h),
        Dimension::Radius => (&spec.labels.r, spec.dimensions.r),
        Dimension::BaseEdge => (&spec.labels.a, spec.dimensions.a),
    };
    label.clone().or_else(|| {
        let value = fmt_coord(value?);
        Some(match &spec.dimensions.unit {
            Some(unit) => format!("{value} {unit}"),
            None => value,
        })
    })
}

pub fn build(container: &mut Container, spec: &VolumeSpec) -> Option<SurfaceRef> {
    let options = spec.frame.options(ContextOptions::default());
    let size = dvec2(options.width, options.height);
    let Some(solid) = Solid::new(spec.shape, size) else {
        warn!(shape = ?spec.shape, "no wireframe for this solid");
        return None;
    };

    let surface = container.append_surface(size);
    {
        let mut surface = surface.borrow_mut();
        solid.draw(&mut *surface);
        let style = Style::text(defaults::LABEL_COLOR, defaults::FONT_SIZE, TextAnchor::Start).bold();
        for anchor in solid.label_anchors() {
            if let Some(content) = dimension_text(spec, anchor.dimension) {
                surface.append(Node::Text {
                    at: anchor.at,
                    content,
                    style: Style {
                        anchor: Some(anchor.anchor),
                        ..style.clone()
                    },
                });
            }
        }
    }
    debug!(shape = ?spec.shape, "volume");
    Some(surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{DiagramSpec, parse_spec};

    fn render(json: &str) -> (Container, Option<SurfaceRef>) {
        let DiagramSpec::Volume(spec) = parse_spec("<test>", json).unwrap() else {
            panic!("wrong variant");
        };
        let mut container = Container::new();
        let surface = build(&mut container, &spec);
        (container, surface)
    }

    #[test]
    fn cylinder_labels_come_from_dimensions() {
        let (_, surface) = render(
            r#"{"type": "volume", "shape": "cylinder", "dimensions": {"h": 10, "r": 3, "unit": "cm"}}"#,
        );
        let svg = surface.unwrap().borrow().to_svg();
        assert!(svg.contains(">10 cm<"));
        assert!(svg.contains(">3 cm<"));
        assert!(svg.contains("<ellipse"));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn explicit_labels_win() {
        let (_, surface) = render(
            r#"{"type": "volume", "shape": "pyramid", "dimensions": {"h": 4, "a": 3}, "labels": {"h": "h"}}"#,
        );
        let svg = surface.unwrap().borrow().to_svg();
        assert!(svg.contains(">h<"));
        assert!(svg.contains(">3<"));
    }

    #[test]
    fn sphere_has_no_height_label() {
        let (_, surface) = render(
            r#"{"type": "volume", "shape": "sphere", "labels": {"h": "H", "r": "R"}}"#,
        );
        let svg = surface.unwrap().borrow().to_svg();
        assert!(svg.contains(">R<"));
        assert!(!svg.contains(">H<"));
    }

    #[test]
    fn every_solid_draws() {
        for shape in ["cylinder", "cone", "sphere", "pyramid", "prism"] {
            let (container, surface) =
                render(&format!(r#"{{"type": "volume", "shape": "{shape}"}}"#));
            assert!(surface.is_some(), "{shape}");
            assert_eq!(container.len(), 1);
        }
    }

    #[test]
    fn unknown_solid_draws_nothing() {
        let (container, surface) = render(r#"{"type": "volume", "shape": "torus"}"#);
        assert!(surface.is_none());
        assert!(container.is_empty());
    }

    #[test]
    fn pyramid_apex_is_above_the_base_centre() {
        let Some(Solid::Pyramid(p)) = Solid::new(SolidKind::Pyramid, dvec2(300.0, 250.0)) else {
            panic!("pyramid");
        };
        assert_eq!(p.apex().x, p.foot().x);
        assert!(p.apex().y < p.foot().y);
    }
}
